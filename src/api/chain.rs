use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, error, info, warn};

use super::models::{
    AppState, CancelResponse, ChainResponse, ErrorResponse, MineRequest, MineResponse,
    ValidateResponse,
};
use crate::blockchain::CancelToken;
use crate::error::SealError;

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let chain = ledger.export_chain();
    HttpResponse::Ok().json(ChainResponse {
        length: chain.len(),
        chain,
    })
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let verdict = ledger.verify_chain();
    HttpResponse::Ok().json(ValidateResponse {
        valid: verdict.is_ok(),
        length: ledger.len(),
        fault: verdict.err().map(|fault| fault.to_string()),
    })
}

/// Seal the pending pool into a new block.
/// Missing/empty miner becomes "anonymous"; missing or zero difficulty
/// falls back to the configured default.
#[post("/mine/")]
pub async fn mine_block(
    state: web::Data<AppState>,
    body: Option<web::Json<MineRequest>>,
) -> impl Responder {
    let req = body.map(web::Json::into_inner).unwrap_or_default();
    let miner = req
        .miner
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "anonymous".to_string());
    let difficulty = req
        .difficulty
        .filter(|d| *d > 0)
        .unwrap_or(state.default_difficulty);

    if difficulty > state.max_difficulty {
        warn!("POST /mine/ - difficulty {difficulty} above max {}", state.max_difficulty);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: format!(
                "difficulty {difficulty} too high (max {})",
                state.max_difficulty
            ),
            kind: "invalid_difficulty",
        });
    }

    let token = CancelToken::new();
    {
        let mut active = state.active_seal.lock().expect("mutex poisoned");
        *active = Some(token.clone());
    }
    debug!("POST /mine/ - miner={miner} difficulty={difficulty}");

    // Proof-of-work is CPU bound: run it on the blocking pool, holding the
    // ledger lock for the whole seal.
    let seal_state = state.clone();
    let seal_token = token.clone();
    let outcome = web::block(move || {
        let mut ledger = seal_state.ledger.lock().expect("mutex poisoned");
        ledger.seal_block_with_cancel(&miner, difficulty, &seal_token)
    })
    .await;

    // A newer request may have taken the slot while this one waited.
    {
        let mut active = state.active_seal.lock().expect("mutex poisoned");
        if active.as_ref().is_some_and(|current| current.same_as(&token)) {
            *active = None;
        }
    }

    match outcome {
        Ok(Ok(Some(summary))) => {
            info!(
                "POST /mine/ - sealed block #{} (hash={}, nonce={})",
                summary.index, summary.hash, summary.nonce
            );
            HttpResponse::Ok().json(MineResponse {
                sealed: true,
                message: "Block mined",
                block: Some(summary),
            })
        }
        Ok(Ok(None)) => HttpResponse::Ok().json(MineResponse {
            sealed: false,
            message: "nothing to seal",
            block: None,
        }),
        Ok(Err(e)) => {
            let body = ErrorResponse {
                error: e.to_string(),
                kind: e.kind(),
            };
            match e {
                SealError::InvalidDifficulty { .. } => HttpResponse::BadRequest().json(body),
                SealError::Cancelled { .. } => HttpResponse::Conflict().json(body),
                SealError::NonceExhausted => HttpResponse::InternalServerError().json(body),
            }
        }
        Err(e) => {
            error!("POST /mine/ - sealing task failed: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
                kind: "internal",
            })
        }
    }
}

/// Ask the running seal, if any, to give up.
#[post("/mine/cancel/")]
pub async fn cancel_mining(state: web::Data<AppState>) -> impl Responder {
    let active = state.active_seal.lock().expect("mutex poisoned");
    let cancelled = match active.as_ref() {
        Some(token) => {
            token.cancel();
            info!("POST /mine/cancel/ - cancellation requested");
            true
        }
        None => false,
    };
    HttpResponse::Ok().json(CancelResponse { cancelled })
}
