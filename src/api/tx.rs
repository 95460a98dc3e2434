use actix_web::{HttpResponse, Responder, get, post, web};
use chrono::Utc;
use log::{debug, info, warn};

use super::models::{AppState, ErrorResponse, PendingResponse};
use crate::transaction::Transaction;

/// Submit a transaction into the pending pool (ownership-checked against
/// the sealed registry).
#[post("/transaction/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<Transaction>,
) -> impl Responder {
    let mut tx = body.into_inner();
    if tx.timestamp == 0 {
        tx.timestamp = Utc::now().timestamp();
    }
    debug!(
        "POST /transaction/ - received: property={} from='{}' to='{}'",
        tx.property.id, tx.from, tx.to
    );

    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    match ledger.submit_transaction(tx) {
        Ok(accepted) => {
            info!(
                "POST /transaction/ - property={} queued (pending: {})",
                accepted.property.id,
                ledger.pending().len()
            );
            HttpResponse::Created().json(accepted)
        }
        Err(reason) => {
            warn!("POST /transaction/ - rejected: {reason}");
            HttpResponse::BadRequest().json(ErrorResponse {
                error: reason.to_string(),
                kind: reason.kind(),
            })
        }
    }
}

/// List the pending pool in admission order.
#[get("/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let pending = ledger.pending();
    HttpResponse::Ok().json(PendingResponse {
        size: pending.len(),
        transactions: pending,
    })
}
