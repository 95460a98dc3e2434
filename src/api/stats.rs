use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatsResponse};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    // Taken before the ledger lock: a running seal holds it until done.
    let mining = state
        .active_seal
        .lock()
        .expect("mutex poisoned")
        .is_some();

    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(StatsResponse {
        height: ledger.len(),
        last_hash: ledger.last_block().hash.clone(),
        pending_size: ledger.pending().len(),
        registered_properties: ledger.registry().len(),
        default_difficulty: state.default_difficulty,
        max_difficulty: state.max_difficulty,
        mining,
    })
}
