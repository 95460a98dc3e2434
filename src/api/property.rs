use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ErrorResponse, HistoryResponse};

#[get("/property/{id}/")]
pub async fn get_property(state: web::Data<AppState>, path: web::Path<(String,)>) -> impl Responder {
    let id = path.into_inner().0;
    let ledger = state.ledger.lock().expect("mutex poisoned");
    match ledger.get_property(&id) {
        Ok(property) => HttpResponse::Ok().json(property),
        Err(e) => HttpResponse::NotFound().json(ErrorResponse {
            error: e.to_string(),
            kind: e.kind(),
        }),
    }
}

/// Sealed transactions touching a property, oldest first.
#[get("/property/{id}/history/")]
pub async fn get_property_history(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
) -> impl Responder {
    let id = path.into_inner().0;
    let entries = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.property_history(&id)
    };

    if entries.is_empty() {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: format!("no sealed history for property: {id}"),
            kind: "not_found",
        });
    }
    HttpResponse::Ok().json(HistoryResponse { id, entries })
}
