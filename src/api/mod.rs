mod chain;
mod health;
pub mod models;
mod property;
mod stats;
mod tx;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(chain::mine_block)
            .service(chain::cancel_mining)
            .service(tx::post_transaction)
            .service(tx::get_pending)
            .service(property::get_property)
            .service(property::get_property_history)
            .service(stats::get_stats),
    );
}
