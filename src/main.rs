use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;

use property_ledger::api::{self, AppState};
use property_ledger::config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env();
    let (host, port) = (config.host.clone(), config.port);

    log::info!(
        "Starting property ledger API at http://{host}:{port} (difficulty default={}, max={})",
        config.default_difficulty,
        config.max_difficulty
    );

    let state = web::Data::new(AppState::new(&config));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
