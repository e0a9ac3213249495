use heartguard::api::AppState;
use heartguard::{banner, config, server};
use log::info;
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    banner::print_banner();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  No .env file loaded ({}), using process environment", e);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = config::AppConfig::from_env().map_err(std::io::Error::other)?;
    let bind_address = app_config.bind_address();

    let listener = TcpListener::bind(&bind_address)?;
    info!("🚀 Risk scoring API listening on http://{}", listener.local_addr()?);
    info!("👷 Workers: {}", app_config.server.workers);

    let state = AppState::new(app_config);
    server::build_server(listener, state)?.await
}
