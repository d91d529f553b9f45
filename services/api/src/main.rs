use sea_orm::Database;
use tracing::info;

use bookreview_api::config::ApiConfig;
use bookreview_api::router::build_router;
use bookreview_api::state::AppState;
use bookreview_core::tracing::{SERVER_DIRECTIVES, init_tracing};

#[tokio::main]
async fn main() {
    init_tracing(SERVER_DIRECTIVES);

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let router = build_router(AppState::new(db, config.jwt));
    let http_addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("book review API listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
