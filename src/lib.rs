use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use engine::{config::Config, publisher::NullPublisher, state::CoreState};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn setup_config() -> Config {
    dotenvy::dotenv().ok();
    Config::from_env()
}

fn setup_router(state: CoreState) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::OPTIONS, Method::GET, Method::POST])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(
            state
                .config
                .allowed_origin
                .parse::<HeaderValue>()
                .expect("failed to parse allowed origin"),
        );

    api::routers::create_router(state)
        .merge(doc::swagger_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run() {
    let config = setup_config();
    let conn = utils::db::connect_and_migrate(&config.db_url)
        .await
        .expect("database connection/migration failed");

    let state = CoreState::new(conn, config.clone(), Arc::new(NullPublisher));

    let listener = tokio::net::TcpListener::bind(config.get_server_url())
        .await
        .expect("bind to port");
    tracing::info!("listening on http://{}", listener.local_addr().unwrap());

    axum::serve(listener, setup_router(state))
        .await
        .expect("server failed");
}
