mod catalog;
mod config;
mod error;
mod format;
mod grouping;
mod models;
mod ranking;
mod routes;
mod views;

use std::{sync::Arc, time::Duration};

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{catalog::CatalogClient, config::Config};

pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<CatalogClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,lagos_cinema_guide=debug".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("lagos-cinema-guide/0.1")
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    let catalog = CatalogClient::new(
        http,
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
        config.supabase_rps,
    );

    let state = Arc::new(AppState { config: config.clone(), catalog: Arc::new(catalog) });

    let app = routes::router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, tz = ?config.display_tz.iana_name(), "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
