use std::{env, sync::Arc};

use anyhow::Result;
use axum::Router;
use iptvgate_rs::{AppState, AppStateRef, load_config, routes};
use log::info;
use tokio::net::TcpListener;

fn build_app(app_state: &AppStateRef) -> Router {
    Router::new().merge(routes::get_routes(app_state))
}

async fn app_entry() -> Result<()> {
    let config = load_config(
        env::var("IPTVGATE_CONFIG_PATH").unwrap_or_else(|_| "config.yml".into()),
    )?;
    let app_state = Arc::new(AppState::new(config)?);

    let tcp_listener = TcpListener::bind(&app_state.config.listen_addr).await?;
    info!("Listening on {}", app_state.config.listen_addr);
    axum::serve(tcp_listener, build_app(&app_state)).await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(e) = app_entry().await {
        panic!("Fatal error: {}", e);
    }
}
