use openhours::{config, router, AppState, DateStore};
use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let db_path = config::resolve_db_path();
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let settings = config::load_settings(&config::resolve_settings_path()).await;
    let admin_token = config::admin_token();
    if admin_token.is_none() {
        warn!("ADMIN_TOKEN is not set; all write requests will be rejected");
    }

    let store = DateStore::open(&db_path)?;
    info!("{} enabled date(s) on record", store.count_enabled()?);

    let state = AppState::new(store, settings, admin_token);
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
