use std::sync::Arc;

use cafedex::config::Config;
use cafedex::state::AppState;
use cafedex::{db, routes};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cafedex=info,tower_http=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let pool = db::connect(&config.database_url).await?;
    info!(database = %config.database_url, "database ready");

    let state = Arc::new(AppState::new(&config, pool)?);
    let app = routes::build_app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "cafedex listening");
    axum::serve(listener, app).await?;

    Ok(())
}
