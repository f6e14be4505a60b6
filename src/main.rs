use quiz_server::{
    catalog::Catalog,
    config::{get_config, init_config},
    routes, store, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    init_config()?;
    let config = get_config();

    // Without a catalog there is nothing to serve; fail before binding.
    let catalog = Catalog::load(&config.questions_path, config.shuffle_questions).await?;
    let session_store = store::from_config(config).await?;

    let app_state = AppState::new(catalog, session_store, &config.session_secret);
    let app = routes::router(app_state);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
