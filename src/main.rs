use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SECURITY_SESSION_SECRET, FACTORY_API_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = factory_api::config::config();
    tracing::info!("Starting Factory API in {:?} mode", config.environment);
    if config.security.session_secret.is_none() {
        tracing::info!("SECURITY_SESSION_SECRET not set; bearer sessions are ignored");
    }

    factory_api::server::serve(config).await
}
