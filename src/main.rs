use chemist::prelude::*;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    load_dotenv(None);
    let config = AppConfig::from_env()?;

    if let Some(warning) = config.missing_key_warning() {
        warn!("{}", warning);
    }

    let addr = config.bind_addr();
    let model = config.model.clone();
    let app = create_app(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("AI Chemist App listening on http://{} (model: {})", addr, model);

    axum::serve(listener, app).await?;

    Ok(())
}
