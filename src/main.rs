use dotenvy::dotenv;
use resort_kitchen::{
    api::{self, AppState},
    config::{database, settings::AppSettings},
    core::auth::LogDelivery,
    errors::Result,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load settings (file, then environment overrides)
    let settings = AppSettings::load()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    info!("Settings loaded.");

    // 4. Connect and make sure every table exists
    let db = database::connect(&settings.database_url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Serve until Ctrl-C or SIGTERM
    let listener = TcpListener::bind(&settings.bind_address)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", settings.bind_address, e))?;
    let state = AppState::new(db.clone(), settings, Arc::new(LogDelivery));
    let served = api::serve(listener, state).await;

    db.close().await?;
    served
}
