mod application;
mod domain;
mod infrastructure;
mod presentation;

#[cfg(test)]
mod testing;

use infrastructure::{AppContainer, Settings, create_connection_pool, run_migrations};
use presentation::http::middleware::ApiKey;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env()?;
    if settings.api_key.is_empty() {
        tracing::warn!("API_KEY is not set; document write routes will reject every request");
    }

    let db_pool = create_connection_pool(&settings.database_url)?;
    run_migrations(&db_pool)?;

    let container = AppContainer::new(&settings, db_pool)?;
    let server = container.http_server(
        ApiKey::new(settings.api_key.clone()),
        settings.app_name.clone(),
        Some(settings.port),
    );

    server.run().await
}
