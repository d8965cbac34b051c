pub mod config;
pub mod container;
pub mod database;
pub mod external_services;

// Re-export commonly used items
pub use config::Settings;
pub use container::AppContainer;
pub use database::{create_connection_pool, run_migrations};
