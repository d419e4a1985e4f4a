use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use coachbook_api::config::ApiConfig;
use coachbook_db::{create_pool, schema::initialize_database, PgBookingStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    coachbook_api::init_tracing(&config)?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.db_max_connections).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Start API server
    let store = Arc::new(PgBookingStore::new(db_pool));
    coachbook_api::start_server(config, store).await?;

    Ok(())
}
