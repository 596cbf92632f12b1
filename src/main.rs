//! taskd - an HTTP service for managing task records in MongoDB.
//!
//! Usage:
//!   taskd [--mongo-uri <URI>] [--port <PORT>]
//!
//! Every setting can also come from the environment (MONGO_URI, PORT,
//! MONGO_DATABASE, MONGO_COLLECTION).

use clap::Parser;
use std::sync::Arc;
use taskd::api::{self, ApiConfig, ApiState};
use taskd::storage::{MongoStore, StoreConfig};
use tracing::info;

/// taskd - task records over HTTP
#[derive(Parser)]
#[command(name = "taskd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// MongoDB connection string
    #[arg(long, env = "MONGO_URI", default_value = "mongodb://localhost:27017")]
    mongo_uri: String,

    /// Database holding the task collection
    #[arg(long, env = "MONGO_DATABASE", default_value = "taskd")]
    database: String,

    /// Collection holding the task documents
    #[arg(long, env = "MONGO_COLLECTION", default_value = "tasks")]
    collection: String,

    /// Host to bind the HTTP listener to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port for the HTTP listener
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = StoreConfig {
        uri: cli.mongo_uri,
        database: cli.database,
        collection: cli.collection,
    };

    info!("connecting to document store at {}", config.uri);
    let store = MongoStore::connect(config).await?;
    info!("store connection verified");

    let state = ApiState::new(Arc::new(store));
    api::serve(ApiConfig::new(cli.host, cli.port), state).await?;

    Ok(())
}
