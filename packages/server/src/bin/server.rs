//! Top Ten multiplayer trivia server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin topten-server
//! cargo run --bin topten-server -- --host 0.0.0.0 --port 3000 --auto-advance
//! ```

use std::sync::Arc;

use clap::Parser;
use topten_server::{
    config::{CliArgs, ServerConfig},
    infrastructure::catalog::StaticQuestionCatalog,
    ui::Server,
};
use topten_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // 1. Configuration
    let config = match ServerConfig::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    // 2. Question catalog
    let catalog = match &config.catalog {
        Some(path) => match StaticQuestionCatalog::from_path(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!("{}", e);
                std::process::exit(2);
            }
        },
        None => StaticQuestionCatalog::builtin(),
    };
    tracing::info!("Question categories: {}", catalog.categories().join(", "));

    // 3. Server
    let server = Server::new(config, Arc::new(catalog), Arc::new(SystemClock));
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
