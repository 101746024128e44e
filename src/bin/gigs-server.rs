// ABOUTME: Server binary for the Gigs marketplace profile backend
// ABOUTME: Loads environment configuration, opens the database and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

//! # Gigs Server
//!
//! ```bash
//! # Serve with environment configuration
//! cargo run --bin gigs-server
//!
//! # Override port and database
//! cargo run --bin gigs-server -- --port 5000 --database-url sqlite:./data/dev.db
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use gigs_backend::config::ServerConfig;
use gigs_backend::database::Database;
use gigs_backend::logging;
use gigs_backend::resources::ServerResources;
use gigs_backend::server;
use gigs_backend::uploads::DiskUploadStore;

#[derive(Parser)]
#[command(
    name = "gigs-server",
    about = "Gigs marketplace profile backend",
    long_about = "Serve the host and performer profile API"
)]
struct ServerArgs {
    /// HTTP port override (otherwise HTTP_PORT / PORT)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// Database URL override (otherwise DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }

    logging::init(&config.logging)?;
    info!(
        environment = %config.environment,
        port = config.http_port,
        "=== Gigs Backend starting ==="
    );

    DiskUploadStore::new(&config.uploads).ensure_dir().await?;
    let database = Database::new(&config.database).await?;

    server::serve(ServerResources::new(config, database)).await?;
    Ok(())
}
