// ABOUTME: Developer CLI for the Gigs backend: create user accounts and issue bearer tokens
// ABOUTME: Stands in for the external registration/login service in local setups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

//! # Gigs CLI
//!
//! ```bash
//! # Create a performer account
//! cargo run --bin gigs-cli -- user create --username dj_nimal --email nimal@example.com --role performer
//!
//! # Issue a token for user 1
//! cargo run --bin gigs-cli -- token issue --user-id 1
//! ```

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use gigs_backend::auth::AuthManager;
use gigs_backend::config::ServerConfig;
use gigs_backend::database::Database;
use gigs_backend::logging;
use gigs_backend::models::{UserId, UserRole};

#[derive(Parser)]
#[command(name = "gigs-cli", about = "Gigs backend developer tooling")]
struct Cli {
    /// Database URL override (otherwise DATABASE_URL)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// User account management
    #[command(subcommand)]
    User(UserCommand),
    /// Bearer token management
    #[command(subcommand)]
    Token(TokenCommand),
}

#[derive(Subcommand)]
enum UserCommand {
    /// Create a user account
    Create {
        /// Display handle
        #[arg(long)]
        username: String,
        /// Unique email
        #[arg(long)]
        email: String,
        /// host, performer or admin
        #[arg(long, default_value = "performer")]
        role: UserRole,
    },
}

#[derive(Subcommand)]
enum TokenCommand {
    /// Issue a bearer token for an existing user
    Issue {
        /// User id
        #[arg(long)]
        user_id: UserId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(database_url) = cli.database_url {
        config.database.url = database_url;
    }
    logging::init(&config.logging)?;

    let database = Database::new(&config.database).await?;

    match cli.command {
        Command::User(UserCommand::Create {
            username,
            email,
            role,
        }) => {
            let user = database.create_user(&username, &email, role).await?;
            info!(user_id = user.id, role = %user.role, "user created");
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Command::Token(TokenCommand::Issue { user_id }) => {
            let user = database
                .get_user(user_id)
                .await?
                .ok_or_else(|| anyhow!("user {user_id} not found"))?;
            let auth = AuthManager::new(&config.auth.jwt_secret, config.auth.token_ttl_hours);
            println!("{}", auth.generate_token(&user)?);
        }
    }

    database.close().await;
    Ok(())
}
