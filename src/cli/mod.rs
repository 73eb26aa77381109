//! Command-line interface for the pet shop server.

mod commands;

use clap::{Parser, Subcommand};

/// Pet shop web service
#[derive(Parser)]
#[command(name = "petshop")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server until Ctrl+C
    #[command(alias = "-d", alias = "--daemon", alias = "daemon")]
    Serve,

    /// Ensure an admin account exists
    Bootstrap {
        /// Admin username, overrides [bootstrap] in the config
        #[arg(long)]
        username: Option<String>,
        /// Admin email
        #[arg(long)]
        email: Option<String>,
        /// Admin password
        #[arg(long)]
        password: Option<String>,
        /// Keep the password of an existing admin
        #[arg(long)]
        no_reset: bool,
    },

    /// Create a user, or reset its password when the username exists
    #[command(alias = "adduser")]
    CreateUser {
        username: String,
        email: String,
        password: String,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
