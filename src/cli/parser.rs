//! CLI argument parsing.

use clap::{Parser, Subcommand};

/// Password-protected link repository service
#[derive(Parser, Debug)]
#[command(
    name = "linkrepo",
    version = crate::pkg_version(),
    long_version = crate::clap_long_version(),
    about = "Password-protected link repositories with a JSON API"
)]
pub struct Cli {
    /// Subcommand to run; defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind host override
        #[arg(long)]
        host: Option<String>,

        /// Bind port override
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run pending database migrations
    Migrate {
        /// Show pending migrations without applying them
        #[arg(long)]
        dry_run: bool,
    },
}
