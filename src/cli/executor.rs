//! CLI command dispatch.

use crate::cli::handlers::{MigrateCommandHandler, ServeCommandHandler};
use crate::cli::parser::{Cli, Commands};
use crate::config::ConfigLoader;

pub struct Executor;

impl Executor {
    /// Loads settings, applies CLI overrides and runs the chosen command.
    /// A bare invocation serves.
    pub async fn execute(cli: Cli) -> anyhow::Result<()> {
        let loader = ConfigLoader::new();
        let mut settings = loader.load()?;

        let command = cli.command.unwrap_or(Commands::Serve {
            host: None,
            port: None,
        });

        match command {
            Commands::Serve { host, port } => {
                if let Some(host) = host {
                    settings.server.host = host;
                }
                if let Some(port) = port {
                    settings.server.port = port;
                }
                ServeCommandHandler::new(settings).execute().await
            }
            Commands::Migrate { dry_run } => {
                MigrateCommandHandler::new(settings)
                    .execute(dry_run)
                    .await?;
                Ok(())
            }
        }
    }
}
