//! Serve command handler

use crate::config::settings::Settings;
use crate::logger::init_logging;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    settings: Settings,
}

impl ServeCommandHandler {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Initializes logging and runs the server until shutdown.
    pub async fn execute(self) -> anyhow::Result<()> {
        init_logging(&self.settings.logger.level)?;
        Server::new(self.settings).run().await
    }
}
