//! Command client port - How the administration client reaches the API

use async_trait::async_trait;

use crate::application::dto::CommandResponse;
use crate::domain::commands::Command;

#[derive(Debug, thiserror::Error)]
pub enum CommandClientError {
    #[error("HTTP request failed: {0}")]
    Transport(String),
    #[error("Command rejected: {0}")]
    Rejected(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

#[async_trait]
pub trait CommandClientPort: Send + Sync {
    /// Post one command and return the API's command result
    async fn command(&self, command: Command) -> Result<CommandResponse, CommandClientError>;
}
