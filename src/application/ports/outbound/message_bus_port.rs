//! Message bus port - Sending commands
//!
//! Events are not put on the bus from outside: the bus dispatches the events
//! a command's handlers published once the command has been committed.

use async_trait::async_trait;

use crate::domain::commands::Command;
use crate::domain::value_objects::Stamped;

#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// The handler refused the command; retrying will not help
    #[error("Command rejected: {0}")]
    Rejected(String),
    /// The handler kept failing after all retries
    #[error("Command failed: {0}")]
    Failed(String),
    #[error("Message bus is not running")]
    Unavailable,
}

#[async_trait]
pub trait MessageBusPort: Send + Sync {
    /// Send a command and wait until its handler accepted or rejected it
    async fn send(&self, command: Stamped<Command>) -> Result<(), BusError>;
}
