//! Message handlers
//!
//! Command handlers own one bounded context each and apply commands to
//! aggregates. Event handlers receive every event and project the ones they
//! care about into read models. Both work exclusively through the
//! `HandlerContext`'s unit of work.

mod catalog_commands;
mod catalog_index;
mod context;
mod identity_commands;
mod location_commands;
mod location_user_record;
mod ordering_buyer;

pub use catalog_commands::CatalogCommandHandler;
pub use catalog_index::CatalogIndexHandler;
pub use context::HandlerContext;
pub use identity_commands::IdentityCommandHandler;
pub use location_commands::LocationCommandHandler;
pub use location_user_record::LocationUserRecordHandler;
pub use ordering_buyer::OrderingBuyerHandler;

use async_trait::async_trait;

use crate::application::services::unit_of_work::UnitOfWorkError;
use crate::domain::commands::{Command, Context};
use crate::domain::events::Event;

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// A business rule refused the message
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    UnitOfWork(#[from] UnitOfWorkError),
}

impl HandlerError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        HandlerError::Rejected(reason.into())
    }

    /// Whether the dispatcher should try the message again
    pub fn is_transient(&self) -> bool {
        match self {
            HandlerError::Rejected(_) => false,
            HandlerError::UnitOfWork(e) => e.is_transient(),
        }
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// The bounded context whose commands this handler owns
    fn context(&self) -> Context;

    async fn handle(&self, command: &Command, ctx: &mut HandlerContext) -> Result<(), HandlerError>;
}

#[async_trait]
pub trait EventHandler: Send + Sync {
    fn name(&self) -> &'static str;

    /// Handle an event; events the handler does not project are ignored
    async fn handle(&self, event: &Event, ctx: &mut HandlerContext) -> Result<(), HandlerError>;
}

fn unsupported(handler: Context, command: &Command) -> HandlerError {
    HandlerError::rejected(format!(
        "{} handler cannot handle {}",
        handler,
        command.command_type()
    ))
}
