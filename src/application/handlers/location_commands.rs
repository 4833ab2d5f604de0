//! Location command handler

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::domain::commands::{Command, Context};
use crate::domain::entities::{Location, User};
use crate::domain::events::Event;

use super::{unsupported, CommandHandler, HandlerContext, HandlerError};

#[derive(Debug, Default)]
pub struct LocationCommandHandler;

impl LocationCommandHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandHandler for LocationCommandHandler {
    fn context(&self) -> Context {
        Context::Location
    }

    #[instrument(skip(self, command, ctx), fields(command_type = command.command_type()))]
    async fn handle(&self, command: &Command, ctx: &mut HandlerContext) -> Result<(), HandlerError> {
        match command {
            Command::AddLocation {
                location_id,
                code,
                description,
            } => {
                if code.trim().is_empty() {
                    return Err(HandlerError::rejected("Location code cannot be empty"));
                }
                let mut location = Location::new(*location_id, code.clone());
                if let Some(description) = description {
                    location = location.with_description(description.clone());
                }
                ctx.uow().add(location_id, &location).await?;
                ctx.publish(Event::LocationAdded {
                    location_id: *location_id,
                    code: code.clone(),
                });
                info!("Added location {} ({})", code, location_id);
            }
            Command::RecordUser {
                record_id,
                location_id,
                user_name,
            } => {
                ctx.uow().get::<Location>(location_id).await?;
                ctx.uow().get::<User>(user_name).await?;
                ctx.publish(Event::UserRecorded {
                    record_id: *record_id,
                    location_id: *location_id,
                    user_id: user_name.clone(),
                });
                info!("Recorded user {} at location {}", user_name, location_id);
            }
            other => return Err(unsupported(self.context(), other)),
        }
        Ok(())
    }
}
