//! Identity command handler - User registration and enablement

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::domain::commands::{Command, Context};
use crate::domain::entities::User;
use crate::domain::events::Event;

use super::{unsupported, CommandHandler, HandlerContext, HandlerError};

#[derive(Debug, Default)]
pub struct IdentityCommandHandler;

impl IdentityCommandHandler {
    pub fn new() -> Self {
        Self
    }

    async fn set_disabled(
        ctx: &mut HandlerContext,
        user_name: &str,
        disabled: bool,
    ) -> Result<(), HandlerError> {
        let mut user: User = ctx.uow().get(user_name).await?;
        if user.disabled == disabled {
            return Err(HandlerError::rejected(format!(
                "User {} is already {}",
                user_name,
                if disabled { "disabled" } else { "enabled" }
            )));
        }
        user.disabled = disabled;
        ctx.uow().update(user_name, &user).await?;
        Ok(())
    }
}

#[async_trait]
impl CommandHandler for IdentityCommandHandler {
    fn context(&self) -> Context {
        Context::Identity
    }

    #[instrument(skip(self, command, ctx), fields(command_type = command.command_type()))]
    async fn handle(&self, command: &Command, ctx: &mut HandlerContext) -> Result<(), HandlerError> {
        match command {
            Command::RegisterUser {
                user_name,
                given_name,
            } => {
                if user_name.trim().is_empty() {
                    return Err(HandlerError::rejected("User name cannot be empty"));
                }
                if given_name.trim().is_empty() {
                    return Err(HandlerError::rejected("Given name cannot be empty"));
                }
                ctx.uow()
                    .add(user_name, &User::new(user_name.clone(), given_name.clone()))
                    .await?;
                ctx.publish(Event::UserRegistered {
                    user_name: user_name.clone(),
                    given_name: given_name.clone(),
                });
                info!(
                    "Registered user {} (by {})",
                    user_name,
                    ctx.stamp().user.as_deref().unwrap_or("anonymous")
                );
            }
            Command::EnableUser { user_name } => {
                Self::set_disabled(ctx, user_name, false).await?;
                ctx.publish(Event::UserEnabled {
                    user_name: user_name.clone(),
                });
                info!("Enabled user {}", user_name);
            }
            Command::DisableUser { user_name } => {
                Self::set_disabled(ctx, user_name, true).await?;
                ctx.publish(Event::UserDisabled {
                    user_name: user_name.clone(),
                });
                info!("Disabled user {}", user_name);
            }
            other => return Err(unsupported(self.context(), other)),
        }
        Ok(())
    }
}
