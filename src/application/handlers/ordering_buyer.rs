//! Ordering buyer projection - Keeps a buyer per identity user

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::domain::events::Event;
use crate::domain::read_models::OrderingBuyer;

use super::{EventHandler, HandlerContext, HandlerError};

#[derive(Debug, Default)]
pub struct OrderingBuyerHandler;

impl OrderingBuyerHandler {
    pub fn new() -> Self {
        Self
    }

    async fn set_disabled(
        ctx: &mut HandlerContext,
        user_name: &str,
        disabled: bool,
    ) -> Result<(), HandlerError> {
        let mut buyer: OrderingBuyer = ctx.uow().get(user_name).await?;
        buyer.disabled = disabled;
        ctx.uow().update(user_name, &buyer).await?;
        Ok(())
    }
}

#[async_trait]
impl EventHandler for OrderingBuyerHandler {
    fn name(&self) -> &'static str {
        "ordering.buyer"
    }

    #[instrument(skip(self, event, ctx), fields(event_type = event.event_type()))]
    async fn handle(&self, event: &Event, ctx: &mut HandlerContext) -> Result<(), HandlerError> {
        match event {
            Event::UserRegistered {
                user_name,
                given_name,
            } => {
                let buyer = OrderingBuyer {
                    id: user_name.clone(),
                    given_name: given_name.clone(),
                    disabled: false,
                };
                ctx.uow().add(user_name, &buyer).await?;
                debug!("Projected buyer {}", user_name);
            }
            Event::UserEnabled { user_name } => Self::set_disabled(ctx, user_name, false).await?,
            Event::UserDisabled { user_name } => Self::set_disabled(ctx, user_name, true).await?,
            _ => {}
        }
        Ok(())
    }
}
