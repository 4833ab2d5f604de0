//! Location user record projection
//!
//! When a user is recorded at a location, copy the location code and the
//! user's given name into a flat record keyed by the event's record id.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::domain::entities::{Location, User};
use crate::domain::events::Event;
use crate::domain::read_models::LocationUserRecord;

use super::{EventHandler, HandlerContext, HandlerError};

#[derive(Debug, Default)]
pub struct LocationUserRecordHandler;

impl LocationUserRecordHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler for LocationUserRecordHandler {
    fn name(&self) -> &'static str {
        "location.user_record"
    }

    #[instrument(skip(self, event, ctx), fields(event_type = event.event_type()))]
    async fn handle(&self, event: &Event, ctx: &mut HandlerContext) -> Result<(), HandlerError> {
        let Event::UserRecorded {
            record_id,
            location_id,
            user_id,
        } = event
        else {
            return Ok(());
        };

        let location: Location = ctx.uow().get(location_id).await?;
        let user: User = ctx.uow().get(user_id).await?;

        let model = LocationUserRecord {
            id: *record_id,
            code: location.code,
            location_id: location.id,
            name: user.given_name,
            user_name: user.id,
        };

        ctx.uow().add(record_id, &model).await?;
        debug!("Projected location user record {}", record_id);
        Ok(())
    }
}
