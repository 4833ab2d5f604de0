//! Command API route

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::application::dto::CommandResponse;
use crate::application::ports::outbound::BusError;
use crate::domain::commands::Command;
use crate::domain::value_objects::{Stamp, Stamped};
use crate::infrastructure::state::AppState;

/// Header carrying the name of the user issuing the command
pub const USER_HEADER: &str = "x-user-name";

/// Accept a command, hand it to the bus and wait for its outcome
pub async fn post_command(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(command): Json<Command>,
) -> Result<Json<CommandResponse>, (StatusCode, Json<CommandResponse>)> {
    let started = Instant::now();

    let mut stamp = Stamp::new();
    if let Some(user) = headers.get(USER_HEADER).and_then(|v| v.to_str().ok()) {
        stamp = stamp.with_user(user);
    }
    let command_id = stamp.message_id;
    tracing::debug!("Received {} as {}", command.command_type(), command_id);

    let outcome = state.bus.send(Stamped::with_stamp(stamp, command)).await;
    let elapsed = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(()) => Ok(Json(CommandResponse::accepted(command_id, elapsed))),
        Err(e) => {
            let status = match e {
                BusError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
                BusError::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
                BusError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            };
            Err((
                status,
                Json(CommandResponse::rejected(command_id, e.to_string(), elapsed)),
            ))
        }
    }
}
