//! Command response - Outcome of a posted command

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::MessageId;

/// Generic result of a posted command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub command_id: MessageId,
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Time from receiving the command to the handler's verdict
    pub round_trip_ms: u64,
}

impl CommandResponse {
    pub fn accepted(command_id: MessageId, round_trip_ms: u64) -> Self {
        Self {
            command_id,
            accepted: true,
            error: None,
            round_trip_ms,
        }
    }

    pub fn rejected(command_id: MessageId, error: impl Into<String>, round_trip_ms: u64) -> Self {
        Self {
            command_id,
            accepted: false,
            error: Some(error.into()),
            round_trip_ms,
        }
    }
}
