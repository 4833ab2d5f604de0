//! Message stamps - Envelope metadata carried by every command and event

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MessageId;

/// Metadata stamped onto a message when it enters the bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    pub message_id: MessageId,
    pub timestamp: DateTime<Utc>,
    /// Shared by every message descending from the same originating request
    pub correlation_id: Option<MessageId>,
    /// The message whose handling produced this one
    pub causation_id: Option<MessageId>,
    /// User that issued the originating request, if known
    pub user: Option<String>,
}

impl Stamp {
    pub fn new() -> Self {
        Self {
            message_id: MessageId::new(),
            timestamp: Utc::now(),
            correlation_id: None,
            causation_id: None,
            user: None,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Stamp for a message produced while handling `parent`
    pub fn caused_by(parent: &Stamp) -> Self {
        Self {
            message_id: MessageId::new(),
            timestamp: Utc::now(),
            correlation_id: Some(parent.correlation_id.unwrap_or(parent.message_id)),
            causation_id: Some(parent.message_id),
            user: parent.user.clone(),
        }
    }
}

impl Default for Stamp {
    fn default() -> Self {
        Self::new()
    }
}

/// A message together with its stamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamped<T> {
    pub stamp: Stamp,
    pub message: T,
}

impl<T> Stamped<T> {
    pub fn new(message: T) -> Self {
        Self {
            stamp: Stamp::new(),
            message,
        }
    }

    pub fn with_stamp(stamp: Stamp, message: T) -> Self {
        Self { stamp, message }
    }

    pub fn id(&self) -> MessageId {
        self.stamp.message_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caused_by_links_parent() {
        let parent = Stamp::new().with_user("alice");
        let child = Stamp::caused_by(&parent);

        assert_ne!(child.message_id, parent.message_id);
        assert_eq!(child.causation_id, Some(parent.message_id));
        // Root message becomes the correlation id
        assert_eq!(child.correlation_id, Some(parent.message_id));
        assert_eq!(child.user.as_deref(), Some("alice"));

        let grandchild = Stamp::caused_by(&child);
        assert_eq!(grandchild.correlation_id, Some(parent.message_id));
        assert_eq!(grandchild.causation_id, Some(child.message_id));
    }
}
