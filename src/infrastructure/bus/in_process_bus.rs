//! In-process message bus
//!
//! A single worker drains one FIFO channel. Events produced while handling a
//! message are dispatched before the next message is taken off the channel,
//! so a command's projections are up to date before any later command runs.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::application::ports::outbound::{BusError, MessageBusPort};
use crate::application::services::{DispatchError, MessageDispatcher};
use crate::domain::commands::Command;
use crate::domain::value_objects::Stamped;

struct Delivery {
    command: Stamped<Command>,
    reply: oneshot::Sender<Result<(), BusError>>,
}

/// Sending half of the bus; cheap to clone
#[derive(Clone)]
pub struct InProcessBus {
    tx: mpsc::UnboundedSender<Delivery>,
}

impl InProcessBus {
    /// Create a bus and the worker that must be spawned to drive it
    pub fn new(dispatcher: Arc<MessageDispatcher>) -> (Self, BusWorker) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, BusWorker { rx, dispatcher })
    }
}

#[async_trait]
impl MessageBusPort for InProcessBus {
    async fn send(&self, command: Stamped<Command>) -> Result<(), BusError> {
        let (reply, outcome) = oneshot::channel();
        self.tx
            .send(Delivery { command, reply })
            .map_err(|_| BusError::Unavailable)?;
        outcome.await.map_err(|_| BusError::Unavailable)?
    }
}

impl From<DispatchError> for BusError {
    fn from(e: DispatchError) -> Self {
        match e {
            DispatchError::NoHandler(_) | DispatchError::Rejected(_) => {
                BusError::Rejected(e.to_string())
            }
            DispatchError::Exhausted { .. } => BusError::Failed(e.to_string()),
        }
    }
}

/// Receiving half of the bus
pub struct BusWorker {
    rx: mpsc::UnboundedReceiver<Delivery>,
    dispatcher: Arc<MessageDispatcher>,
}

impl BusWorker {
    /// Process messages until every `InProcessBus` handle is dropped
    ///
    /// This should be spawned as a background task
    pub async fn run(mut self) {
        tracing::info!("Starting message bus worker");
        while let Some(delivery) = self.rx.recv().await {
            self.process(delivery).await;
        }
        tracing::info!("Message bus worker shutting down");
    }

    async fn process(&self, delivery: Delivery) {
        let Delivery { command, reply } = delivery;
        let mut follow_ups = VecDeque::new();

        let outcome = match self.dispatcher.dispatch_command(&command).await {
            Ok(events) => {
                follow_ups.extend(events);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "Command {} ({}) not accepted: {}",
                    command.message.command_type(),
                    command.id(),
                    e
                );
                Err(BusError::from(e))
            }
        };
        // The sender may have given up waiting
        let _ = reply.send(outcome);

        while let Some(event) = follow_ups.pop_front() {
            match self.dispatcher.dispatch_event(&event).await {
                Ok(events) => follow_ups.extend(events),
                Err(e) => {
                    tracing::error!(
                        "Dropping event {} ({}): {}",
                        event.message.event_type(),
                        event.id(),
                        e
                    );
                }
            }
        }
    }
}
