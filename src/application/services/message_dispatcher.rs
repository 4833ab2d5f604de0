//! Message Dispatcher - Runs handlers for one message inside a unit of work
//!
//! Commands go to the single handler registered for their context; events go
//! to every event handler. Each attempt gets a fresh unit of work. When all
//! handlers succeed the staged writes are committed and the events they
//! published are returned, stamped as caused by the handled message.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::handlers::{
    CatalogCommandHandler, CatalogIndexHandler, CommandHandler, EventHandler, HandlerContext,
    HandlerError, IdentityCommandHandler, LocationCommandHandler, LocationUserRecordHandler,
    OrderingBuyerHandler,
};
use crate::application::ports::outbound::DocumentStorePort;
use crate::application::services::unit_of_work::UnitOfWork;
use crate::domain::commands::{Command, Context};
use crate::domain::events::Event;
use crate::domain::value_objects::{Stamp, Stamped};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("No handler registered for {0} commands")]
    NoHandler(Context),
    #[error("{0}")]
    Rejected(HandlerError),
    #[error("Failed after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: HandlerError,
    },
}

enum Inbound<'a> {
    Command(&'a Arc<dyn CommandHandler>, &'a Command),
    Event(&'a Event),
}

pub struct MessageDispatcher {
    store: Arc<dyn DocumentStorePort>,
    command_handlers: HashMap<Context, Arc<dyn CommandHandler>>,
    event_handlers: Vec<Arc<dyn EventHandler>>,
    immediate_retries: u32,
}

impl MessageDispatcher {
    pub fn new(store: Arc<dyn DocumentStorePort>, immediate_retries: u32) -> Self {
        Self {
            store,
            command_handlers: HashMap::new(),
            event_handlers: Vec::new(),
            immediate_retries,
        }
    }

    /// Dispatcher with every handler of the platform registered
    pub fn with_platform_handlers(store: Arc<dyn DocumentStorePort>, immediate_retries: u32) -> Self {
        Self::new(store, immediate_retries)
            .with_command_handler(Arc::new(CatalogCommandHandler::new()))
            .with_command_handler(Arc::new(IdentityCommandHandler::new()))
            .with_command_handler(Arc::new(LocationCommandHandler::new()))
            .with_event_handler(Arc::new(CatalogIndexHandler::new()))
            .with_event_handler(Arc::new(LocationUserRecordHandler::new()))
            .with_event_handler(Arc::new(OrderingBuyerHandler::new()))
    }

    pub fn with_command_handler(mut self, handler: Arc<dyn CommandHandler>) -> Self {
        self.command_handlers.insert(handler.context(), handler);
        self
    }

    pub fn with_event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handlers.push(handler);
        self
    }

    #[instrument(skip(self, command), fields(message_id = %command.id(), command_type = command.message.command_type()))]
    pub async fn dispatch_command(
        &self,
        command: &Stamped<Command>,
    ) -> Result<Vec<Stamped<Event>>, DispatchError> {
        let context = command.message.context();
        let handler = self
            .command_handlers
            .get(&context)
            .ok_or(DispatchError::NoHandler(context))?;

        self.run(&command.stamp, Inbound::Command(handler, &command.message))
            .await
    }

    #[instrument(skip(self, event), fields(message_id = %event.id(), event_type = event.message.event_type()))]
    pub async fn dispatch_event(
        &self,
        event: &Stamped<Event>,
    ) -> Result<Vec<Stamped<Event>>, DispatchError> {
        self.run(&event.stamp, Inbound::Event(&event.message)).await
    }

    async fn run(
        &self,
        stamp: &Stamp,
        inbound: Inbound<'_>,
    ) -> Result<Vec<Stamped<Event>>, DispatchError> {
        let attempts = self.immediate_retries + 1;
        let mut attempt = 1;
        loop {
            match self.attempt(stamp, &inbound).await {
                Ok(events) => {
                    debug!("Handled on attempt {}, {} events published", attempt, events.len());
                    return Ok(events);
                }
                Err(e) if !e.is_transient() => return Err(DispatchError::Rejected(e)),
                Err(e) if attempt >= attempts => {
                    return Err(DispatchError::Exhausted {
                        attempts,
                        source: e,
                    })
                }
                Err(e) => {
                    warn!("Attempt {}/{} failed: {}", attempt, attempts, e);
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(
        &self,
        stamp: &Stamp,
        inbound: &Inbound<'_>,
    ) -> Result<Vec<Stamped<Event>>, HandlerError> {
        let mut ctx = HandlerContext::new(stamp.clone(), UnitOfWork::new(self.store.clone()));

        match inbound {
            Inbound::Command(handler, command) => handler.handle(command, &mut ctx).await?,
            Inbound::Event(event) => {
                for handler in &self.event_handlers {
                    handler.handle(event, &mut ctx).await.map_err(|e| {
                        debug!("Event handler {} failed: {}", handler.name(), e);
                        e
                    })?;
                }
            }
        }

        let (uow, outbox) = ctx.into_parts();
        uow.commit().await?;

        Ok(outbox
            .into_iter()
            .map(|event| Stamped::with_stamp(Stamp::caused_by(stamp), event))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::application::ports::outbound::{DocumentWrite, StoreError};
    use crate::application::services::unit_of_work::UnitOfWorkError;
    use crate::domain::entities::User;
    use crate::domain::document::Document;
    use crate::infrastructure::persistence::InMemoryDocumentStore;

    fn register(user_name: &str) -> Stamped<Command> {
        Stamped::new(Command::RegisterUser {
            user_name: user_name.to_string(),
            given_name: "Alice".to_string(),
        })
    }

    /// Event handler that stages a write and then fails a set number of times
    struct Flaky {
        failures: AtomicU32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl EventHandler for Flaky {
        fn name(&self) -> &'static str {
            "flaky"
        }

        async fn handle(&self, event: &Event, ctx: &mut HandlerContext) -> Result<(), HandlerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Event::UserEnabled { user_name } = event {
                ctx.uow().add(user_name, &User::new(user_name.clone(), "x")).await?;
            }
            if self.failures.load(Ordering::SeqCst) > 0 {
                self.failures.fetch_sub(1, Ordering::SeqCst);
                return Err(HandlerError::UnitOfWork(UnitOfWorkError::Store(
                    StoreError::Database("connection reset".to_string()),
                )));
            }
            Ok(())
        }
    }

    fn flaky(failures: u32) -> Arc<Flaky> {
        Arc::new(Flaky {
            failures: AtomicU32::new(failures),
            calls: AtomicU32::new(0),
        })
    }

    #[tokio::test]
    async fn test_command_events_are_stamped_as_caused_by_command() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let dispatcher = MessageDispatcher::with_platform_handlers(store.clone(), 0);
        let command = register("alice");

        let events = dispatcher.dispatch_command(&command).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].stamp.causation_id, Some(command.id()));
        assert_eq!(events[0].stamp.correlation_id, Some(command.id()));
        // Writes are committed before the events are handed back
        assert!(store.get(User::BUCKET, "alice").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_rejection_is_not_retried() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let dispatcher = MessageDispatcher::with_platform_handlers(store, 5);
        dispatcher.dispatch_command(&register("alice")).await.unwrap();

        let err = dispatcher
            .dispatch_command(&register("alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_missing_handler() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let dispatcher = MessageDispatcher::new(store, 0);
        let err = dispatcher
            .dispatch_command(&register("alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::NoHandler(Context::Identity)));
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried_with_fresh_unit_of_work() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let handler = flaky(2);
        let dispatcher = MessageDispatcher::new(store.clone(), 2).with_event_handler(handler.clone());
        let event = Stamped::new(Event::UserEnabled {
            user_name: "dave".to_string(),
        });

        dispatcher.dispatch_event(&event).await.unwrap();

        assert_eq!(handler.calls.load(Ordering::SeqCst), 3);
        assert_eq!(store.list(User::BUCKET).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_retries_leave_no_writes() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let handler = flaky(10);
        let dispatcher = MessageDispatcher::new(store.clone(), 1).with_event_handler(handler.clone());
        let event = Stamped::new(Event::UserEnabled {
            user_name: "erin".to_string(),
        });

        let err = dispatcher.dispatch_event(&event).await.unwrap_err();

        assert!(matches!(err, DispatchError::Exhausted { attempts: 2, .. }));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 2);
        assert!(store.list(User::BUCKET).await.unwrap().is_empty());
    }

    /// Store whose commits always fail
    struct BrokenStore(InMemoryDocumentStore);

    #[async_trait]
    impl DocumentStorePort for BrokenStore {
        async fn get(&self, bucket: &str, id: &str) -> Result<Option<serde_json::Value>, StoreError> {
            self.0.get(bucket, id).await
        }

        async fn list(&self, bucket: &str) -> Result<Vec<serde_json::Value>, StoreError> {
            self.0.list(bucket).await
        }

        async fn commit(&self, _writes: Vec<DocumentWrite>) -> Result<(), StoreError> {
            Err(StoreError::Database("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn test_commit_failure_publishes_nothing() {
        let store = Arc::new(BrokenStore(InMemoryDocumentStore::new()));
        let dispatcher = MessageDispatcher::with_platform_handlers(store, 1);

        let err = dispatcher
            .dispatch_command(&register("frank"))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Exhausted { attempts: 2, .. }));
    }
}
