//! Handler context - What a handler sees while processing one message

use crate::application::services::unit_of_work::UnitOfWork;
use crate::domain::events::Event;
use crate::domain::value_objects::Stamp;

pub struct HandlerContext {
    stamp: Stamp,
    uow: UnitOfWork,
    outbox: Vec<Event>,
}

impl HandlerContext {
    pub fn new(stamp: Stamp, uow: UnitOfWork) -> Self {
        Self {
            stamp,
            uow,
            outbox: Vec::new(),
        }
    }

    /// Stamp of the message being handled
    pub fn stamp(&self) -> &Stamp {
        &self.stamp
    }

    pub fn uow(&mut self) -> &mut UnitOfWork {
        &mut self.uow
    }

    /// Queue an event; it is only published if the unit of work commits
    pub fn publish(&mut self, event: Event) {
        self.outbox.push(event);
    }

    pub fn into_parts(self) -> (UnitOfWork, Vec<Event>) {
        (self.uow, self.outbox)
    }
}
