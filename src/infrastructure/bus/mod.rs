//! Message bus adapters

mod in_process_bus;

pub use in_process_bus::{BusWorker, InProcessBus};
