//! Outbound ports - Interfaces that the application requires from external systems

mod command_client_port;
mod document_store_port;
mod message_bus_port;

pub use command_client_port::{CommandClientError, CommandClientPort};
pub use document_store_port::{load, load_all, DocumentStorePort, DocumentWrite, StoreError};
pub use message_bus_port::{BusError, MessageBusPort};
