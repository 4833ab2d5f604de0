//! Application layer - Handlers, services and ports
//!
//! This layer contains:
//! - Handlers: command handlers per bounded context and read model projections
//! - Services: unit of work, message dispatcher, queries, product form
//! - Ports: interfaces to the document store, the bus and the command API
//! - DTOs: shapes that only exist at the API boundary

pub mod dto;
pub mod handlers;
pub mod ports;
pub mod services;
