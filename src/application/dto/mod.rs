//! Data Transfer Objects - For API boundaries
//!
//! Command DTOs are the domain `Command` variants themselves; this module
//! holds the shapes that only exist at the HTTP boundary.

mod command_response;

pub use command_response::CommandResponse;
