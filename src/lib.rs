//! eShop Engine - Command/event backend for a multi-context e-commerce platform
//!
//! Bounded contexts (catalog, identity, location, ordering) exchange stamped
//! commands and events over an in-process message bus. Handlers read and
//! write aggregates through a unit of work, and event handlers project the
//! read models served over REST.

pub mod application;
pub mod domain;
pub mod infrastructure;
