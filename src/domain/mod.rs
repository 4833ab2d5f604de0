//! Domain layer - Messages, aggregates and read models
//!
//! This layer contains:
//! - Commands and Events: the message contracts of each bounded context
//! - Entities: write-side aggregates (catalog, identity, location)
//! - Read Models: denormalized projections (location, ordering, catalog)
//! - Value Objects: typed identifiers and message stamps

pub mod commands;
pub mod document;
pub mod entities;
pub mod events;
pub mod read_models;
pub mod value_objects;
