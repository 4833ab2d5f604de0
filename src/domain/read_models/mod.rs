//! Read models - Denormalized projections built from events
//!
//! Read models are eventually consistent: they are written by event handlers
//! after the originating command has been committed.

mod catalog;
mod location;
mod ordering;

pub use catalog::{CatalogBrandIndex, CatalogProductIndex, CatalogTypeIndex};
pub use location::LocationUserRecord;
pub use ordering::OrderingBuyer;
