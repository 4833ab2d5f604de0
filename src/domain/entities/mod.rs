//! Aggregates - Write-side entities owned by each bounded context

mod catalog;
mod identity;
mod location;

pub use catalog::{CatalogBrand, CatalogType, Picture, Product};
pub use identity::User;
pub use location::Location;
