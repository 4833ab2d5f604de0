//! Value objects - Immutable objects defined by their attributes

mod ids;
mod stamp;

pub use ids::*;
pub use stamp::{Stamp, Stamped};
