//! Ordering read models

use serde::{Deserialize, Serialize};

use crate::domain::document::Document;

/// Buyer view of an identity user, keyed by user name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderingBuyer {
    pub id: String,
    pub given_name: String,
    pub disabled: bool,
}

impl Document for OrderingBuyer {
    const BUCKET: &'static str = "ordering.buyer";
}
