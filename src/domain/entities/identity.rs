//! Identity aggregates

use serde::{Deserialize, Serialize};

use crate::domain::document::Document;

/// A registered user, identified by user name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub given_name: String,
    pub disabled: bool,
}

impl User {
    pub fn new(user_name: impl Into<String>, given_name: impl Into<String>) -> Self {
        Self {
            id: user_name.into(),
            given_name: given_name.into(),
            disabled: false,
        }
    }
}

impl Document for User {
    const BUCKET: &'static str = "identity.user";
}
