//! Application services
//!
//! This module contains the unit of work, the message dispatcher that drives
//! handlers, the read-side query service and the administration client's
//! product form.

pub mod message_dispatcher;
pub mod product_form;
pub mod query_service;
pub mod unit_of_work;

pub use message_dispatcher::{DispatchError, MessageDispatcher};
pub use product_form::{
    FieldDefinition, InputKind, PictureData, ProductForm, Rule, SubmitError, ValidationErrors,
    PRODUCT_RULES,
};
pub use query_service::QueryService;
pub use unit_of_work::{UnitOfWork, UnitOfWorkError};
