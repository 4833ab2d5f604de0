//! Product Form - Administration client state for creating a product
//!
//! The form collects field edits, validates them against a declarative rule
//! table, and on submit sends an ordered list of commands: `AddProduct`, then
//! `SetPictureProduct` if a picture was chosen, then
//! `UpdateDescriptionProduct` if a description was entered. Commands are
//! sent one at a time; the first failure stops the submission and is
//! returned unchanged. Nothing already sent is undone.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::dto::CommandResponse;
use crate::application::ports::outbound::{CommandClientError, CommandClientPort};
use crate::domain::commands::Command;
use crate::domain::read_models::{CatalogBrandIndex, CatalogTypeIndex};
use crate::domain::value_objects::ProductId;

/// A validation rule for one field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Presence,
    MaxLength(usize),
    GreaterThan(f64),
}

pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

pub const PRODUCT_RULES: &[FieldRules] = &[
    FieldRules {
        field: "name",
        rules: &[Rule::Presence, Rule::MaxLength(255)],
    },
    FieldRules {
        field: "price",
        rules: &[Rule::Presence, Rule::GreaterThan(0.0)],
    },
    FieldRules {
        field: "catalogType",
        rules: &[Rule::Presence],
    },
    FieldRules {
        field: "catalogBrand",
        rules: &[Rule::Presence],
    },
    FieldRules {
        field: "picture",
        rules: &[Rule::Presence],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Textarea,
    Number,
    Selecter,
    Image,
}

/// How a UI should render a form field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub input: InputKind,
    pub label: &'static str,
    pub required: bool,
    /// Decimal places numbers are rounded to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalize: Option<u32>,
}

/// Field name -> messages, only for fields that failed
pub type ValidationErrors = BTreeMap<&'static str, Vec<String>>;

/// Encoded image chosen in the form
#[derive(Debug, Clone, PartialEq)]
pub struct PictureData {
    pub data: String,
    pub content_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Form is missing {0}")]
    Incomplete(&'static str),
    #[error(transparent)]
    Client(#[from] CommandClientError),
}

enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
    Present,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    id: ProductId,
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    catalog_type: Option<CatalogTypeIndex>,
    catalog_brand: Option<CatalogBrandIndex>,
    picture: Option<PictureData>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl ProductForm {
    pub fn new() -> Self {
        Self::with_id(ProductId::new())
    }

    pub fn with_id(id: ProductId) -> Self {
        Self {
            id,
            name: None,
            description: None,
            price: None,
            catalog_type: None,
            catalog_brand: None,
            picture: None,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    // ========================================================================
    // Field edits
    // ========================================================================

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = non_empty(name.into());
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = non_empty(description.into());
    }

    /// Set the price, rounded to the field's precision
    pub fn set_price(&mut self, price: Option<f64>) {
        let places = Self::form()
            .get("price")
            .and_then(|f| f.normalize)
            .unwrap_or(2);
        let factor = 10f64.powi(places as i32);
        self.price = price.map(|p| (p * factor).round() / factor);
    }

    pub fn set_catalog_type(&mut self, catalog_type: Option<CatalogTypeIndex>) {
        self.catalog_type = catalog_type;
    }

    pub fn set_catalog_brand(&mut self, catalog_brand: Option<CatalogBrandIndex>) {
        self.catalog_brand = catalog_brand;
    }

    pub fn set_picture(&mut self, picture: Option<PictureData>) {
        self.picture = picture.filter(|p| !p.data.is_empty());
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Field definitions for rendering the form
    pub fn form() -> BTreeMap<&'static str, FieldDefinition> {
        let field = |input, label, required| FieldDefinition {
            input,
            label,
            required,
            normalize: None,
        };
        BTreeMap::from([
            ("name", field(InputKind::Text, "Name", true)),
            ("description", field(InputKind::Textarea, "Description", false)),
            (
                "price",
                FieldDefinition {
                    normalize: Some(2),
                    ..field(InputKind::Number, "Price", true)
                },
            ),
            ("catalogType", field(InputKind::Selecter, "Catalog Type", true)),
            ("catalogBrand", field(InputKind::Selecter, "Catalog Brand", true)),
            ("picture", field(InputKind::Image, "Picture", true)),
        ])
    }

    /// Validate against `PRODUCT_RULES`; `None` means the form is valid
    pub fn validation(&self) -> Option<ValidationErrors> {
        let definitions = Self::form();
        let mut errors = ValidationErrors::new();

        for entry in PRODUCT_RULES {
            let label = definitions
                .get(entry.field)
                .map(|d| d.label)
                .unwrap_or(entry.field);
            let value = self.field_value(entry.field);

            for rule in entry.rules {
                let message = match (rule, &value) {
                    (Rule::Presence, FieldValue::Missing) => Some(format!("{} can't be blank", label)),
                    (Rule::MaxLength(max), FieldValue::Text(text)) if text.chars().count() > *max => {
                        Some(format!("{} is too long (maximum is {} characters)", label, max))
                    }
                    (Rule::GreaterThan(min), FieldValue::Number(n)) if !(*n > *min) => {
                        Some(format!("{} must be greater than {}", label, min))
                    }
                    _ => None,
                };
                if let Some(message) = message {
                    errors.entry(entry.field).or_default().push(message);
                }
            }
        }

        if errors.is_empty() {
            None
        } else {
            Some(errors)
        }
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "name" => self.name.as_deref().map_or(FieldValue::Missing, FieldValue::Text),
            "description" => self
                .description
                .as_deref()
                .map_or(FieldValue::Missing, FieldValue::Text),
            "price" => self.price.map_or(FieldValue::Missing, FieldValue::Number),
            "catalogType" if self.catalog_type.is_some() => FieldValue::Present,
            "catalogBrand" if self.catalog_brand.is_some() => FieldValue::Present,
            "picture" if self.picture.is_some() => FieldValue::Present,
            _ => FieldValue::Missing,
        }
    }

    // ========================================================================
    // Submission
    // ========================================================================

    fn add_product(&self) -> Result<Command, SubmitError> {
        Ok(Command::AddProduct {
            product_id: self.id,
            name: self.name.clone().ok_or(SubmitError::Incomplete("name"))?,
            price: self.price.ok_or(SubmitError::Incomplete("price"))?,
            catalog_brand_id: self
                .catalog_brand
                .as_ref()
                .map(|b| b.id)
                .ok_or(SubmitError::Incomplete("catalogBrand"))?,
            catalog_type_id: self
                .catalog_type
                .as_ref()
                .map(|t| t.id)
                .ok_or(SubmitError::Incomplete("catalogType"))?,
        })
    }

    fn set_picture_request(&self, picture: &PictureData) -> Command {
        Command::SetPictureProduct {
            product_id: self.id,
            content: picture.data.clone(),
            content_type: picture.content_type.clone(),
        }
    }

    fn set_description_request(&self, description: &str) -> Command {
        Command::UpdateDescriptionProduct {
            product_id: self.id,
            description: description.to_string(),
        }
    }

    /// The commands a submit would send, in order
    pub fn requests(&self) -> Result<Vec<Command>, SubmitError> {
        let mut requests = vec![self.add_product()?];
        requests.extend(self.picture.as_ref().map(|p| self.set_picture_request(p)));
        requests.extend(
            self.description
                .as_deref()
                .map(|d| self.set_description_request(d)),
        );
        Ok(requests)
    }

    /// Send every request in order, stopping at the first error
    #[instrument(skip(self, client), fields(product_id = %self.id))]
    pub async fn submit(
        &self,
        client: &dyn CommandClientPort,
    ) -> Result<Vec<CommandResponse>, SubmitError> {
        let requests = self.requests()?;
        let mut responses = Vec::with_capacity(requests.len());

        for request in requests {
            let command_type = request.command_type();
            match client.command(request).await {
                Ok(response) => {
                    debug!("{} accepted as {}", command_type, response.command_id);
                    responses.push(response);
                }
                Err(e) => {
                    debug!("received http error: {}", e);
                    return Err(e.into());
                }
            }
        }

        info!("Submitted product with {} commands", responses.len());
        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::value_objects::{CatalogBrandId, CatalogTypeId, MessageId};

    /// Records every command and fails on the configured call
    #[derive(Default)]
    struct RecordingClient {
        sent: Mutex<Vec<Command>>,
        fail_on: Option<usize>,
    }

    impl RecordingClient {
        fn failing_on(call: usize) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_on: Some(call),
            }
        }

        fn sent_types(&self) -> Vec<&'static str> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|c| c.command_type())
                .collect()
        }
    }

    #[async_trait]
    impl CommandClientPort for RecordingClient {
        async fn command(&self, command: Command) -> Result<CommandResponse, CommandClientError> {
            let mut sent = self.sent.lock().unwrap();
            sent.push(command);
            if self.fail_on == Some(sent.len() - 1) {
                return Err(CommandClientError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(CommandResponse::accepted(MessageId::new(), 1))
        }
    }

    fn complete_form() -> ProductForm {
        let mut form = ProductForm::new();
        form.set_name("Roslyn Red Sheet");
        form.set_price(Some(8.5));
        form.set_catalog_type(Some(CatalogTypeIndex {
            id: CatalogTypeId::new(),
            name: "Sheet".to_string(),
        }));
        form.set_catalog_brand(Some(CatalogBrandIndex {
            id: CatalogBrandId::new(),
            name: "Roslyn".to_string(),
        }));
        form
    }

    fn picture() -> PictureData {
        PictureData {
            data: "iVBORw0KGgo=".to_string(),
            content_type: "image/png".to_string(),
        }
    }

    #[test]
    fn test_validation_lists_missing_required_fields() {
        let errors = ProductForm::new().validation().unwrap();
        let fields: Vec<_> = errors.keys().copied().collect();
        assert_eq!(
            fields,
            vec!["catalogBrand", "catalogType", "name", "picture", "price"]
        );
        assert_eq!(errors["name"], vec!["Name can't be blank".to_string()]);
    }

    #[test]
    fn test_validation_checks_price_and_length() {
        let mut form = complete_form();
        form.set_picture(Some(picture()));
        assert!(form.validation().is_none());

        form.set_price(Some(0.0));
        form.set_name("x".repeat(256));
        let errors = form.validation().unwrap();
        assert_eq!(errors["price"], vec!["Price must be greater than 0".to_string()]);
        assert!(errors["name"][0].contains("too long"));
    }

    #[test]
    fn test_name_length_counts_characters() {
        let mut form = complete_form();
        form.set_picture(Some(picture()));
        form.set_name("é".repeat(255));
        assert!(form.validation().is_none());

        form.set_name("é".repeat(256));
        assert!(form.validation().unwrap().contains_key("name"));
    }

    #[test]
    fn test_price_is_normalized_and_blank_text_cleared() {
        let mut form = ProductForm::new();
        form.set_price(Some(3.14159));
        form.set_description("   ");
        assert_eq!(form.price, Some(3.14));
        assert!(form.description.is_none());
    }

    #[test]
    fn test_requests_follow_fixed_order() {
        let mut form = complete_form();
        let types = |form: &ProductForm| -> Vec<&'static str> {
            form.requests()
                .unwrap()
                .iter()
                .map(|c| c.command_type())
                .collect()
        };
        assert_eq!(types(&form), vec!["AddProduct"]);

        form.set_description("Soft cotton");
        assert_eq!(types(&form), vec!["AddProduct", "UpdateDescriptionProduct"]);

        form.set_picture(Some(picture()));
        assert_eq!(
            types(&form),
            vec!["AddProduct", "SetPictureProduct", "UpdateDescriptionProduct"]
        );

        form.set_description("");
        assert_eq!(types(&form), vec!["AddProduct", "SetPictureProduct"]);
    }

    #[test]
    fn test_requests_target_form_product() {
        let mut form = complete_form();
        form.set_picture(Some(picture()));
        for request in form.requests().unwrap() {
            let product_id = match request {
                Command::AddProduct { product_id, .. }
                | Command::SetPictureProduct { product_id, .. }
                | Command::UpdateDescriptionProduct { product_id, .. } => product_id,
                other => panic!("unexpected {:?}", other),
            };
            assert_eq!(product_id, form.id());
        }
    }

    #[tokio::test]
    async fn test_submit_sends_all_requests() {
        let mut form = complete_form();
        form.set_picture(Some(picture()));
        form.set_description("Soft cotton");
        let client = RecordingClient::default();

        let responses = form.submit(&client).await.unwrap();

        assert_eq!(responses.len(), 3);
        assert_eq!(
            client.sent_types(),
            vec!["AddProduct", "SetPictureProduct", "UpdateDescriptionProduct"]
        );
    }

    #[tokio::test]
    async fn test_submit_stops_at_first_error() {
        let mut form = complete_form();
        form.set_picture(Some(picture()));
        form.set_description("Soft cotton");
        let client = RecordingClient::failing_on(1);

        let err = form.submit(&client).await.unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Client(CommandClientError::Api { status: 500, ref message }) if message == "boom"
        ));
        assert_eq!(client.sent_types(), vec!["AddProduct", "SetPictureProduct"]);
    }

    #[tokio::test]
    async fn test_incomplete_form_sends_nothing() {
        let mut form = complete_form();
        form.set_catalog_brand(None);
        let client = RecordingClient::default();

        let err = form.submit(&client).await.unwrap_err();

        assert!(matches!(err, SubmitError::Incomplete("catalogBrand")));
        assert!(client.sent_types().is_empty());
    }
}
