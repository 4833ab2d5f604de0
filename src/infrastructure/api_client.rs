//! HTTP client for the command and query API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::application::dto::CommandResponse;
use crate::application::ports::outbound::{CommandClientError, CommandClientPort};
use crate::domain::commands::Command;
use crate::domain::read_models::{
    CatalogBrandIndex, CatalogProductIndex, CatalogTypeIndex, LocationUserRecord, OrderingBuyer,
};
use crate::domain::value_objects::{ProductId, RecordId};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http::USER_HEADER;

/// Client for the engine's REST API
pub struct ApiClient {
    client: Client,
    base_url: String,
    user: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user: None,
        }
    }

    /// Client for the API at the configured `API_BASE_URL`
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.api_base_url)
    }

    /// Issue commands on behalf of a user
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Look up the ordering buyer for a user name
    pub async fn buyer(&self, user_name: &str) -> Result<Option<OrderingBuyer>, CommandClientError> {
        self.get_optional(&format!("{}/buyer", self.base_url), &[("userName", user_name)])
            .await
    }

    pub async fn catalog_types(&self) -> Result<Vec<CatalogTypeIndex>, CommandClientError> {
        self.get_list(&format!("{}/catalog/types", self.base_url)).await
    }

    pub async fn catalog_brands(&self) -> Result<Vec<CatalogBrandIndex>, CommandClientError> {
        self.get_list(&format!("{}/catalog/brands", self.base_url)).await
    }

    pub async fn catalog_product(
        &self,
        id: ProductId,
    ) -> Result<Option<CatalogProductIndex>, CommandClientError> {
        self.get_optional(&format!("{}/catalog/products/{}", self.base_url, id), &[])
            .await
    }

    pub async fn location_user_record(
        &self,
        id: RecordId,
    ) -> Result<Option<LocationUserRecord>, CommandClientError> {
        self.get_optional(&format!("{}/location/records/{}", self.base_url, id), &[])
            .await
    }

    async fn get_list<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<Vec<T>, CommandClientError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    async fn get_optional<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, CommandClientError> {
        let response = self.client.get(url).query(query).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(Some(response.json().await?))
    }
}

#[async_trait]
impl CommandClientPort for ApiClient {
    async fn command(&self, command: Command) -> Result<CommandResponse, CommandClientError> {
        let mut request = self
            .client
            .post(format!("{}/command", self.base_url))
            .json(&command);
        if let Some(user) = &self.user {
            request = request.header(USER_HEADER, user);
        }

        let response = request.send().await?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            let status = response.status().as_u16();
            let text = response.text().await?;
            // Axum also answers 422 for bodies it cannot deserialize
            return Err(match serde_json::from_str::<CommandResponse>(&text) {
                Ok(CommandResponse {
                    error: Some(error), ..
                }) => CommandClientError::Rejected(error),
                _ => CommandClientError::Api {
                    status,
                    message: text,
                },
            });
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }
}

async fn api_error(response: reqwest::Response) -> CommandClientError {
    let status = response.status().as_u16();
    match response.text().await {
        Ok(message) => CommandClientError::Api { status, message },
        Err(e) => e.into(),
    }
}

impl From<reqwest::Error> for CommandClientError {
    fn from(e: reqwest::Error) -> Self {
        CommandClientError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::application::ports::outbound::DocumentStorePort;
    use crate::application::services::{PictureData, ProductForm};
    use crate::domain::value_objects::{CatalogBrandId, CatalogTypeId, LocationId};
    use crate::infrastructure::http;
    use crate::infrastructure::persistence::InMemoryDocumentStore;
    use crate::infrastructure::state::AppState;

    async fn serve() -> ApiClient {
        let store: Arc<dyn DocumentStorePort> = Arc::new(InMemoryDocumentStore::new());
        let (state, worker) = AppState::with_store(AppConfig::default(), store);
        tokio::spawn(worker.run());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = http::app(Arc::new(state));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = AppConfig {
            api_base_url: format!("http://{}/", addr),
            ..AppConfig::default()
        };
        ApiClient::from_config(&config).with_user("admin")
    }

    async fn eventually<T, F, Fut>(mut query: F) -> T
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        for _ in 0..100 {
            if let Some(value) = query().await {
                return value;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("projection never appeared");
    }

    #[test]
    fn test_from_config_uses_api_base_url() {
        let config = AppConfig {
            api_base_url: "http://admin.local:8080/".to_string(),
            ..AppConfig::default()
        };
        let client = ApiClient::from_config(&config);
        assert_eq!(client.base_url, "http://admin.local:8080");
        assert!(client.user.is_none());
    }

    #[tokio::test]
    async fn test_product_form_round_trip() {
        let api = serve().await;
        let client = &api;
        let type_id = CatalogTypeId::new();
        let brand_id = CatalogBrandId::new();

        client
            .command(Command::DefineCatalogType {
                type_id,
                name: "Mug".to_string(),
            })
            .await
            .unwrap();
        client
            .command(Command::DefineCatalogBrand {
                brand_id,
                name: ".NET".to_string(),
            })
            .await
            .unwrap();

        let catalog_type = eventually(|| async move {
            client.catalog_types().await.unwrap().into_iter().next()
        })
        .await;
        let catalog_brand = eventually(|| async move {
            client.catalog_brands().await.unwrap().into_iter().next()
        })
        .await;
        assert_eq!(catalog_type.id, type_id);
        assert_eq!(catalog_brand.id, brand_id);

        let mut form = ProductForm::new();
        form.set_name("Cup<T> White Mug");
        form.set_description("A mug for generic coffee");
        form.set_price(Some(12.5));
        form.set_catalog_type(Some(catalog_type));
        form.set_catalog_brand(Some(catalog_brand));
        form.set_picture(Some(PictureData {
            data: "iVBORw0KGgo=".to_string(),
            content_type: "image/png".to_string(),
        }));

        let responses = form.submit(client).await.unwrap();
        assert_eq!(responses.len(), 3);
        assert!(responses.iter().all(|r| r.accepted));

        let product_id = form.id();
        let product = eventually(|| async move {
            client
                .catalog_product(product_id)
                .await
                .unwrap()
                .filter(|p| p.has_picture && p.description.is_some())
        })
        .await;
        assert_eq!(product.name, "Cup<T> White Mug");
        assert_eq!(product.price, 12.5);
        assert_eq!(product.catalog_type, "Mug");
        assert_eq!(product.catalog_brand, ".NET");
        assert_eq!(product.description.as_deref(), Some("A mug for generic coffee"));
    }

    #[tokio::test]
    async fn test_failed_step_stops_submission() {
        let client = serve().await;

        // Type and brand were never defined, so AddProduct is rejected
        let mut form = ProductForm::new();
        form.set_name("Orphan");
        form.set_description("Never stored");
        form.set_price(Some(1.0));
        form.set_catalog_type(Some(CatalogTypeIndex {
            id: CatalogTypeId::new(),
            name: "Missing".to_string(),
        }));
        form.set_catalog_brand(Some(CatalogBrandIndex {
            id: CatalogBrandId::new(),
            name: "Missing".to_string(),
        }));

        let err = form.submit(&client).await.unwrap_err();
        assert!(matches!(
            err,
            crate::application::services::SubmitError::Client(CommandClientError::Rejected(_))
        ));
        assert!(client.catalog_product(form.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recorded_user_is_denormalized() {
        let api = serve().await;
        let client = &api;
        let location_id = LocationId::new();
        let record_id = RecordId::new();

        client
            .command(Command::AddLocation {
                location_id,
                code: "BCN-01".to_string(),
                description: Some("Barcelona store".to_string()),
            })
            .await
            .unwrap();
        client
            .command(Command::RegisterUser {
                user_name: "alice".to_string(),
                given_name: "Alice".to_string(),
            })
            .await
            .unwrap();
        client
            .command(Command::RecordUser {
                record_id,
                location_id,
                user_name: "alice".to_string(),
            })
            .await
            .unwrap();

        let record = eventually(|| async move {
            client.location_user_record(record_id).await.unwrap()
        })
        .await;
        assert_eq!(record.id, record_id);
        assert_eq!(record.code, "BCN-01");
        assert_eq!(record.location_id, location_id);
        assert_eq!(record.name, "Alice");
        assert_eq!(record.user_name, "alice");

        let buyer = eventually(|| async move { client.buyer("alice").await.unwrap() }).await;
        assert_eq!(buyer.given_name, "Alice");
        assert!(client.buyer("bob").await.unwrap().is_none());
    }
}
