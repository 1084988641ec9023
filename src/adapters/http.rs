use crate::core::{CatalogSource, ConfigProvider, Product, RoutineGenerator};
use crate::domain::model::{CatalogDocument, ChatMessage, ChatRequest, ChatResponse};
use crate::utils::error::{Result, ShelfError};
use async_trait::async_trait;
use reqwest::Client;

const SYSTEM_PROMPT: &str =
    "You are a skincare expert. Create a personalized skincare routine using the selected products.";

/// Fetches the catalog document over HTTP. No caching: every call hits the
/// source again.
pub struct HttpCatalog {
    client: Client,
    url: String,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn from_config(config: &impl ConfigProvider) -> Self {
        Self::new(config.catalog_url())
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        tracing::debug!("Fetching catalog from {}", self.url);
        let document: CatalogDocument = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(document.products)
    }
}

/// Client for the completion endpoint. The proxied and the direct transport
/// share one request/response shape; the direct one additionally carries a
/// bearer `Authorization` header, so presence of an API key selects it.
pub struct RoutineClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl RoutineClient {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            api_key,
            model: model.into(),
            max_tokens,
        }
    }

    pub fn from_config(config: &impl ConfigProvider) -> Self {
        Self::new(
            config.completion_url(),
            config.api_key().map(str::to_string),
            config.model(),
            config.max_tokens(),
        )
    }

    fn request_body(&self, selected_names: &[String]) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!(
                        "Here are the selected products: {}. Please create a routine.",
                        selected_names.join(", ")
                    ),
                },
            ],
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl RoutineGenerator for RoutineClient {
    async fn generate(&self, selected_names: &[String]) -> Result<String> {
        let mut request = self.client.post(&self.url).json(&self.request_body(selected_names));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ShelfError::CompletionStatusError {
                status: status.as_u16(),
            });
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| ShelfError::CompletionShapeError {
                field: "choices[0].message.content".to_string(),
            })
    }
}
