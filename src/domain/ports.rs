use crate::domain::model::{Product, ViewModel};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Durable key-value slot for the serialized selection. One named slot, read
/// once at startup, fully overwritten on every mutation.
pub trait SelectionStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn save(&self, encoded: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>>;
}

#[async_trait]
pub trait RoutineGenerator: Send + Sync {
    async fn generate(&self, selected_names: &[String]) -> Result<String>;
}

/// The "commit to display" half of rendering. Implementations hold no
/// authoritative state; every call replaces the previous frame wholesale.
pub trait Presenter {
    fn commit(&mut self, view: &ViewModel);
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_url(&self) -> &str;
    fn completion_url(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn model(&self) -> &str;
    fn max_tokens(&self) -> u32;
    fn store_path(&self) -> &str;
}
