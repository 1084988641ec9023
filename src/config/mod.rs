pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    self, validate_non_empty_string, validate_path, validate_positive_number, validate_url,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "routine-shelf")]
#[command(about = "Browse a product catalog, pick a shelf, generate a skincare routine")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:8080/products.json")]
    pub catalog_url: String,

    #[arg(long, default_value = "https://api.openai.com/v1/chat/completions")]
    pub completion_url: String,

    /// API key for the direct completion transport. Falls back to the
    /// OPENAI_API_KEY environment variable; leave unset for a proxied
    /// endpoint that injects credentials itself.
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long, default_value = "gpt-4o")]
    pub model: String,

    #[arg(long, default_value = "300")]
    pub max_tokens: u32,

    #[arg(long, default_value = "./selected_products.json")]
    pub store_path: String,

    /// Load configuration from a TOML file instead of the flags above.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Resolves the API key from the environment when the flag is absent.
    pub fn with_env_api_key(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        self
    }
}

impl ConfigProvider for CliConfig {
    fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    fn completion_url(&self) -> &str {
        &self.completion_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn store_path(&self) -> &str {
        &self.store_path
    }
}

impl validation::Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("catalog_url", &self.catalog_url)?;
        validate_url("completion_url", &self.completion_url)?;
        validate_path("store_path", &self.store_path)?;
        validate_non_empty_string("model", &self.model)?;
        validate_positive_number("max_tokens", self.max_tokens as usize, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;

    fn base_config() -> CliConfig {
        CliConfig {
            catalog_url: "https://example.com/products.json".to_string(),
            completion_url: "https://example.com/v1/chat/completions".to_string(),
            api_key: None,
            model: "gpt-4o".to_string(),
            max_tokens: 300,
            store_path: "./selected_products.json".to_string(),
            config: None,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_bad_catalog_url_fails_validation() {
        let mut config = base_config();
        config.catalog_url = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_tokens_fails_validation() {
        let mut config = base_config();
        config.max_tokens = 0;
        assert!(config.validate().is_err());
    }
}
