use crate::core::ConfigProvider;
use crate::utils::error::{Result, ShelfError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_MAX_TOKENS: u32 = 300;
const DEFAULT_STORE_PATH: &str = "./selected_products.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub widget: WidgetConfig,
    pub catalog: CatalogConfig,
    pub completion: CompletionConfig,
    pub store: Option<StoreConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: String,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShelfError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ShelfError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` occurrences with the environment value, leaving
    /// the placeholder intact when the variable is unset (e.g. `${OPENAI_API_KEY}`).
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("catalog.url", &self.catalog.url)?;
        validate_url("completion.url", &self.completion.url)?;
        validate_path("store.path", self.store_path())?;
        validate_non_empty_string("completion.model", self.model())?;
        validate_positive_number("completion.max_tokens", self.max_tokens() as usize, 1)?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_url(&self) -> &str {
        &self.catalog.url
    }

    fn completion_url(&self) -> &str {
        &self.completion.url
    }

    fn api_key(&self) -> Option<&str> {
        // An unresolved ${VAR} placeholder means the key was never provided.
        self.completion
            .api_key
            .as_deref()
            .filter(|key| !key.starts_with("${"))
    }

    fn model(&self) -> &str {
        self.completion.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn max_tokens(&self) -> u32 {
        self.completion.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    fn store_path(&self) -> &str {
        self.store
            .as_ref()
            .map(|s| s.path.as_str())
            .unwrap_or(DEFAULT_STORE_PATH)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
