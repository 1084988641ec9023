pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::http::{HttpCatalog, RoutineClient};
pub use adapters::store::FileStore;
pub use config::{toml_config::TomlConfig, CliConfig};
pub use core::selection::SelectionState;
pub use core::session::Session;
pub use utils::error::{Result, ShelfError};
