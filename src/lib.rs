pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{toml_config::TomlConfig, AdvisorConfig};

pub use adapters::{cache::CachedCatalog, http::HttpCurriculumProvider};
pub use core::engine::AdvisorEngine;
pub use utils::error::{AdvisorError, Result};
