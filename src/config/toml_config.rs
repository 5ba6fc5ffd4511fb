use crate::config::AdvisorConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_CATALOG_TTL_SECONDS: i64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub advisor: AdvisorSection,
    #[serde(default)]
    pub catalog: Option<CatalogSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorSection {
    pub api_endpoint: String,
    pub curriculum_id: String,
    pub department_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    #[serde(default)]
    pub ttl_seconds: Option<i64>,
}

impl TomlConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }
}

impl AdvisorConfig for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.advisor.api_endpoint
    }

    fn curriculum_id(&self) -> &str {
        &self.advisor.curriculum_id
    }

    fn department_id(&self) -> &str {
        &self.advisor.department_id
    }

    fn catalog_ttl_seconds(&self) -> i64 {
        self.catalog
            .as_ref()
            .and_then(|c| c.ttl_seconds)
            .unwrap_or(DEFAULT_CATALOG_TTL_SECONDS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("advisor.api_endpoint", &self.advisor.api_endpoint)?;
        validate_non_empty_string("advisor.curriculum_id", &self.advisor.curriculum_id)?;
        validate_non_empty_string("advisor.department_id", &self.advisor.department_id)?;
        validate_range("catalog.ttl_seconds", self.catalog_ttl_seconds(), 1, 86_400)?;
        Ok(())
    }
}
