pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// Settings the engine's front end needs to reach its collaborators.
pub trait AdvisorConfig {
    fn api_endpoint(&self) -> &str;
    fn curriculum_id(&self) -> &str;
    fn department_id(&self) -> &str;
    fn catalog_ttl_seconds(&self) -> i64;
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "course-advisor")]
#[command(about = "Degree-audit validation and schedule combination engine")]
pub struct CliConfig {
    /// Base URL of the curriculum/catalog API.
    #[arg(long, default_value = "http://localhost:8080/api")]
    pub api_endpoint: String,

    #[arg(long)]
    pub curriculum_id: Option<String>,

    #[arg(long)]
    pub department_id: Option<String>,

    /// JSON file holding the student's course records.
    #[arg(long)]
    pub courses_file: Option<String>,

    /// JSON file of selected courses with sections; switches to
    /// schedule-combination mode.
    #[arg(long)]
    pub schedule_file: Option<String>,

    /// TOML settings file; overrides endpoint and ids when given.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, default_value = "300")]
    pub catalog_ttl_seconds: i64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl AdvisorConfig for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    // Presence is enforced by validate() before the ids are consulted.
    fn curriculum_id(&self) -> &str {
        self.curriculum_id.as_deref().unwrap_or("")
    }

    fn department_id(&self) -> &str {
        self.department_id.as_deref().unwrap_or("")
    }

    fn catalog_ttl_seconds(&self) -> i64 {
        self.catalog_ttl_seconds
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_range("catalog_ttl_seconds", self.catalog_ttl_seconds, 1, 86_400)?;

        // Schedule mode needs no collaborator settings.
        if self.schedule_file.is_some() {
            return Ok(());
        }

        let courses_file = validate_required_field("courses_file", &self.courses_file)?;
        validate_non_empty_string("courses_file", courses_file)?;

        // A TOML file may carry the ids instead.
        if self.config.is_none() {
            let curriculum_id = validate_required_field("curriculum_id", &self.curriculum_id)?;
            validate_non_empty_string("curriculum_id", curriculum_id)?;
            let department_id = validate_required_field("department_id", &self.department_id)?;
            validate_non_empty_string("department_id", department_id)?;
        }

        Ok(())
    }
}
