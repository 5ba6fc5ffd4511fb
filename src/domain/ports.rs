use crate::domain::model::{
    Blacklist, CourseCatalogEntry, Curriculum, CurriculumConstraint, ElectiveRule,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only access to a curriculum's rule set. All operations are idempotent
/// reads; a failure of any one aborts the validation run that requested it.
#[async_trait]
pub trait CurriculumProvider: Send + Sync {
    async fn fetch_curriculum(&self, curriculum_id: &str) -> Result<Curriculum>;

    async fn fetch_constraints(&self, curriculum_id: &str) -> Result<Vec<CurriculumConstraint>>;

    async fn fetch_elective_rules(&self, curriculum_id: &str) -> Result<Vec<ElectiveRule>>;

    async fn fetch_blacklists(&self, curriculum_id: &str) -> Result<Vec<Blacklist>>;
}

/// Read-only access to a department's course catalog.
#[async_trait]
pub trait CourseCatalogProvider: Send + Sync {
    async fn fetch_courses(
        &self,
        department_id: &str,
        curriculum_id: Option<&str>,
    ) -> Result<Vec<CourseCatalogEntry>>;
}
