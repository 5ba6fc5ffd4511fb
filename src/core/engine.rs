use crate::core::{progress, recommend, schedule, validator};
use crate::domain::model::{
    CourseWithSections, CurriculumProgress, ScheduleCombination, StudentCourseRecord,
    ValidationResult,
};
use crate::domain::ports::{CourseCatalogProvider, CurriculumProvider};
use crate::utils::error::Result;

/// Orchestrates a validation run: fetch the curriculum's rule set and the
/// department catalog, then run the pure components over them. Holds no
/// cross-call state; independent runs may execute concurrently.
pub struct AdvisorEngine<P, C> {
    curriculum: P,
    catalog: C,
}

impl<P: CurriculumProvider, C: CourseCatalogProvider> AdvisorEngine<P, C> {
    pub fn new(curriculum: P, catalog: C) -> Self {
        Self { curriculum, catalog }
    }

    /// Validates a student's course history against a curriculum and attaches
    /// course recommendations. A collaborator fetch failure folds into an
    /// `is_valid: false` result with one descriptive error and no partial
    /// findings.
    pub async fn validate_student_progress(
        &self,
        courses: &[StudentCourseRecord],
        curriculum_id: &str,
        department_id: &str,
    ) -> ValidationResult {
        match self
            .run_validation(courses, curriculum_id, department_id)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("validation run for {} aborted: {}", curriculum_id, e);
                ValidationResult::fetch_failure(&e.to_string())
            }
        }
    }

    async fn run_validation(
        &self,
        courses: &[StudentCourseRecord],
        curriculum_id: &str,
        department_id: &str,
    ) -> Result<ValidationResult> {
        tracing::info!(
            "validating {} course records against curriculum {}",
            courses.len(),
            curriculum_id
        );

        let constraints = self.curriculum.fetch_constraints(curriculum_id).await?;
        let elective_rules = self.curriculum.fetch_elective_rules(curriculum_id).await?;
        let blacklists = self.curriculum.fetch_blacklists(curriculum_id).await?;
        let catalog = self
            .catalog
            .fetch_courses(department_id, Some(curriculum_id))
            .await?;

        let findings = validator::validate(courses, &constraints, &elective_rules, &blacklists);
        let recommendations =
            recommend::recommend(courses, &constraints, &elective_rules, &catalog);

        tracing::info!(
            "validation finished: {} errors, {} warnings, {} recommendations",
            findings.errors.len(),
            findings.warnings.len(),
            recommendations.len()
        );

        Ok(ValidationResult {
            is_valid: findings.errors.is_empty(),
            errors: findings.errors,
            warnings: findings.warnings,
            recommendations,
        })
    }

    /// Computes credit progress and graduation eligibility. Fetch failures
    /// propagate; there is no partial-progress result.
    pub async fn calculate_curriculum_progress(
        &self,
        courses: &[StudentCourseRecord],
        curriculum_id: &str,
    ) -> Result<CurriculumProgress> {
        let curriculum = self.curriculum.fetch_curriculum(curriculum_id).await?;
        let constraints = self.curriculum.fetch_constraints(curriculum_id).await?;
        Ok(progress::compute_progress(courses, &curriculum, &constraints))
    }

    /// Pure passthrough to the combination generator; no collaborator calls.
    pub fn generate_schedule_combinations(
        &self,
        courses: &[CourseWithSections],
    ) -> Vec<ScheduleCombination> {
        schedule::generate(courses)
    }
}
