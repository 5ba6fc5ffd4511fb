use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Enrollment status of a course on a student's record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseStatus {
    Completed,
    InProgress,
    Pending,
    Failed,
    Dropped,
}

/// One course on a student's transcript. Created by the data-entry side of
/// the system; read-only to this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCourseRecord {
    pub course_code: String,
    pub course_name: String,
    pub credits: u32,
    pub status: CourseStatus,
    /// Letter grade, only meaningful when status is COMPLETED.
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl StudentCourseRecord {
    pub fn is_completed(&self) -> bool {
        self.status == CourseStatus::Completed
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == CourseStatus::InProgress
    }
}

/// Curriculum header record as returned by the curriculum collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curriculum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub total_credits_required: Option<u32>,
    #[serde(default)]
    pub total_credits: Option<u32>,
}

/// Minimum-credit requirement for a course category, optionally pinned to an
/// explicit course set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumConstraint {
    #[serde(default)]
    pub course_type: Option<String>,
    pub min_credits: u32,
    #[serde(default)]
    pub courses: Option<Vec<String>>,
}

/// Complete-N-of-this-list requirement. Concentrations arrive through the
/// same shape with `rule_type = "concentration"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectiveRule {
    pub rule_type: String,
    pub description: String,
    pub required_courses: u32,
    pub course_list: Vec<String>,
}

/// Set of mutually exclusive courses; a student may complete at most one of
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blacklist {
    pub courses: Vec<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCatalogEntry {
    pub code: String,
    pub title: String,
    pub credit_hours: u32,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// One timetabled offering of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSection {
    pub id: String,
    #[serde(default)]
    pub days: Vec<String>,
    /// Wall-clock "HH:MM".
    #[serde(default)]
    pub time_start: Option<String>,
    #[serde(default)]
    pub time_end: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub enrolled: Option<u32>,
}

/// A selected course together with the sections it is offered in. Input to
/// the schedule combination generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithSections {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub sections: Vec<CourseSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionAssignment {
    pub course_code: String,
    pub section: CourseSection,
}

/// One assignment of exactly one section per selected course, annotated with
/// every pairwise overlap found. Generated fresh per invocation, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCombination {
    pub assignments: Vec<SectionAssignment>,
    pub has_conflicts: bool,
    pub conflicts: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn weight(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecommendation {
    pub course_code: String,
    pub course_name: String,
    pub credits: u32,
    #[serde(default)]
    pub category: Option<String>,
    pub priority: Priority,
    pub reason: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// One named graduation requirement with its verdict, reported individually
/// so a caller can show partial progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementCheck {
    pub name: String,
    pub satisfied: bool,
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduationEligibility {
    pub eligible: bool,
    pub requirements: Vec<RequirementCheck>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    pub min_credits: u32,
    pub completed: u32,
    pub in_progress: u32,
    pub remaining: u32,
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectiveProgress {
    pub completed: u32,
    pub in_progress: u32,
    pub required: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumProgress {
    pub total_credits_completed: u32,
    pub total_credits_in_progress: u32,
    pub categories: BTreeMap<String, CategoryProgress>,
    pub free_electives: ElectiveProgress,
    pub major_electives: ElectiveProgress,
    pub gpa: f64,
    pub graduation: GraduationEligibility,
}

/// Findings accumulated by the requirement validator. Errors block, warnings
/// advise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFindings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Aggregate result of a full validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<CourseRecommendation>,
}

impl ValidationResult {
    /// A collaborator fetch failed: one descriptive error, no partial
    /// findings.
    pub fn fetch_failure(message: &str) -> Self {
        Self {
            is_valid: false,
            errors: vec![format!("Unable to load curriculum data: {}", message)],
            warnings: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

// Boundary validation for collaborator payloads. Anything that fails here is
// rejected before it reaches the core.

impl Validate for Curriculum {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("curriculum.id", &self.id)?;
        validate_non_empty_string("curriculum.name", &self.name)?;
        Ok(())
    }
}

impl Validate for CurriculumConstraint {
    fn validate(&self) -> Result<()> {
        if let Some(courses) = &self.courses {
            for code in courses {
                validate_non_empty_string("constraint.courses[]", code)?;
            }
        }
        Ok(())
    }
}

impl Validate for ElectiveRule {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("electiveRule.description", &self.description)?;
        if self.required_courses == 0 {
            return Err(AdvisorError::ValidationError {
                message: format!(
                    "elective rule '{}' requires zero courses",
                    self.description
                ),
            });
        }
        for code in &self.course_list {
            validate_non_empty_string("electiveRule.courseList[]", code)?;
        }
        Ok(())
    }
}

impl Validate for Blacklist {
    fn validate(&self) -> Result<()> {
        for code in &self.courses {
            validate_non_empty_string("blacklist.courses[]", code)?;
        }
        Ok(())
    }
}

impl Validate for CourseCatalogEntry {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("catalog.code", &self.code)?;
        Ok(())
    }
}
