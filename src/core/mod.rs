pub mod engine;
pub mod gpa;
pub mod progress;
pub mod recommend;
pub mod schedule;
pub mod validator;

pub use crate::domain::model::{
    CourseWithSections, CurriculumProgress, ScheduleCombination, StudentCourseRecord,
    ValidationResult,
};
pub use crate::domain::ports::{CourseCatalogProvider, CurriculumProvider};
pub use crate::utils::error::Result;
