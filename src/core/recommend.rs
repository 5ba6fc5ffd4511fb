use crate::domain::model::{
    CourseCatalogEntry, CourseRecommendation, CurriculumConstraint, ElectiveRule, Priority,
    StudentCourseRecord,
};
use std::collections::{HashMap, HashSet};

/// Upper bound on the advisory list. Recommendations are regenerated fresh on
/// every call; nothing here is cached or persisted.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Produces a bounded, prioritized list of courses worth taking next:
/// missing explicit core courses first (high priority), then courses that
/// close elective-rule shortfalls (medium priority). The catalog is
/// authoritative; codes it does not know are skipped.
pub fn recommend(
    courses: &[StudentCourseRecord],
    constraints: &[CurriculumConstraint],
    elective_rules: &[ElectiveRule],
    catalog: &[CourseCatalogEntry],
) -> Vec<CourseRecommendation> {
    let completed: HashSet<&str> = courses
        .iter()
        .filter(|c| c.is_completed())
        .map(|c| c.course_code.as_str())
        .collect();
    let in_progress: HashSet<&str> = courses
        .iter()
        .filter(|c| c.is_in_progress())
        .map(|c| c.course_code.as_str())
        .collect();
    let by_code: HashMap<&str, &CourseCatalogEntry> =
        catalog.iter().map(|entry| (entry.code.as_str(), entry)).collect();

    let mut recommendations = Vec::new();
    let mut recommended: HashSet<&str> = HashSet::new();

    for constraint in constraints {
        if constraint.course_type.as_deref() != Some("Core") {
            continue;
        }
        let Some(required) = &constraint.courses else {
            continue;
        };
        for code in required {
            if completed.contains(code.as_str())
                || in_progress.contains(code.as_str())
                || recommended.contains(code.as_str())
            {
                continue;
            }
            let Some(&entry) = by_code.get(code.as_str()) else {
                tracing::debug!("core course {} not in catalog, skipping", code);
                continue;
            };
            recommended.insert(entry.code.as_str());
            recommendations.push(from_catalog(
                entry,
                constraint.course_type.clone(),
                Priority::High,
                "Required core course".to_string(),
            ));
        }
    }

    for rule in elective_rules {
        let satisfied = rule
            .course_list
            .iter()
            .filter(|code| completed.contains(code.as_str()))
            .count() as u32;
        if satisfied >= rule.required_courses {
            continue;
        }

        let mut shortfall = rule.required_courses - satisfied;
        for code in &rule.course_list {
            if shortfall == 0 {
                break;
            }
            if completed.contains(code.as_str())
                || in_progress.contains(code.as_str())
                || recommended.contains(code.as_str())
            {
                continue;
            }
            let Some(&entry) = by_code.get(code.as_str()) else {
                tracing::debug!("elective course {} not in catalog, skipping", code);
                continue;
            };
            recommended.insert(entry.code.as_str());
            recommendations.push(from_catalog(
                entry,
                None,
                Priority::Medium,
                format!("Counts toward elective rule: {}", rule.description),
            ));
            shortfall -= 1;
        }
    }

    // Stable sort: priority weight descending, insertion order otherwise.
    recommendations.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

fn from_catalog(
    entry: &CourseCatalogEntry,
    category: Option<String>,
    priority: Priority,
    reason: String,
) -> CourseRecommendation {
    CourseRecommendation {
        course_code: entry.code.clone(),
        course_name: entry.title.clone(),
        credits: entry.credit_hours,
        category,
        priority,
        reason,
        prerequisites: entry.prerequisites.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CourseStatus;

    fn record(code: &str, status: CourseStatus) -> StudentCourseRecord {
        StudentCourseRecord {
            course_code: code.to_string(),
            course_name: format!("Course {}", code),
            credits: 3,
            status,
            grade: None,
            category: None,
        }
    }

    fn catalog_entry(code: &str) -> CourseCatalogEntry {
        CourseCatalogEntry {
            code: code.to_string(),
            title: format!("Title {}", code),
            credit_hours: 3,
            prerequisites: Vec::new(),
        }
    }

    fn core_constraint(courses: &[&str]) -> CurriculumConstraint {
        CurriculumConstraint {
            course_type: Some("Core".to_string()),
            min_credits: 0,
            courses: Some(courses.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn test_missing_core_courses_are_high_priority() {
        let courses = vec![record("CS101", CourseStatus::Completed)];
        let constraints = vec![core_constraint(&["CS101", "CS102", "CS103"])];
        let catalog = vec![
            catalog_entry("CS101"),
            catalog_entry("CS102"),
            catalog_entry("CS103"),
        ];

        let recs = recommend(&courses, &constraints, &[], &catalog);
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r.priority == Priority::High));
        assert!(recs.iter().all(|r| r.reason == "Required core course"));
        assert_eq!(recs[0].course_code, "CS102");
        assert_eq!(recs[1].course_code, "CS103");
    }

    #[test]
    fn test_in_progress_courses_are_not_recommended() {
        let courses = vec![record("CS102", CourseStatus::InProgress)];
        let constraints = vec![core_constraint(&["CS102"])];
        let catalog = vec![catalog_entry("CS102")];

        let recs = recommend(&courses, &constraints, &[], &catalog);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_codes_missing_from_catalog_are_skipped() {
        let constraints = vec![core_constraint(&["CS999"])];
        let recs = recommend(&[], &constraints, &[], &[]);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_elective_shortfall_takes_list_order() {
        let courses = vec![record("ELEC1", CourseStatus::Completed)];
        let rules = vec![ElectiveRule {
            rule_type: "elective".to_string(),
            description: "Breadth electives".to_string(),
            required_courses: 2,
            course_list: vec!["ELEC1".into(), "ELEC2".into(), "ELEC3".into()],
        }];
        let catalog = vec![
            catalog_entry("ELEC1"),
            catalog_entry("ELEC2"),
            catalog_entry("ELEC3"),
        ];

        let recs = recommend(&courses, &[], &rules, &catalog);
        // Shortfall is one course, filled by the first untaken code in order.
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].course_code, "ELEC2");
        assert_eq!(recs[0].priority, Priority::Medium);
        assert!(recs[0].reason.contains("Breadth electives"));
    }

    #[test]
    fn test_high_priority_sorts_before_medium() {
        let constraints = vec![core_constraint(&["CORE1"])];
        let rules = vec![ElectiveRule {
            rule_type: "elective".to_string(),
            description: "Electives".to_string(),
            required_courses: 1,
            course_list: vec!["ELEC1".into()],
        }];
        let catalog = vec![catalog_entry("ELEC1"), catalog_entry("CORE1")];

        let recs = recommend(&[], &constraints, &rules, &catalog);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[1].priority, Priority::Medium);
    }

    #[test]
    fn test_output_capped_at_ten() {
        let codes: Vec<String> = (0..15).map(|i| format!("CORE{:02}", i)).collect();
        let code_refs: Vec<&str> = codes.iter().map(String::as_str).collect();
        let constraints = vec![core_constraint(&code_refs)];
        let catalog: Vec<CourseCatalogEntry> =
            codes.iter().map(|c| catalog_entry(c)).collect();

        let recs = recommend(&[], &constraints, &[], &catalog);
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
    }
}
