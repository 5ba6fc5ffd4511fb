use crate::domain::model::{
    Blacklist, CurriculumConstraint, ElectiveRule, StudentCourseRecord, ValidationFindings,
};
use std::collections::HashSet;

/// Checks a course history against a curriculum's rules. Findings accumulate;
/// a single bad record never aborts evaluation of the rest. Constraint and
/// blacklist violations are hard errors, elective shortfalls are advisory
/// warnings.
pub fn validate(
    courses: &[StudentCourseRecord],
    constraints: &[CurriculumConstraint],
    elective_rules: &[ElectiveRule],
    blacklists: &[Blacklist],
) -> ValidationFindings {
    let mut findings = ValidationFindings::default();
    let completed: Vec<&StudentCourseRecord> =
        courses.iter().filter(|c| c.is_completed()).collect();
    let completed_codes: HashSet<&str> =
        completed.iter().map(|c| c.course_code.as_str()).collect();

    for constraint in constraints {
        check_constraint(constraint, &completed, &mut findings);
    }

    for rule in elective_rules {
        check_elective_rule(rule, &completed_codes, &mut findings);
    }

    for blacklist in blacklists {
        check_blacklist(blacklist, &completed_codes, &mut findings);
    }

    findings
}

fn check_constraint(
    constraint: &CurriculumConstraint,
    completed: &[&StudentCourseRecord],
    findings: &mut ValidationFindings,
) {
    let earned: u32 = completed
        .iter()
        .filter(|c| constraint_covers(constraint, c))
        .map(|c| c.credits)
        .sum();

    if earned < constraint.min_credits {
        let label = constraint.course_type.as_deref().unwrap_or("General");
        findings.errors.push(format!(
            "{}: {} more credits required ({}/{} completed)",
            label,
            constraint.min_credits - earned,
            earned,
            constraint.min_credits
        ));
    }
}

/// A completed course counts toward a constraint when it is in the explicit
/// course set, or, absent such a set, when its category matches the
/// constraint's course type.
fn constraint_covers(constraint: &CurriculumConstraint, course: &StudentCourseRecord) -> bool {
    match &constraint.courses {
        Some(codes) => codes.iter().any(|code| code == &course.course_code),
        None => match (&constraint.course_type, &course.category) {
            (Some(course_type), Some(category)) => course_type == category,
            _ => false,
        },
    }
}

fn check_elective_rule(
    rule: &ElectiveRule,
    completed_codes: &HashSet<&str>,
    findings: &mut ValidationFindings,
) {
    let satisfied = rule
        .course_list
        .iter()
        .filter(|code| completed_codes.contains(code.as_str()))
        .count() as u32;

    if satisfied < rule.required_courses {
        findings.warnings.push(format!(
            "Elective rule '{}' not yet satisfied: {}/{} courses completed",
            rule.description, satisfied, rule.required_courses
        ));
    }
}

fn check_blacklist(
    blacklist: &Blacklist,
    completed_codes: &HashSet<&str>,
    findings: &mut ValidationFindings,
) {
    // Fewer than two courses cannot express a mutual exclusion.
    if blacklist.courses.len() < 2 {
        return;
    }

    let taken: Vec<&str> = blacklist
        .courses
        .iter()
        .filter(|code| completed_codes.contains(code.as_str()))
        .map(String::as_str)
        .collect();

    // Exactly one completed course from the set is permitted.
    if taken.len() > 1 {
        let reason = blacklist
            .reason
            .as_deref()
            .unwrap_or("mutually exclusive courses");
        findings.errors.push(format!(
            "Blacklist violation: completed {} together ({})",
            taken.join(", "),
            reason
        ));
    }
}
