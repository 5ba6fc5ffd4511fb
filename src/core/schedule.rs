use crate::domain::model::{
    CourseSection, CourseWithSections, ScheduleCombination, SectionAssignment,
};
use chrono::{NaiveTime, Timelike};

/// Upper bound on the number of combinations returned. Enumeration stops as
/// soon as this many conflict-free combinations exist; the full product is
/// only walked when fewer conflict-free options are available.
pub const MAX_COMBINATIONS: usize = 20;

/// Enumerates one-section-per-course assignments over the courses that have
/// at least one section, best-first: conflict-free combinations before
/// conflicted ones, stable in generation order, truncated to
/// [`MAX_COMBINATIONS`].
pub fn generate(courses: &[CourseWithSections]) -> Vec<ScheduleCombination> {
    // Courses without sections place no scheduling constraint.
    let scheduled: Vec<&CourseWithSections> =
        courses.iter().filter(|c| !c.sections.is_empty()).collect();
    if scheduled.is_empty() {
        return Vec::new();
    }

    let mut clean = Vec::new();
    let mut conflicted = Vec::new();
    let mut current = Vec::with_capacity(scheduled.len());
    walk(&scheduled, 0, &mut current, &mut clean, &mut conflicted);

    tracing::debug!(
        "{} conflict-free and {} conflicted combinations kept",
        clean.len(),
        conflicted.len()
    );

    let mut combinations = clean;
    combinations.extend(conflicted);
    combinations.truncate(MAX_COMBINATIONS);
    combinations
}

/// Depth-first branch per section of the next course. Returns true once
/// enough conflict-free combinations have been collected to fill the output.
fn walk(
    courses: &[&CourseWithSections],
    depth: usize,
    current: &mut Vec<SectionAssignment>,
    clean: &mut Vec<ScheduleCombination>,
    conflicted: &mut Vec<ScheduleCombination>,
) -> bool {
    if depth == courses.len() {
        let conflicts = detect_conflicts(current);
        if conflicts.is_empty() {
            clean.push(ScheduleCombination {
                assignments: current.clone(),
                has_conflicts: false,
                conflicts,
            });
            return clean.len() >= MAX_COMBINATIONS;
        }
        // Conflicted combinations past the output cap can never be shown;
        // they would be truncated after the conflict-free ones anyway.
        if conflicted.len() < MAX_COMBINATIONS {
            conflicted.push(ScheduleCombination {
                assignments: current.clone(),
                has_conflicts: true,
                conflicts,
            });
        }
        return false;
    }

    for section in &courses[depth].sections {
        current.push(SectionAssignment {
            course_code: courses[depth].code.clone(),
            section: section.clone(),
        });
        let done = walk(courses, depth + 1, current, clean, conflicted);
        current.pop();
        if done {
            return true;
        }
    }
    false
}

fn detect_conflicts(assignments: &[SectionAssignment]) -> Vec<String> {
    let mut conflicts = Vec::new();
    for (i, a) in assignments.iter().enumerate() {
        for b in &assignments[i + 1..] {
            if let Some(days) = overlap_days(&a.section, &b.section) {
                conflicts.push(format!(
                    "{} and {} overlap on {}",
                    a.course_code,
                    b.course_code,
                    days.join(", ")
                ));
            }
        }
    }
    conflicts
}

/// Day tokens on which the two sections overlap, or `None` when they do not
/// conflict. Sections whose times are missing or malformed are excluded from
/// conflict detection.
fn overlap_days(a: &CourseSection, b: &CourseSection) -> Option<Vec<String>> {
    let (start_a, end_a) = section_interval(a)?;
    let (start_b, end_b) = section_interval(b)?;

    // Half-open intervals: back-to-back sections do not conflict.
    if start_a >= end_b || end_a <= start_b {
        return None;
    }

    let shared: Vec<String> = a
        .days
        .iter()
        .filter(|day| b.days.contains(day))
        .cloned()
        .collect();
    if shared.is_empty() {
        None
    } else {
        Some(shared)
    }
}

fn section_interval(section: &CourseSection) -> Option<(u32, u32)> {
    let (Some(start_raw), Some(end_raw)) = (&section.time_start, &section.time_end) else {
        return None;
    };
    let (Some(start), Some(end)) = (minutes(start_raw), minutes(end_raw)) else {
        tracing::warn!(
            "section {} has malformed time '{}-{}', excluded from conflict detection",
            section.id,
            start_raw,
            end_raw
        );
        return None;
    };
    if start >= end {
        tracing::warn!(
            "section {} ends before it starts ({}-{}), excluded from conflict detection",
            section.id,
            start_raw,
            end_raw
        );
        return None;
    }
    Some((start, end))
}

fn minutes(time: &str) -> Option<u32> {
    let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()?;
    Some(parsed.hour() * 60 + parsed.minute())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, days: &[&str], start: &str, end: &str) -> CourseSection {
        CourseSection {
            id: id.to_string(),
            days: days.iter().map(|d| d.to_string()).collect(),
            time_start: Some(start.to_string()),
            time_end: Some(end.to_string()),
            instructor: None,
            room: None,
            capacity: None,
            enrolled: None,
        }
    }

    fn course(code: &str, sections: Vec<CourseSection>) -> CourseWithSections {
        CourseWithSections {
            code: code.to_string(),
            name: format!("Course {}", code),
            sections,
        }
    }

    #[test]
    fn test_overlapping_sections_conflict() {
        let a = section("A1", &["Monday"], "09:00", "10:30");
        let b = section("B1", &["Monday"], "10:00", "11:00");
        assert_eq!(overlap_days(&a, &b), Some(vec!["Monday".to_string()]));
    }

    #[test]
    fn test_back_to_back_sections_do_not_conflict() {
        let a = section("A1", &["Monday"], "09:00", "10:00");
        let b = section("B1", &["Monday"], "10:00", "11:00");
        assert_eq!(overlap_days(&a, &b), None);
    }

    #[test]
    fn test_different_days_do_not_conflict() {
        let a = section("A1", &["Monday"], "09:00", "10:30");
        let b = section("B1", &["Tuesday"], "09:00", "10:30");
        assert_eq!(overlap_days(&a, &b), None);
    }

    #[test]
    fn test_malformed_time_is_skipped() {
        let a = section("A1", &["Monday"], "9 o'clock", "10:30");
        let b = section("B1", &["Monday"], "09:00", "10:30");
        assert_eq!(overlap_days(&a, &b), None);
    }

    #[test]
    fn test_inverted_interval_is_skipped() {
        let a = section("A1", &["Monday"], "11:00", "09:00");
        let b = section("B1", &["Monday"], "09:00", "10:30");
        assert_eq!(overlap_days(&a, &b), None);
    }

    #[test]
    fn test_two_courses_two_sections_each() {
        let courses = vec![
            course(
                "CS101",
                vec![
                    section("CS101-1", &["Monday"], "09:00", "10:00"),
                    section("CS101-2", &["Tuesday"], "09:00", "10:00"),
                ],
            ),
            course(
                "CS102",
                vec![
                    section("CS102-1", &["Wednesday"], "09:00", "10:00"),
                    section("CS102-2", &["Thursday"], "09:00", "10:00"),
                ],
            ),
        ];

        let combinations = generate(&courses);
        assert_eq!(combinations.len(), 4);
        assert!(combinations.iter().all(|c| !c.has_conflicts));
        assert!(combinations.iter().all(|c| c.assignments.len() == 2));
    }

    #[test]
    fn test_conflicted_combinations_sort_last() {
        let courses = vec![
            course(
                "CS101",
                vec![
                    section("CS101-1", &["Monday"], "09:00", "10:30"),
                    section("CS101-2", &["Tuesday"], "09:00", "10:30"),
                ],
            ),
            course("CS102", vec![section("CS102-1", &["Monday"], "10:00", "11:00")]),
        ];

        let combinations = generate(&courses);
        assert_eq!(combinations.len(), 2);
        assert!(!combinations[0].has_conflicts);
        assert!(combinations[1].has_conflicts);
        assert_eq!(
            combinations[1].conflicts,
            vec!["CS101 and CS102 overlap on Monday".to_string()]
        );
    }

    #[test]
    fn test_courses_without_sections_are_excluded() {
        let courses = vec![
            course("CS101", vec![section("CS101-1", &["Monday"], "09:00", "10:00")]),
            course("SEMINAR", vec![]),
        ];

        let combinations = generate(&courses);
        assert_eq!(combinations.len(), 1);
        assert_eq!(combinations[0].assignments.len(), 1);
        assert_eq!(combinations[0].assignments[0].course_code, "CS101");
    }

    #[test]
    fn test_output_never_exceeds_cap() {
        // 3 courses x 4 sections = 64 raw combinations, all conflict-free.
        let mut courses = Vec::new();
        for c in 0..3 {
            let sections = (0..4)
                .map(|s| {
                    section(
                        &format!("C{}-{}", c, s),
                        &[["Monday", "Tuesday", "Wednesday", "Thursday"][s]],
                        &format!("{:02}:00", 8 + c),
                        &format!("{:02}:00", 9 + c),
                    )
                })
                .collect();
            courses.push(course(&format!("C{}", c), sections));
        }

        let combinations = generate(&courses);
        assert_eq!(combinations.len(), MAX_COMBINATIONS);
        assert!(combinations.iter().all(|c| !c.has_conflicts));
    }

    #[test]
    fn test_multi_day_overlap_lists_every_shared_day() {
        let a = section("A1", &["Monday", "Wednesday"], "09:00", "10:30");
        let b = section("B1", &["Monday", "Wednesday", "Friday"], "10:00", "11:00");
        assert_eq!(
            overlap_days(&a, &b),
            Some(vec!["Monday".to_string(), "Wednesday".to_string()])
        );
    }
}
