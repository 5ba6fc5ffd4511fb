use crate::domain::model::StudentCourseRecord;

/// Grade-point value on the 4.0 scale. Unknown grades get `None` and are
/// excluded from GPA; flagging odd grade formats is a record-validation
/// concern, not a GPA concern.
pub fn grade_point(grade: &str) -> Option<f64> {
    match grade.trim() {
        "A+" | "A" => Some(4.0),
        "A-" => Some(3.7),
        "B+" => Some(3.3),
        "B" => Some(3.0),
        "B-" => Some(2.7),
        "C+" => Some(2.3),
        "C" => Some(2.0),
        "C-" => Some(1.7),
        "D+" => Some(1.3),
        "D" => Some(1.0),
        "D-" => Some(0.7),
        "F" => Some(0.0),
        _ => None,
    }
}

/// Credit-weighted GPA over completed, graded courses. Returns 0.0 when no
/// course contributes; that is a defined result, not an error.
pub fn calculate_gpa(courses: &[StudentCourseRecord]) -> f64 {
    let mut points = 0.0;
    let mut credits = 0u32;

    for course in courses {
        if !course.is_completed() {
            continue;
        }
        let Some(grade) = course.grade.as_deref() else {
            continue;
        };
        let Some(value) = grade_point(grade) else {
            continue;
        };
        points += value * course.credits as f64;
        credits += course.credits;
    }

    if credits == 0 {
        0.0
    } else {
        points / credits as f64
    }
}
