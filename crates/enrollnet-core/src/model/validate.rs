//! Normalization of user-supplied student IDs and course codes.
//!
//! Inputs that do not fit the expected shape are rejected, never coerced.
//!
//! | input            | result       |
//! |------------------|--------------|
//! | `" c1234 "`      | `C1234`      |
//! | `"soci 101.002"` | `SOCI 101`   |
//! | `"psyc210"`      | `PSYC 210`   |
//! | `"SOC 101"`      | rejected     |

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ErrorCode;

static STUDENT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][0-9]{4}$").expect("static student id pattern"));

static COURSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{4})\s*([0-9]{2,3})$").expect("static course code pattern")
});

/// Validation failures for registration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("student ID is required")]
    MissingStudentId,

    #[error("student ID must be 1 letter followed by 4 digits (e.g., C1234), got {0:?}")]
    InvalidStudentId(String),

    #[error("invalid course format: {0:?}. Use format like \"SOCI 101\" or \"PSYC210\"")]
    InvalidCourse(String),

    #[error("at least one course is required")]
    NoCourses,
}

impl ModelError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingStudentId | Self::InvalidStudentId(_) => ErrorCode::InvalidStudentId,
            Self::InvalidCourse(_) => ErrorCode::InvalidCourseCode,
            Self::NoCourses => ErrorCode::NoCourses,
        }
    }
}

/// Trim and uppercase a student ID, then check it is one letter + four digits.
///
/// # Errors
///
/// [`ModelError::MissingStudentId`] for blank input,
/// [`ModelError::InvalidStudentId`] for anything else that does not match.
pub fn normalize_student_id(raw: &str) -> Result<String, ModelError> {
    let id = raw.trim().to_uppercase();
    if id.is_empty() {
        return Err(ModelError::MissingStudentId);
    }
    if STUDENT_ID_RE.is_match(&id) {
        Ok(id)
    } else {
        Err(ModelError::InvalidStudentId(raw.to_string()))
    }
}

/// Normalize a course code to `"DEPT NUM"`.
///
/// The section suffix (everything from the first `.`) is dropped before
/// matching, so `"SOCI 101.002"` and `"soci101"` both yield `"SOCI 101"`.
///
/// # Errors
///
/// [`ModelError::InvalidCourse`] when the remainder is not four letters
/// followed by two or three digits.
pub fn parse_course_code(raw: &str) -> Result<String, ModelError> {
    let head = raw.split('.').next().unwrap_or_default();
    let course = head.trim().to_uppercase();

    COURSE_RE
        .captures(&course)
        .map(|caps| format!("{} {}", &caps[1], &caps[2]))
        .ok_or_else(|| ModelError::InvalidCourse(raw.to_string()))
}

/// Normalize every course code, dropping later duplicates.
///
/// # Errors
///
/// [`ModelError::NoCourses`] for an empty input and the first
/// [`ModelError::InvalidCourse`] encountered otherwise.
pub fn normalize_courses<I, S>(raw: I) -> Result<Vec<String>, ModelError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut courses = Vec::new();

    for item in raw {
        let course = parse_course_code(item.as_ref())?;
        if seen.insert(course.clone()) {
            courses.push(course);
        }
    }

    if courses.is_empty() {
        return Err(ModelError::NoCourses);
    }
    Ok(courses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_id_is_trimmed_and_uppercased() {
        assert_eq!(normalize_student_id(" c1234 ").unwrap(), "C1234");
        assert_eq!(normalize_student_id("Z0000").unwrap(), "Z0000");
    }

    #[test]
    fn student_id_rejects_bad_shapes() {
        assert_eq!(normalize_student_id("   "), Err(ModelError::MissingStudentId));
        for bad in ["CC123", "C123", "C12345", "12345", "C12a4"] {
            assert!(
                matches!(normalize_student_id(bad), Err(ModelError::InvalidStudentId(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn course_section_suffix_is_stripped() {
        assert_eq!(parse_course_code("SOCI 101.002").unwrap(), "SOCI 101");
        assert_eq!(parse_course_code("soci 101.002").unwrap(), "SOCI 101");
    }

    #[test]
    fn course_space_is_optional() {
        assert_eq!(parse_course_code("psyc210").unwrap(), "PSYC 210");
        assert_eq!(parse_course_code("ECON   10").unwrap(), "ECON 10");
    }

    #[test]
    fn course_rejects_bad_shapes() {
        for bad in ["SOC 101", "SOCI 1", "SOCI 1010", "", ".101", "SOCIO 101", "101 SOCI"] {
            assert!(
                matches!(parse_course_code(bad), Err(ModelError::InvalidCourse(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn normalize_courses_dedupes_preserving_order() {
        let out = normalize_courses(["psyc210", "SOCI 101", "PSYC 210.001", "econ101"]).unwrap();
        assert_eq!(out, vec!["PSYC 210", "SOCI 101", "ECON 101"]);
    }

    #[test]
    fn normalize_courses_requires_one() {
        let empty: [&str; 0] = [];
        assert_eq!(normalize_courses(empty), Err(ModelError::NoCourses));
    }

    #[test]
    fn normalize_courses_stops_at_first_invalid() {
        let err = normalize_courses(["SOCI 101", "bogus", "also bad"]).unwrap_err();
        assert_eq!(err, ModelError::InvalidCourse("bogus".to_string()));
        assert_eq!(err.code(), ErrorCode::InvalidCourseCode);
    }
}
