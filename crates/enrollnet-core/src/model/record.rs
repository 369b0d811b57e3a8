//! Student registration records.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Course excluded from co-enrollment edges unless configured otherwise.
///
/// Every student takes it, so counting it would connect everyone to
/// everyone and drown out the real structure.
pub const DEFAULT_EXCLUDED_COURSE: &str = "SOCI 101";

/// One student's registration: a normalized ID plus normalized course codes.
///
/// Records handed to the network engine are expected to be validated
/// already (see [`crate::model::validate`]); the engine treats IDs and
/// course codes as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    /// Course codes in registration order, without duplicates.
    pub courses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

impl StudentRecord {
    /// Build an unstamped record.
    pub fn new<I, S>(id: impl Into<String>, courses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            courses: courses.into_iter().map(Into::into).collect(),
            registered_at: None,
        }
    }

    /// Return the record with `registered_at` set.
    #[must_use]
    pub const fn registered(mut self, at: DateTime<Utc>) -> Self {
        self.registered_at = Some(at);
        self
    }

    /// Courses that take part in edge construction.
    pub fn counted_courses<'a>(
        &'a self,
        excluded: &'a ExcludedCourses,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.courses
            .iter()
            .map(String::as_str)
            .filter(|c| !excluded.contains(c))
    }
}

/// Course codes that never contribute to shared-course or shared-student
/// edges.
///
/// Passed explicitly into the network builders; there is no global
/// exclusion constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExcludedCourses(BTreeSet<String>);

impl ExcludedCourses {
    /// An exclusion set built from the given course codes.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(codes.into_iter().map(Into::into).collect())
    }

    /// Exclude nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self(BTreeSet::new())
    }

    #[must_use]
    pub fn contains(&self, course: &str) -> bool {
        self.0.contains(course)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ExcludedCourses {
    fn default() -> Self {
        Self::new([DEFAULT_EXCLUDED_COURSE])
    }
}
