//! Enrollment data model.
//!
//! - [`record`]: student registrations and the excluded-course set.
//! - [`validate`]: normalization of student IDs and course codes.
//! - [`centrality`]: result types produced by the network engine and
//!   persisted by the registry store.

pub mod centrality;
pub mod record;
pub mod validate;

pub use centrality::{CachedCentrality, CentralityResult, NetworkStatsSummary, NodeCentrality};
pub use record::{DEFAULT_EXCLUDED_COURSE, ExcludedCourses, StudentRecord};
pub use validate::{ModelError, normalize_courses, normalize_student_id, parse_course_code};
