use std::fmt;

/// Machine-readable error codes for scripts and front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidStudentId,
    InvalidCourseCode,
    NoCourses,
    StudentNotFound,
    CourseNotFound,
    CorruptRegistry,
    RegistryWriteFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::InvalidStudentId => "E2001",
            Self::InvalidCourseCode => "E2002",
            Self::NoCourses => "E2003",
            Self::StudentNotFound => "E2004",
            Self::CourseNotFound => "E2005",
            Self::CorruptRegistry => "E3001",
            Self::RegistryWriteFailed => "E5001",
            Self::LockContention => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidStudentId => "Invalid student ID",
            Self::InvalidCourseCode => "Invalid course code",
            Self::NoCourses => "No courses given",
            Self::StudentNotFound => "Student not found",
            Self::CourseNotFound => "Course not found",
            Self::CorruptRegistry => "Corrupt registry file",
            Self::RegistryWriteFailed => "Registry write failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in enrollnet.toml and retry."),
            Self::InvalidStudentId => {
                Some("Use one letter followed by four digits, e.g. C1234.")
            }
            Self::InvalidCourseCode => {
                Some("Use a four-letter department and a 2-3 digit number, e.g. SOCI 101.")
            }
            Self::NoCourses => Some("Pass at least one course code."),
            Self::StudentNotFound | Self::CourseNotFound => None,
            Self::CorruptRegistry => {
                Some("Restore the registry file from backup or re-register students.")
            }
            Self::RegistryWriteFailed => Some("Check disk space and write permissions."),
            Self::LockContention => {
                Some("Retry after the other `enet` process releases its lock.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
