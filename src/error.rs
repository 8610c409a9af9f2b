use std::fmt;
use std::io;

/// Errors that can occur in the record lifecycle crate.
#[derive(Debug)]
pub enum Error {
    /// A record lifecycle violation occurred
    Lifecycle(LifecycleViolation),
    /// Writing the report line to the output stream failed
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lifecycle(v) => write!(f, "Lifecycle violation: {}", v),
            Error::Io(e) => write!(f, "Output error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Lifecycle(v) => Some(v),
            Error::Io(e) => Some(e),
        }
    }
}

impl From<LifecycleViolation> for Error {
    fn from(v: LifecycleViolation) -> Self {
        Error::Lifecycle(v)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// A lifecycle violation with details about what failed.
///
/// Violations are produced only by the runtime-checked
/// [`RecordSlot`](crate::RecordSlot). The owned
/// [`RequestRecord`](crate::RequestRecord) makes the same conditions
/// compile errors instead, so code on the owned path never sees one.
#[derive(Debug)]
pub struct LifecycleViolation {
    /// The kind of violation that occurred
    pub kind: LifecycleViolationKind,
    /// Human-readable message explaining the violation
    pub message: String,
}

impl LifecycleViolation {
    /// Creates a new violation.
    pub fn new(kind: LifecycleViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for LifecycleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for LifecycleViolation {}

/// The kind of lifecycle violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleViolationKind {
    /// A record field was accessed after the record was retired
    UseAfterRelease,
    /// A record was retired more than once
    DoubleRelease,
}

impl fmt::Display for LifecycleViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleViolationKind::UseAfterRelease => write!(f, "Use after release"),
            LifecycleViolationKind::DoubleRelease => write!(f, "Double release"),
        }
    }
}
