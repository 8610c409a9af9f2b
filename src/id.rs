use std::fmt;

/// The caller-supplied identifier of a request record.
///
/// `UserId` is a plain value: it is `Copy`, so it can be captured out of a
/// [`RequestRecord`](crate::RequestRecord) *before* any retirement decision
/// and survives the record's release. This is the property that lets callers
/// report the id without ever reading through a retired record.
///
/// Any `i64` is a valid id; no range constraints apply.
///
/// # Examples
///
/// ```
/// use record_core::UserId;
///
/// let id = UserId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
///
/// // Copy semantics: both bindings stay usable
/// let copy = id;
/// assert_eq!(id, copy);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Creates a new id from a raw integer.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw integer value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
