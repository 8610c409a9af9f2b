use crate::error::{LifecycleViolation, LifecycleViolationKind};
use crate::id::UserId;
use crate::record::{NameBuf, RequestRecord, RetireReceipt};

/// A runtime-checked holder for a [`RequestRecord`].
///
/// The owned record makes use-after-release a compile error, but that only
/// works while the compiler can see the move - a record stored in a struct
/// field or handed between callbacks outlives any single borrow the checker
/// can reason about. `RecordSlot` covers those dynamic shapes: every access
/// is checked against the slot's lifecycle state, and access after
/// retirement is a guaranteed [`LifecycleViolation`], never a silent stale
/// read.
///
/// # Examples
///
/// ```
/// use record_core::{RecordSlot, RequestRecord, UserId, LifecycleViolationKind};
///
/// let mut slot = RecordSlot::new(RequestRecord::allocate(UserId::new(7)));
/// assert_eq!(slot.id().unwrap().value(), 7);
///
/// let _receipt = slot.retire().unwrap();
///
/// // Reads after retirement are rejected, not answered with stale data:
/// let err = slot.id().unwrap_err();
/// assert_eq!(err.kind, LifecycleViolationKind::UseAfterRelease);
/// ```
#[derive(Debug)]
pub struct RecordSlot {
    // None once retired. The record itself never outlives retirement.
    record: Option<RequestRecord>,
}

impl RecordSlot {
    /// Wraps a live record in a slot.
    pub fn new(record: RequestRecord) -> Self {
        Self {
            record: Some(record),
        }
    }

    /// Returns `true` while the record has not been retired.
    pub fn is_live(&self) -> bool {
        self.record.is_some()
    }

    /// Returns the record's id, or a [`LifecycleViolationKind::UseAfterRelease`]
    /// violation if the record was already retired.
    pub fn id(&self) -> Result<UserId, LifecycleViolation> {
        Ok(self.live("id")?.id())
    }

    /// Returns the record's name buffer, or a use-after-release violation.
    pub fn name(&self) -> Result<&NameBuf, LifecycleViolation> {
        Ok(self.live("name")?.name())
    }

    /// Returns the live record for mutation, or a use-after-release violation.
    pub fn record_mut(&mut self) -> Result<&mut RequestRecord, LifecycleViolation> {
        match self.record.as_mut() {
            Some(record) => Ok(record),
            None => Err(use_after_release("record")),
        }
    }

    /// Retires the held record.
    ///
    /// # Errors
    ///
    /// Returns a [`LifecycleViolationKind::DoubleRelease`] violation if the
    /// record was already retired through this slot.
    pub fn retire(&mut self) -> Result<RetireReceipt, LifecycleViolation> {
        match self.record.take() {
            Some(record) => Ok(record.retire()),
            None => Err(LifecycleViolation::new(
                LifecycleViolationKind::DoubleRelease,
                "slot already retired its record",
            )),
        }
    }

    fn live(&self, field: &str) -> Result<&RequestRecord, LifecycleViolation> {
        match self.record.as_ref() {
            Some(record) => Ok(record),
            None => Err(use_after_release(field)),
        }
    }
}

fn use_after_release(field: &str) -> LifecycleViolation {
    LifecycleViolation::new(
        LifecycleViolationKind::UseAfterRelease,
        format!("cannot read '{}' after the record was retired", field),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_slot_serves_fields() {
        let mut slot = RecordSlot::new(RequestRecord::allocate(UserId::new(42)));
        assert!(slot.is_live());
        assert_eq!(slot.id().unwrap(), UserId::new(42));
        assert!(slot.name().unwrap().is_empty());

        slot.record_mut().unwrap().name_mut().fill("alice");
        assert_eq!(slot.name().unwrap().as_str(), "alice");
    }

    #[test]
    fn reads_after_retirement_are_rejected() {
        let mut slot = RecordSlot::new(RequestRecord::allocate(UserId::new(7)));
        let _receipt = slot.retire().unwrap();

        assert!(!slot.is_live());
        let err = slot.id().unwrap_err();
        assert_eq!(err.kind, LifecycleViolationKind::UseAfterRelease);
        assert!(slot.name().is_err());
        assert!(slot.record_mut().is_err());
    }

    #[test]
    fn second_retirement_is_rejected() {
        let mut slot = RecordSlot::new(RequestRecord::allocate(UserId::new(7)));
        assert!(slot.retire().is_ok());

        let err = slot.retire().unwrap_err();
        assert_eq!(err.kind, LifecycleViolationKind::DoubleRelease);
    }

    #[test]
    fn retirement_through_slot_releases_exactly_once() {
        let probe = crate::ReleaseProbe::new();
        let mut slot = RecordSlot::new(RequestRecord::allocate_with_probe(
            UserId::new(7),
            &probe,
        ));

        let _receipt = slot.retire().unwrap();
        assert_eq!(probe.releases(), 1);

        // A failed second retire must not release anything again.
        let _ = slot.retire();
        drop(slot);
        assert_eq!(probe.releases(), 1);
    }
}
