use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::id::UserId;

/// Fixed capacity of a record's name buffer, in bytes.
pub const NAME_BUF_CAPACITY: usize = 10;

/// The owned, variable-length text buffer of a [`RequestRecord`].
///
/// Allocated at record-creation time with a fixed small capacity
/// ([`NAME_BUF_CAPACITY`]); its contents start out empty. The buffer is
/// exclusively owned by its record: `NameBuf` is not `Clone`, has no public
/// constructor, and has no release path of its own, so it can only be
/// released together with the record that owns it. Partial retirement is
/// unrepresentable.
// BREAKING CHANGE WARNING: Do NOT add a Clone derive or a public constructor.
// Either would let a second owner hold the buffer past the record's
// retirement, reintroducing the use-after-release hazard this crate exists
// to prevent.
#[derive(Debug)]
pub struct NameBuf {
    buf: String,
}

impl NameBuf {
    /// Allocates an empty buffer at the fixed capacity.
    ///
    /// This is `pub(crate)` - only `RequestRecord` can create one.
    pub(crate) fn allocate() -> Self {
        Self {
            buf: String::with_capacity(NAME_BUF_CAPACITY),
        }
    }

    /// Returns the buffer's fixed capacity in bytes.
    pub fn capacity(&self) -> usize {
        NAME_BUF_CAPACITY
    }

    /// Returns the current contents.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Returns `true` if nothing has been written to the buffer.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Replaces the contents with `text`, truncated to fit the fixed
    /// capacity. Truncation lands on a `char` boundary so the buffer always
    /// holds valid UTF-8.
    pub fn fill(&mut self, text: &str) {
        let mut end = text.len().min(NAME_BUF_CAPACITY);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.buf.clear();
        self.buf.push_str(&text[..end]);
    }
}

/// Allocation/release counter that records can be attached to.
///
/// A probe counts how many records were allocated against it and how many
/// have been released. A record's release is noted exactly once, whether it
/// was retired explicitly via [`RequestRecord::retire`] or implicitly at
/// scope end, so `allocations() == releases()` means every record was
/// released exactly once: no double-release, no leak.
///
/// Cloning a probe clones a handle to the same counters.
///
/// # Examples
///
/// ```
/// use record_core::{ReleaseProbe, RequestRecord, UserId};
///
/// let probe = ReleaseProbe::new();
/// {
///     let record = RequestRecord::allocate_with_probe(UserId::new(1), &probe);
///     assert_eq!(probe.allocations(), 1);
///     assert_eq!(probe.releases(), 0);
///     let _receipt = record.retire();
/// }
/// assert_eq!(probe.releases(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReleaseProbe {
    counters: Arc<ProbeCounters>,
}

#[derive(Debug, Default)]
struct ProbeCounters {
    allocations: AtomicUsize,
    releases: AtomicUsize,
}

impl ReleaseProbe {
    /// Creates a new probe with both counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records allocated against this probe.
    pub fn allocations(&self) -> usize {
        self.counters.allocations.load(Ordering::SeqCst)
    }

    /// Number of those records that have been released.
    pub fn releases(&self) -> usize {
        self.counters.releases.load(Ordering::SeqCst)
    }

    fn note_allocation(&self) {
        self.counters.allocations.fetch_add(1, Ordering::SeqCst);
    }

    fn note_release(&self) {
        self.counters.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// The per-request in-memory record: an identifier plus a name buffer.
///
/// A record is created at call entry, exclusively owned by that call, and
/// retired exactly once: either explicitly mid-call via [`retire`](Self::retire)
/// or implicitly when it goes out of scope. Retirement releases the id's
/// container and the name buffer together, as one unit.
///
/// # Use-after-release is a compile error
///
/// [`retire`](Self::retire) takes the record by value, so the binding is
/// moved and no later code can read through it. The identifier needed after
/// retirement must be captured first - [`UserId`] is `Copy`, so this costs
/// nothing:
///
/// ```
/// use record_core::{RequestRecord, UserId};
///
/// let record = RequestRecord::allocate(UserId::new(7));
/// let id = record.id(); // capture before the retirement decision
/// let _receipt = record.retire();
/// assert_eq!(id.value(), 7); // the copy survives retirement
/// ```
///
/// Reading through the record after retiring it does not compile:
///
/// ```compile_fail
/// use record_core::{RequestRecord, UserId};
///
/// let record = RequestRecord::allocate(UserId::new(7));
/// let _receipt = record.retire();
/// let id = record.id(); // Error: `record` was moved by `retire()`
/// ```
// BREAKING CHANGE WARNING: Do NOT add Clone or Copy derives. A duplicated
// record would be released twice and would let one copy outlive the other's
// retirement.
#[derive(Debug)]
pub struct RequestRecord {
    id: UserId,
    name: NameBuf,
    probe: Option<ReleaseProbe>,
}

impl RequestRecord {
    /// Allocates a record with the given id and an empty name buffer at the
    /// fixed capacity.
    pub fn allocate(id: UserId) -> Self {
        tracing::debug!(user_id = %id, "record allocated");
        Self {
            id,
            name: NameBuf::allocate(),
            probe: None,
        }
    }

    /// Allocates a record whose release will be counted on `probe`.
    pub fn allocate_with_probe(id: UserId, probe: &ReleaseProbe) -> Self {
        probe.note_allocation();
        tracing::debug!(user_id = %id, "record allocated (probed)");
        Self {
            id,
            name: NameBuf::allocate(),
            probe: Some(probe.clone()),
        }
    }

    /// Returns the record's identifier.
    ///
    /// `UserId` is `Copy`; callers that need the id past a possible
    /// retirement point should call this first and keep the copy.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the record's name buffer.
    pub fn name(&self) -> &NameBuf {
        &self.name
    }

    /// Returns the name buffer for writing.
    pub fn name_mut(&mut self) -> &mut NameBuf {
        &mut self.name
    }

    /// Retires the record immediately, releasing the name buffer and the
    /// record itself as one unit.
    ///
    /// Consumes the record, so no code path can dereference it afterwards.
    /// Returns a [`RetireReceipt`] as proof that retirement happened.
    pub fn retire(self) -> RetireReceipt {
        tracing::debug!(user_id = %self.id, "record retired early");
        // Dropping `self` here releases id container and name buffer together.
        RetireReceipt { _private: () }
    }
}

impl Drop for RequestRecord {
    fn drop(&mut self) {
        if let Some(probe) = &self.probe {
            probe.note_release();
        }
        tracing::trace!(user_id = %self.id, "record released");
    }
}

/// Proof that a record was retired.
///
/// Zero-sized and unforgeable: it cannot be constructed outside this crate,
/// and it is deliberately not `Copy` or `Clone`, so one receipt corresponds
/// to exactly one retirement.
///
/// ```compile_fail
/// # use record_core::RetireReceipt;
/// // This does not compile - RetireReceipt cannot be constructed publicly:
/// let receipt = RetireReceipt { _private: () }; // Error: _private is private
/// ```
#[derive(Debug)]
pub struct RetireReceipt {
    // Private field prevents construction outside the crate
    _private: (),
}
