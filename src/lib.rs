//! Use-after-release enforcement for per-request records.
//!
//! This crate models one request-handling operation: allocate a per-request
//! record, optionally retire it early when the caller asks for its data to
//! be cleared, and report the record's identifier exactly once either way.
//! The hazard in that shape is reading the record after it was retired; this
//! crate makes that hazard unrepresentable:
//!
//! - **Move-based retirement**: [`RequestRecord::retire`] consumes the
//!   record, so any later read through it is a compile error
//! - **Value-semantics identifiers**: [`UserId`] is `Copy` and is captured
//!   before the retirement decision, so reporting never needs a live record
//! - **Checked dynamic access**: [`RecordSlot`] turns use-after-release and
//!   double-release into guaranteed errors where the lifecycle cannot be
//!   expressed in the type system
//!
//! # Core Types
//!
//! - [`RequestRecordHandler`]: processes one request per call, releasing the
//!   record exactly once on every branch
//! - [`RequestRecord`]: the per-request record owning its [`NameBuf`]
//! - [`RetireReceipt`]: unforgeable proof that a record was retired
//! - [`RecordSlot`]: runtime-checked holder for records stored across calls
//! - [`ReleaseProbe`]: allocation/release counter for leak accounting
//!
//! # Examples
//!
//! ```
//! use record_core::RequestRecordHandler;
//!
//! let mut out = Vec::new();
//! let mut handler = RequestRecordHandler::with_writer(&mut out);
//!
//! // Same report whether or not the record is cleared early:
//! handler.process_request(42, false).unwrap();
//! handler.process_request(7, true).unwrap();
//!
//! let lines = String::from_utf8(out).unwrap();
//! assert!(lines.contains("Processed request for user ID: 42"));
//! assert!(lines.contains("Processed request for user ID: 7"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod handler;
mod id;
mod record;
mod slot;

pub use error::{Error, LifecycleViolation, LifecycleViolationKind};
pub use handler::{process_request, RequestRecordHandler};
pub use id::UserId;
pub use record::{NameBuf, ReleaseProbe, RequestRecord, RetireReceipt, NAME_BUF_CAPACITY};
pub use slot::RecordSlot;
