use std::io::{self, Write};

use crate::error::Error;
use crate::id::UserId;
use crate::record::{ReleaseProbe, RequestRecord};

/// Handles one request against a transient per-request record.
///
/// For each call the handler allocates a [`RequestRecord`], optionally
/// retires it early when the caller asks for its data to be cleared, and
/// reports the record's id exactly once either way. The id is captured
/// *before* the retirement decision - it is a plain [`UserId`] value with no
/// ownership tie to the record - so no code path ever reads through a
/// retired record. The record is released exactly once per call: at the
/// explicit retirement point, or implicitly at call exit.
///
/// The handler is generic over its output stream so tests can capture the
/// emitted line; [`RequestRecordHandler::new`] binds stdout.
///
/// # Examples
///
/// ```
/// use record_core::RequestRecordHandler;
///
/// let mut out = Vec::new();
/// let mut handler = RequestRecordHandler::with_writer(&mut out);
/// handler.process_request(42, false).unwrap();
/// handler.process_request(7, true).unwrap();
///
/// let lines = String::from_utf8(out).unwrap();
/// assert_eq!(
///     lines,
///     "Processed request for user ID: 42\nProcessed request for user ID: 7\n"
/// );
/// ```
#[derive(Debug)]
pub struct RequestRecordHandler<W = io::Stdout> {
    out: W,
    probe: Option<ReleaseProbe>,
}

impl RequestRecordHandler {
    /// Creates a handler that reports to stdout.
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            probe: None,
        }
    }
}

impl Default for RequestRecordHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> RequestRecordHandler<W> {
    /// Creates a handler that reports to the given writer.
    pub fn with_writer(out: W) -> Self {
        Self { out, probe: None }
    }

    /// Attaches a [`ReleaseProbe`]; every record this handler allocates will
    /// count its allocation and release on it.
    pub fn with_probe(mut self, probe: ReleaseProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Processes one request.
    ///
    /// Allocates the per-request record, retires it early if `clear_data` is
    /// set, and emits exactly one line
    /// `Processed request for user ID: <user_id>` to the bound stream. The
    /// reported id always equals `user_id`, on both branches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing the report line fails. There is no
    /// lifecycle error path: the id is copied out of the record before the
    /// retirement decision, and retirement moves the record, so a
    /// use-after-release cannot be expressed here.
    pub fn process_request(&mut self, user_id: i64, clear_data: bool) -> Result<(), Error> {
        let record = match &self.probe {
            Some(probe) => RequestRecord::allocate_with_probe(UserId::new(user_id), probe),
            None => RequestRecord::allocate(UserId::new(user_id)),
        };

        // Capture the id while the record is live. From here on nothing
        // needs the record itself.
        let id = record.id();

        if clear_data {
            let _receipt = record.retire();
            tracing::debug!(user_id = %id, "request data cleared before reporting");
        }

        writeln!(self.out, "Processed request for user ID: {}", id)?;
        tracing::debug!(user_id = %id, clear_data, "request processed");

        // On the clear_data == false branch the record is still live here
        // and is released exactly once when it drops at call exit.
        Ok(())
    }
}

/// Processes one request, reporting to stdout.
///
/// Convenience wrapper over [`RequestRecordHandler`] for one-off calls.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing to stdout fails.
pub fn process_request(user_id: i64, clear_data: bool) -> Result<(), Error> {
    RequestRecordHandler::new().process_request(user_id, clear_data)
}
