//! Append-only journal of transition attempts.
//!
//! When recording is enabled, the engine opens a record for every attempt
//! *before* the governing policy runs, so attempts that fault or stop
//! still leave a trace. A record's `success` flag flips to true only when
//! the attempt commits. Records are never removed or reordered.

use crate::core::state::{Position, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One transition attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord<S> {
    /// Position the attempt started from.
    pub from: Position<S>,
    /// Requested destination.
    pub to: S,
    /// Whether the attempt committed.
    pub success: bool,
    /// When the attempt was made.
    pub timestamp: DateTime<Utc>,
}

/// Ordered sequence of transition attempts.
///
/// The host reads records through shared slices; only the engine appends
/// or marks them.
///
/// # Example
///
/// ```rust
/// use turnstile::Machine;
///
/// let mut machine = Machine::builder()
///     .initial("beginning")
///     .record_transitions(true)
///     .build();
/// machine.allow("beginning", "middle");
///
/// machine.set("middle").unwrap();
/// machine.set("beginning").unwrap(); // no rule: denied, still recorded
///
/// let log = machine.log().unwrap();
/// assert_eq!(log.len(), 2);
/// assert!(log.records()[0].success);
/// assert!(!log.records()[1].success);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionLog<S> {
    records: Vec<TransitionRecord<S>>,
}

impl<S: State> Default for TransitionLog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> TransitionLog<S> {
    pub(crate) fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record for an attempt about to be resolved. Returns the
    /// record's index so the engine can mark it after a commit.
    pub(crate) fn open(&mut self, from: Position<S>, to: S) -> usize {
        self.records.push(TransitionRecord {
            from,
            to,
            success: false,
            timestamp: Utc::now(),
        });
        self.records.len() - 1
    }

    /// Flip an open record's success flag.
    pub(crate) fn mark_success(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index) {
            record.success = true;
        }
    }

    /// All recorded attempts, oldest first.
    pub fn records(&self) -> &[TransitionRecord<S>] {
        &self.records
    }

    /// The most recent attempt.
    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
