//! Diagnostic sinks.

use crate::core::State;
use crate::diagnostics::notice::{Notice, Severity};
use std::sync::{Arc, Mutex, PoisonError};

/// Receives registration notices. Injected at construction via
/// [`MachineBuilder::sink`].
///
/// [`MachineBuilder::sink`]: crate::MachineBuilder::sink
pub trait DiagnosticSink<S: State>: Send + Sync {
    fn emit(&self, notice: &Notice<S>);
}

/// Default sink: forwards notices to the `tracing` facade at the
/// notice's severity.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl<S: State> DiagnosticSink<S> for TracingSink {
    fn emit(&self, notice: &Notice<S>) {
        match notice.severity() {
            Severity::Warning => tracing::warn!("{}", notice),
            Severity::Info => tracing::info!("{}", notice),
        }
    }
}

/// Sink that records every notice. Clones share storage, so a handle kept
/// by the caller observes notices emitted inside the machine.
///
/// # Example
///
/// ```rust
/// use turnstile::{Machine, MemorySink, Severity};
///
/// let sink = MemorySink::new();
/// let mut machine = Machine::builder()
///     .initial("beginning")
///     .sink(sink.clone())
///     .build();
///
/// machine.step("beginning", "middle");
///
/// let notices = sink.notices();
/// assert_eq!(notices.len(), 1);
/// assert_eq!(notices[0].severity(), Severity::Info);
/// ```
#[derive(Clone, Debug)]
pub struct MemorySink<S: State> {
    notices: Arc<Mutex<Vec<Notice<S>>>>,
}

impl<S: State> MemorySink<S> {
    pub fn new() -> Self {
        Self {
            notices: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of the notices emitted so far, oldest first.
    pub fn notices(&self) -> Vec<Notice<S>> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<S: State> Default for MemorySink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> DiagnosticSink<S> for MemorySink<S> {
    fn emit(&self, notice: &Notice<S>) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;

    #[test]
    fn memory_sink_records_in_order() {
        let sink: MemorySink<&str> = MemorySink::new();
        let first = Notice::AutoAllowRule {
            from: Position::At("a"),
            to: "b",
        };
        let second = Notice::RuleReplaced {
            from: Position::At("a"),
            to: "b",
        };

        sink.emit(&first);
        sink.emit(&second);

        assert_eq!(sink.notices(), vec![first, second]);
    }

    #[test]
    fn clones_share_storage() {
        let sink: MemorySink<&str> = MemorySink::new();
        let handle = sink.clone();

        sink.emit(&Notice::AutoAllowRule {
            from: Position::At("a"),
            to: "b",
        });

        assert_eq!(handle.notices().len(), 1);
    }
}
