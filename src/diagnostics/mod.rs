//! Registration diagnostics.
//!
//! Rule and step registration can replace existing entries or install
//! defaults on the caller's behalf. Those events are reported as typed
//! [`Notice`] values through a host-pluggable [`DiagnosticSink`] rather
//! than as ambient logging side effects.

mod notice;
mod sink;

pub use notice::{Notice, Severity};
pub use sink::{DiagnosticSink, MemorySink, TracingSink};
