//! Turnstile: a rule-driven finite-transition engine.
//!
//! A host application defines a set of named states, attaches a policy to
//! each (source, destination) pair it cares about, and drives the machine
//! either by explicit request ([`Machine::set`]) or by automatic
//! single-step advancement ([`Machine::next`]).
//!
//! # Core Concepts
//!
//! - **Position**: where the machine sits, either a caller state or one
//!   of two built-in sentinels ([`Position`])
//! - **Policy**: a callback, fault kind, or stop kind governing one
//!   specific transition ([`Policy`])
//! - **Signals**: faults raise without committing; stops commit first,
//!   then raise ([`Signal`])
//! - **Journal**: an append-only record of every attempt, when enabled
//!   ([`TransitionLog`])
//!
//! # Example
//!
//! ```rust
//! use turnstile::{Machine, StopKind, Verdict};
//!
//! let mut machine = Machine::builder()
//!     .initial("beginning")
//!     .record_transitions(true)
//!     .build();
//!
//! machine.allow("beginning", "middle");
//! machine.rule("middle", "end", StopKind::Halt);
//!
//! assert_eq!(machine.set("middle"), Ok(Verdict::Accepted));
//!
//! // The stop raises only after the move has committed.
//! let signal = machine.set("end").unwrap_err();
//! assert!(signal.is_stop());
//! assert_eq!(*machine.get(), "end");
//! assert!(machine.log().unwrap().last().unwrap().success);
//! ```

pub mod core;
pub mod diagnostics;
pub mod engine;

// Re-export the public surface at the crate root.
pub use crate::core::{
    Outcome, Policy, PolicyFn, Position, State, TransitionLog, TransitionRecord, Verdict,
};
pub use crate::diagnostics::{DiagnosticSink, MemorySink, Notice, Severity, TracingSink};
pub use crate::engine::{
    FaultKind, Machine, MachineBuilder, NoSuchRule, Signal, StopKind, StopSignal, TransitionFault,
};
