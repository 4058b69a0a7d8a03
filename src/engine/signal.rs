//! Raisable signals: faults and stops.
//!
//! Kinds are plain values. A kind can be registered directly as a policy
//! or returned from a policy callback, and either way the engine raises
//! it identically. The distinction that matters is between the two
//! taxonomies: a fault never commits the pending transition, a stop is
//! raised only after the transition has committed.

use crate::core::{Position, State};
use std::borrow::Cow;
use thiserror::Error;

/// Fault taxonomy. Raising any of these leaves the position unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum FaultKind {
    /// The requested move is a caller or logic error.
    #[error("invalid transition")]
    Invalid,
    /// The caller flagged the move as a domain violation.
    #[error("erroneous transition")]
    Erroneous,
    /// The built-in deny default.
    #[error("denied transition")]
    Denied,
    /// Host-defined fault, treated like the built-ins.
    #[error("{0}")]
    Other(Cow<'static, str>),
}

/// Stop taxonomy: intentional termination of a flow, distinguished from
/// errors. Raised only after the transition has committed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum StopKind {
    /// The built-in stop.
    #[error("halt")]
    Halt,
    /// Host-defined stop, treated like the built-in.
    #[error("{0}")]
    Other(Cow<'static, str>),
}

/// A raised fault. The attempted move did not commit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}: {from:?} -> {to:?}")]
pub struct TransitionFault<S: State> {
    pub kind: FaultKind,
    pub from: Position<S>,
    pub to: S,
}

/// A raised stop. The move committed (and the journal record, if any, was
/// marked successful) before this was raised.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}: {from:?} -> {to:?}")]
pub struct StopSignal<S: State> {
    pub kind: StopKind,
    pub from: Position<S>,
    pub to: S,
}

/// Everything [`set`] and [`next`] can raise.
///
/// [`set`]: crate::Machine::set
/// [`next`]: crate::Machine::next
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Signal<S: State> {
    #[error(transparent)]
    Fault(#[from] TransitionFault<S>),
    #[error(transparent)]
    Stop(#[from] StopSignal<S>),
}

impl<S: State> Signal<S> {
    pub fn is_fault(&self) -> bool {
        matches!(self, Signal::Fault(_))
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Signal::Stop(_))
    }

    /// The fault, if this signal is one.
    pub fn as_fault(&self) -> Option<&TransitionFault<S>> {
        match self {
            Signal::Fault(fault) => Some(fault),
            Signal::Stop(_) => None,
        }
    }

    /// The stop, if this signal is one.
    pub fn as_stop(&self) -> Option<&StopSignal<S>> {
        match self {
            Signal::Stop(stop) => Some(stop),
            Signal::Fault(_) => None,
        }
    }
}

/// [`delete_rule`] was asked to remove a pair that was never registered.
///
/// [`delete_rule`]: crate::Machine::delete_rule
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("no rule registered for {from:?} -> {to:?}")]
pub struct NoSuchRule<S: State> {
    pub from: Position<S>,
    pub to: S,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_kinds_display() {
        assert_eq!(FaultKind::Invalid.to_string(), "invalid transition");
        assert_eq!(FaultKind::Erroneous.to_string(), "erroneous transition");
        assert_eq!(FaultKind::Denied.to_string(), "denied transition");
        assert_eq!(
            FaultKind::Other(Cow::Borrowed("quota exhausted")).to_string(),
            "quota exhausted"
        );
    }

    #[test]
    fn raised_signals_carry_the_attempted_move() {
        let fault = TransitionFault {
            kind: FaultKind::Denied,
            from: Position::At("end"),
            to: "beginning",
        };
        assert_eq!(
            fault.to_string(),
            "denied transition: At(\"end\") -> \"beginning\""
        );
    }

    #[test]
    fn signal_discriminates_faults_from_stops() {
        let fault: Signal<&str> = TransitionFault {
            kind: FaultKind::Invalid,
            from: Position::At("a"),
            to: "b",
        }
        .into();
        let stop: Signal<&str> = StopSignal {
            kind: StopKind::Halt,
            from: Position::At("a"),
            to: "b",
        }
        .into();

        assert!(fault.is_fault() && !fault.is_stop());
        assert!(stop.is_stop() && !stop.is_fault());
        assert_eq!(fault.as_fault().map(|f| &f.kind), Some(&FaultKind::Invalid));
        assert_eq!(stop.as_stop().map(|s| &s.kind), Some(&StopKind::Halt));
    }

    #[test]
    fn no_such_rule_names_the_pair() {
        let error = NoSuchRule {
            from: Position::At("a"),
            to: "b",
        };
        assert_eq!(
            error.to_string(),
            "no rule registered for At(\"a\") -> \"b\""
        );
    }
}
