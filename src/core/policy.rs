//! Transition policies and their outcomes.
//!
//! A policy governs exactly one (source, destination) pair. It is either a
//! callback invoked at resolution time, a fault kind that always raises
//! without committing, or a stop kind that always commits and then halts
//! the caller's flow. Callbacks may themselves produce a fault or stop
//! kind as their outcome; the engine interprets both paths identically.

use crate::core::state::{Position, State};
use crate::engine::{FaultKind, Machine, StopKind};
use std::fmt;
use std::sync::Arc;

/// Shared policy callback.
///
/// Receives the engine itself, the source position, and the requested
/// destination. Policy logic may call back into the engine: registering
/// further rules or inspecting the journal mid-resolution is supported.
pub type PolicyFn<S> = Arc<dyn Fn(&mut Machine<S>, &Position<S>, &S) -> Outcome + Send + Sync>;

/// What resolving a policy produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Commit the transition.
    Accepted,
    /// The ignore sentinel: no commit, no signal.
    Denied,
    /// Raise this fault; the transition is not committed.
    Fault(FaultKind),
    /// Commit the transition, then raise a stop signal.
    Stop(StopKind),
}

impl From<bool> for Outcome {
    fn from(accepted: bool) -> Self {
        if accepted {
            Outcome::Accepted
        } else {
            Outcome::Denied
        }
    }
}

/// What a completed (non-raising) transition request reports back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The transition committed.
    Accepted,
    /// The transition was silently denied; the position is unchanged.
    Denied,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Policy governing one (source, destination) pair.
///
/// The three cases are resolved exhaustively by the engine: `Raises`
/// never commits, `Stops` always commits before signaling, and
/// `Callback` outcomes are interpreted through the same table.
pub enum Policy<S: State> {
    /// Invoke user logic and interpret its outcome.
    Callback(PolicyFn<S>),
    /// Always fail the transition with this fault, without committing.
    Raises(FaultKind),
    /// Always commit, then halt the caller's flow with a stop signal.
    Stops(StopKind),
}

impl<S: State> Policy<S> {
    /// Wrap a closure as a callback policy.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::{Machine, Outcome, Policy, Verdict};
    ///
    /// let mut machine = Machine::new("draft");
    /// machine.rule(
    ///     "draft",
    ///     "published",
    ///     Policy::from_fn(|_machine, _from, _to| Outcome::Accepted),
    /// );
    /// assert_eq!(machine.set("published"), Ok(Verdict::Accepted));
    /// ```
    pub fn from_fn<F>(callback: F) -> Self
    where
        F: Fn(&mut Machine<S>, &Position<S>, &S) -> Outcome + Send + Sync + 'static,
    {
        Policy::Callback(Arc::new(callback))
    }

    /// The built-in allow primitive: a callback that always accepts.
    pub fn allow() -> Self {
        Policy::from_fn(|_, _, _| Outcome::Accepted)
    }

    /// The built-in ignore primitive: a callback that always denies
    /// silently.
    pub fn ignore() -> Self {
        Policy::from_fn(|_, _, _| Outcome::Denied)
    }

    /// The built-in deny primitive: a fault kind, not a callback. Every
    /// attempt through it raises and nothing commits.
    pub fn deny() -> Self {
        Policy::Raises(FaultKind::Denied)
    }
}

impl<S: State> From<FaultKind> for Policy<S> {
    fn from(kind: FaultKind) -> Self {
        Policy::Raises(kind)
    }
}

impl<S: State> From<StopKind> for Policy<S> {
    fn from(kind: StopKind) -> Self {
        Policy::Stops(kind)
    }
}

impl<S: State> Clone for Policy<S> {
    fn clone(&self) -> Self {
        match self {
            Policy::Callback(callback) => Policy::Callback(Arc::clone(callback)),
            Policy::Raises(kind) => Policy::Raises(kind.clone()),
            Policy::Stops(kind) => Policy::Stops(kind.clone()),
        }
    }
}

impl<S: State> fmt::Debug for Policy<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Callback(_) => f.write_str("Callback(..)"),
            Policy::Raises(kind) => f.debug_tuple("Raises").field(kind).finish(),
            Policy::Stops(kind) => f.debug_tuple("Stops").field(kind).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_from_bool() {
        assert_eq!(Outcome::from(true), Outcome::Accepted);
        assert_eq!(Outcome::from(false), Outcome::Denied);
    }

    #[test]
    fn verdict_accessors() {
        assert!(Verdict::Accepted.is_accepted());
        assert!(!Verdict::Denied.is_accepted());
    }

    #[test]
    fn deny_primitive_is_a_fault_kind() {
        let policy: Policy<&str> = Policy::deny();
        assert!(matches!(policy, Policy::Raises(FaultKind::Denied)));
    }

    #[test]
    fn kinds_convert_into_policies() {
        let raises: Policy<&str> = FaultKind::Erroneous.into();
        assert!(matches!(raises, Policy::Raises(FaultKind::Erroneous)));

        let stops: Policy<&str> = StopKind::Halt.into();
        assert!(matches!(stops, Policy::Stops(StopKind::Halt)));
    }

    #[test]
    fn clone_shares_the_callback() {
        let policy: Policy<&str> = Policy::allow();
        let cloned = policy.clone();

        match (&policy, &cloned) {
            (Policy::Callback(a), Policy::Callback(b)) => {
                assert!(Arc::ptr_eq(a, b));
            }
            _ => panic!("expected callback policies"),
        }
    }

    #[test]
    fn debug_names_the_variant() {
        assert_eq!(format!("{:?}", Policy::<&str>::allow()), "Callback(..)");
        assert_eq!(
            format!("{:?}", Policy::<&str>::deny()),
            "Raises(Denied)"
        );
    }
}
