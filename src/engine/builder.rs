//! Construction of engine instances.
//!
//! All configuration is per instance and explicit: the initial position,
//! the four default policy slots, journal recording, the diagnostic sink,
//! and a setup hook for initial rule registration.

use crate::core::{Policy, Position, State, TransitionLog};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::engine::machine::{Machine, PolicyDefaults};
use std::collections::HashMap;
use std::sync::Arc;

type SetupHook<S> = Box<dyn FnOnce(&mut Machine<S>)>;

/// Builder for [`Machine`] instances.
///
/// Every field has a default, so `build` is infallible. The setup hook
/// runs with the machine still at [`Position::Unset`]; the initial
/// position is adopted only after the hook returns.
///
/// # Example
///
/// ```rust
/// use turnstile::{FaultKind, Machine, Verdict};
///
/// let mut machine = Machine::builder()
///     .initial("beginning")
///     .void_policy(FaultKind::Erroneous)
///     .record_transitions(true)
///     .setup(|machine| {
///         machine.allow("beginning", "middle");
///         machine.allow("middle", "end");
///     })
///     .build();
///
/// assert_eq!(machine.set("middle"), Ok(Verdict::Accepted));
/// ```
pub struct MachineBuilder<S: State> {
    initial: Position<S>,
    defaults: PolicyDefaults<S>,
    record: bool,
    sink: Arc<dyn DiagnosticSink<S>>,
    setup: Option<SetupHook<S>>,
}

impl<S: State> MachineBuilder<S> {
    pub fn new() -> Self {
        Self {
            initial: Position::Initializing,
            defaults: PolicyDefaults::default(),
            record: false,
            sink: Arc::new(TracingSink),
            setup: None,
        }
    }

    /// Initial position adopted after setup. Defaults to
    /// [`Position::Initializing`].
    pub fn initial(mut self, initial: impl Into<Position<S>>) -> Self {
        self.initial = initial.into();
        self
    }

    /// Policy applied when no rule matches a requested pair. Defaults to
    /// silent denial.
    pub fn void_policy(mut self, policy: impl Into<Policy<S>>) -> Self {
        self.defaults.void = policy.into();
        self
    }

    /// Policy installed by [`Machine::allow`] and by auto-installed step
    /// rules.
    pub fn allow_policy(mut self, policy: impl Into<Policy<S>>) -> Self {
        self.defaults.allow = policy.into();
        self
    }

    /// Policy installed by [`Machine::ignore`].
    pub fn ignore_policy(mut self, policy: impl Into<Policy<S>>) -> Self {
        self.defaults.ignore = policy.into();
        self
    }

    /// Policy installed by [`Machine::deny`].
    pub fn deny_policy(mut self, policy: impl Into<Policy<S>>) -> Self {
        self.defaults.deny = policy.into();
        self
    }

    /// Enable the attempt journal. Off by default.
    pub fn record_transitions(mut self, enabled: bool) -> Self {
        self.record = enabled;
        self
    }

    /// Replace the diagnostic sink. Defaults to [`TracingSink`].
    pub fn sink(mut self, sink: impl DiagnosticSink<S> + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Hook run during `build`, intended for initial rule registration.
    pub fn setup<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&mut Machine<S>) + 'static,
    {
        self.setup = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> Machine<S> {
        let mut machine = Machine {
            current: Position::Unset,
            rules: HashMap::new(),
            steps: HashMap::new(),
            log: self.record.then(TransitionLog::new),
            defaults: self.defaults,
            sink: self.sink,
        };
        if let Some(hook) = self.setup {
            hook(&mut machine);
        }
        machine.current = self.initial;
        machine
    }
}

impl<S: State> Default for MachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Verdict;

    #[test]
    fn defaults_to_initializing_without_a_journal() {
        let machine: Machine<&str> = Machine::builder().build();

        assert!(machine.get().is_initializing());
        assert!(machine.log().is_none());
    }

    #[test]
    fn record_transitions_enables_the_journal() {
        let machine: Machine<&str> = Machine::builder().record_transitions(true).build();

        assert!(machine.log().unwrap().is_empty());
    }

    #[test]
    fn setup_hook_runs_before_the_initial_position_is_adopted() {
        let machine = Machine::builder()
            .initial("beginning")
            .setup(|machine| {
                assert!(machine.get().is_unset());
                machine.allow("beginning", "middle");
            })
            .build();

        assert_eq!(*machine.get(), "beginning");
    }

    #[test]
    fn setup_registrations_survive_into_the_built_machine() {
        let mut machine = Machine::builder()
            .initial("beginning")
            .setup(|machine| machine.allow("beginning", "middle"))
            .build();

        assert_eq!(machine.set("middle"), Ok(Verdict::Accepted));
    }

    #[test]
    fn overridden_slots_feed_the_convenience_registrations() {
        use crate::core::{Outcome, Policy};
        use crate::engine::signal::FaultKind;

        // An allow slot that denies everything makes allow() a no-op rule.
        let mut machine = Machine::builder()
            .initial("beginning")
            .allow_policy(Policy::from_fn(|_, _, _| Outcome::Denied))
            .deny_policy(FaultKind::Erroneous)
            .build();

        machine.allow("beginning", "middle");
        machine.deny("beginning", "end");

        assert_eq!(machine.set("middle"), Ok(Verdict::Denied));
        let signal = machine.set("end").unwrap_err();
        assert_eq!(
            signal.as_fault().map(|f| f.kind.clone()),
            Some(FaultKind::Erroneous)
        );
    }
}
