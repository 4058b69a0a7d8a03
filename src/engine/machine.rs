//! The transition engine.

use crate::core::{Outcome, Policy, Position, State, TransitionLog, Verdict};
use crate::diagnostics::{DiagnosticSink, Notice};
use crate::engine::builder::MachineBuilder;
use crate::engine::signal::{NoSuchRule, Signal, StopSignal, TransitionFault};
use std::collections::HashMap;
use std::sync::Arc;

/// Per-instance default policy slots. Each is independently overridable
/// at construction; there is no process-wide shared configuration.
pub(crate) struct PolicyDefaults<S: State> {
    /// Applied when no rule matches a requested pair.
    pub(crate) void: Policy<S>,
    pub(crate) allow: Policy<S>,
    pub(crate) ignore: Policy<S>,
    pub(crate) deny: Policy<S>,
}

impl<S: State> Default for PolicyDefaults<S> {
    fn default() -> Self {
        Self {
            void: Policy::ignore(),
            allow: Policy::allow(),
            ignore: Policy::ignore(),
            deny: Policy::deny(),
        }
    }
}

/// A finite-transition engine.
///
/// The machine holds a current [`Position`], a rule table mapping
/// (source, destination) pairs to [`Policy`] values, a step table naming
/// one automatic destination per source, and an optional attempt journal.
/// Only the machine itself changes its position, exclusively during a
/// commit.
///
/// # Example
///
/// ```rust
/// use turnstile::{Machine, Verdict};
///
/// let mut machine = Machine::new("beginning");
/// machine.allow("beginning", "middle");
/// machine.allow("middle", "end");
///
/// assert_eq!(machine.set("middle"), Ok(Verdict::Accepted));
/// assert_eq!(machine.set("beginning"), Ok(Verdict::Denied)); // no rule
/// assert_eq!(*machine.get(), "middle");
/// ```
pub struct Machine<S: State> {
    pub(crate) current: Position<S>,
    pub(crate) rules: HashMap<(Position<S>, S), Policy<S>>,
    pub(crate) steps: HashMap<Position<S>, S>,
    pub(crate) log: Option<TransitionLog<S>>,
    pub(crate) defaults: PolicyDefaults<S>,
    pub(crate) sink: Arc<dyn DiagnosticSink<S>>,
}

impl<S: State> Machine<S> {
    /// Create a machine at `initial` with default configuration.
    ///
    /// Shorthand for `Machine::builder().initial(initial).build()`.
    pub fn new(initial: impl Into<Position<S>>) -> Self {
        Self::builder().initial(initial).build()
    }

    /// Start configuring a machine.
    pub fn builder() -> MachineBuilder<S> {
        MachineBuilder::new()
    }

    /// The current position. Never mutates.
    pub fn get(&self) -> &Position<S> {
        &self.current
    }

    /// The attempt journal, when recording is enabled.
    pub fn log(&self) -> Option<&TransitionLog<S>> {
        self.log.as_ref()
    }

    /// Install `policy` for the pair, silently replacing any existing
    /// entry. Neither endpoint is validated against known states.
    pub fn rule(&mut self, from: impl Into<Position<S>>, to: S, policy: impl Into<Policy<S>>) {
        self.rules.insert((from.into(), to), policy.into());
    }

    /// Remove the rule for the pair. The step table is untouched: a
    /// machine stepping through a deleted rule falls back to the void
    /// default.
    pub fn delete_rule(
        &mut self,
        from: impl Into<Position<S>>,
        to: S,
    ) -> Result<Policy<S>, NoSuchRule<S>> {
        let from = from.into();
        self.rules
            .remove(&(from.clone(), to.clone()))
            .ok_or(NoSuchRule { from, to })
    }

    /// Install this machine's allow default for the pair.
    pub fn allow(&mut self, from: impl Into<Position<S>>, to: S) {
        let policy = self.defaults.allow.clone();
        self.rule(from, to, policy);
    }

    /// Install this machine's ignore default for the pair.
    pub fn ignore(&mut self, from: impl Into<Position<S>>, to: S) {
        let policy = self.defaults.ignore.clone();
        self.rule(from, to, policy);
    }

    /// Install this machine's deny default for the pair.
    pub fn deny(&mut self, from: impl Into<Position<S>>, to: S) {
        let policy = self.defaults.deny.clone();
        self.rule(from, to, policy);
    }

    /// Designate `to` as the automatic destination for `from`, used by
    /// [`next`]. Replacing an existing step entry emits a warning notice.
    ///
    /// If the pair has no rule, the allow default is installed for it (an
    /// informational notice is emitted), so every stepped transition has
    /// a resolvable policy.
    ///
    /// [`next`]: Machine::next
    pub fn step(&mut self, from: impl Into<Position<S>>, to: S) {
        let from = from.into();
        if let Some(old) = self.steps.insert(from.clone(), to.clone()) {
            self.emit(Notice::StepReplaced {
                from: from.clone(),
                old,
                new: to.clone(),
            });
        }
        if !self.rules.contains_key(&(from.clone(), to.clone())) {
            self.emit(Notice::AutoAllowRule {
                from: from.clone(),
                to: to.clone(),
            });
            let policy = self.defaults.allow.clone();
            self.rules.insert((from, to), policy);
        }
    }

    /// Like [`step`], but also install `policy` as the pair's rule.
    /// Replacing an existing rule or step entry emits a warning notice.
    ///
    /// [`step`]: Machine::step
    pub fn step_with(
        &mut self,
        from: impl Into<Position<S>>,
        to: S,
        policy: impl Into<Policy<S>>,
    ) {
        let from = from.into();
        if let Some(old) = self.steps.insert(from.clone(), to.clone()) {
            self.emit(Notice::StepReplaced {
                from: from.clone(),
                old,
                new: to.clone(),
            });
        }
        if self.rules.contains_key(&(from.clone(), to.clone())) {
            self.emit(Notice::RuleReplaced {
                from: from.clone(),
                to: to.clone(),
            });
        }
        self.rules.insert((from, to), policy.into());
    }

    /// Request a transition to `to`.
    ///
    /// Resolution: the rule for (current, `to`), or the void default if
    /// none exists, is resolved to an [`Outcome`] and interpreted:
    ///
    /// - a fault raises without committing;
    /// - the ignore sentinel returns [`Verdict::Denied`] with no commit
    ///   and no signal;
    /// - anything else commits the position to `to`, then either returns
    ///   [`Verdict::Accepted`] or, for a stop, raises *after* the commit
    ///   has taken effect.
    ///
    /// When recording is enabled, a journal record is opened before the
    /// policy runs and marked successful only on commit.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::{FaultKind, Machine};
    ///
    /// let mut machine = Machine::new("end");
    /// machine.deny("end", "beginning");
    ///
    /// let signal = machine.set("beginning").unwrap_err();
    /// assert_eq!(
    ///     signal.as_fault().map(|f| f.kind.clone()),
    ///     Some(FaultKind::Denied)
    /// );
    /// assert_eq!(*machine.get(), "end");
    /// ```
    pub fn set(&mut self, to: S) -> Result<Verdict, Signal<S>> {
        let from = self.current.clone();
        let policy = self
            .rules
            .get(&(from.clone(), to.clone()))
            .cloned()
            .unwrap_or_else(|| self.defaults.void.clone());

        // The record must exist even for attempts that raise.
        let opened = self
            .log
            .as_mut()
            .map(|log| log.open(from.clone(), to.clone()));

        let outcome = match policy {
            Policy::Raises(kind) => return Err(TransitionFault { kind, from, to }.into()),
            Policy::Stops(kind) => Outcome::Stop(kind),
            // Cloned out of the table above, so the callback may re-enter
            // the engine.
            Policy::Callback(run) => run(self, &from, &to),
        };

        self.conclude(outcome, from, to, opened)
    }

    /// Advance one step automatically.
    ///
    /// If the step table has an entry for the current position, delegates
    /// to [`set`] with that destination, propagating any signal.
    /// Otherwise a no-op. Either way the (possibly unchanged) current
    /// position is returned; there is no progress guarantee.
    ///
    /// [`set`]: Machine::set
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::Machine;
    ///
    /// let mut machine = Machine::new("beginning");
    /// machine.step("beginning", "middle");
    ///
    /// assert_eq!(machine.next().unwrap(), "middle");
    /// assert_eq!(machine.next().unwrap(), "middle"); // no step from middle
    /// ```
    pub fn next(&mut self) -> Result<Position<S>, Signal<S>> {
        if let Some(to) = self.steps.get(&self.current).cloned() {
            self.set(to)?;
        }
        Ok(self.current.clone())
    }

    /// Interpret a resolved outcome. Shared by the direct-policy and
    /// callback-return paths so kinds raise uniformly regardless of how
    /// they were produced.
    fn conclude(
        &mut self,
        outcome: Outcome,
        from: Position<S>,
        to: S,
        opened: Option<usize>,
    ) -> Result<Verdict, Signal<S>> {
        match outcome {
            Outcome::Fault(kind) => Err(TransitionFault { kind, from, to }.into()),
            Outcome::Denied => Ok(Verdict::Denied),
            Outcome::Accepted => {
                self.commit(to, opened);
                Ok(Verdict::Accepted)
            }
            Outcome::Stop(kind) => {
                self.commit(to.clone(), opened);
                Err(StopSignal { kind, from, to }.into())
            }
        }
    }

    fn commit(&mut self, to: S, opened: Option<usize>) {
        self.current = Position::At(to);
        if let (Some(index), Some(log)) = (opened, self.log.as_mut()) {
            log.mark_success(index);
        }
    }

    fn emit(&self, notice: Notice<S>) {
        self.sink.emit(&notice);
    }
}
