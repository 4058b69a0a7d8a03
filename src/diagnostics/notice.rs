//! Registration notices.

use crate::core::{Position, State};
use std::fmt;

/// Severity of a registration notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// Diagnostic emitted by a registration operation.
///
/// Notices are plain values handed to the configured sink, so hosts and
/// tests can observe them deterministically instead of scraping log
/// output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice<S: State> {
    /// A step entry for `from` already existed and was replaced. Emitted
    /// even when the new target equals the old one.
    StepReplaced {
        from: Position<S>,
        old: S,
        new: S,
    },
    /// `step_with` overwrote an existing rule for the pair.
    RuleReplaced { from: Position<S>, to: S },
    /// `step` installed the allow default for a pair with no rule.
    AutoAllowRule { from: Position<S>, to: S },
}

impl<S: State> Notice<S> {
    pub fn severity(&self) -> Severity {
        match self {
            Notice::StepReplaced { .. } | Notice::RuleReplaced { .. } => Severity::Warning,
            Notice::AutoAllowRule { .. } => Severity::Info,
        }
    }
}

impl<S: State> fmt::Display for Notice<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::StepReplaced { from, old, new } => {
                write!(f, "step {from:?} -> {old:?} replaced with {from:?} -> {new:?}")
            }
            Notice::RuleReplaced { from, to } => {
                write!(f, "rule for {from:?} -> {to:?} overwritten")
            }
            Notice::AutoAllowRule { from, to } => {
                write!(f, "no rule for {from:?} -> {to:?}, installing the allow default")
            }
        }
    }
}
