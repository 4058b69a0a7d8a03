//! The transition engine: machine, construction, and raisable signals.

mod builder;
mod machine;
mod signal;

pub use builder::MachineBuilder;
pub use machine::Machine;
pub use signal::{FaultKind, NoSuchRule, Signal, StopKind, StopSignal, TransitionFault};
