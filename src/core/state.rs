//! State values and machine positions.
//!
//! States are opaque tokens supplied by the caller. The engine never
//! inspects them beyond equality and hashing, so anything from `&'static
//! str` to a caller-defined enum works.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Bounds for caller-supplied state values.
///
/// Implemented automatically for every conforming type; there is nothing
/// to write by hand.
///
/// # Example
///
/// ```rust
/// use turnstile::Machine;
///
/// // &'static str is a state value
/// let machine = Machine::new("beginning");
/// assert_eq!(*machine.get(), "beginning");
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> State for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// Where a machine currently sits.
///
/// Alongside caller states, two built-in sentinels exist: [`Initializing`]
/// is the default initial position of a machine constructed without one,
/// and [`Unset`] is the position of a machine whose initial state has not
/// yet been adopted (the setup hook runs at `Unset`). Sentinels can never
/// collide with a caller value.
///
/// Registration sites accept bare caller values through the `From` impl,
/// so `machine.allow("a", "b")` reads without the wrapper. Sentinels are
/// valid transition *sources* (a rule may be keyed from `Initializing`)
/// but not destinations.
///
/// [`Initializing`]: Position::Initializing
/// [`Unset`]: Position::Unset
///
/// # Example
///
/// ```rust
/// use turnstile::{Machine, Position};
///
/// let machine: Machine<&str> = Machine::builder().build();
/// assert_eq!(machine.get(), &Position::Initializing);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position<S> {
    /// Default initial position before setup completes.
    Initializing,
    /// No initial state has been adopted yet.
    Unset,
    /// A caller-supplied state.
    At(S),
}

impl<S> Position<S> {
    /// The caller state at this position, if any.
    pub fn at(&self) -> Option<&S> {
        match self {
            Position::At(state) => Some(state),
            _ => None,
        }
    }

    /// Whether this is the initializing sentinel.
    pub fn is_initializing(&self) -> bool {
        matches!(self, Position::Initializing)
    }

    /// Whether this is the unset sentinel.
    pub fn is_unset(&self) -> bool {
        matches!(self, Position::Unset)
    }
}

impl<S> From<S> for Position<S> {
    fn from(state: S) -> Self {
        Position::At(state)
    }
}

/// Compare a position against a bare state value. Sentinels compare
/// unequal to every value.
impl<S: PartialEq> PartialEq<S> for Position<S> {
    fn eq(&self, other: &S) -> bool {
        matches!(self, Position::At(state) if state == other)
    }
}
