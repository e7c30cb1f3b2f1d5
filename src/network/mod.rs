//! network — replayable, decayed network state.
//!
//! Purpose
//! -------
//! Turn an [`EventLog`](crate::events::EventLog) into the aggregates the
//! statistics read: dyad counts, undirected pair counts, degrees, neighbor
//! sets and last-event times, optionally decayed exponentially in time.
//!
//! Key behaviors
//! -------------
//! - [`NetworkState`] is driven forward one event at a time; it never looks
//!   ahead, so statistics computed against it only see the past.
//! - Decay is configured as a rate `λ` or a half-life (see [`decay`]).
//!
//! Downstream usage
//! ----------------
//! - The sampler owns one state per replay and evaluates statistics against
//!   it before recording each case event.

pub mod decay;
pub mod errors;
pub mod state;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::decay::{decay_factor, decay_to_halflife, halflife_to_decay};
pub use self::errors::{StateError, StateResult};
pub use self::state::{NetworkState, undirected_key};

pub mod prelude {
    pub use super::decay::{decay_to_halflife, halflife_to_decay};
    pub use super::errors::{StateError, StateResult};
    pub use super::state::NetworkState;
}
