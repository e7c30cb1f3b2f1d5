//! events — relational event records and the validated event log.
//!
//! Purpose
//! -------
//! Define the leaf data model of the engine: a single directed interaction
//! ([`Event`]), the time-sorted log that holds them ([`EventLog`]), and the
//! [`EventTime`] trait that normalizes any timestamp type to seconds.
//!
//! Key behaviors
//! -------------
//! - Events are immutable values; constructors never validate or log.
//! - The log is the ingestion boundary: weights and ordering are checked
//!   once, here, and reported as [`EventError`].
//! - Timestamps may be plain numbers, `std::time::Duration` offsets, or
//!   `chrono` calendar values.
//!
//! Downstream usage
//! ----------------
//! - External loaders map actor names to [`ActorId`]s and build an
//!   [`EventLog`]; the network state and sampler consume it by reference.

pub mod errors;
pub mod event;
pub mod log;
pub mod time;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{EventError, EventResult};
pub use self::event::{ActorId, DEFAULT_EVENT_TYPE, Dyad, Event};
pub use self::log::EventLog;
pub use self::time::EventTime;

pub mod prelude {
    pub use super::errors::{EventError, EventResult};
    pub use super::event::{ActorId, Dyad, Event};
    pub use super::log::EventLog;
    pub use super::time::EventTime;
}
