//! Session storage: in-memory only.
//!
//! Sessions are keyed by an opaque UUID string and guarded individually so
//! concurrent requests for one game are serialised while different games
//! proceed in parallel.

pub mod store;

pub use store::{SessionHandle, SessionStore};
