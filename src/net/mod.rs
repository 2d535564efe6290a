//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! listener.rs (bind host:port, fatal on failure)
//!     → axum serve loop (accept, HTTP/1.1)
//!     → in_flight.rs (count requests for draining)
//!     → Hand off to HTTP layer
//! ```

pub mod in_flight;
pub mod listener;

pub use in_flight::{InFlightGuard, InFlightTracker};
pub use listener::{bind, ListenerError};
