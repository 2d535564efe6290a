//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (preflight answers, origin checks)
//!     → limits.rs (request body cap)
//!     → Pass to routing
//! Outgoing response:
//!     → headers.rs (CSP and hardening headers)
//! ```
//!
//! # Design Decisions
//! - Defense in depth: multiple layers of protection
//! - No trust in client input

pub mod cors;
pub mod headers;
pub mod limits;

pub use cors::cors_layer;
pub use headers::security_headers;
pub use limits::body_limit_layer;
