//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware stack, drain on shutdown)
//!     → request.rs (request ID)
//!     → routes.rs (exact paths, then static assets, then 404)
//!     → handlers.rs (health, info, landing page)
//!     → response.rs (error bodies, fault shaping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod payload;
pub mod request;
pub mod response;
pub mod routes;
pub mod server;

pub use payload::{HealthStatus, ServiceInfo};
pub use request::X_REQUEST_ID;
pub use response::{AppError, ErrorBody};
pub use server::{build_router, EdgeServer, ServerError, ShutdownOutcome};
