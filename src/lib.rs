//! TedGit web service library.
//!
//! A small HTTP edge server: a static landing page, `/health` and
//! `/api/info` JSON endpoints, security headers, CORS, and graceful
//! shutdown.

pub mod config;
pub mod context;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod security;

pub use config::EdgeConfig;
pub use context::{RuntimeMode, ServerContext};
pub use http::EdgeServer;
pub use lifecycle::Shutdown;
