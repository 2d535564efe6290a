//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file named by EDGE_CONFIG (loader.rs)
//!     → environment variable overrides (loader.rs)
//!     → validation.rs (semantic checks)
//!     → EdgeConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, ConfigError};
pub use schema::{
    CorsConfig, EdgeConfig, ListenerConfig, ObservabilityConfig, RuntimeConfig, SecurityConfig,
};
pub use validation::ValidationError;
