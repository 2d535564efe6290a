//! Server lifecycle states.
//!
//! # State Transitions
//! ```text
//! Starting → Running:   listener bound, serve loop started
//! Running  → Draining:  shutdown signal received, accept loop stopped
//! Draining → Stopped:   in-flight requests finished or grace period expired
//! ```
//!
//! Transitions only move forward.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
    Starting,
    Running,
    Draining,
    Stopped,
}

impl LifecycleState {
    /// Whether moving to `next` is a forward step.
    pub fn can_advance_to(self, next: LifecycleState) -> bool {
        next > self
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Starting => "starting",
            LifecycleState::Running => "running",
            LifecycleState::Draining => "draining",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
