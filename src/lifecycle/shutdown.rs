//! Shutdown coordination for the server.

use std::sync::Arc;

use tokio::sync::watch;

use crate::lifecycle::state::LifecycleState;

/// Coordinator for graceful shutdown.
///
/// Holds the lifecycle state in a watch channel. Triggering shutdown moves the
/// state to `Draining`, which every subscriber observes.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<LifecycleState>>,
}

impl Shutdown {
    /// Create a new coordinator in the `Starting` state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(LifecycleState::Starting);
        Self { tx: Arc::new(tx) }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        *self.tx.borrow()
    }

    /// Move forward to `next`. Backward or repeated transitions are ignored.
    /// Returns true if the state changed.
    pub fn advance(&self, next: LifecycleState) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if current.can_advance_to(next) {
                *current = next;
                true
            } else {
                false
            }
        });
        if changed {
            tracing::debug!(state = %next, "Lifecycle state changed");
        }
        changed
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        self.advance(LifecycleState::Draining);
    }

    /// Subscribe to lifecycle changes.
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.tx.subscribe()
    }

    /// Resolve once shutdown has been triggered.
    pub async fn triggered(&self) {
        let mut rx = self.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|state| *state >= LifecycleState::Draining).await;
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn starts_in_starting_state() {
        assert_eq!(Shutdown::new().state(), LifecycleState::Starting);
    }

    #[test]
    fn ignores_backward_transitions() {
        let shutdown = Shutdown::new();
        assert!(shutdown.advance(LifecycleState::Running));
        shutdown.trigger();
        assert!(!shutdown.advance(LifecycleState::Running));
        assert_eq!(shutdown.state(), LifecycleState::Draining);
    }

    #[tokio::test]
    async fn triggered_wakes_waiters() {
        let shutdown = Shutdown::new();
        let waiter = {
            let shutdown = shutdown.clone();
            tokio::spawn(async move { shutdown.triggered().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter not woken")
            .unwrap();
    }

    #[tokio::test]
    async fn triggered_resolves_immediately_after_trigger() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        tokio::time::timeout(Duration::from_millis(100), shutdown.triggered())
            .await
            .expect("already-triggered shutdown should resolve");
    }
}
