//! Scoped resources owned by a live popup.
//!
//! Listener subscriptions and timers are guards: dropping the popup drops
//! them, which unregisters the listener and aborts the timer task. No exit
//! path can leave one behind.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Host-level listeners a popup needs while it is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer-down anywhere on the page, to detect clicks outside the popup.
    OutsidePointerDown,
    /// Page scroll; fires at most once per popup.
    Scroll,
}

/// Which listeners are currently wanted. Hosts consult this to decide whether
/// to forward (or even install hooks for) the matching events.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    active: Arc<Mutex<HashMap<ListenerKind, usize>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ListenerKind, usize>> {
        match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn subscribe(&self, kind: ListenerKind) -> Subscription {
        *self.lock().entry(kind).or_insert(0) += 1;
        Subscription {
            registry: self.clone(),
            kind,
        }
    }

    pub fn is_active(&self, kind: ListenerKind) -> bool {
        self.lock().get(&kind).copied().unwrap_or(0) > 0
    }

    pub fn active_count(&self) -> usize {
        self.lock().values().sum()
    }

    fn release(&self, kind: ListenerKind) {
        let mut active = self.lock();
        if let Some(count) = active.get_mut(&kind) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                active.remove(&kind);
            }
        }
    }
}

/// Registration of one listener; released on drop.
#[derive(Debug)]
pub struct Subscription {
    registry: ListenerRegistry,
    kind: ListenerKind,
}

impl Subscription {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.release(self.kind);
    }
}

/// A one-shot timer that delivers `event` after `delay`; aborted on drop.
#[derive(Debug)]
pub struct TimerGuard {
    handle: JoinHandle<()>,
}

impl TimerGuard {
    pub fn schedule<E>(tx: &UnboundedSender<E>, delay: Duration, event: E) -> Self
    where
        E: Send + 'static,
    {
        let tx = tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event);
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
