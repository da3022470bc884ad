//! Per-account availability tracking.
//!
//! Each account has one expiring timer of `ping_interval + 30 s`. Every
//! accepted event resets it and marks the account available; expiry marks it
//! unavailable. Timers are armed when the account is registered, so an account
//! that never reports goes from unknown to unavailable.
//!
//! ```text
//! Unknown --event--> Available --expiry--> Unavailable
//!    |                   ^  |                   |
//!    |                   +--+ event             |
//!    +--expiry--> Unavailable <-----------------+--event--> Available
//! ```
//!
//! All transitions go through one mutex. A timer only acts if its generation
//! is still current, so a stale timer that fires while an event is being
//! processed cannot flip the account back to unavailable.
//!
//! Transitions are queued in order while the lock is held and a forwarding
//! task moves them into the event channel, waiting for capacity. A slow
//! consumer delays availability changes but never loses one.

use sia_core::AccountId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::devices::DeviceKey;
use crate::events::{AvailabilityChange, ReceiverEvent};

/// Availability of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// No event yet and the first timer has not expired.
    Unknown,
    Available,
    Unavailable,
}

#[derive(Debug)]
struct Entry {
    liveness: Liveness,
    timeout: Duration,
    expires_at: Instant,
    generation: u64,
    timer: Option<JoinHandle<()>>,
    devices: Vec<DeviceKey>,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<AccountId, Entry>,
    stopped: bool,
}

/// Shared availability tracker.
///
/// Cloning is cheap; clones share the same state.
#[derive(Debug, Clone)]
pub struct AvailabilityTracker {
    state: Arc<Mutex<State>>,
    changes: mpsc::UnboundedSender<AvailabilityChange>,
}

impl AvailabilityTracker {
    /// Tracker reporting transitions on `events`.
    ///
    /// Spawns the task that forwards transitions, so it must be called from
    /// within a tokio runtime.
    pub fn new(events: mpsc::Sender<ReceiverEvent>) -> Self {
        let (changes, queue) = mpsc::unbounded_channel();
        tokio::spawn(forward_changes(queue, events));

        Self {
            state: Arc::new(Mutex::new(State::default())),
            changes,
        }
    }

    /// Start tracking `account` and arm its first timer.
    ///
    /// `devices` are the devices reported alongside the account on every
    /// transition. Registering an account again replaces its entry.
    ///
    /// Must be called from within a tokio runtime.
    pub fn register(&self, account: AccountId, timeout: Duration, devices: Vec<DeviceKey>) {
        let mut state = self.lock();
        if state.stopped {
            return;
        }

        let mut entry = Entry {
            liveness: Liveness::Unknown,
            timeout,
            expires_at: Instant::now() + timeout,
            generation: 0,
            timer: None,
            devices,
        };
        if let Some(old) = state.accounts.remove(&account) {
            if let Some(timer) = old.timer {
                timer.abort();
            }
            entry.generation = old.generation + 1;
        }

        entry.timer = Some(self.spawn_timer(account.clone(), entry.generation, entry.expires_at));
        state.accounts.insert(account, entry);
    }

    /// Record an accepted event for `account`.
    ///
    /// Re-arms the timer and marks the account available. Returns `true` if
    /// the account was not available before. Unregistered accounts are
    /// ignored.
    pub fn mark_seen(&self, account: &AccountId) -> bool {
        let mut state = self.lock();
        if state.stopped {
            return false;
        }

        let Some(entry) = state.accounts.get_mut(account) else {
            return false;
        };

        if let Some(timer) = entry.timer.take() {
            timer.abort();
        }
        entry.generation += 1;
        entry.expires_at = Instant::now() + entry.timeout;
        let (generation, expires_at) = (entry.generation, entry.expires_at);

        let changed = entry.liveness != Liveness::Available;
        entry.liveness = Liveness::Available;
        if changed {
            info!(account = %account, "Account available");
            self.notify(account, &entry.devices, true);
        }

        entry.timer = Some(self.spawn_timer(account.clone(), generation, expires_at));
        changed
    }

    /// Current availability, `None` for unregistered accounts.
    pub fn liveness(&self, account: &AccountId) -> Option<Liveness> {
        self.lock().accounts.get(account).map(|entry| entry.liveness)
    }

    pub fn is_available(&self, account: &AccountId) -> bool {
        self.liveness(account) == Some(Liveness::Available)
    }

    /// When the current timer of `account` expires.
    pub fn expires_at(&self, account: &AccountId) -> Option<Instant> {
        self.lock().accounts.get(account).map(|entry| entry.expires_at)
    }

    /// Cancel every pending timer. Later calls to [`register`](Self::register)
    /// and [`mark_seen`](Self::mark_seen) do nothing.
    pub fn stop(&self) {
        let mut state = self.lock();
        state.stopped = true;
        for entry in state.accounts.values_mut() {
            if let Some(timer) = entry.timer.take() {
                timer.abort();
            }
        }
        debug!(accounts = state.accounts.len(), "Availability timers cancelled");
    }

    fn expire(&self, account: &AccountId, generation: u64) {
        let mut state = self.lock();
        if state.stopped {
            return;
        }

        let Some(entry) = state.accounts.get_mut(account) else {
            return;
        };
        if entry.generation != generation {
            // Reset while this timer was waiting for the lock.
            return;
        }

        entry.timer = None;
        if entry.liveness != Liveness::Unavailable {
            entry.liveness = Liveness::Unavailable;
            warn!(
                account = %account,
                timeout_secs = entry.timeout.as_secs(),
                "Account unavailable: no event within ping interval"
            );
            self.notify(account, &entry.devices, false);
        }
    }

    fn spawn_timer(&self, account: AccountId, generation: u64, deadline: Instant) -> JoinHandle<()> {
        let tracker = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            tracker.expire(&account, generation);
        })
    }

    /// Queue one change for the account and one per device. Called with the
    /// lock held so the queue follows transition order.
    fn notify(&self, account: &AccountId, devices: &[DeviceKey], available: bool) {
        let changes = std::iter::once(None)
            .chain(devices.iter().copied().map(Some))
            .map(|device| AvailabilityChange {
                account: account.clone(),
                device,
                available,
            });

        for change in changes {
            if self.changes.send(change).is_err() {
                debug!(account = %account, "Availability forwarder gone, change not reported");
                return;
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Nothing panics while holding the lock; recover the data if it ever does.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn forward_changes(
    mut queue: mpsc::UnboundedReceiver<AvailabilityChange>,
    events: mpsc::Sender<ReceiverEvent>,
) {
    while let Some(change) = queue.recv().await {
        trace!(account = %change.account, available = change.available, "Forwarding availability change");
        if events.send(ReceiverEvent::Availability(change)).await.is_err() {
            debug!("Event channel closed, availability forwarder exiting");
            return;
        }
    }
}
