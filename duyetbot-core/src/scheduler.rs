//! Cancellable timers owned by the panel that scheduled them.
//!
//! A [`Scheduler`] is created once by the event loop together with the
//! receiving end of the timer channel. Every mounted panel takes a
//! [`TimerScope`] from it. A scope spawns one tokio task per scheduled key
//! and aborts those tasks when the key is cancelled or re-scheduled, or
//! when the scope itself is dropped (the panel unmounted).
//!
//! An event can already sit in the channel when its schedule is cancelled.
//! Each event therefore carries the scope id and a per-schedule ticket, and
//! [`TimerScope::accept`] only admits events whose schedule is still live.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u64);

impl std::fmt::Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scope-{}", self.0)
    }
}

/// What a timer is for. Keys are unique within one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Pending bot reply, numbered per submission.
    ChatReply(u64),
    StatusRefresh,
    CarouselAdvance,
    FeedbackBanner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEvent {
    pub scope: ScopeId,
    pub key: TimerKey,
    ticket: u64,
}

#[derive(Clone)]
pub struct Scheduler {
    tx: mpsc::UnboundedSender<TimerEvent>,
    next_scope: Arc<AtomicU64>,
}

impl Scheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            next_scope: Arc::new(AtomicU64::new(1)),
        };
        (scheduler, rx)
    }

    pub fn scope(&self) -> TimerScope {
        let id = ScopeId(self.next_scope.fetch_add(1, Ordering::Relaxed));
        TimerScope {
            id,
            tx: self.tx.clone(),
            tasks: HashMap::new(),
            next_ticket: 1,
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("next_scope", &self.next_scope.load(Ordering::Relaxed))
            .finish()
    }
}

struct Scheduled {
    ticket: u64,
    repeating: bool,
    handle: JoinHandle<()>,
}

pub struct TimerScope {
    id: ScopeId,
    tx: mpsc::UnboundedSender<TimerEvent>,
    tasks: HashMap<TimerKey, Scheduled>,
    next_ticket: u64,
}

impl TimerScope {
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Fires `key` once after `delay`. Replaces any schedule already held under `key`.
    pub fn once(&mut self, key: TimerKey, delay: Duration) {
        let event = self.issue(key);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = tx.send(event);
        });
        self.store(key, false, handle);
    }

    /// Fires `key` every `period`, first after one full period.
    pub fn every(&mut self, key: TimerKey, period: Duration) {
        let period = period.max(Duration::from_millis(1));
        let event = self.issue(key);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(event.clone()).is_err() {
                    break;
                }
            }
        });
        self.store(key, true, handle);
    }

    pub fn cancel(&mut self, key: TimerKey) -> bool {
        match self.tasks.remove(&key) {
            Some(scheduled) => {
                scheduled.handle.abort();
                debug!(scope = %self.id, ?key, "Timer cancelled");
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, scheduled) in self.tasks.drain() {
            scheduled.handle.abort();
        }
    }

    pub fn is_scheduled(&self, key: TimerKey) -> bool {
        self.tasks.contains_key(&key)
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Admits `event` if it belongs to this scope and its schedule is still
    /// live. A one-shot schedule is consumed by the event it produced.
    pub fn accept(&mut self, event: &TimerEvent) -> bool {
        if event.scope != self.id {
            return false;
        }
        let repeating = match self.tasks.get(&event.key) {
            Some(scheduled) if scheduled.ticket == event.ticket => scheduled.repeating,
            _ => {
                debug!(scope = %self.id, key = ?event.key, "Discarding stale timer event");
                return false;
            }
        };
        if !repeating {
            self.tasks.remove(&event.key);
        }
        true
    }

    fn issue(&mut self, key: TimerKey) -> TimerEvent {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        TimerEvent {
            scope: self.id,
            key,
            ticket,
        }
    }

    fn store(&mut self, key: TimerKey, repeating: bool, handle: JoinHandle<()>) {
        let ticket = self.next_ticket - 1;
        let scheduled = Scheduled {
            ticket,
            repeating,
            handle,
        };
        if let Some(previous) = self.tasks.insert(key, scheduled) {
            previous.handle.abort();
        }
    }
}

impl Drop for TimerScope {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

impl std::fmt::Debug for TimerScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerScope")
            .field("id", &self.id)
            .field("pending", &self.tasks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_once_fires_after_delay() {
        let (scheduler, mut rx) = Scheduler::new();
        let mut scope = scheduler.scope();
        scope.once(TimerKey::FeedbackBanner, Duration::from_secs(3));
        assert!(scope.is_scheduled(TimerKey::FeedbackBanner));

        time::sleep(Duration::from_millis(2900)).await;
        assert!(rx.try_recv().is_err());

        let event = rx.recv().await.unwrap();
        assert_eq!(event.key, TimerKey::FeedbackBanner);
        assert!(scope.accept(&event));
        assert!(!scope.is_scheduled(TimerKey::FeedbackBanner));
        assert!(!scope.accept(&event));
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_repeats_until_cancelled() {
        let (scheduler, mut rx) = Scheduler::new();
        let mut scope = scheduler.scope();
        scope.every(TimerKey::StatusRefresh, Duration::from_secs(5));

        for _ in 0..3 {
            let event = rx.recv().await.unwrap();
            assert!(scope.accept(&event));
        }
        assert!(scope.is_scheduled(TimerKey::StatusRefresh));

        assert!(scope.cancel(TimerKey::StatusRefresh));
        assert!(!scope.cancel(TimerKey::StatusRefresh));
        time::sleep(Duration::from_secs(20)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_queued_before_cancel_is_rejected() {
        let (scheduler, mut rx) = Scheduler::new();
        let mut scope = scheduler.scope();
        scope.once(TimerKey::ChatReply(1), Duration::from_secs(1));

        time::sleep(Duration::from_secs(2)).await;
        scope.cancel(TimerKey::ChatReply(1));

        let event = rx.recv().await.unwrap();
        assert!(!scope.accept(&event));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_supersedes_previous_ticket() {
        let (scheduler, mut rx) = Scheduler::new();
        let mut scope = scheduler.scope();
        scope.once(TimerKey::FeedbackBanner, Duration::from_secs(1));
        time::sleep(Duration::from_secs(2)).await;
        scope.once(TimerKey::FeedbackBanner, Duration::from_secs(1));

        let stale = rx.recv().await.unwrap();
        assert!(!scope.accept(&stale));

        let fresh = rx.recv().await.unwrap();
        assert!(scope.accept(&fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_scope_sends_nothing() {
        let (scheduler, mut rx) = Scheduler::new();
        let mut scope = scheduler.scope();
        scope.once(TimerKey::ChatReply(1), Duration::from_secs(1));
        scope.every(TimerKey::CarouselAdvance, Duration::from_secs(1));
        drop(scope);

        time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scopes_do_not_accept_each_other() {
        let (scheduler, mut rx) = Scheduler::new();
        let mut first = scheduler.scope();
        let mut second = scheduler.scope();
        assert_ne!(first.id(), second.id());

        first.once(TimerKey::FeedbackBanner, Duration::from_secs(1));
        let event = rx.recv().await.unwrap();
        assert!(!second.accept(&event));
        assert!(first.accept(&event));
    }
}
