//! Countdown clock for a single round.
//!
//! One controller owns the clock at a time. The 1 Hz tick task is the only
//! autonomous activity in the whole core and is aborted before any state
//! change that would otherwise let a stale tick resurrect a dead round.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

pub const TICK_MILLIS: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Running,
    Paused,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    Tick { remaining_ms: u64 },
    Expired,
}

pub struct RoundClock {
    state: ClockState,
    duration_ms: u64,
    remaining: Arc<AtomicU64>,
    expired: Arc<AtomicBool>,
    events: mpsc::UnboundedSender<ClockEvent>,
    task: Option<JoinHandle<()>>,
}

impl RoundClock {
    /// Creates a clock plus the receiving end of its event stream.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ClockEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let clock = Self {
            state: ClockState::Idle,
            duration_ms: 0,
            remaining: Arc::new(AtomicU64::new(0)),
            expired: Arc::new(AtomicBool::new(false)),
            events,
            task: None,
        };
        (clock, events_rx)
    }

    /// Cancels any running countdown and starts fresh with the given
    /// duration. This is also how an Expired clock gets reset for the next
    /// round.
    pub fn start(&mut self, duration_ms: u64) {
        self.abort_task();
        self.duration_ms = duration_ms;
        self.remaining.store(duration_ms, Ordering::SeqCst);
        self.expired.store(false, Ordering::SeqCst);
        self.state = ClockState::Running;
        self.spawn_tick_task();
        debug!(duration_ms, "round clock started");
    }

    /// Freezes the remaining time. No-op unless Running; invalid calls are
    /// tolerated because they arise from UI races, not programmer error.
    pub fn pause(&mut self) {
        if self.state() != ClockState::Running {
            return;
        }
        self.abort_task();
        self.state = ClockState::Paused;
        debug!(remaining_ms = self.remaining_ms(), "round clock paused");
    }

    /// Continues counting down from the frozen value. No-op unless Paused
    /// with time left.
    pub fn resume(&mut self) {
        if self.state() != ClockState::Paused || self.remaining_ms() == 0 {
            return;
        }
        self.state = ClockState::Running;
        self.spawn_tick_task();
        debug!(remaining_ms = self.remaining_ms(), "round clock resumed");
    }

    /// Stops the countdown outright, e.g. on confirmed exit or game over.
    pub fn cancel(&mut self) {
        self.abort_task();
        self.expired.store(false, Ordering::SeqCst);
        self.state = ClockState::Idle;
    }

    pub fn state(&self) -> ClockState {
        if self.expired.load(Ordering::SeqCst) {
            ClockState::Expired
        } else {
            self.state
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining.load(Ordering::SeqCst)
    }

    /// Time consumed so far, used as the round's elapsed time at guess
    /// submission.
    pub fn elapsed_ms(&self) -> u64 {
        self.duration_ms.saturating_sub(self.remaining_ms())
    }

    fn spawn_tick_task(&mut self) {
        let remaining = Arc::clone(&self.remaining);
        let expired = Arc::clone(&self.expired);
        let events = self.events.clone();

        self.task = Some(tokio::spawn(async move {
            loop {
                let left = remaining.load(Ordering::SeqCst);
                if left == 0 {
                    break;
                }
                let step = left.min(TICK_MILLIS);
                tokio::time::sleep(Duration::from_millis(step)).await;
                let now_left = left - step;
                remaining.store(now_left, Ordering::SeqCst);
                if now_left > 0 {
                    let _ = events.send(ClockEvent::Tick {
                        remaining_ms: now_left,
                    });
                }
            }
            expired.store(true, Ordering::SeqCst);
            let _ = events.send(ClockEvent::Expired);
        }));
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for RoundClock {
    fn drop(&mut self) {
        self.abort_task();
    }
}
