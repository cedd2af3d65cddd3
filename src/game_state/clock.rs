//! Per-side countdown clocks.
//!
//! The running side's time is kept as a deadline on a monotonic time source
//! (`remaining = deadline - now`), so pausing and resuming is exact and the
//! clock never drifts with callback jitter. Callers drive the clock by
//! polling; each poll yields at most one display update per whole second of
//! change and a single expiry event.

use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::game_state::chess_types::Color;

/// Source of monotonic instants.
pub trait TimeSource: Send + Sync + fmt::Debug {
    fn now(&self) -> Instant;
}

/// Real time via [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicTime;

impl TimeSource for MonotonicTime {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Time that only moves when told to. Used by tests and simulations.
#[derive(Debug)]
pub struct ManualTime {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl Default for ManualTime {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *elapsed += by;
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Instant {
        let elapsed = self.elapsed.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.origin + *elapsed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// The displayed whole-second value of `color`'s clock changed.
    Display { color: Color, remaining: Duration },
    /// `color` ran out of time.
    Expired { color: Color },
}

/// Receiver for clock events.
pub trait ClockObserver {
    fn on_display(&mut self, color: Color, remaining: Duration);
    fn on_expired(&mut self, color: Color);
}

impl ClockEvent {
    pub fn dispatch(&self, observer: &mut dyn ClockObserver) {
        match *self {
            ClockEvent::Display { color, remaining } => observer.on_display(color, remaining),
            ClockEvent::Expired { color } => observer.on_expired(color),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Running {
    color: Color,
    deadline: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessClock {
    /// Remaining time of each side as of the last pause.
    banked: [Duration; 2],
    increment: Duration,
    running: Option<Running>,
    last_display: [Option<u64>; 2],
    expired: Option<Color>,
}

impl ChessClock {
    pub fn new(white: Duration, black: Duration, increment: Duration) -> Self {
        Self {
            banked: [white, black],
            increment,
            running: None,
            last_display: [None; 2],
            expired: None,
        }
    }

    pub fn increment(&self) -> Duration {
        self.increment
    }

    pub fn running_color(&self) -> Option<Color> {
        self.running.map(|running| running.color)
    }

    pub fn expired(&self) -> Option<Color> {
        self.expired
    }

    pub fn remaining(&self, color: Color, now: Instant) -> Duration {
        match self.running {
            Some(running) if running.color == color => running.deadline.saturating_duration_since(now),
            _ => self.banked[color.index()],
        }
    }

    /// Start `color`'s countdown, pausing whichever side was running.
    pub fn start(&mut self, color: Color, now: Instant) {
        if self.expired.is_some() {
            return;
        }
        self.pause(now);
        self.running = Some(Running {
            color,
            deadline: now + self.banked[color.index()],
        });
    }

    /// Stop the running countdown, banking what is left.
    pub fn pause(&mut self, now: Instant) {
        if let Some(running) = self.running.take() {
            self.banked[running.color.index()] = running.deadline.saturating_duration_since(now);
        }
    }

    /// End the running side's turn: bank its time, credit the increment and
    /// start the other side.
    pub fn press(&mut self, now: Instant) {
        let Some(running) = self.running else {
            return;
        };
        self.pause(now);
        if self.banked[running.color.index()].is_zero() {
            return;
        }
        self.banked[running.color.index()] += self.increment;
        self.start(running.color.opposite(), now);
    }

    /// Overwrite a side's remaining time. A running side keeps running.
    pub fn set_remaining(&mut self, color: Color, remaining: Duration, now: Instant) {
        let was_running = self.running_color() == Some(color);
        if was_running {
            self.pause(now);
        }
        self.banked[color.index()] = remaining;
        if was_running {
            self.start(color, now);
        }
    }

    /// Events since the previous poll.
    pub fn poll(&mut self, now: Instant) -> Vec<ClockEvent> {
        let mut events = Vec::new();
        let Some(running) = self.running else {
            return events;
        };

        let color = running.color;
        let remaining = self.remaining(color, now);
        let shown = whole_seconds(remaining);
        if self.last_display[color.index()] != Some(shown) {
            self.last_display[color.index()] = Some(shown);
            events.push(ClockEvent::Display { color, remaining });
        }

        if remaining.is_zero() && self.expired.is_none() {
            self.running = None;
            self.banked[color.index()] = Duration::ZERO;
            self.expired = Some(color);
            events.push(ClockEvent::Expired { color });
        }
        events
    }
}

/// Seconds as displayed: rounded up, so `0:00` only shows once time is out.
fn whole_seconds(remaining: Duration) -> u64 {
    let secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/// `m:ss` rendering of a remaining time.
pub fn format_clock(remaining: Duration) -> String {
    let total = whole_seconds(remaining);
    format!("{}:{:02}", total / 60, total % 60)
}
