//! Presenter countdown timer.

use std::time::{Duration, Instant};

/// A countdown that can be paused and resumed.
///
/// While running, the remaining time is derived from the end instant, so
/// the display stays correct no matter how often it is polled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    remaining: Duration,
    ends_at: Option<Instant>,
}

impl CountdownTimer {
    pub fn new(total: Duration) -> Self {
        Self {
            remaining: total,
            ends_at: None,
        }
    }

    pub fn from_minutes(minutes: u64) -> Self {
        Self::new(Duration::from_secs(minutes * 60))
    }

    pub fn is_running(&self) -> bool {
        self.ends_at.is_some()
    }

    /// Start a paused timer or pause a running one.
    pub fn toggle(&mut self, now: Instant) {
        match self.ends_at.take() {
            Some(end) => self.remaining = end.saturating_duration_since(now),
            None => self.ends_at = Some(now + self.remaining),
        }
    }

    /// Replace the remaining time. A running timer keeps running.
    pub fn set(&mut self, total: Duration, now: Instant) {
        self.remaining = total;
        if self.ends_at.is_some() {
            self.ends_at = Some(now + total);
        }
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        match self.ends_at {
            Some(end) => end.saturating_duration_since(now),
            None => self.remaining,
        }
    }

    /// Remaining time as `H:MM:SS`.
    pub fn display(&self, now: Instant) -> String {
        format_clock(self.remaining(now))
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::from_minutes(45)
    }
}

/// Format whole seconds as `H:MM:SS`.
pub fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Parse `SS`, `MM:SS` or `H:MM:SS`. Components are not range checked, so
/// `90:00` is ninety minutes.
pub fn parse_clock(text: &str) -> Option<Duration> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() > 3 {
        return None;
    }
    let mut secs = 0u64;
    for (part, scale) in parts.iter().rev().zip([1u64, 60, 3600]) {
        let value: u64 = part.trim().parse().ok()?;
        secs = secs.checked_add(value.checked_mul(scale)?)?;
    }
    Some(Duration::from_secs(secs))
}
