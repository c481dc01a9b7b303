//! Platform helpers for the native loop
//!
//! Frame pacing only. Windowing, input and audio devices belong to the
//! shell that drives [`crate::App`].

use std::time::{Duration, Instant};

use crate::consts::TICK_RATE;

/// Fixed-rate frame pacer.
///
/// `wait` blocks until the next frame boundary. If a frame overruns by more
/// than a whole period the schedule is re-anchored instead of replaying the
/// missed frames back to back.
#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    next: Instant,
    frames: u64,
    late_frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

impl FrameClock {
    pub fn new(rate: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / rate.max(1) as f64);
        Self {
            period,
            next: Instant::now() + period,
            frames: 0,
            late_frames: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames that started later than a full period behind schedule
    pub fn late_frames(&self) -> u64 {
        self.late_frames
    }

    /// Time left until the next boundary (zero if already due)
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Advance the schedule as of `now`. Returns how long to wait.
    pub fn advance(&mut self, now: Instant) -> Duration {
        let wait = self.remaining(now);
        self.frames += 1;
        if now > self.next + self.period {
            self.late_frames += 1;
            self.next = now + self.period;
        } else {
            self.next += self.period;
        }
        wait
    }

    /// Block until the next frame boundary
    pub fn wait(&mut self) {
        let wait = self.advance(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_matches_rate() {
        let clock = FrameClock::new(60);
        let micros = clock.period().as_micros();
        assert!((16_666..=16_667).contains(&micros));
    }

    #[test]
    fn test_on_time_frames_keep_schedule() {
        let mut clock = FrameClock::new(100);
        let start = Instant::now();
        let wait = clock.advance(start);
        assert!(wait <= clock.period());
        assert_eq!(clock.late_frames(), 0);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn test_overrun_reanchors() {
        let mut clock = FrameClock::new(100);
        let late = Instant::now() + Duration::from_millis(500);
        assert_eq!(clock.advance(late), Duration::ZERO);
        assert_eq!(clock.late_frames(), 1);
        // Next boundary is one period after the late frame, not in the past
        assert_eq!(clock.remaining(late), clock.period());
    }
}
