//! The animation clock.
//!
//! A single monotonically non-decreasing elapsed-time value, owned by the
//! render host and advanced once per display refresh by the wall-clock delta
//! since the previous tick. Effects derive their phase from it, so a slow
//! frame just advances the clock further and animation speed is independent
//! of refresh rate.
//!
//! # Example
//!
//! ```ignore
//! use hueflow::time::Time;
//!
//! let mut time = Time::new();
//!
//! // Once per refresh:
//! time.update();
//!
//! println!("Elapsed: {:.2}s", time.elapsed());
//! ```

use std::time::Instant;

/// Elapsed-time clock for the render loop.
#[derive(Debug)]
pub struct Time {
    /// When the last tick occurred.
    last_frame: Instant,
    /// Accumulated elapsed time in seconds.
    elapsed: f64,
    paused: bool,
}

impl Time {
    /// Create a new clock starting at zero.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed: 0.0,
            paused: false,
        }
    }

    /// Advance by the wall-clock time since the previous tick and return the
    /// new elapsed time. Call once per frame.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(delta)
    }

    /// Advance by an explicit delta in seconds.
    ///
    /// Negative deltas are treated as zero so the clock never runs backwards.
    /// While paused the clock does not move.
    pub fn advance(&mut self, delta: f32) -> f32 {
        if !self.paused {
            self.elapsed += delta.max(0.0) as f64;
        }
        self.elapsed()
    }

    /// Total elapsed time in seconds since start (or last reset).
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    /// Elapsed time at full precision.
    #[inline]
    pub fn elapsed_f64(&self) -> f64 {
        self.elapsed
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after pausing. The wall-clock gap spent paused is discarded,
    /// not replayed.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Reset the clock to zero and unpause it. The next [`Time::update`]
    /// measures from this call.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.elapsed = 0.0;
        self.paused = false;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.elapsed(), 0.0);
        assert!(!time.is_paused());
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let elapsed = time.update();

        assert!(elapsed >= 0.01);
        assert_eq!(elapsed, time.elapsed());
    }

    #[test]
    fn test_time_pause() {
        let mut time = Time::new();
        time.advance(0.5);

        time.pause();
        assert!(time.is_paused());

        let elapsed_before = time.elapsed();
        time.advance(1.0);

        // Elapsed should not increase while paused
        assert_eq!(time.elapsed(), elapsed_before);

        time.resume();
        time.advance(0.25);
        assert!((time.elapsed() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_resume_drops_paused_wall_time() {
        let mut time = Time::new();
        time.pause();
        thread::sleep(Duration::from_millis(40));
        time.toggle_pause();
        assert!(!time.is_paused());
        assert!(time.update() < 0.03);
    }

    #[test]
    fn test_monotonic_with_negative_delta() {
        let mut time = Time::new();
        time.advance(1.0);
        time.advance(-5.0);
        assert!((time.elapsed() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_rate_independence() {
        let mut at_60 = Time::new();
        let mut at_24 = Time::new();
        for _ in 0..120 {
            at_60.advance(1.0 / 60.0);
        }
        for _ in 0..48 {
            at_24.advance(1.0 / 24.0);
        }
        assert!((at_60.elapsed() - 2.0).abs() < 1e-4);
        assert!((at_60.elapsed() - at_24.elapsed()).abs() < 1e-4);
    }

    #[test]
    fn test_reset_restarts_wall_clock() {
        let mut time = Time::new();
        time.advance(3.0);
        time.pause();
        thread::sleep(Duration::from_millis(40));
        time.reset();
        assert_eq!(time.elapsed(), 0.0);
        assert!(!time.is_paused());
        assert!(time.update() < 0.03);
    }
}
