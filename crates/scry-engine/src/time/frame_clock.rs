use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Samples kept for the rolling frame-rate estimate.
pub const RATE_WINDOW: usize = 60;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    pub now: Instant,
    pub frame_index: u64,
    /// Frames per second over the last [`RATE_WINDOW`] ticks.
    pub fps: f32,
}

/// Per-window frame clock.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// produce a huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,

    samples: VecDeque<Duration>,
    window_total: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self::starting_at(Instant::now(), dt_min, dt_max)
    }

    fn starting_at(start: Instant, dt_min: Duration, dt_max: Duration) -> Self {
        Self {
            last: start,
            frame_index: 0,
            dt_min,
            dt_max,
            samples: VecDeque::with_capacity(RATE_WINDOW),
            window_total: Duration::ZERO,
        }
    }

    /// Restarts the delta baseline and forgets the rate history.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.samples.clear();
        self.window_total = Duration::ZERO;
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        if self.samples.len() == RATE_WINDOW {
            if let Some(old) = self.samples.pop_front() {
                self.window_total -= old;
            }
        }
        self.samples.push_back(dt);
        self.window_total += dt;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
            fps: self.fps(),
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }

    /// Rolling frame rate; 0 before the first tick.
    pub fn fps(&self) -> f32 {
        let secs = self.window_total.as_secs_f32();
        if secs > 0.0 {
            self.samples.len() as f32 / secs
        } else {
            0.0
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
