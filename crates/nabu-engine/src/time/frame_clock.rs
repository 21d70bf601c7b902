use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the application is paused
/// by the debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (0.1 ms to 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline. The runtime calls this after a resize.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_the_time_between_ticks() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now() + Duration::from_secs(1);
        clock.tick_at(t0);

        let ft = clock.tick_at(t0 + Duration::from_millis(16));

        assert!((ft.dt - 0.016).abs() < 1e-6);
        assert_eq!(ft.now, t0 + Duration::from_millis(16));
    }

    #[test]
    fn dt_is_clamped_at_both_ends() {
        let mut clock =
            FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(100));
        let t0 = Instant::now() + Duration::from_secs(1);
        clock.tick_at(t0);

        let stalled = clock.tick_at(t0 + Duration::from_secs(5));
        let same_instant = clock.tick_at(t0 + Duration::from_secs(5));

        assert!((stalled.dt - 0.1).abs() < 1e-6);
        assert!((same_instant.dt - 0.001).abs() < 1e-6);
    }

    #[test]
    fn frame_index_counts_from_zero() {
        let mut clock = FrameClock::new();

        let indices: Vec<u64> = (0..3).map(|_| clock.tick().frame_index).collect();

        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn reset_discards_the_time_spent_before_it() {
        let mut clock = FrameClock::with_clamps(Duration::ZERO, Duration::from_secs(10));
        clock.tick_at(Instant::now());
        std::thread::sleep(Duration::from_millis(30));

        clock.reset();
        let ft = clock.tick();

        assert!(ft.dt < 0.03, "dt = {}", ft.dt);
        assert_eq!(ft.frame_index, 1);
    }
}
