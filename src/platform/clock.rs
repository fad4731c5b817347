//! Frame pacing

use super::Clock;
use crate::consts::MAX_CATCH_UP_FRAMES;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Rolling FPS estimate from frame timestamps (seconds)
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    recorded: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            recorded: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame finishing at `time` seconds
    pub fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.recorded = (self.recorded + 1).min(FPS_WINDOW);

        // Oldest sample in the window; before it fills, the first one recorded
        let oldest_idx = if self.recorded < FPS_WINDOW {
            0
        } else {
            self.frame_index
        };
        let intervals = self.recorded.saturating_sub(1);
        let elapsed = time - self.frame_times[oldest_idx];
        if intervals > 0 && elapsed > 0.0 {
            self.fps = (intervals as f64 / elapsed).round() as u32;
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Fixed-rate frame accumulator for callback-driven hosts
///
/// The browser calls back at the display rate, which need not match the
/// target rate. Each callback adds the elapsed time and reports how many
/// whole frames are due, at most `MAX_CATCH_UP_FRAMES`.
#[derive(Debug, Clone)]
pub struct FramePacer {
    /// Seconds per frame
    interval: f64,
    accumulator: f64,
    last_time: Option<f64>,
}

impl FramePacer {
    /// Longest gap counted between callbacks (seconds)
    const MAX_GAP: f64 = 0.1;

    pub fn new(target_fps: u32) -> Self {
        Self {
            interval: 1.0 / target_fps.max(1) as f64,
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Frames due at `time` seconds
    pub fn due_frames(&mut self, time: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => (time - last).clamp(0.0, Self::MAX_GAP),
            // First callback runs one frame
            None => self.interval,
        };
        self.last_time = Some(time);
        self.accumulator += dt;

        // Tolerance keeps 2 x (1/120) from landing just under 1/60
        let epsilon = self.interval * 1e-6;
        let mut frames = 0;
        while self.accumulator + epsilon >= self.interval && frames < MAX_CATCH_UP_FRAMES {
            self.accumulator -= self.interval;
            frames += 1;
        }

        // Drop whatever backlog the cap left behind
        if self.accumulator + epsilon >= self.interval {
            self.accumulator = 0.0;
        }
        self.accumulator = self.accumulator.max(0.0);
        frames
    }
}

/// Wall-clock pacer that sleeps off the rest of each frame
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct SystemClock {
    start: std::time::Instant,
    next_frame: Option<std::time::Instant>,
    counter: FpsCounter,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
            next_frame: None,
            counter: FpsCounter::new(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn tick(&mut self, target_fps: u32) {
        use std::time::{Duration, Instant};

        let frame = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        let now = Instant::now();
        let deadline = self.next_frame.unwrap_or(now + frame);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }

        // Fell behind by more than a frame: resync instead of bursting
        let after = Instant::now();
        self.next_frame = Some(if after > deadline + frame {
            after + frame
        } else {
            deadline + frame
        });

        self.counter.record(self.start.elapsed().as_secs_f64());
    }

    fn measured_fps(&self) -> u32 {
        self.counter.fps()
    }
}

/// Clock that never blocks; each tick advances virtual time by one frame
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pub ticks: u64,
    time: f64,
    counter: FpsCounter,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for ManualClock {
    fn tick(&mut self, target_fps: u32) {
        self.ticks += 1;
        self.time += 1.0 / target_fps.max(1) as f64;
        self.counter.record(self.time);
    }

    fn measured_fps(&self) -> u32 {
        self.counter.fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_counter_steady_rate() {
        let mut counter = FpsCounter::new();
        assert_eq!(counter.fps(), 0);
        for i in 0..200 {
            counter.record(i as f64 / 120.0);
        }
        assert_eq!(counter.fps(), 120);
    }

    #[test]
    fn test_fps_counter_before_window_fills() {
        let mut counter = FpsCounter::new();
        counter.record(0.0);
        assert_eq!(counter.fps(), 0);
        counter.record(0.5);
        counter.record(1.0);
        assert_eq!(counter.fps(), 2);
    }

    #[test]
    fn test_pacer_runs_two_frames_per_60hz_callback() {
        let mut pacer = FramePacer::new(120);
        assert_eq!(pacer.due_frames(10.0), 1);

        let mut total = 1;
        for i in 1..=60 {
            let frames = pacer.due_frames(10.0 + i as f64 / 60.0);
            assert_eq!(frames, 2);
            total += frames;
        }
        // One second of 60 Hz callbacks keeps the simulation at 120 FPS
        assert_eq!(total, 121);
    }

    #[test]
    fn test_pacer_skips_callbacks_on_fast_displays() {
        let mut pacer = FramePacer::new(120);
        pacer.due_frames(0.0);
        let total: u32 = (1..=240).map(|i| pacer.due_frames(i as f64 / 240.0)).sum();
        assert!((119..=121).contains(&total), "ran {} frames", total);
    }

    #[test]
    fn test_pacer_caps_catch_up_after_a_stall() {
        let mut pacer = FramePacer::new(120);
        pacer.due_frames(0.0);
        assert_eq!(pacer.due_frames(5.0), MAX_CATCH_UP_FRAMES);

        // Backlog is dropped: the next regular callback is back to normal
        assert_eq!(pacer.due_frames(5.0 + 1.0 / 60.0), 2);
        assert_eq!(pacer.due_frames(5.0), 0);
    }

    #[test]
    fn test_manual_clock_measures_target() {
        let mut clock = ManualClock::new();
        for _ in 0..90 {
            clock.tick(60);
        }
        assert_eq!(clock.ticks, 90);
        assert_eq!(clock.measured_fps(), 60);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_system_clock_paces() {
        let mut clock = SystemClock::new();
        let start = std::time::Instant::now();
        for _ in 0..5 {
            clock.tick(100);
        }
        // Five frames at 100 FPS take at least ~40ms
        assert!(start.elapsed() >= std::time::Duration::from_millis(35));
    }
}
