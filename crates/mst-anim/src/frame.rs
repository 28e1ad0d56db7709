//! Frame clocks and the driver loop that calls a per-frame closure.
//!
//! A [`FrameClock`] stands in for the host's "next frame" primitive.  Two are
//! provided: [`FixedClock`] advances a virtual timestamp by a constant step
//! and never sleeps (headless runs, tests); [`RealtimeClock`] sleeps to the
//! next frame boundary and reports wall time since creation.

use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};

/// Source of frame timestamps in milliseconds.
pub trait FrameClock {
    /// Timestamp of the current frame.
    fn now_ms(&mut self) -> f64;

    /// Block (or pretend to) until the next frame is due.
    fn wait_next_frame(&mut self);
}

/// Virtual clock: each frame is exactly `frame_ms` after the previous one.
#[derive(Copy, Clone, Debug)]
pub struct FixedClock {
    now_ms:   f64,
    frame_ms: f64,
}

impl FixedClock {
    pub fn new(frame_ms: f64) -> Self {
        Self { now_ms: 0.0, frame_ms }
    }

    pub fn starting_at(now_ms: f64, frame_ms: f64) -> Self {
        Self { now_ms, frame_ms }
    }
}

impl FrameClock for FixedClock {
    fn now_ms(&mut self) -> f64 {
        self.now_ms
    }

    fn wait_next_frame(&mut self) {
        self.now_ms += self.frame_ms;
    }
}

/// Wall-clock frames at a target rate.
#[derive(Debug)]
pub struct RealtimeClock {
    origin: Instant,
    frame:  Duration,
    next:   Instant,
}

impl RealtimeClock {
    pub fn new(fps: f64) -> Self {
        let frame = Duration::from_secs_f64(1.0 / fps.max(1.0));
        let origin = Instant::now();
        Self { origin, frame, next: origin + frame }
    }
}

impl FrameClock for RealtimeClock {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn wait_next_frame(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
        }
        // A late frame schedules the following one relative to now rather
        // than trying to catch up with a burst.
        self.next = self.next.max(now) + self.frame;
    }
}

/// Calls a closure once per frame until it breaks or a frame limit is hit.
#[derive(Debug)]
pub struct FrameDriver<C: FrameClock> {
    clock:      C,
    max_frames: Option<u64>,
}

impl<C: FrameClock> FrameDriver<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, max_frames: None }
    }

    /// Stop after `n` frames even if the closure keeps going.
    pub fn with_max_frames(mut self, n: u64) -> Self {
        self.max_frames = Some(n);
        self
    }

    /// Run `frame(now_ms)` until it returns `Break`.  Returns the number of
    /// frames run.
    pub fn run<F>(&mut self, mut frame: F) -> u64
    where
        F: FnMut(f64) -> ControlFlow<()>,
    {
        let mut frames = 0u64;
        loop {
            if self.max_frames.is_some_and(|max| frames >= max) {
                log::warn!("frame limit of {frames} reached before the loop finished");
                break;
            }
            self.clock.wait_next_frame();
            let now = self.clock.now_ms();
            frames += 1;
            if frame(now).is_break() {
                break;
            }
        }
        frames
    }
}
