//! Per-edge step timing.
//!
//! One edge occupies one *step* of logical time:
//!
//! ```text
//! |<── growth = delay × factor ──>|<── pause = delay ──>|
//! 0                      growth_fraction                1   (step fraction)
//! ```
//!
//! The visual reveal runs 0 → 1 during growth and holds at 1 during pause.

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepTiming {
    /// Per-edge delay in milliseconds (from the speed slider).
    pub animation_delay_ms: f64,
    /// Growth sub-phase length as a multiple of the delay.
    pub growth_factor: f64,
}

impl Default for StepTiming {
    fn default() -> Self {
        Self { animation_delay_ms: 480.0, growth_factor: 1.0 }
    }
}

impl StepTiming {
    pub fn new(animation_delay_ms: f64, growth_factor: f64) -> Self {
        Self { animation_delay_ms, growth_factor }
    }

    #[inline]
    pub fn growth_duration(&self) -> f64 {
        self.animation_delay_ms * self.growth_factor
    }

    #[inline]
    pub fn pause_duration(&self) -> f64 {
        self.animation_delay_ms
    }

    /// Total logical time per edge, `growth + pause`.
    #[inline]
    pub fn step_interval(&self) -> f64 {
        self.growth_duration() + self.pause_duration()
    }

    /// Share of a step spent growing, in `[0, 1]`.  Zero when the step
    /// itself has no length.
    #[inline]
    pub fn growth_fraction(&self) -> f64 {
        let step = self.step_interval();
        if step > 0.0 { (self.growth_duration() / step).clamp(0.0, 1.0) } else { 0.0 }
    }

    /// Visual reveal for a position `step_fraction` into the current step.
    #[inline]
    pub fn visual_progress(&self, step_fraction: f64) -> f64 {
        let gf = self.growth_fraction();
        if gf > 0.0 { (step_fraction / gf).clamp(0.0, 1.0) } else { 1.0 }
    }
}
