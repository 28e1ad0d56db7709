//! Visualizer configuration.
//!
//! # Design
//!
//! Every knob is a plain number or style record with a documented fallback,
//! so a JSON file only needs the fields it wants to change:
//!
//! ```json
//! { "k_max": 24, "speed_range": { "min": 5, "max": 2000, "step": 5, "default": 1000 } }
//! ```
//!
//! Animation speed follows the slider convention of the map UI: the slider
//! value is inverted into a delay, `delay_ms = min + max - value`, so the
//! right end of the slider is the fastest animation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, EARTH_RADIUS_KM, GreatCircleOptions};

// ── Styles ────────────────────────────────────────────────────────────────────

/// Stroke style for MST and candidate polylines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolylineStyle {
    pub color:   String,
    pub weight:  f32,
    pub opacity: f32,
}

/// Style for the endpoint highlight markers.  `opacity`/`fill_opacity` are
/// the fully faded-in targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub radius:       f32,
    pub color:        String,
    pub fill_color:   String,
    pub opacity:      f32,
    pub fill_opacity: f32,
}

// ── SpeedRange ────────────────────────────────────────────────────────────────

/// Bounds of the speed slider, in milliseconds of per-edge delay.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min:     f64,
    pub max:     f64,
    pub step:    f64,
    pub default: f64,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self { min: 5.0, max: 1000.0, step: 5.0, default: 525.0 }
    }
}

impl SpeedRange {
    /// Map a slider position to an animation delay (ms).  The value is
    /// clamped into the range first.
    #[inline]
    pub fn delay_for_slider(&self, value: f64) -> f64 {
        let v = value.clamp(self.min, self.max);
        self.min + self.max - v
    }

    /// Delay at the slider's default position.
    #[inline]
    pub fn default_delay(&self) -> f64 {
        self.delay_for_slider(self.default)
    }
}

// ── VizConfig ─────────────────────────────────────────────────────────────────

/// Top-level configuration consumed by the compute task, the candidate
/// layer, and the animation scheduler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Fewest candidate neighbours drawn per node (zoomed out).
    pub k_min: usize,
    /// Most candidate neighbours drawn per node; also how many the compute
    /// task ranks per node.
    pub k_max: usize,
    /// Zoom levels above the minimum for which `k` stays at `k_min`.
    pub hold_levels: i32,
    /// `k` reaches `k_max` at `min_zoom + target_zoom_offset`.
    pub target_zoom_offset: i32,
    /// Candidate edges are redrawn only when the zoom moved at least this far.
    pub zoom_redraw_threshold: i32,

    pub gc_min_segments:   u32,
    pub gc_max_segments:   u32,
    pub gc_segment_factor: f64,

    /// Sphere radius for every distance computation.  Default: 6371 km.
    pub distance_radius_km: f64,

    pub speed_range: SpeedRange,
    /// Growth sub-phase length as a multiple of the animation delay.
    pub edge_growth_duration_factor: f64,
    /// Longitude jump (degrees) that splits a drawn polyline.
    pub wrap_lon_threshold: f64,

    pub highlight_fade_in_delay_ms: f64,
    pub highlight_anim_duration_ms: f64,

    pub mst_style:       PolylineStyle,
    pub candidate_style: PolylineStyle,
    pub highlight_style: MarkerStyle,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            k_min:                       8,
            k_max:                       16,
            hold_levels:                 2,
            target_zoom_offset:          7,
            zoom_redraw_threshold:       1,
            gc_min_segments:             6,
            gc_max_segments:             128,
            gc_segment_factor:           0.2,
            distance_radius_km:          EARTH_RADIUS_KM,
            speed_range:                 SpeedRange::default(),
            edge_growth_duration_factor: 1.0,
            wrap_lon_threshold:          180.0,
            highlight_fade_in_delay_ms:  0.0,
            highlight_anim_duration_ms:  300.0,
            mst_style: PolylineStyle {
                color:   "red".into(),
                weight:  3.0,
                opacity: 1.0,
            },
            candidate_style: PolylineStyle {
                color:   "#888".into(),
                weight:  1.0,
                opacity: 0.2,
            },
            highlight_style: MarkerStyle {
                radius:       8.0,
                color:        "blue".into(),
                fill_color:   "cyan".into(),
                opacity:      1.0,
                fill_opacity: 1.0,
            },
        }
    }
}

impl VizConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let cfg: VizConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a JSON config file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject configurations the rest of the system cannot honour.
    pub fn validate(&self) -> CoreResult<()> {
        if self.k_min > self.k_max {
            return Err(CoreError::Config(format!(
                "k_min ({}) exceeds k_max ({})",
                self.k_min, self.k_max
            )));
        }
        if self.gc_min_segments > self.gc_max_segments {
            return Err(CoreError::Config(format!(
                "gc_min_segments ({}) exceeds gc_max_segments ({})",
                self.gc_min_segments, self.gc_max_segments
            )));
        }
        if !(self.gc_segment_factor >= 0.0) {
            return Err(CoreError::Config("gc_segment_factor must be non-negative".into()));
        }
        if !(self.distance_radius_km > 0.0) || !self.distance_radius_km.is_finite() {
            return Err(CoreError::Config("distance_radius_km must be positive".into()));
        }
        let s = &self.speed_range;
        if s.min > s.max || s.min < 0.0 {
            return Err(CoreError::Config(format!(
                "speed_range [{}, {}] is not a valid non-negative range",
                s.min, s.max
            )));
        }
        if !(self.edge_growth_duration_factor >= 0.0) {
            return Err(CoreError::Config(
                "edge_growth_duration_factor must be non-negative".into(),
            ));
        }
        if !(self.wrap_lon_threshold > 0.0) {
            return Err(CoreError::Config("wrap_lon_threshold must be positive".into()));
        }
        if self.highlight_fade_in_delay_ms < 0.0 || self.highlight_anim_duration_ms < 0.0 {
            return Err(CoreError::Config("highlight timings must be non-negative".into()));
        }
        Ok(())
    }

    /// Geodesic resolution derived from the `gc_*` knobs.
    pub fn great_circle_options(&self) -> GreatCircleOptions {
        GreatCircleOptions {
            min_segments:   self.gc_min_segments,
            max_segments:   self.gc_max_segments,
            segment_factor: self.gc_segment_factor,
            radius_km:      self.distance_radius_km,
        }
    }

    /// Animation delay at the slider's default position.
    #[inline]
    pub fn default_animation_delay_ms(&self) -> f64 {
        self.speed_range.default_delay()
    }
}
