//! Endpoint highlight markers.
//!
//! When an edge opens, a marker is drawn at each endpoint fully transparent.
//! Driven by the same frame timestamps as the scheduler, both fade in
//! linearly over `duration_ms`, starting `delay_ms` after the edge opened.
//! Markers stay on the map once faded in, until the animation is reset.

use mst_core::{GeoPoint, MarkerStyle};

use crate::{LayerId, RenderResult, Renderer};

#[derive(Debug)]
pub struct HighlightFade {
    markers:     Vec<LayerId>,
    start_ms:    f64,
    duration_ms: f64,
    target:      f32,
    target_fill: f32,
    done:        bool,
}

impl HighlightFade {
    /// Draw the two markers at opacity 0.  A marker whose draw call fails is
    /// simply left out; the error is returned alongside the fade.
    pub fn open<R: Renderer + ?Sized>(
        now_ms:      f64,
        endpoints:   [GeoPoint; 2],
        style:       &MarkerStyle,
        delay_ms:    f64,
        duration_ms: f64,
        renderer:    &mut R,
    ) -> (Self, RenderResult<()>) {
        let mut markers = Vec::with_capacity(2);
        let mut result = Ok(());
        for at in endpoints {
            match renderer.draw_marker(at, style, 0.0) {
                Ok(id) => markers.push(id),
                Err(e) => {
                    if result.is_ok() {
                        result = Err(e);
                    }
                }
            }
        }
        let fade = Self {
            markers,
            start_ms: now_ms + delay_ms.max(0.0),
            duration_ms,
            target: style.opacity,
            target_fill: style.fill_opacity,
            done: false,
        };
        (fade, result)
    }

    /// Fade position in `[0, 1]` at `now_ms`.
    pub fn fraction_at(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return if now_ms >= self.start_ms { 1.0 } else { 0.0 };
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Apply the opacity for `now_ms`.  No-op once fully faded in.
    pub fn tick<R: Renderer + ?Sized>(&mut self, now_ms: f64, renderer: &mut R) -> RenderResult<()> {
        if self.done {
            return Ok(());
        }
        let t = self.fraction_at(now_ms);
        let mut result = Ok(());
        for &m in &self.markers {
            let r = renderer.set_marker_opacity(m, self.target * t as f32, self.target_fill * t as f32);
            if result.is_ok() {
                result = r;
            }
        }
        // Only settle once the final opacity actually landed.
        if t >= 1.0 && result.is_ok() {
            self.done = true;
        }
        result
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn markers(&self) -> &[LayerId] {
        &self.markers
    }

    pub fn into_markers(self) -> Vec<LayerId> {
        self.markers
    }
}
