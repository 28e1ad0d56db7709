//! The candidate-edge backdrop and its zoom-adaptive density.
//!
//! # How many neighbours to draw
//!
//! ```text
//! k
//! k_max ┤                    ┌──────────
//!       │                  ╱
//! k_min ┼────────────────╱
//!       └──────┬─────────┬──────────┬──── zoom
//!           min_zoom   min+hold   min(min+offset, max_zoom)
//! ```
//!
//! Below `min_zoom + hold_levels` the layer shows `k_min` neighbours per
//! node, then grows linearly and reaches `k_max` at the target zoom.  Each
//! node's neighbour list is sliced to that prefix and every resulting pair
//! is drawn once.

use mst_compute::PairSet;
use mst_core::{NodeIndex, PairKey, VizConfig, split_at_antimeridian};

use crate::{AnimationContext, LayerId, Pane, Renderer};

/// The map's zoom bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self { min: 0.0, max: 18.0 }
    }
}

/// Neighbours per node to draw at `zoom`.
pub fn zoom_k(zoom: f64, range: ZoomRange, cfg: &VizConfig) -> usize {
    let hold = cfg.hold_levels as f64;
    if zoom - range.min < hold {
        return cfg.k_min;
    }
    let target = (range.min + cfg.target_zoom_offset as f64).min(range.max);
    let available = (target - (range.min + hold)).max(1.0);
    let frac = ((zoom - (range.min + hold)) / available).clamp(0.0, 1.0);
    let span = cfg.k_max.saturating_sub(cfg.k_min) as f64;
    let k = cfg.k_min + (frac * span).round() as usize;
    k.clamp(cfg.k_min, cfg.k_max.max(cfg.k_min))
}

#[derive(Debug, Default)]
pub struct CandidateLayer {
    layers:          Vec<LayerId>,
    drawn_zoom:      Option<f64>,
    drawn_k:         usize,
    drawn_pairs:     usize,
    render_failures: u64,
}

impl CandidateLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zoom of the last redraw, if any.
    pub fn drawn_zoom(&self) -> Option<f64> {
        self.drawn_zoom
    }

    /// `k` used by the last redraw.
    pub fn drawn_k(&self) -> usize {
        self.drawn_k
    }

    /// Unique pairs drawn by the last redraw.
    pub fn drawn_pairs(&self) -> usize {
        self.drawn_pairs
    }

    pub fn render_failures(&self) -> u64 {
        self.render_failures
    }

    /// Clear and redraw at `zoom`.  Returns the number of pairs drawn.
    ///
    /// `neighbors` must hold one list per dataset node; otherwise (for
    /// instance while a compute response for a new dataset is pending) the
    /// layer is only cleared.
    pub fn redraw<R: Renderer + ?Sized>(
        &mut self,
        neighbors: &[Vec<NodeIndex>],
        zoom:      f64,
        range:     ZoomRange,
        ctx:       &mut AnimationContext<'_>,
        renderer:  &mut R,
    ) -> usize {
        self.clear(renderer);
        self.drawn_zoom = Some(zoom);

        let n = ctx.positions.len();
        if n == 0 || neighbors.len() != n {
            return 0;
        }

        let k = zoom_k(zoom, range, ctx.config);
        let opts = ctx.config.great_circle_options();
        let mut seen = PairSet::default();

        for (i, list) in neighbors.iter().enumerate() {
            let from = NodeIndex::from_usize(i);
            for &to in &list[..k.min(list.len())] {
                let key = PairKey::new(from, to);
                if !seen.insert(key) {
                    continue;
                }
                let Some(line) = ctx.cache.get_or_compute(key, ctx.positions, &opts) else {
                    continue;
                };
                for seg in split_at_antimeridian(&line, ctx.config.wrap_lon_threshold) {
                    match renderer.draw_polyline(seg, &ctx.config.candidate_style, Pane::Candidates) {
                        Ok(layer) => self.layers.push(layer),
                        Err(e) => {
                            self.render_failures += 1;
                            log::warn!("candidate edge {key} not drawn: {e}");
                        }
                    }
                }
            }
        }

        self.drawn_k = k;
        self.drawn_pairs = seen.len();
        log::debug!("candidate layer: k={k}, {} pairs, {} layers", seen.len(), self.layers.len());
        seen.len()
    }

    /// Redraw after a zoom change, but only if the zoom moved at least
    /// `zoom_redraw_threshold` since the last redraw.  Returns whether a
    /// redraw happened.
    pub fn on_zoom<R: Renderer + ?Sized>(
        &mut self,
        neighbors: &[Vec<NodeIndex>],
        zoom:      f64,
        range:     ZoomRange,
        ctx:       &mut AnimationContext<'_>,
        renderer:  &mut R,
    ) -> bool {
        let threshold = ctx.config.zoom_redraw_threshold as f64;
        let moved = match self.drawn_zoom {
            Some(last) => (zoom - last).abs() >= threshold,
            None => true,
        };
        if moved {
            self.redraw(neighbors, zoom, range, ctx, renderer);
        }
        moved
    }

    /// Remove every candidate layer.
    pub fn clear<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        for layer in self.layers.drain(..) {
            if let Err(e) = renderer.remove(layer) {
                self.render_failures += 1;
                log::warn!("candidate layer {layer} not removed: {e}");
            }
        }
        self.drawn_k = 0;
        self.drawn_pairs = 0;
    }
}
