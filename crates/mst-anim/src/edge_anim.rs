//! The edge currently being revealed.
//!
//! An [`EdgeAnim`] draws a prefix of the edge's cached geodesic, which runs
//! from the lower node index to the higher.  The prefix length is
//! `max(2, floor(total × progress))` points.  Each update splits the
//! prefix at antimeridian jumps, reuses already drawn parts by position, and
//! removes parts the new split no longer needs.

use mst_compute::Polyline;
use mst_core::{PolylineStyle, split_at_antimeridian};
use mst_engine::Edge;

use crate::{LayerId, Pane, RenderError, RenderResult, Renderer};

#[derive(Debug)]
pub struct EdgeAnim {
    index:    usize,
    edge:     Edge,
    line:     Polyline,
    progress: f64,
    parts:    Vec<LayerId>,
}

impl EdgeAnim {
    /// Open MST edge number `index` with nothing drawn yet.
    pub fn open(index: usize, edge: Edge, line: Polyline) -> Self {
        Self { index, edge, line, progress: 0.0, parts: Vec::new() }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn edge(&self) -> &Edge {
        &self.edge
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Layers currently drawn for this edge.
    pub fn parts(&self) -> &[LayerId] {
        &self.parts
    }

    /// Hand the drawn layers over (when the edge is closed).
    pub fn into_parts(self) -> Vec<LayerId> {
        self.parts
    }

    /// Points drawn at `progress`.
    pub fn visible_count(&self, progress: f64) -> usize {
        let total = self.line.len();
        let raw = (total as f64 * progress.clamp(0.0, 1.0)).floor() as usize;
        raw.max(2).min(total)
    }

    /// Redraw at `progress`.  All draw calls are attempted even after a
    /// failure; the first failure is returned.
    pub fn update<R: Renderer + ?Sized>(
        &mut self,
        progress:           f64,
        renderer:           &mut R,
        style:              &PolylineStyle,
        wrap_lon_threshold: f64,
    ) -> RenderResult<()> {
        self.progress = progress.clamp(0.0, 1.0);
        let count = self.visible_count(self.progress);
        let segments = split_at_antimeridian(&self.line[..count], wrap_lon_threshold);

        let mut first_err: Option<RenderError> = None;

        let mut parts = Vec::with_capacity(segments.len());
        for (i, seg) in segments.iter().enumerate() {
            match self.parts.get(i) {
                Some(&layer) => {
                    // Keep the layer even if this update failed; the next
                    // frame retries it.
                    if let Err(e) = renderer.update_polyline(layer, seg) {
                        keep_first(&mut first_err, e);
                    }
                    parts.push(layer);
                }
                None => match renderer.draw_polyline(seg, style, Pane::Mst) {
                    Ok(layer) => parts.push(layer),
                    Err(e) => keep_first(&mut first_err, e),
                },
            }
        }
        for &stale in self.parts.iter().skip(segments.len()) {
            if let Err(e) = renderer.remove(stale) {
                keep_first(&mut first_err, e);
            }
        }
        self.parts = parts;

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn keep_first(first: &mut Option<RenderError>, err: RenderError) {
    if first.is_none() {
        *first = Some(err);
    }
}
