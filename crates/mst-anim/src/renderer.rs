//! The drawing seam.
//!
//! Everything visual goes through [`Renderer`]: polylines on one of two
//! panes and circle markers whose opacity can be changed after creation.
//! The animation code owns the returned [`LayerId`]s and removes them when it
//! is reset; a renderer never has to garbage-collect on its own.

use std::collections::BTreeMap;
use std::fmt;

use mst_core::{GeoPoint, MarkerStyle, PolylineStyle};

use crate::{RenderError, RenderResult};

/// Handle to one drawn layer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stacking group a polyline belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Pane {
    /// Faint k-nearest backdrop.
    Candidates,
    /// Spanning-tree edges, above the candidates.
    Mst,
}

/// Drawing backend.
///
/// Every call may fail; callers in this crate treat failures as per-frame
/// glitches and never abort on them.
pub trait Renderer {
    fn draw_polyline(
        &mut self,
        points: &[GeoPoint],
        style:  &PolylineStyle,
        pane:   Pane,
    ) -> RenderResult<LayerId>;

    /// Replace the points of an existing polyline.
    fn update_polyline(&mut self, layer: LayerId, points: &[GeoPoint]) -> RenderResult<()>;

    /// Draw a highlight marker at `at` with both opacities set to `opacity`.
    fn draw_marker(
        &mut self,
        at:      GeoPoint,
        style:   &MarkerStyle,
        opacity: f32,
    ) -> RenderResult<LayerId>;

    fn set_marker_opacity(
        &mut self,
        layer:        LayerId,
        opacity:      f32,
        fill_opacity: f32,
    ) -> RenderResult<()>;

    fn remove(&mut self, layer: LayerId) -> RenderResult<()>;

    /// Called once when MST edge `index` reaches full reveal.
    fn edge_completed(&mut self, _index: usize) {}
}

// ── NoopRenderer ──────────────────────────────────────────────────────────────

/// A [`Renderer`] that draws nothing and never fails.  Hands out fresh ids
/// so callers remain consistent.
#[derive(Debug, Default)]
pub struct NoopRenderer {
    next_id: u64,
}

impl NoopRenderer {
    fn fresh(&mut self) -> LayerId {
        self.next_id += 1;
        LayerId(self.next_id)
    }
}

impl Renderer for NoopRenderer {
    fn draw_polyline(&mut self, _: &[GeoPoint], _: &PolylineStyle, _: Pane) -> RenderResult<LayerId> {
        Ok(self.fresh())
    }

    fn update_polyline(&mut self, _: LayerId, _: &[GeoPoint]) -> RenderResult<()> {
        Ok(())
    }

    fn draw_marker(&mut self, _: GeoPoint, _: &MarkerStyle, _: f32) -> RenderResult<LayerId> {
        Ok(self.fresh())
    }

    fn set_marker_opacity(&mut self, _: LayerId, _: f32, _: f32) -> RenderResult<()> {
        Ok(())
    }

    fn remove(&mut self, _: LayerId) -> RenderResult<()> {
        Ok(())
    }
}

// ── RecordingRenderer ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedPolyline {
    pub pane:    Pane,
    pub points:  Vec<GeoPoint>,
    /// Number of `update_polyline` calls applied.
    pub updates: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedMarker {
    pub at:           GeoPoint,
    pub opacity:      f32,
    pub fill_opacity: f32,
}

/// In-memory [`Renderer`] keeping every live layer, for headless runs and
/// assertions.
///
/// [`failing_every`](Self::failing_every) makes every n-th call return
/// [`RenderError::Backend`] without side effects.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_id:     u64,
    calls:       usize,
    fail_every:  Option<usize>,
    pub polylines: BTreeMap<LayerId, RecordedPolyline>,
    pub markers:   BTreeMap<LayerId, RecordedMarker>,
    /// Edge indices in the order they were reported complete.
    pub completed: Vec<usize>,
    pub failures:  usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_every(n: usize) -> Self {
        Self { fail_every: Some(n.max(1)), ..Self::default() }
    }

    /// Live polylines on `pane`.
    pub fn polylines_on(&self, pane: Pane) -> impl Iterator<Item = &RecordedPolyline> {
        self.polylines.values().filter(move |p| p.pane == pane)
    }

    pub fn live_layers(&self) -> usize {
        self.polylines.len() + self.markers.len()
    }

    fn begin_call(&mut self) -> RenderResult<()> {
        self.calls += 1;
        match self.fail_every {
            Some(n) if self.calls % n == 0 => {
                self.failures += 1;
                Err(RenderError::Backend(format!("injected failure on call {}", self.calls)))
            }
            _ => Ok(()),
        }
    }

    fn fresh(&mut self) -> LayerId {
        self.next_id += 1;
        LayerId(self.next_id)
    }
}

impl Renderer for RecordingRenderer {
    fn draw_polyline(
        &mut self,
        points: &[GeoPoint],
        _style: &PolylineStyle,
        pane:   Pane,
    ) -> RenderResult<LayerId> {
        self.begin_call()?;
        let id = self.fresh();
        self.polylines.insert(id, RecordedPolyline { pane, points: points.to_vec(), updates: 0 });
        Ok(id)
    }

    fn update_polyline(&mut self, layer: LayerId, points: &[GeoPoint]) -> RenderResult<()> {
        self.begin_call()?;
        let line = self.polylines.get_mut(&layer).ok_or(RenderError::UnknownLayer(layer))?;
        line.points.clear();
        line.points.extend_from_slice(points);
        line.updates += 1;
        Ok(())
    }

    fn draw_marker(
        &mut self,
        at:      GeoPoint,
        _style:  &MarkerStyle,
        opacity: f32,
    ) -> RenderResult<LayerId> {
        self.begin_call()?;
        let id = self.fresh();
        self.markers.insert(id, RecordedMarker { at, opacity, fill_opacity: opacity });
        Ok(id)
    }

    fn set_marker_opacity(
        &mut self,
        layer:        LayerId,
        opacity:      f32,
        fill_opacity: f32,
    ) -> RenderResult<()> {
        self.begin_call()?;
        let m = self.markers.get_mut(&layer).ok_or(RenderError::UnknownLayer(layer))?;
        m.opacity = opacity;
        m.fill_opacity = fill_opacity;
        Ok(())
    }

    fn remove(&mut self, layer: LayerId) -> RenderResult<()> {
        self.begin_call()?;
        if self.polylines.remove(&layer).is_some() || self.markers.remove(&layer).is_some() {
            Ok(())
        } else {
            Err(RenderError::UnknownLayer(layer))
        }
    }

    fn edge_completed(&mut self, index: usize) {
        self.completed.push(index);
    }
}
