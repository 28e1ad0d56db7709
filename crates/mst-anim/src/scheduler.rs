//! The edge animation scheduler.
//!
//! # State machine
//!
//! ```text
//!            start(ts)                 all edges closed
//!   Idle ───────────────► Running ─────────────────────► Stopped
//!    ▲                     │  ▲                          │
//!    │      reset()        │  └───────── start(ts) ──────┘
//!    └─────────────────────┴──── stop() ──► Stopped
//! ```
//!
//! `start` always restarts from edge 0; there is no resume.  The delay can
//! change at any point while running without moving the current position.
//!
//! # Per-frame algorithm
//!
//! Logical progress is a float index advanced by `dt / step_interval` each
//! tick.  `anim_index` counts edges opened so far; the open edge is
//! `anim_index - 1`.
//!
//! ```text
//! tick(ts):
//!   ① dt = ts - last; last = ts; float += dt / step
//!   ② while anim_index < floor(float) and edges remain:
//!        finish the open edge at 100 %, open the next;
//!        still behind ⇒ finish that one too
//!   ③ open edge: f = float - (anim_index - 1)
//!        progress = clamp(f / growth_fraction, 0, 1); redraw
//!        f ≥ 1 ⇒ close
//!      no open edge but float says we are in the next one ⇒ open it
//!   ④ advance highlight fades
//!   ⑤ anim_index ≥ total and nothing open ⇒ Stopped
//! ```
//!
//! Step ② is what makes large frame gaps safe: every skipped edge is still
//! drawn in full, in order.  Render failures anywhere in a tick are logged,
//! counted, and otherwise ignored; the logical state advances regardless.

use mst_compute::{GreatCircleCache, Polyline};
use mst_core::{GeoPoint, VizConfig};
use mst_engine::{Edge, SpanningTree};

use crate::edge_anim::EdgeAnim;
use crate::highlight::HighlightFade;
use crate::{LayerId, RenderResult, Renderer, StepTiming};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing scheduled.
    Idle,
    /// A frame callback is due every tick.
    Running,
    /// Finished or explicitly halted.
    Stopped,
}

/// What a tick may read and lazily fill besides the renderer.
pub struct AnimationContext<'a> {
    pub cache:     &'a mut GreatCircleCache,
    /// Current dataset positions, indexed by node.
    pub positions: &'a [GeoPoint],
    pub config:    &'a VizConfig,
}

#[derive(Debug)]
pub struct AnimationScheduler {
    state:           SchedulerState,
    edges:           Vec<Edge>,
    timing:          StepTiming,
    float_index:     f64,
    anim_index:      usize,
    last_frame_ms:   f64,
    open:            Option<EdgeAnim>,
    /// Parts of closed edges; they stay drawn until reset.
    drawn:           Vec<LayerId>,
    fades:           Vec<HighlightFade>,
    completed:       usize,
    render_failures: u64,
}

impl AnimationScheduler {
    pub fn new(timing: StepTiming) -> Self {
        Self {
            state:           SchedulerState::Idle,
            edges:           Vec::new(),
            timing,
            float_index:     0.0,
            anim_index:      0,
            last_frame_ms:   0.0,
            open:            None,
            drawn:           Vec::new(),
            fades:           Vec::new(),
            completed:       0,
            render_failures: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    #[inline]
    pub fn timing(&self) -> StepTiming {
        self.timing
    }

    #[inline]
    pub fn total_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn float_index(&self) -> f64 {
        self.float_index
    }

    /// Number of edges opened so far.
    #[inline]
    pub fn anim_index(&self) -> usize {
        self.anim_index
    }

    /// Edges that have reached full reveal since the last (re)start.
    #[inline]
    pub fn completed_edges(&self) -> usize {
        self.completed
    }

    /// `(edge index, progress)` of the edge being revealed, if any.
    pub fn open_edge(&self) -> Option<(usize, f64)> {
        self.open.as_ref().map(|a| (a.index(), a.progress()))
    }

    /// Render calls that failed since construction.
    #[inline]
    pub fn render_failures(&self) -> u64 {
        self.render_failures
    }

    // ── Control ───────────────────────────────────────────────────────────

    /// Replace the edge sequence.  Clears everything drawn and returns to
    /// `Idle`.
    pub fn load<R: Renderer + ?Sized>(&mut self, tree: &SpanningTree, renderer: &mut R) {
        self.reset(renderer);
        self.edges = tree.edges().to_vec();
    }

    /// Restart from edge 0 at timestamp `now_ms`.  Anything already drawn is
    /// removed first.
    pub fn start<R: Renderer + ?Sized>(&mut self, now_ms: f64, renderer: &mut R) {
        self.clear_layers(renderer);
        self.float_index = 0.0;
        self.anim_index = 0;
        self.completed = 0;
        self.last_frame_ms = now_ms;
        self.state = SchedulerState::Running;
        log::debug!(
            "animation started: {} edges, step {:.1} ms",
            self.edges.len(),
            self.timing.step_interval()
        );
    }

    /// Halt.  Drawn layers stay as they are; no further tick has any
    /// effect.  Stopping while not running is a no-op.
    pub fn stop(&mut self) {
        if self.state == SchedulerState::Running {
            self.state = SchedulerState::Stopped;
            log::debug!("animation stopped at edge {}/{}", self.anim_index, self.edges.len());
        }
    }

    /// Stop, remove every layer the animation drew, and go back to `Idle`
    /// at edge 0.  The edge sequence is kept.
    pub fn reset<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.clear_layers(renderer);
        self.float_index = 0.0;
        self.anim_index = 0;
        self.completed = 0;
        self.state = SchedulerState::Idle;
    }

    /// Change the per-edge delay.  Takes effect on the next tick; the current
    /// position is kept.
    pub fn set_animation_delay(&mut self, delay_ms: f64) {
        self.timing.animation_delay_ms = delay_ms.max(0.0);
    }

    pub fn set_growth_factor(&mut self, factor: f64) {
        self.timing.growth_factor = factor.max(0.0);
    }

    // ── Frame ─────────────────────────────────────────────────────────────

    /// Advance to timestamp `now_ms`.  Returns the state after the tick.
    pub fn tick<R: Renderer + ?Sized>(
        &mut self,
        now_ms:   f64,
        ctx:      &mut AnimationContext<'_>,
        renderer: &mut R,
    ) -> SchedulerState {
        if self.state != SchedulerState::Running {
            return self.state;
        }

        // ①  Clock regressions count as zero elapsed time.
        let dt = (now_ms - self.last_frame_ms).max(0.0);
        self.last_frame_ms = now_ms;
        let step = self.timing.step_interval();
        let total = self.edges.len();
        if step > 0.0 {
            self.float_index += dt / step;
        } else {
            self.float_index = total as f64;
        }
        let integer_index = self.float_index.floor() as usize;

        // ②
        while self.anim_index < integer_index && self.anim_index < total {
            self.finish_open(ctx, renderer);
            self.open_next(now_ms, ctx, renderer);
            if self.anim_index < integer_index {
                self.finish_open(ctx, renderer);
            }
        }

        // ③
        if self.open.is_some() {
            let step_fraction = self.float_index - (self.anim_index as f64 - 1.0);
            let progress = self.timing.visual_progress(step_fraction);
            self.redraw_open(progress, ctx, renderer);
            if step_fraction >= 1.0 {
                self.close_open(renderer);
            }
        } else if self.anim_index < total && self.anim_index <= integer_index {
            self.open_next(now_ms, ctx, renderer);
        }

        // ④
        for i in 0..self.fades.len() {
            let r = self.fades[i].tick(now_ms, renderer);
            self.note(r);
        }

        // ⑤
        if self.anim_index >= total && self.open.is_none() {
            self.state = SchedulerState::Stopped;
            log::debug!(
                "animation finished: {} edges, {} render failures",
                self.completed,
                self.render_failures
            );
        }
        self.state
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn open_next<R: Renderer + ?Sized>(
        &mut self,
        now_ms:   f64,
        ctx:      &mut AnimationContext<'_>,
        renderer: &mut R,
    ) {
        let index = self.anim_index;
        let Some(&edge) = self.edges.get(index) else { return };
        let opts = ctx.config.great_circle_options();
        let line: Polyline = match ctx.cache.get_or_compute(edge.key(), ctx.positions, &opts) {
            Some(line) => line,
            None => {
                log::warn!("edge {index} ({}-{}) has no position; drawing nothing", edge.u, edge.v);
                Polyline::from(Vec::new())
            }
        };

        if let (Some(&a), Some(&b)) =
            (ctx.positions.get(edge.u.index()), ctx.positions.get(edge.v.index()))
        {
            let (fade, r) = HighlightFade::open(
                now_ms,
                [a, b],
                &ctx.config.highlight_style,
                ctx.config.highlight_fade_in_delay_ms,
                ctx.config.highlight_anim_duration_ms,
                renderer,
            );
            self.fades.push(fade);
            self.note(r);
        }

        self.open = Some(EdgeAnim::open(index, edge, line));
        self.anim_index += 1;
    }

    fn redraw_open<R: Renderer + ?Sized>(
        &mut self,
        progress: f64,
        ctx:      &AnimationContext<'_>,
        renderer: &mut R,
    ) {
        if let Some(anim) = self.open.as_mut() {
            let r = anim.update(
                progress,
                renderer,
                &ctx.config.mst_style,
                ctx.config.wrap_lon_threshold,
            );
            self.note(r);
        }
    }

    fn finish_open<R: Renderer + ?Sized>(&mut self, ctx: &AnimationContext<'_>, renderer: &mut R) {
        if self.open.is_some() {
            self.redraw_open(1.0, ctx, renderer);
            self.close_open(renderer);
        }
    }

    fn close_open<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        if let Some(anim) = self.open.take() {
            let index = anim.index();
            self.drawn.extend(anim.into_parts());
            self.completed += 1;
            renderer.edge_completed(index);
        }
    }

    fn clear_layers<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        let mut layers: Vec<LayerId> = std::mem::take(&mut self.drawn);
        if let Some(anim) = self.open.take() {
            layers.extend(anim.into_parts());
        }
        for fade in self.fades.drain(..) {
            layers.extend(fade.into_markers());
        }
        for layer in layers {
            let r = renderer.remove(layer);
            self.note(r);
        }
    }

    fn note(&mut self, result: RenderResult<()>) {
        if let Err(e) = result {
            self.render_failures += 1;
            log::warn!("render call failed during animation: {e}");
        }
    }
}
