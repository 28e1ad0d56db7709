//! `VizSession`: the explicit context object tying the pieces together.
//!
//! One session owns everything the UI side holds: the loaded cities, the
//! geometry cache, the latest compute results, the candidate layer, and the
//! scheduler.  It never runs compute work itself; instead it hands out
//! [`ComputeRequest`]s for the caller to send to a worker and accepts the
//! responses back through [`apply_response`](VizSession::apply_response).
//!
//! # Staleness
//!
//! Every request carries the next `generation`.  Only a response whose
//! generation matches the latest request is applied; anything older
//! describes a dataset or algorithm the user has since moved away from.

use mst_compute::{ComputeConfig, ComputeRequest, ComputeResponse, ComputeWorker, GreatCircleCache};
use mst_core::{City, DatasetKey, GeoPoint, NodeIndex, VizConfig};
use mst_engine::{Algorithm, SpanningTree};

use crate::{
    AnimResult, AnimationContext, AnimationScheduler, CandidateLayer, Renderer, SchedulerState,
    StepTiming, ZoomRange,
};

pub struct VizSession {
    config:     VizConfig,
    cities:     Vec<City>,
    positions:  Vec<GeoPoint>,
    dataset:    DatasetKey,
    algorithm:  Algorithm,
    /// Generation of the most recent request handed out.
    generation: u64,
    applied:    Option<u64>,
    cache:      GreatCircleCache,
    mst:        SpanningTree,
    neighbors:  Vec<Vec<NodeIndex>>,
    scheduler:  AnimationScheduler,
    candidates: CandidateLayer,
    zoom:       f64,
    zoom_range: ZoomRange,
}

impl VizSession {
    /// Validate `config` and build an empty session.
    pub fn new(config: VizConfig) -> AnimResult<Self> {
        config.validate()?;
        let timing = StepTiming::new(
            config.default_animation_delay_ms(),
            config.edge_growth_duration_factor,
        );
        Ok(Self {
            config,
            cities:     Vec::new(),
            positions:  Vec::new(),
            dataset:    DatasetKey::default(),
            algorithm:  Algorithm::default(),
            generation: 0,
            applied:    None,
            cache:      GreatCircleCache::new(),
            mst:        SpanningTree::empty(),
            neighbors:  Vec::new(),
            scheduler:  AnimationScheduler::new(timing),
            candidates: CandidateLayer::new(),
            zoom:       0.0,
            zoom_range: ZoomRange::default(),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Generation of the response currently applied, if any.
    pub fn applied_generation(&self) -> Option<u64> {
        self.applied
    }

    pub fn mst(&self) -> &SpanningTree {
        &self.mst
    }

    pub fn neighbors(&self) -> &[Vec<NodeIndex>] {
        &self.neighbors
    }

    pub fn cache(&self) -> &GreatCircleCache {
        &self.cache
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn candidates(&self) -> &CandidateLayer {
        &self.candidates
    }

    /// Total MST length in kilometres.
    pub fn mst_total_km(&self) -> f64 {
        self.mst.total_weight()
    }

    // ── Dataset and algorithm ─────────────────────────────────────────────

    /// Replace the dataset and return the compute request to run for it.
    ///
    /// Clears the animation, candidate edges and previous results.  The
    /// geometry cache is dropped only if the cities actually differ.
    pub fn load_cities<R: Renderer + ?Sized>(
        &mut self,
        cities:   Vec<City>,
        renderer: &mut R,
    ) -> ComputeRequest {
        self.scheduler.load(&SpanningTree::empty(), renderer);
        self.candidates.clear(renderer);
        self.mst = SpanningTree::empty();
        self.neighbors.clear();
        self.applied = None;

        self.positions = cities.iter().map(City::position).collect();
        self.cities = cities;
        self.dataset = DatasetKey::from_cities(&self.cities);
        if self.cache.reset_for(&self.dataset) {
            log::info!("loaded {} cities (new dataset)", self.cities.len());
        } else {
            log::info!("reloaded {} cities; geometry cache kept", self.cities.len());
        }
        self.next_request()
    }

    /// Switch algorithm.  Returns the request to re-run the current cities,
    /// or `None` if the algorithm did not change.
    pub fn set_algorithm<R: Renderer + ?Sized>(
        &mut self,
        algorithm: Algorithm,
        renderer:  &mut R,
    ) -> Option<ComputeRequest> {
        if algorithm == self.algorithm {
            return None;
        }
        self.algorithm = algorithm;
        self.scheduler.load(&SpanningTree::empty(), renderer);
        self.mst = SpanningTree::empty();
        log::info!("algorithm switched to {algorithm}");
        Some(self.next_request())
    }

    /// A fresh request for the current cities and algorithm.
    pub fn next_request(&mut self) -> ComputeRequest {
        self.generation += 1;
        ComputeRequest {
            generation: self.generation,
            cities:     self.cities.clone(),
            algorithm:  self.algorithm,
            config:     ComputeConfig::from(&self.config),
        }
    }

    /// Accept a compute response.  Returns `false` (and changes nothing) if
    /// it answers a superseded request.
    pub fn apply_response<R: Renderer + ?Sized>(
        &mut self,
        response: ComputeResponse,
        renderer: &mut R,
    ) -> bool {
        if response.generation != self.generation {
            log::warn!(
                "ignoring stale compute response (generation {}, latest {})",
                response.generation,
                self.generation
            );
            return false;
        }

        let added = self.cache.insert_bulk(&response.candidate_geometry)
            + self.cache.insert_bulk(&response.mst_geometry);
        self.neighbors = response.neighbors;
        self.mst = response.mst;
        self.applied = Some(response.generation);
        self.scheduler.load(&self.mst, renderer);

        self.redraw_candidates(renderer);
        log::info!(
            "{}: {} edges, total {:.2} km ({added} geodesics cached)",
            self.algorithm,
            self.mst.len(),
            self.mst_total_km()
        );
        true
    }

    /// Apply every response the worker has ready.  Returns whether any of
    /// them was current.
    pub fn poll_worker<R: Renderer + ?Sized>(
        &mut self,
        worker:   &ComputeWorker,
        renderer: &mut R,
    ) -> AnimResult<bool> {
        let mut applied = false;
        while let Some(response) = worker.try_recv()? {
            applied |= self.apply_response(response, renderer);
        }
        Ok(applied)
    }

    // ── Animation ─────────────────────────────────────────────────────────

    /// Restart the animation from the first edge.
    pub fn start<R: Renderer + ?Sized>(&mut self, now_ms: f64, renderer: &mut R) {
        self.scheduler.start(now_ms, renderer);
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// Stop and clear the animation back to edge 0.
    pub fn reset<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.scheduler.reset(renderer);
    }

    pub fn tick<R: Renderer + ?Sized>(&mut self, now_ms: f64, renderer: &mut R) -> SchedulerState {
        let mut ctx = AnimationContext {
            cache:     &mut self.cache,
            positions: &self.positions,
            config:    &self.config,
        };
        self.scheduler.tick(now_ms, &mut ctx, renderer)
    }

    /// Move the speed slider.  Returns the resulting per-edge delay (ms).
    /// Applies immediately, mid-animation included.
    pub fn set_speed_slider(&mut self, value: f64) -> f64 {
        let delay = self.config.speed_range.delay_for_slider(value);
        self.scheduler.set_animation_delay(delay);
        delay
    }

    /// Change the growth-to-pause ratio of each step.
    pub fn set_growth_factor(&mut self, factor: f64) {
        self.scheduler.set_growth_factor(factor);
    }

    // ── Candidate layer ───────────────────────────────────────────────────

    pub fn set_zoom_range(&mut self, range: ZoomRange) {
        self.zoom_range = range;
    }

    /// Report a new map zoom.  Returns whether the candidate layer was
    /// redrawn.
    pub fn set_zoom<R: Renderer + ?Sized>(&mut self, zoom: f64, renderer: &mut R) -> bool {
        self.zoom = zoom;
        let mut ctx = AnimationContext {
            cache:     &mut self.cache,
            positions: &self.positions,
            config:    &self.config,
        };
        self.candidates.on_zoom(&self.neighbors, zoom, self.zoom_range, &mut ctx, renderer)
    }

    /// Redraw candidate edges at the current zoom.
    pub fn redraw_candidates<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        let mut ctx = AnimationContext {
            cache:     &mut self.cache,
            positions: &self.positions,
            config:    &self.config,
        };
        self.candidates.redraw(&self.neighbors, self.zoom, self.zoom_range, &mut ctx, renderer)
    }
}
