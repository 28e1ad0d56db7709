//! capitals: headless run of the MST map visualizer.
//!
//! Loads a dataset (Italy's regional capitals by default, a CSV file, or a
//! seeded random set), computes the spanning tree on the worker thread, then
//! plays the edge animation frame by frame against a renderer that only logs.
//! A JSON summary goes to stdout.
//!
//! ```text
//! capitals [CITIES.csv] [--random N] [--seed S] [--config viz.json]
//!          [--algorithm prim|kruskal] [--speed SLIDER] [--growth F] [--zoom Z]
//! ```
//!
//! `RUST_LOG=debug` shows compute timings and scheduler transitions;
//! `RUST_LOG=trace` shows every draw call.

mod capitals;

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};

use mst_anim::{
    FixedClock, FrameDriver, LayerId, Pane, RecordingRenderer, RenderResult, Renderer,
    SchedulerState, VizSession,
};
use mst_compute::ComputeWorker;
use mst_core::{BoundingBox, City, DatasetRng, GeoPoint, MarkerStyle, PolylineStyle, VizConfig};
use mst_engine::Algorithm;

// ── Constants ─────────────────────────────────────────────────────────────────

const FRAME_MS:        f64 = 1000.0 / 60.0;
const MAX_FRAMES:      u64 = 1_000_000;
const COMPUTE_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_SEED:    u64 = 42;

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Args {
    csv:       Option<PathBuf>,
    random:    Option<usize>,
    seed:      Option<u64>,
    config:    Option<PathBuf>,
    algorithm: Algorithm,
    speed:     Option<f64>,
    growth:    Option<f64>,
    zoom:      f64,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        let mut value = |flag: &str| it.next().with_context(|| format!("{flag} needs a value"));
        match arg.as_str() {
            "--random" => args.random = Some(value("--random")?.parse()?),
            "--seed" => args.seed = Some(value("--seed")?.parse()?),
            "--config" => args.config = Some(value("--config")?.into()),
            "--algorithm" => {
                args.algorithm = value("--algorithm")?.parse().map_err(anyhow::Error::msg)?
            }
            "--speed" => args.speed = Some(value("--speed")?.parse()?),
            "--growth" => args.growth = Some(value("--growth")?.parse()?),
            "--zoom" => args.zoom = value("--zoom")?.parse()?,
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            path => {
                if args.csv.replace(path.into()).is_some() {
                    bail!("only one CSV file may be given");
                }
            }
        }
    }
    if args.csv.is_some() && args.random.is_some() {
        bail!("give either a CSV file or --random, not both");
    }
    Ok(args)
}

fn load_cities(args: &Args) -> Result<Vec<City>> {
    if let Some(path) = &args.csv {
        return mst_core::load_cities_csv(path)
            .with_context(|| format!("loading cities from {}", path.display()));
    }
    if let Some(n) = args.random {
        let mut rng = DatasetRng::new(args.seed.unwrap_or(DEFAULT_SEED));
        return Ok(rng.cities(n, BoundingBox::WORLD));
    }
    Ok(capitals::regional_capitals())
}

// ── Renderer ──────────────────────────────────────────────────────────────────

/// Records layers like [`RecordingRenderer`] and logs each call.
struct LogRenderer {
    inner: RecordingRenderer,
    draws: usize,
}

impl Renderer for LogRenderer {
    fn draw_polyline(
        &mut self,
        points: &[GeoPoint],
        style:  &PolylineStyle,
        pane:   Pane,
    ) -> RenderResult<LayerId> {
        self.draws += 1;
        let id = self.inner.draw_polyline(points, style, pane)?;
        log::trace!("draw {pane:?} polyline {id}: {} points", points.len());
        Ok(id)
    }

    fn update_polyline(&mut self, layer: LayerId, points: &[GeoPoint]) -> RenderResult<()> {
        log::trace!("update polyline {layer}: {} points", points.len());
        self.inner.update_polyline(layer, points)
    }

    fn draw_marker(
        &mut self,
        at:      GeoPoint,
        style:   &MarkerStyle,
        opacity: f32,
    ) -> RenderResult<LayerId> {
        self.draws += 1;
        self.inner.draw_marker(at, style, opacity)
    }

    fn set_marker_opacity(
        &mut self,
        layer:        LayerId,
        opacity:      f32,
        fill_opacity: f32,
    ) -> RenderResult<()> {
        self.inner.set_marker_opacity(layer, opacity, fill_opacity)
    }

    fn remove(&mut self, layer: LayerId) -> RenderResult<()> {
        self.inner.remove(layer)
    }

    fn edge_completed(&mut self, index: usize) {
        log::debug!("edge {index} complete");
        self.inner.edge_completed(index);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => VizConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => VizConfig::default(),
    };
    let cities = load_cities(&args)?;
    log::info!("{} cities, algorithm {}", cities.len(), args.algorithm);

    let mut session = VizSession::new(config)?;
    let mut renderer = LogRenderer { inner: RecordingRenderer::new(), draws: 0 };
    let worker = ComputeWorker::spawn()?;

    // 1. Compute off-thread.
    let started = Instant::now();
    session.set_algorithm(args.algorithm, &mut renderer);
    worker.submit(session.load_cities(cities, &mut renderer))?;
    let Some(response) = worker.recv_timeout(COMPUTE_TIMEOUT)? else {
        bail!("no compute response within {COMPUTE_TIMEOUT:?}");
    };
    if !session.apply_response(response, &mut renderer) {
        bail!("worker answered a superseded request");
    }
    let compute_ms = started.elapsed().as_secs_f64() * 1000.0;
    session.set_zoom(args.zoom, &mut renderer);

    // 2. Animate.
    if let Some(slider) = args.speed {
        session.set_speed_slider(slider);
    }
    if let Some(factor) = args.growth {
        session.set_growth_factor(factor);
    }
    session.start(0.0, &mut renderer);
    let frames = FrameDriver::new(FixedClock::new(FRAME_MS))
        .with_max_frames(MAX_FRAMES)
        .run(|now| match session.tick(now, &mut renderer) {
            SchedulerState::Running => ControlFlow::Continue(()),
            _ => ControlFlow::Break(()),
        });

    // 3. Summary.
    let scheduler = session.scheduler();
    let summary = serde_json::json!({
        "cities":           session.cities().len(),
        "algorithm":        session.algorithm().as_str(),
        "edges":            session.mst().len(),
        "totalKm":          session.mst_total_km(),
        "computeMs":        compute_ms,
        "frames":           frames,
        "animatedMs":       frames as f64 * FRAME_MS,
        "completedEdges":   scheduler.completed_edges(),
        "candidatePairs":   session.candidates().drawn_pairs(),
        "cachedGeodesics":  session.cache().len(),
        "drawCalls":        renderer.draws,
        "liveLayers":       renderer.inner.live_layers(),
        "renderFailures":   scheduler.render_failures() + session.candidates().render_failures(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
