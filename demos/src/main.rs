// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless line-segment demo.
//!
//! Loads (or generates) a delta-encoded track dataset, mounts an
//! [`InteractiveSurface`] on a fixed-size virtual surface, and drives it the
//! way a host event loop would: frames until the first pass completes, a few
//! wheel zooms that interrupt running passes, and an optional hover hit-test.
//! Drawing goes to a [`RecordingPainter`], so the run reports what would have
//! been painted.
//!
//! Set `RUST_LOG=debug` to see pass and index lifecycle events.

mod dataset;

use std::fs::File;
use std::io::BufReader;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use kurbo::{Point, Size};
use understory_painter::RecordingPainter;
use understory_size_observer::MeasureSurface;
use understory_surface::{BatchPolicy, InteractiveSurface, PassState, SurfaceConfig};

use crate::dataset::Dataset;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Delta-encoded JSON dataset. A synthetic one is generated when omitted.
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Synthetic dataset: number of tracks.
    #[arg(long, default_value_t = 200)]
    tracks: usize,

    /// Synthetic dataset: segments per track.
    #[arg(long, default_value_t = 50)]
    per_track: usize,

    /// Synthetic dataset: random seed.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Virtual surface width.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Virtual surface height.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// JSON surface configuration. Overrides the batch options below.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Segments per batch.
    #[arg(long, default_value_t = 1000)]
    batch_size: usize,

    /// Use time-boxed batches of this many milliseconds instead of fixed-size ones.
    #[arg(long)]
    time_box_ms: Option<u64>,

    /// Wheel zoom steps to simulate after the first pass.
    #[arg(long, default_value_t = 3)]
    zoom_steps: u32,

    /// Pointer position to hit-test at the end, as `x,y` in surface pixels.
    #[arg(long, value_parser = parse_point)]
    hover: Option<Point>,
}

impl Args {
    fn surface_config(&self) -> anyhow::Result<SurfaceConfig> {
        if let Some(path) = &self.config {
            let file =
                File::open(path).with_context(|| format!("opening config {}", path.display()))?;
            return serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing config {}", path.display()));
        }
        let batch_policy = match self.time_box_ms {
            Some(ms) => BatchPolicy::TimeBoxed(Duration::from_millis(ms)),
            None => BatchPolicy::FixedSize(
                NonZeroUsize::new(self.batch_size).context("--batch-size must be at least 1")?,
            ),
        };
        Ok(SurfaceConfig {
            batch_policy,
            ..SurfaceConfig::default()
        })
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate `{v}`: {e}"))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}

/// What one render pass painted.
#[derive(Debug)]
struct PassReport {
    state: PassState,
    frames: usize,
    strokes: usize,
    elapsed: Duration,
}

impl PassReport {
    fn log(&self, label: &str) {
        log::info!(
            "{label}: {:?} after {} frames, {} strokes in {:.1?}",
            self.state,
            self.frames,
            self.strokes,
            self.elapsed
        );
    }
}

/// Runs frames until the current pass stops running.
fn run_pass<M: MeasureSurface>(
    surface: &mut InteractiveSurface<M>,
    layer: &mut RecordingPainter,
) -> PassReport {
    layer.clear_ops();
    let began = Instant::now();
    let mut frames = 0;
    let state = loop {
        let state = surface.frame(layer);
        frames += 1;
        if state != PassState::Running {
            break state;
        }
    };
    PassReport {
        state,
        frames,
        strokes: layer.stroke_count(),
        elapsed: began.elapsed(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let data = match &args.dataset {
        Some(path) => Dataset::load(path)?,
        None => Dataset::synthetic(args.tracks, args.per_track, args.seed),
    };
    let segments = data.segments().context("decoding dataset")?;
    log::info!("decoded {} segments", segments.len());

    let config = args.surface_config()?;
    log::info!("batch policy: {:?}", config.batch_policy);
    let size = Size::new(args.width, args.height);
    let mut surface = InteractiveSurface::new(move || Some(size), data.domain(), config)
        .context("invalid surface configuration")?;
    surface.set_color_ramp(data.color_ramp());
    surface.set_segments(segments);
    surface.mount();

    let mut layer = RecordingPainter::default();
    run_pass(&mut surface, &mut layer).log("initial pass");

    // Each zoom lands after a single frame, so it supersedes a running pass.
    let center = Point::new(args.width * 0.5, args.height * 0.5);
    for step in 0..args.zoom_steps {
        let transform = surface
            .wheel(center, -120.0)
            .with_context(|| format!("zoom step {step} rejected"))?;
        let state = surface.frame(&mut layer);
        log::info!("zoom step {step}: scale {:.3}, pass {state:?}", transform.scale);
    }
    run_pass(&mut surface, &mut layer).log("final pass");
    log::info!("{} passes started", surface.renderer().passes_started());

    if let Some(pointer) = args.hover {
        let hits = surface
            .pointer_move(pointer)
            .map(<[usize]>::to_vec)
            .unwrap_or_default();
        let mut overlay = RecordingPainter::default();
        surface.draw_overlay(&mut overlay);
        log::info!(
            "{} segments near ({}, {}); overlay strokes: {}",
            hits.len(),
            pointer.x,
            pointer.y,
            overlay.stroke_count()
        );
        for &key in hits.iter().take(10) {
            let seg = surface.segments()[key];
            log::info!("  #{key}: {:?} -> {:?}, value {:.2}", seg.p1, seg.p2, seg.value);
        }
    }

    Ok(())
}
