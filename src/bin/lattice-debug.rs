// src/bin/lattice-debug.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec2;
use tracing::info;

use lattice_core::Metrics;
use lattice_layout::ReflowEngine;
use lattice_render::{FrameDriver, RecordingCanvas};
use lattice_ui::{load_scene, report};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Indented widget tree with border boxes
    Tree,
    /// Widget tree with every box as JSON
    Json,
    /// Paint commands of the first frame
    Commands,
}

#[derive(Parser)]
#[command(name = "lattice-debug")]
#[command(about = "Lay out a JSON scene and dump the result")]
struct Args {
    /// Path to the scene file
    scene: PathBuf,

    /// Viewport width. Overrides the value in the scene file.
    #[arg(long)]
    width: Option<f32>,

    /// Viewport height. Overrides the value in the scene file.
    #[arg(long)]
    height: Option<f32>,

    /// Screen DPI used for pt lengths. Overrides the value in the scene file.
    #[arg(long)]
    dpi: Option<f32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "tree")]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    if !Path::new(&args.scene).exists() {
        anyhow::bail!("Scene file not found: {}", args.scene.display());
    }

    info!("Loading scene: {}", args.scene.display());
    let mut scene = load_scene(&args.scene).context("Failed to load scene")?;
    for warning in &scene.warnings {
        info!("Style ignored: {}", warning);
    }

    let metrics = match args.dpi.or(scene.dpi) {
        Some(dpi) => Metrics::with_dpi(dpi),
        None => Metrics::default(),
    };
    let mut viewport = scene.viewport.unwrap_or(Vec2::new(800.0, 600.0));
    if let Some(width) = args.width {
        viewport.x = width;
    }
    if let Some(height) = args.height {
        viewport.y = height;
    }

    let resources = std::mem::take(&mut scene.resources);
    let engine = ReflowEngine::new(metrics)
        .with_resources(resources)
        .with_debug(args.debug);
    let mut driver = FrameDriver::new(RecordingCanvas::new(viewport), engine).with_debug(args.debug);
    let stats = driver
        .render_frame(&mut scene.tree)
        .context("Failed to render frame")?;
    info!(
        "Laid out {} widgets, {} paint commands",
        stats.reflow.resolved, stats.commands
    );

    let output = match args.format {
        OutputFormat::Tree => report::tree_text(&scene.tree),
        OutputFormat::Json => report::tree_json(&scene.tree).context("Failed to serialize tree")?,
        OutputFormat::Commands => driver
            .canvas()
            .last_frame()
            .map(|frame| report::commands_text(&frame.commands))
            .unwrap_or_default(),
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Output written to {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}
