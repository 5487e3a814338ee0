//! Reach planar arm demo CLI.
//!
//! Provides three modes of operation:
//! - `window`: interactive demo, the arm follows the mouse cursor
//! - `headless`: sweep the target around a circle and print solve statistics
//! - `info`: print the loaded configuration and the initial chain

use std::path::{Path, PathBuf};
use std::process;

use bevy::prelude::*;
use clap::{Parser, Subcommand};
use nalgebra::{Point2, Vector2};
use tracing_subscriber::EnvFilter;

use reach_core::prelude::*;
use reach_ik::{ArmChain, Chain, LastSolve, ReachIkPlugin, SolveReport};
use reach_viz::{ReachVizPlugin, window_plugin};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// FABRIK inverse kinematics for a planar arm.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a window; the arm reaches for the mouse cursor.
    Window,

    /// Sweep the target around the root without a window and print statistics.
    Headless {
        /// Number of frames to run.
        #[arg(short = 'n', long, default_value_t = 360)]
        frames: u32,

        /// Sweep radius in world units. Defaults to 60% of the arm's reach.
        #[arg(short, long)]
        radius: Option<f32>,
    },

    /// Print the configuration and the initial chain.
    Info,
}

// ---------------------------------------------------------------------------
// Headless sweep
// ---------------------------------------------------------------------------

/// Circular target path about the arm root, one full turn over `frames`.
#[derive(Resource, Debug, Clone, Copy)]
struct Sweep {
    center: Point2<f32>,
    radius: f32,
    frames: u32,
    frame: u32,
}

impl Sweep {
    #[allow(clippy::cast_precision_loss)]
    fn target(&self) -> Point2<f32> {
        let theta = self.frame as f32 / self.frames.max(1) as f32 * std::f32::consts::TAU;
        self.center + Vector2::new(theta.cos(), theta.sin()) * self.radius
    }
}

#[allow(clippy::needless_pass_by_value)]
fn sweep_target_system(mut sweep: ResMut<Sweep>, mut arm: ResMut<ArmChain>) {
    arm.set_target(sweep.target());
    sweep.frame += 1;
}

/// Running totals over per-frame solve reports.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct SweepStats {
    frames: u32,
    converged: u32,
    total_iterations: u64,
    max_iterations: u32,
    total_residual: f64,
    max_residual: f32,
}

impl SweepStats {
    fn record(&mut self, report: &SolveReport) {
        self.frames += 1;
        if report.converged {
            self.converged += 1;
        }
        self.total_iterations += u64::from(report.iterations);
        self.max_iterations = self.max_iterations.max(report.iterations);
        self.total_residual += f64::from(report.residual);
        self.max_residual = self.max_residual.max(report.residual);
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean_iterations(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.total_iterations as f64 / f64::from(self.frames)
    }

    fn mean_residual(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.total_residual / f64::from(self.frames)
    }
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn load_config(path: Option<&Path>) -> Result<ReachConfig, ReachError> {
    let config = match path {
        Some(path) => ReachConfig::from_file(path)?,
        None => ReachConfig::default(),
    };
    Ok(config)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run_window(config: ReachConfig) -> Result<(), ReachError> {
    let arm = ArmChain::from_config(&config.arm)?;

    App::new()
        .add_plugins(DefaultPlugins.set(window_plugin(&config.view)))
        .insert_resource(config.solver)
        .insert_resource(config.view)
        .insert_resource(arm)
        .add_plugins((ReachCorePlugin, ReachIkPlugin, ReachVizPlugin))
        .run();
    Ok(())
}

fn run_headless(config: &ReachConfig, frames: u32, radius: Option<f32>) -> Result<(), ReachError> {
    let arm = ArmChain::from_config(&config.arm)?;
    let radius = radius.unwrap_or_else(|| 0.6 * arm.chain().total_length());
    if !radius.is_finite() || radius < 0.0 {
        return Err(ConfigError::InvalidValue {
            field: "radius".into(),
            message: format!("must be finite and non-negative, got {radius}"),
        }
        .into());
    }

    let mut app = App::new();
    app.add_plugins((ReachCorePlugin, ReachIkPlugin));
    app.insert_resource(config.solver.clone());
    app.insert_resource(Sweep {
        center: arm.chain().root(),
        radius,
        frames,
        frame: 0,
    });
    app.insert_resource(arm);
    app.add_systems(Update, sweep_target_system.in_set(ReachSet::Input));
    app.finish();
    app.cleanup();

    tracing::info!(frames, radius, "starting headless sweep");

    let mut stats = SweepStats::default();
    for _ in 0..frames {
        app.update();
        if let Some(report) = app.world().resource::<LastSolve>().0 {
            stats.record(&report);
        }
    }

    println!("frames:     {}", stats.frames);
    println!("converged:  {}/{}", stats.converged, stats.frames);
    println!(
        "iterations: mean={:.2}, max={}",
        stats.mean_iterations(),
        stats.max_iterations
    );
    println!(
        "residual:   mean={:.5}, max={:.5}",
        stats.mean_residual(),
        stats.max_residual
    );
    Ok(())
}

fn run_info(config: &ReachConfig) -> Result<(), ReachError> {
    let chain = Chain::from_config(&config.arm)?;
    let ee = chain.end_effector();

    println!("reach v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("{config:#?}");
    println!();
    println!("segments:     {}", chain.segment_count());
    println!("total length: {:.4}", chain.total_length());
    println!("end effector: ({:.4}, {:.4})", ee.x, ee.y);
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Headless { frames, radius }) => {
            init_tracing();
            run_headless(&config, frames, radius)
        }
        Some(Commands::Info) => {
            init_tracing();
            run_info(&config)
        }
        Some(Commands::Window) | None => run_window(config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
