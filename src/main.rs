use clap::Parser;
use lbm_d2q9::{config::Config, scene, snapshot::Snapshot, NoForcing, Physics};
use std::{
    path::PathBuf,
    process::ExitCode,
    time::{Duration, Instant},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Headless D2Q9 lattice Boltzmann run
#[derive(Parser)]
#[command(name = "lbm-d2q9")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file; built-in defaults otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of steps to run
    #[arg(short, long)]
    steps: Option<usize>,

    /// Write the final density and velocity fields here as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

struct Sim {
    config: Config,
    physics: Physics,
    log: LogState,
}
struct LogState {
    interval: Duration,
    last_logged_instant: Instant,
    exponential_moving_average_physics_time: f64,
}

impl Sim {
    fn new(config: Config) -> lbm_d2q9::Result<Self> {
        let dims = config.physics.dims()?;
        let params = config.physics.params()?;
        let mut physics = match config.physics.forcing() {
            Some(source) => Physics::new(dims, params, source)?,
            None => Physics::new(dims, params, NoForcing)?,
        };
        physics.set_boundary(scene::build_mask(&config, dims));
        let interval = config.log_interval()?;
        Ok(Self {
            config,
            physics,
            log: LogState {
                interval,
                last_logged_instant: Instant::now(),
                exponential_moving_average_physics_time: 0.0,
            },
        })
    }
    fn time(&self) -> f32 {
        self.config.physics.time_at(self.physics.ticks_elapsed())
    }
    fn step(&mut self) {
        const C: f64 = 0.90;
        let instant_pre_physics = Instant::now();
        self.physics.step(self.time());
        let physics_time = instant_pre_physics.elapsed().as_secs_f64();
        let ema = &mut self.log.exponential_moving_average_physics_time;
        *ema = if self.physics.ticks_elapsed() == 1 {
            physics_time
        } else {
            C * *ema + (1.0 - C) * physics_time
        };
    }
    /// Million lattice updates per second, once at least one step is timed.
    fn mlups(&self) -> Option<f64> {
        let physics_time = self.log.exponential_moving_average_physics_time;
        if self.physics.ticks_elapsed() == 0 || physics_time <= 0.0 {
            return None;
        }
        Some(self.physics.dims().cells() as f64 / (1e6 * physics_time))
    }
    fn maybe_print_log(&mut self, force: bool) {
        let now = Instant::now();
        if !force && now.duration_since(self.log.last_logged_instant) <= self.log.interval {
            return;
        }
        // nothing timed yet
        let Some(mlups) = self.mlups() else {
            return;
        };
        let physics_time = self.log.exponential_moving_average_physics_time;
        info!(
            mass = %format!("{:.4e}", self.physics.total_mass()),
            tick = self.physics.ticks_elapsed(),
            max_speed = self.physics.max_speed(),
            physics_ms = %format!("{:.2}", 1e3 * physics_time),
            mlups = %format!("{:.0}", mlups),
            "status"
        );
        self.log.last_logged_instant = now;
    }
}

fn run(cli: Cli) -> lbm_d2q9::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(steps) = cli.steps {
        config.run.steps = steps;
    }

    let mut sim = Sim::new(config)?;
    let dims = sim.physics.dims();
    let params = sim.physics.params();
    info!(
        cols = dims.cols,
        rows = dims.rows,
        lattice_speed = params.lattice_speed,
        relaxation_time = params.relaxation_time,
        solid_cells = sim.physics.boundary().solid_count(),
        steps = sim.config.run.steps,
        "starting simulation"
    );

    for _ in 0..sim.config.run.steps {
        sim.step();
        sim.maybe_print_log(false);
    }
    sim.maybe_print_log(true);

    if let Some(path) = &cli.output {
        // Refresh the fields so they describe the final lattice
        let t = sim.time();
        sim.physics.compute_macroscopic(t);
        Snapshot::capture(&sim.physics, t).write(path)?;
        info!(path = %path.display(), "wrote snapshot");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_sim() -> Sim {
        let config = Config::from_json(r#"{ "physics": { "grid_cols": 8, "grid_rows": 8 } }"#)
            .unwrap();
        Sim::new(config).unwrap()
    }

    #[test]
    fn no_throughput_before_first_step() {
        let mut sim = small_sim();
        assert_eq!(sim.mlups(), None);
        sim.maybe_print_log(true);
    }

    #[test]
    fn throughput_is_finite_after_a_step() {
        let mut sim = small_sim();
        sim.step();
        let mlups = sim.mlups().unwrap();
        assert!(mlups.is_finite() && mlups > 0.0);
    }
}
