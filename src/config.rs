use crate::{
    error::{Error, Result},
    physics::{lattice::LatticeDims, macroscopic::OscillatingSource, Params},
};
use cgmath::Vector2;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub run: RunConfig,
    pub physics: PhysicsConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub steps: usize,
    /// seconds of wall time between status lines
    pub log_interval_secs: f64,
    /// random circular obstacles dropped into the domain
    pub scattered_obstacles: usize,
    pub seed: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    pub grid_cols: usize,
    pub grid_rows: usize,
    pub cell_size: f32, // dx
    pub time_step: f32, // dt
    pub relaxation_time: f32,
    pub forcing: Option<ForcingConfig>,
    pub obstacle: Option<ObstacleConfig>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForcingConfig {
    /// cell coordinates
    pub source: [f32; 2],
    pub strength: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObstacleConfig {
    /// cell coordinates
    pub center: [f32; 2],
    pub radius: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: 1000,
            log_interval_secs: 1.0,
            scattered_obstacles: 0,
            seed: 0,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            grid_cols: 400,
            grid_rows: 400,
            cell_size: 1.0 / 60.0,
            time_step: 1.0 / 60.0,
            relaxation_time: 0.8,
            forcing: Some(ForcingConfig {
                source: [200.0, 200.0],
                strength: 1.3,
            }),
            obstacle: None,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.physics.dims()?;
        self.physics.params()?;
        self.log_interval()?;
        if let Some(obstacle) = self.physics.obstacle {
            if !(obstacle.radius > 0.0) {
                return Err(Error::invalid_config(format!(
                    "obstacle radius must be positive, got {}",
                    obstacle.radius
                )));
            }
        }
        Ok(())
    }

    /// Wall time between status lines. Fails for negative, non-finite or
    /// out-of-range seconds.
    pub fn log_interval(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.run.log_interval_secs).map_err(|_| {
            Error::invalid_config(format!(
                "log interval must be a non-negative number of seconds, got {}",
                self.run.log_interval_secs
            ))
        })
    }
}

impl PhysicsConfig {
    pub fn dims(&self) -> Result<LatticeDims> {
        LatticeDims::new(self.grid_cols, self.grid_rows)
    }

    /// Solver constants, with the lattice speed derived as `dx / dt`.
    pub fn params(&self) -> Result<Params> {
        if !(self.cell_size > 0.0) || !(self.time_step > 0.0) {
            return Err(Error::invalid_config(format!(
                "cell size and time step must be positive, got dx = {}, dt = {}",
                self.cell_size, self.time_step
            )));
        }
        Params::new(self.cell_size / self.time_step, self.relaxation_time)
    }

    pub fn forcing(&self) -> Option<OscillatingSource> {
        self.forcing.map(|f| OscillatingSource {
            source: Vector2::new(f.source[0], f.source[1]),
            strength: f.strength,
        })
    }

    /// Simulation time after `ticks` steps.
    pub fn time_at(&self, ticks: usize) -> f32 {
        ticks as f32 * self.time_step
    }
}
