//! Named constants for a run. Set once at startup; `rest_rho` is replaced by calibration, and the
//! gate flags may be toggled between steps.

use std::path::Path;

use bincode::{Decode, Encode};

use crate::{
    boundary::Gate,
    error::{Error, Result},
    kernel::KernelKind,
    util,
};

#[derive(Clone, Debug, PartialEq, Encode, Decode)]
pub struct Config {
    /// Smoothing radius; the kernels' support.
    pub h: f64,
    /// Fixed timestep.
    pub dt: f64,
    /// Walls start pushing when a particle is closer than this.
    pub rest_dist: f64,
    pub rest_pressure: f64,
    pub gas_const: f64,
    pub mu_visc: f64,
    /// Magnitude; applied along -y.
    pub gravity: f64,
    pub rest_rho: f64,
    /// Used by the layout generators.
    pub particle_mass: f64,
    pub x_size: f64,
    pub y_size: f64,
    /// Margin between the raw domain edge and the outer wall, along x.
    pub bound_x: f64,
    pub bound_y: f64,
    pub kernel: KernelKind,
    pub gate: Option<Gate>,
    pub num_timesteps: usize,
    /// Take a snapshot every this many steps. 0 disables snapshots.
    pub snapshot_ratio: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            h: 50.,
            dt: 0.1,
            rest_dist: 1.5,
            rest_pressure: 0.,
            gas_const: 1.,
            mu_visc: 0.05,
            gravity: 5.,
            rest_rho: 1.,
            particle_mass: 1.,
            x_size: 640.,
            y_size: 480.,
            bound_x: 0.,
            bound_y: 0.,
            kernel: KernelKind::default(),
            gate: None,
            num_timesteps: 1_000,
            snapshot_ratio: 1,
        }
    }
}

fn check_positive(val: f64, name: &str) -> Result<()> {
    if !val.is_finite() || val <= 0. {
        return Err(Error::InvalidConfig(format!("{name} must be finite and > 0; got {val}")));
    }
    Ok(())
}

fn check_finite(val: f64, name: &str) -> Result<()> {
    if !val.is_finite() {
        return Err(Error::InvalidConfig(format!("{name} must be finite; got {val}")));
    }
    Ok(())
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        util::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        util::save(path, self)
    }

    /// Returns a copy with a new rest density, e.g. from calibration.
    pub fn with_rest_rho(&self, rest_rho: f64) -> Self {
        Self {
            rest_rho,
            ..self.clone()
        }
    }

    /// Left and right outer wall positions.
    pub fn wall_x(&self) -> (f64, f64) {
        (self.bound_x, self.x_size - self.bound_x)
    }

    /// Floor and ceiling outer wall positions.
    pub fn wall_y(&self) -> (f64, f64) {
        (self.bound_y, self.y_size - self.bound_y)
    }

    pub fn validate(&self) -> Result<()> {
        check_positive(self.h, "smoothing radius h")?;
        check_positive(self.dt, "timestep dt")?;
        check_positive(self.rest_dist, "rest_dist")?;
        check_positive(self.particle_mass, "particle_mass")?;
        check_positive(self.x_size, "x_size")?;
        check_positive(self.y_size, "y_size")?;

        check_finite(self.rest_pressure, "rest_pressure")?;
        check_finite(self.gas_const, "gas_const")?;
        check_finite(self.mu_visc, "mu_visc")?;
        check_finite(self.gravity, "gravity")?;
        check_finite(self.rest_rho, "rest_rho")?;

        let (x0, x1) = self.wall_x();
        let (y0, y1) = self.wall_y();
        if !(self.bound_x >= 0. && self.bound_y >= 0. && x0 < x1 && y0 < y1) {
            return Err(Error::InvalidConfig(format!(
                "bounds ({}, {}) leave no room in a {} x {} domain",
                self.bound_x, self.bound_y, self.x_size, self.y_size
            )));
        }

        if let Some(gate) = &self.gate {
            gate.validate(self)?;
        }

        Ok(())
    }
}
