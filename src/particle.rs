use lin_alg::f64::Vec3;

use crate::{
    config::Config,
    error::{Error, Result},
};

/// One fluid particle in a generation. Particles are never mutated by the engine; each step
/// produces new ones. Identity across generations is the index in the particle list.
///
/// Vectors are `Vec3` with `z` held at 0; the motion is 2D.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub posit: Vec3,
    pub vel: Vec3,
    pub mass: f64,
    /// ρ. Must stay > 0.
    pub density: f64,
    /// The unnormalised pressure-gradient sum from the step that produced this particle.
    /// Kept for drawing pressure vectors only; not fed back into the physics.
    pub press_grad: Vec3,
}

impl Particle {
    /// A particle at rest density 1, with no pressure-gradient history.
    pub fn new(posit: Vec3, vel: Vec3, mass: f64) -> Result<Self> {
        if !mass.is_finite() || mass <= 0. {
            return Err(Error::InvalidConfig("particle mass must be finite and > 0".into()));
        }
        if !(posit.x.is_finite() && posit.y.is_finite()) {
            return Err(Error::InvalidConfig("particle position must be finite".into()));
        }
        if !(vel.x.is_finite() && vel.y.is_finite()) {
            return Err(Error::InvalidConfig("particle velocity must be finite".into()));
        }

        Ok(Self {
            posit,
            vel,
            mass,
            density: 1.,
            press_grad: Vec3::new_zero(),
        })
    }

    /// Equation of state: `p = p_0 + k (ρ - ρ_0)`. Computed on demand from stored density.
    pub fn pressure(&self, cfg: &Config) -> f64 {
        cfg.rest_pressure + cfg.gas_const * (self.density - cfg.rest_rho)
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * (self.vel.x.powi(2) + self.vel.y.powi(2))
    }
}
