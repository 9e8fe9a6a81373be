//! A 2D Smoothed Particle Hydrodynamics (SPH) fluid engine.
//!
//! Each step is a pure transition from one generation of particles to the next: kernel-weighted
//! density, pressure gradient and viscosity are summed over every pair within the smoothing radius,
//! gravity and wall springs are added, and the result is integrated with a fixed timestep.
//!
//! ```ignore
//! let cfg = Config::default();
//! let particles = particle_creation::make_water_fall(&mut rand::rng(), 400, &cfg)?;
//! let cfg = calibrate(&particles, &cfg)?;
//! let next = advance(&particles, &cfg)?;
//! ```

pub mod accel;
pub mod boundary;
pub mod config;
pub mod error;
pub mod integrate;
pub mod kernel;
pub mod particle;
pub mod particle_creation;
pub mod playback;
pub mod properties;
pub mod sim;
pub mod step;
mod util;

pub use boundary::{Gate, GateAnchor, GateSegment};
pub use config::Config;
pub use error::{Error, Result};
pub use kernel::{KernelKind, SmoothingKernel};
pub use particle::Particle;
pub use sim::State;
pub use step::{advance, calibrate};
