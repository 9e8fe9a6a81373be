//! Initial particle layouts. These only place particles; the engine doesn't care how a generation
//! was made.

use lin_alg::f64::Vec3;
use rand::Rng;

use crate::{
    config::Config,
    error::{Error, Result},
    particle::Particle,
};

/// A rectangular lattice of `nx` x `ny` particles at rest, starting at `origin`.
pub fn make_grid(
    origin: Vec3,
    nx: usize,
    ny: usize,
    spacing: f64,
    mass: f64,
) -> Result<Vec<Particle>> {
    if !spacing.is_finite() || spacing <= 0. {
        return Err(Error::InvalidConfig(format!("grid spacing must be > 0; got {spacing}")));
    }

    let mut result = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let x = origin.x + i as f64 * spacing;
            let y = origin.y + j as f64 * spacing;
            let posit = Vec3::new(x, y, 0.);
            result.push(Particle::new(posit, Vec3::new_zero(), mass)?);
        }
    }
    Ok(result)
}

/// Particles scattered across the whole domain, as falling rain.
pub fn make_rain<R: Rng>(rng: &mut R, count: usize, cfg: &Config) -> Result<Vec<Particle>> {
    let mut result = Vec::with_capacity(count);

    for i in 0..count {
        let x = (rng.random_range(0..=50u32) as f64 * i as f64) % cfg.x_size;
        let y = (rng.random_range(0..=30u32) as f64 * i as f64) % cfg.y_size;
        result.push(Particle::new(Vec3::new(x, y, 0.), Vec3::new_zero(), cfg.particle_mass)?);
    }
    Ok(result)
}

/// Particles stacked in a column over the right quarter of the domain.
pub fn make_water_fall<R: Rng>(rng: &mut R, count: usize, cfg: &Config) -> Result<Vec<Particle>> {
    let width = cfg.x_size / 4.;
    let mut result = Vec::with_capacity(count);

    for i in 0..count {
        let x = (cfg.x_size - width) + rng.random_range(0. ..width);
        let y = (rng.random_range(0..=30u32) as f64 * i as f64) % cfg.y_size;
        result.push(Particle::new(Vec3::new(x, y, 0.), Vec3::new_zero(), cfg.particle_mass)?);
    }
    Ok(result)
}

/// A block of water held back behind the gate's left segment, filling up to the gate's span.
pub fn make_dam(spacing: f64, cfg: &Config) -> Result<Vec<Particle>> {
    let Some(gate) = &cfg.gate else {
        return Err(Error::InvalidGate("a dam layout needs a gate".into()));
    };
    if !spacing.is_finite() || spacing <= 0. {
        return Err(Error::InvalidConfig(format!("dam spacing must be > 0; got {spacing}")));
    }

    let (x0, _) = cfg.wall_x();
    let seg = gate.segments[0];

    let left = x0 + cfg.rest_dist;
    let right = seg.x - cfg.rest_dist;
    let bottom = seg.y_min + cfg.rest_dist;
    let top = seg.y_max - cfg.rest_dist;

    if right < left || top < bottom {
        return Err(Error::InvalidGate(format!(
            "no room for a dam behind the gate: x {left}..{right}, y {bottom}..{top}"
        )));
    }

    let nx = ((right - left) / spacing).floor().max(0.) as usize + 1;
    let ny = ((top - bottom) / spacing).floor().max(0.) as usize + 1;

    make_grid(Vec3::new(left, bottom, 0.), nx, ny, spacing, cfg.particle_mass)
}

/// `count` particles packed against the right wall and floor, row by row, with a small jitter.
pub fn make_pool<R: Rng>(
    rng: &mut R,
    count: usize,
    spacing: f64,
    cfg: &Config,
) -> Result<Vec<Particle>> {
    if !spacing.is_finite() || spacing <= 0. {
        return Err(Error::InvalidConfig(format!("pool spacing must be > 0; got {spacing}")));
    }

    let (x0, x1) = cfg.wall_x();
    let (y0, _) = cfg.wall_y();
    let right = x1 - cfg.rest_dist;
    let per_row = (((right - x0) / 2.) / spacing).floor().max(1.) as usize;
    let jitter = spacing * 0.1;

    let mut result = Vec::with_capacity(count);
    for i in 0..count {
        let col = i % per_row;
        let row = i / per_row;
        let x = right - col as f64 * spacing + rng.random_range(-jitter..jitter);
        let y = y0 + cfg.rest_dist + row as f64 * spacing + rng.random_range(-jitter..jitter);
        result.push(Particle::new(Vec3::new(x, y, 0.), Vec3::new_zero(), cfg.particle_mass)?);
    }
    Ok(result)
}
