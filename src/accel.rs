//! The per-subject SPH sweep: density, pressure gradient, viscosity and external forces, from
//! every other particle in the generation. Brute-force all-pairs; each subject reads only the
//! frozen input slice.

use lin_alg::f64::Vec3;

use crate::{
    boundary::wall_force,
    config::Config,
    error::{Error, Result},
    kernel::SmoothingKernel,
    particle::Particle,
};

/// Sums for one subject, from one sweep over its neighbours.
#[derive(Clone, Copy, Debug)]
pub struct Accumulated {
    /// Freshly accumulated density, seeded with `rest_rho`.
    pub density: f64,
    /// Pressure-gradient sum. Enters the acceleration negated.
    pub press_grad: Vec3,
    /// Viscosity sum, before scaling by `mu_visc`.
    pub visc: Vec3,
}

/// Sweep every other particle in `particles` against the subject at `id_subj`.
///
/// Pressures come from the neighbours' stored (previous-generation) densities, not from the
/// density accumulated here.
pub fn accumulate<K: SmoothingKernel>(
    id_subj: usize,
    particles: &[Particle],
    kernel: &K,
    cfg: &Config,
) -> Accumulated {
    let subj = &particles[id_subj];
    let subj_pressure = subj.pressure(cfg);
    let h_sq = cfg.h * cfg.h;

    let mut density = cfg.rest_rho;
    let mut press_grad = Vec3::new_zero();
    let mut visc = Vec3::new_zero();

    for (i, n) in particles.iter().enumerate() {
        if i == id_subj {
            continue; // self-interaction.
        }

        let diff = subj.posit - n.posit;
        let dist_sq = diff.x.powi(2) + diff.y.powi(2);
        if dist_sq >= h_sq {
            continue;
        }

        density += n.mass * kernel.weight(dist_sq, cfg.h);

        let n_pressure = n.pressure(cfg);
        let grad = kernel.gradient(diff, dist_sq, cfg.h);
        press_grad = press_grad + grad * (n.mass * (subj_pressure + n_pressure) / (2. * n.density));

        let lap = kernel.laplacian(dist_sq, cfg.h);
        visc = visc + (n.vel - subj.vel) * (n.mass / n.density * lap);
    }

    Accumulated {
        density,
        press_grad,
        visc,
    }
}

/// Acceleration on the subject at `id_subj`: `(-∇p + μ visc + f_ext) / ρ`, where `f_ext` is
/// gravity plus wall forces. Also returns the sums it was built from.
pub fn acc_sph<K: SmoothingKernel>(
    id_subj: usize,
    particles: &[Particle],
    kernel: &K,
    cfg: &Config,
) -> Result<(Vec3, Accumulated)> {
    let sums = accumulate(id_subj, particles, kernel, cfg);

    if !sums.density.is_finite() || sums.density <= 0. {
        return Err(Error::NonPositiveDensity {
            index: id_subj,
            density: sums.density,
        });
    }

    let walls = wall_force(&particles[id_subj], cfg);
    let ext = Vec3::new(walls.x, -cfg.gravity + walls.y, 0.);

    let force = ext + sums.visc * cfg.mu_visc - sums.press_grad;
    Ok((force * (1. / sums.density), sums))
}
