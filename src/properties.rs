//! Aggregate properties of a generation, for diagnostics and calibration.

use lin_alg::f64::Vec3;

use crate::particle::Particle;

/// Mean density. 0 for an empty set.
pub fn mean_density(particles: &[Particle]) -> f64 {
    if particles.is_empty() {
        return 0.;
    }
    particles.iter().map(|p| p.density).sum::<f64>() / particles.len() as f64
}

pub fn kinetic_energy(particles: &[Particle]) -> f64 {
    particles.iter().map(|p| p.kinetic_energy()).sum()
}

pub fn max_speed(particles: &[Particle]) -> f64 {
    let mut result = 0.;
    for p in particles {
        let v = (p.vel.x.powi(2) + p.vel.y.powi(2)).sqrt();
        if v > result {
            result = v;
        }
    }
    result
}

/// Mass-weighted centre. `None` for an empty set.
pub fn center_of_mass(particles: &[Particle]) -> Option<Vec3> {
    let mass_total: f64 = particles.iter().map(|p| p.mass).sum();
    if particles.is_empty() || mass_total <= 0. {
        return None;
    }

    let mut sum = Vec3::new_zero();
    for p in particles {
        sum = sum + p.posit * p.mass;
    }
    Some(sum * (1. / mass_total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(x: f64, y: f64, vx: f64, vy: f64, density: f64) -> Particle {
        Particle {
            posit: Vec3::new(x, y, 0.),
            vel: Vec3::new(vx, vy, 0.),
            mass: 1.,
            density,
            press_grad: Vec3::new_zero(),
        }
    }

    #[test]
    fn mean_density_averages() {
        let ps = [particle(0., 0., 0., 0., 1.), particle(0., 0., 0., 0., 3.)];
        assert_eq!(mean_density(&ps), 2.);
        assert_eq!(mean_density(&[]), 0.);
    }

    #[test]
    fn speed_and_energy() {
        let ps = [particle(0., 0., 3., 4., 1.), particle(0., 0., 1., 0., 1.)];
        assert_eq!(max_speed(&ps), 5.);
        assert!((kinetic_energy(&ps) - 13.).abs() < 1e-12);
    }

    #[test]
    fn com() {
        let ps = [particle(0., 0., 0., 0., 1.), particle(10., 4., 0., 0., 1.)];
        let c = center_of_mass(&ps).unwrap();
        assert!((c.x - 5.).abs() < 1e-12);
        assert!((c.y - 2.).abs() < 1e-12);
        assert!(center_of_mass(&[]).is_none());
    }
}
