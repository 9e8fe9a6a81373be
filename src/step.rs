//! Turns one generation of particles into the next.

use log::{info, trace};

use crate::{
    accel::acc_sph,
    config::Config,
    error::{Error, Result},
    integrate::integrate_step,
    particle::Particle,
    properties,
};

/// Compute the next generation. Every particle in the output is computed from the same input
/// slice; nothing here observes a partially-updated generation. The output has the same length
/// and order as the input.
pub fn advance(particles: &[Particle], cfg: &Config) -> Result<Vec<Particle>> {
    cfg.validate()?;

    // Stored densities are divisors in the pressure and viscosity sums.
    for (index, p) in particles.iter().enumerate() {
        if !p.density.is_finite() || p.density <= 0. {
            return Err(Error::NonPositiveDensity {
                index,
                density: p.density,
            });
        }
    }

    trace!(
        "Advancing {} particles. Kernel: {}",
        particles.len(),
        cfg.kernel.to_str()
    );

    let mut result = Vec::with_capacity(particles.len());

    for (id, subj) in particles.iter().enumerate() {
        let (accel, sums) = acc_sph(id, particles, &cfg.kernel, cfg)?;
        let (posit, vel) = integrate_step(subj.posit, subj.vel, accel, cfg.dt);

        if ![posit.x, posit.y, vel.x, vel.y].iter().all(|v| v.is_finite()) {
            return Err(Error::NonFinite { index: id });
        }

        result.push(Particle {
            posit,
            vel,
            mass: subj.mass,
            density: sums.density,
            press_grad: sums.press_grad,
        });
    }

    Ok(result)
}

/// Estimate a rest density: seed `rest_rho` with 1, run one step, and average the resulting
/// densities. Errors from `advance` propagate unchanged.
pub fn rest_rho_estimate(particles: &[Particle], cfg: &Config) -> Result<f64> {
    if particles.is_empty() {
        return Err(Error::InvalidConfig(
            "can't calibrate rest density from an empty particle set".into(),
        ));
    }

    let seeded = cfg.with_rest_rho(1.);
    let next = advance(particles, &seeded)?;

    Ok(properties::mean_density(&next))
}

/// Returns `cfg` with `rest_rho` replaced by the estimate from `particles`. Calling it again on a
/// fresh particle set recomputes from scratch; the previous `rest_rho` plays no part.
pub fn calibrate(particles: &[Particle], cfg: &Config) -> Result<Config> {
    let rest_rho = rest_rho_estimate(particles, cfg)?;
    info!("Calibrated rest density: {rest_rho:.6}");

    Ok(cfg.with_rest_rho(rest_rho))
}

#[cfg(test)]
mod tests {
    use lin_alg::f64::Vec3;

    use super::*;

    fn at(x: f64, y: f64) -> Particle {
        Particle::new(Vec3::new(x, y, 0.), Vec3::new_zero(), 1.).unwrap()
    }

    #[test]
    fn output_matches_input_length() {
        let cfg = Config::default();
        let ps: Vec<_> = (0..12).map(|i| at(100. + 7. * i as f64, 200.)).collect();
        let next = advance(&ps, &cfg).unwrap();
        assert_eq!(next.len(), ps.len());
    }

    #[test]
    fn empty_generation_is_fine() {
        let next = advance(&[], &Config::default()).unwrap();
        assert!(next.is_empty());
    }

    #[test]
    fn input_is_not_touched() {
        let cfg = Config::default();
        let ps = vec![at(100., 200.), at(110., 200.)];
        let before: Vec<_> = ps.iter().map(|p| (p.posit.x, p.posit.y, p.density)).collect();
        let _ = advance(&ps, &cfg).unwrap();
        let after: Vec<_> = ps.iter().map(|p| (p.posit.x, p.posit.y, p.density)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn zero_stored_density_rejected() {
        let mut p = at(100., 100.);
        p.density = 0.;
        let err = advance(&[p], &Config::default()).unwrap_err();
        assert!(matches!(err, Error::NonPositiveDensity { index: 0, .. }));
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = Config {
            dt: 0.,
            ..Default::default()
        };
        assert!(matches!(
            advance(&[at(1., 1.)], &cfg),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn calibrate_empty_rejected() {
        assert!(calibrate(&[], &Config::default()).is_err());
    }

    #[test]
    fn calibrate_ignores_previous_rest_rho() {
        let ps = vec![at(100., 200.), at(105., 200.), at(100., 205.)];
        let a = calibrate(&ps, &Config::default()).unwrap();
        let b = calibrate(&ps, &Config::default().with_rest_rho(7.)).unwrap();
        assert_eq!(a.rest_rho, b.rest_rho);
    }
}
