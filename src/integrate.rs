use lin_alg::f64::Vec3;

/// Advance velocity and position by one step, from a constant acceleration.
///
/// `v' = v + a dt`, then `x' = x + dt (v' + a dt / 2)`. Note that the half-step correction is
/// applied on top of the already-updated velocity; this is not semi-implicit Euler.
///
/// Returns `(posit, vel)`.
pub fn integrate_step(posit: Vec3, vel: Vec3, accel: Vec3, dt: f64) -> (Vec3, Vec3) {
    let vel_next = vel + accel * dt;
    let posit_next = posit + (vel_next + accel * (dt / 2.)) * dt;

    (posit_next, vel_next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_accel_is_drift() {
        let posit = Vec3::new(1., 2., 0.);
        let vel = Vec3::new(3., -4., 0.);
        let (p, v) = integrate_step(posit, vel, Vec3::new_zero(), 0.5);
        assert_eq!((v.x, v.y), (3., -4.));
        assert!((p.x - 2.5).abs() < 1e-12);
        assert!((p.y - 0.).abs() < 1e-12);
    }

    #[test]
    fn constant_accel_closed_form() {
        let dt = 0.1;
        let a = Vec3::new(0., -5., 0.);
        let (p, v) = integrate_step(Vec3::new(0., 100., 0.), Vec3::new_zero(), a, dt);

        // v' = -0.5; a dt / 2 = -0.25; x' = 100 + 0.1 * (-0.5 - 0.25)
        assert!((v.y + 0.5).abs() < 1e-12);
        assert!((p.y - 99.925).abs() < 1e-12);
        assert_eq!(p.z, 0.);
    }
}
