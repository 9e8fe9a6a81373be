//! Smoothing kernels used to interpolate density, pressure gradient and viscous stress from
//! neighbouring particles.
//!
//! All kernels take the *squared* pair distance, and have compact support: they return exactly 0
//! for `dist_sq >= h²`. Gradients also return zero at `dist_sq == 0`; coincident particles are
//! expected (e.g. spawning on the same point), and must not divide by zero.
//!
//! `diff` is always `subject - neighbour`.

use std::f64::consts::PI;

use bincode::{Decode, Encode};
use lin_alg::f64::Vec3;

const ZERO: Vec3 = Vec3 { x: 0., y: 0., z: 0. };

pub trait SmoothingKernel {
    /// Interpolation weight, for density estimation.
    fn weight(&self, dist_sq: f64, h: f64) -> f64;

    /// Weight gradient with respect to the subject's position, for the pressure term.
    fn gradient(&self, diff: Vec3, dist_sq: f64, h: f64) -> Vec3;

    /// Laplacian weight, for the viscosity term.
    fn laplacian(&self, dist_sq: f64, h: f64) -> f64;
}

#[inline]
fn outside(dist_sq: f64, h: f64) -> bool {
    dist_sq >= h * h
}

/// Poly6 density kernel, Spiky gradient, and the Müller viscosity Laplacian, with their 3D
/// normalisation constants.
#[derive(Clone, Copy, Debug, Default)]
pub struct Poly6Spiky;

impl SmoothingKernel for Poly6Spiky {
    fn weight(&self, dist_sq: f64, h: f64) -> f64 {
        if outside(dist_sq, h) {
            return 0.;
        }
        315. / (64. * PI * h.powi(9)) * (h.powi(2) - dist_sq).powi(3)
    }

    fn gradient(&self, diff: Vec3, dist_sq: f64, h: f64) -> Vec3 {
        if outside(dist_sq, h) || dist_sq == 0. {
            return ZERO;
        }
        let dist = dist_sq.sqrt();
        let mul = -45. / (PI * h.powi(6)) * (h - dist).powi(2) / dist;
        diff * mul
    }

    fn laplacian(&self, dist_sq: f64, h: f64) -> f64 {
        if outside(dist_sq, h) {
            return 0.;
        }
        45. / (PI * h.powi(6)) * (h - dist_sq.sqrt())
    }
}

/// Gaussian kernel, truncated at `h`. The viscosity term reuses the weight.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gaussian;

impl SmoothingKernel for Gaussian {
    fn weight(&self, dist_sq: f64, h: f64) -> f64 {
        if outside(dist_sq, h) {
            return 0.;
        }
        (-dist_sq / h.powi(2)).exp() / (PI.powf(1.5) * h.powi(3))
    }

    fn gradient(&self, diff: Vec3, dist_sq: f64, h: f64) -> Vec3 {
        if outside(dist_sq, h) || dist_sq == 0. {
            return ZERO;
        }
        let mul = -2. / (PI.powf(1.5) * h.powi(5)) * (-dist_sq / h.powi(2)).exp();
        diff * mul
    }

    fn laplacian(&self, dist_sq: f64, h: f64) -> f64 {
        self.weight(dist_sq, h)
    }
}

/// Same shapes as `Poly6Spiky`, with the 2D normalisation constants.
#[derive(Clone, Copy, Debug, Default)]
pub struct AltPoly6Spiky;

impl SmoothingKernel for AltPoly6Spiky {
    fn weight(&self, dist_sq: f64, h: f64) -> f64 {
        if outside(dist_sq, h) {
            return 0.;
        }
        4. / (PI * h.powi(8)) * (h.powi(2) - dist_sq).powi(3)
    }

    fn gradient(&self, diff: Vec3, dist_sq: f64, h: f64) -> Vec3 {
        if outside(dist_sq, h) || dist_sq == 0. {
            return ZERO;
        }
        let dist = dist_sq.sqrt();
        let mul = -30. / (PI * h.powi(5)) * (h - dist).powi(2) / dist;
        diff * mul
    }

    fn laplacian(&self, dist_sq: f64, h: f64) -> f64 {
        if outside(dist_sq, h) {
            return 0.;
        }
        40. / (PI * h.powi(5)) * (h - dist_sq.sqrt())
    }
}

/// Kernel selection, stored in `Config`. Selected once; the step engine only sees the trait.
#[derive(Clone, Copy, Debug, Default, PartialEq, Encode, Decode)]
pub enum KernelKind {
    #[default]
    Poly6Spiky,
    Gaussian,
    AltPoly6Spiky,
}

impl KernelKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Poly6Spiky => "Poly6 / Spiky",
            Self::Gaussian => "Gaussian",
            Self::AltPoly6Spiky => "Poly6 / Spiky (2D)",
        }
    }
}

impl SmoothingKernel for KernelKind {
    fn weight(&self, dist_sq: f64, h: f64) -> f64 {
        match self {
            Self::Poly6Spiky => Poly6Spiky.weight(dist_sq, h),
            Self::Gaussian => Gaussian.weight(dist_sq, h),
            Self::AltPoly6Spiky => AltPoly6Spiky.weight(dist_sq, h),
        }
    }

    fn gradient(&self, diff: Vec3, dist_sq: f64, h: f64) -> Vec3 {
        match self {
            Self::Poly6Spiky => Poly6Spiky.gradient(diff, dist_sq, h),
            Self::Gaussian => Gaussian.gradient(diff, dist_sq, h),
            Self::AltPoly6Spiky => AltPoly6Spiky.gradient(diff, dist_sq, h),
        }
    }

    fn laplacian(&self, dist_sq: f64, h: f64) -> f64 {
        match self {
            Self::Poly6Spiky => Poly6Spiky.laplacian(dist_sq, h),
            Self::Gaussian => Gaussian.laplacian(dist_sq, h),
            Self::AltPoly6Spiky => AltPoly6Spiky.laplacian(dist_sq, h),
        }
    }
}
