//! Snapshots of computed generations, for playback and drawing by an external renderer.

use lin_alg::{f32::Vec3 as Vec3f32, f64::Vec3};

use crate::particle::Particle;

#[derive(Debug)]
pub struct SnapShot {
    pub time: f32,
    /// Index of the step that produced this generation.
    pub step: usize,
    // To save memory, we store the snapshots as f32; we only need f64 precision
    // during the integration.
    pub posits: Vec<Vec3f32>,
    pub vels: Vec<Vec3f32>,
    /// Pressure-gradient vectors, for drawing.
    pub press_grads: Vec<Vec3f32>,
    pub densities: Vec<f32>,
    pub gate_closed: bool,
}

pub fn vec_to_f32(v: Vec3) -> Vec3f32 {
    Vec3f32::new(v.x as f32, v.y as f32, v.z as f32)
}

impl SnapShot {
    pub fn new(particles: &[Particle], time: f64, step: usize, gate_closed: bool) -> Self {
        Self {
            time: time as f32,
            step,
            posits: particles.iter().map(|p| vec_to_f32(p.posit)).collect(),
            vels: particles.iter().map(|p| vec_to_f32(p.vel)).collect(),
            press_grads: particles.iter().map(|p| vec_to_f32(p.press_grad)).collect(),
            densities: particles.iter().map(|p| p.density as f32).collect(),
            gate_closed,
        }
    }

    pub fn len(&self) -> usize {
        self.posits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_copies_generation() {
        let p = Particle {
            posit: Vec3::new(1.5, 2.5, 0.),
            vel: Vec3::new(-1., 0.25, 0.),
            mass: 1.,
            density: 1.125,
            press_grad: Vec3::new(0.5, -0.5, 0.),
        };
        let snap = SnapShot::new(&[p, p], 0.2, 2, true);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.step, 2);
        assert_eq!((snap.posits[1].x, snap.posits[1].y), (1.5, 2.5));
        assert_eq!((snap.press_grads[0].x, snap.press_grads[0].y), (0.5, -0.5));
        assert_eq!(snap.densities[0], 1.125);
        assert!(snap.gate_closed);
    }
}
