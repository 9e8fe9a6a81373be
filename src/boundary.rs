//! Repulsive wall forces. Each wall acts as a spring sized to arrest penetration within one
//! timestep: `F = m (rest_dist - d) / dt²`, directed away from the wall, applied while the
//! particle is closer than `rest_dist`.
//!
//! Walls are independent contributors, summed: a particle in the influence zone of an outer wall
//! and a gate segment at once feels both.

use std::time::Duration;

use bincode::{Decode, Encode};
use lin_alg::f64::Vec3;
use log::info;

use crate::{
    config::Config,
    error::{Error, Result},
    particle::Particle,
};

/// Spring force magnitude for a particle `dist` away from a wall. Zero at or beyond `rest_dist`.
#[inline]
pub fn spring_force(mass: f64, dist: f64, cfg: &Config) -> f64 {
    if dist < cfg.rest_dist {
        mass * (cfg.rest_dist - dist) / cfg.dt.powi(2)
    } else {
        0.
    }
}

pub trait WallContributor {
    fn force(&self, particle: &Particle, cfg: &Config) -> Vec3;
}

/// The four sides of the domain, inset by `bound_x` and `bound_y`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OuterWalls;

impl WallContributor for OuterWalls {
    fn force(&self, particle: &Particle, cfg: &Config) -> Vec3 {
        let (x0, x1) = cfg.wall_x();
        let (y0, y1) = cfg.wall_y();
        let p = particle.posit;
        let m = particle.mass;

        Vec3::new(
            spring_force(m, p.x - x0, cfg) - spring_force(m, x1 - p.x, cfg),
            spring_force(m, p.y - y0, cfg) - spring_force(m, y1 - p.y, cfg),
            0.,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Encode, Decode)]
pub enum GateAnchor {
    /// Segments rise from the floor.
    Floor,
    /// Segments hang from the ceiling.
    Ceiling,
}

/// A thin vertical wall at `x`, spanning `y_min..=y_max`. Pushes from both faces, only while
/// closed.
#[derive(Clone, Copy, Debug, PartialEq, Encode, Decode)]
pub struct GateSegment {
    pub x: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub closed: bool,
}

impl WallContributor for GateSegment {
    fn force(&self, particle: &Particle, cfg: &Config) -> Vec3 {
        let p = particle.posit;
        if !self.closed || p.y < self.y_min || p.y > self.y_max {
            return Vec3::new_zero();
        }

        let dx = p.x - self.x;
        let f = spring_force(particle.mass, dx.abs(), cfg);
        // A particle exactly on the plate is pushed to the right.
        let dir = if dx >= 0. { 1. } else { -1. };
        Vec3::new(dir * f, 0., 0.)
    }
}

/// A sluice gate: two parallel segments, left then right, with a gap between them.
#[derive(Clone, Debug, PartialEq, Encode, Decode)]
pub struct Gate {
    pub segments: [GateSegment; 2],
    pub anchor: GateAnchor,
    /// Wall-clock seconds from engine start, after which both segments close.
    pub auto_close_after: Option<f64>,
    /// Set once the auto-close has fired, so a later manual open sticks.
    pub latch_fired: bool,
}

impl Gate {
    /// Segments at `x_a` and `x_b`, reaching `extent` from the floor or ceiling wall.
    pub fn new(
        x_a: f64,
        x_b: f64,
        extent: f64,
        anchor: GateAnchor,
        closed: bool,
        cfg: &Config,
    ) -> Result<Self> {
        let (y0, y1) = cfg.wall_y();
        let (y_min, y_max) = match anchor {
            GateAnchor::Floor => (y0, y0 + extent),
            GateAnchor::Ceiling => (y1 - extent, y1),
        };

        let seg = |x| GateSegment {
            x,
            y_min,
            y_max,
            closed,
        };

        let result = Self {
            segments: [seg(x_a), seg(x_b)],
            anchor,
            auto_close_after: None,
            latch_fired: false,
        };
        result.validate(cfg)?;
        Ok(result)
    }

    pub fn gap_width(&self) -> f64 {
        self.segments[1].x - self.segments[0].x
    }

    pub fn validate(&self, cfg: &Config) -> Result<()> {
        let gap = self.gap_width();
        if !gap.is_finite() || gap <= 0. {
            return Err(Error::InvalidGate(format!("gap width must be > 0; got {gap}")));
        }

        let (x0, x1) = cfg.wall_x();
        let (y0, y1) = cfg.wall_y();
        for seg in &self.segments {
            if !(seg.x > x0 && seg.x < x1) {
                return Err(Error::InvalidGate(format!(
                    "segment x {} is outside the domain ({x0}, {x1})",
                    seg.x
                )));
            }
            if !(seg.y_min >= y0 && seg.y_max <= y1 && seg.y_min < seg.y_max) {
                return Err(Error::InvalidGate(format!(
                    "segment span {}..{} is empty or outside the domain [{y0}, {y1}]",
                    seg.y_min, seg.y_max
                )));
            }
        }

        if let Some(t) = self.auto_close_after {
            if !t.is_finite() || t < 0. {
                return Err(Error::InvalidGate(format!("auto_close_after must be >= 0; got {t}")));
            }
        }
        Ok(())
    }

    pub fn set_closed(&mut self, closed: bool) {
        for seg in &mut self.segments {
            seg.closed = closed;
        }
    }

    pub fn is_closed(&self) -> bool {
        self.segments.iter().any(|s| s.closed)
    }

    /// Close the gate once `elapsed` passes `auto_close_after`. Fires at most once.
    /// Returns `true` if this call closed it.
    pub fn apply_latch(&mut self, elapsed: Duration) -> bool {
        let Some(timeout) = self.auto_close_after else {
            return false;
        };
        if self.latch_fired || elapsed.as_secs_f64() < timeout {
            return false;
        }

        self.latch_fired = true;
        self.set_closed(true);
        info!("Gate auto-closed after {:.2}s", elapsed.as_secs_f64());
        true
    }
}

impl WallContributor for Gate {
    fn force(&self, particle: &Particle, cfg: &Config) -> Vec3 {
        let a = self.segments[0].force(particle, cfg);
        let b = self.segments[1].force(particle, cfg);
        a + b
    }
}

/// Sum of every wall acting on a particle: outer walls, then gate segments if present.
pub fn wall_force(particle: &Particle, cfg: &Config) -> Vec3 {
    let outer = OuterWalls.force(particle, cfg);
    match &cfg.gate {
        Some(gate) => outer + gate.force(particle, cfg),
        None => outer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Particle {
        Particle {
            posit: Vec3::new(x, y, 0.),
            vel: Vec3::new_zero(),
            mass: 1.,
            density: 1.,
            press_grad: Vec3::new_zero(),
        }
    }

    fn gated_cfg(closed: bool) -> Config {
        let mut cfg = Config::default();
        cfg.gate = Some(Gate::new(300., 340., 200., GateAnchor::Floor, closed, &cfg).unwrap());
        cfg
    }

    #[test]
    fn zero_at_rest_dist() {
        let cfg = Config::default();
        let f = OuterWalls.force(&at(cfg.rest_dist, 200.), &cfg);
        assert_eq!(f.x, 0.);
        assert_eq!(f.y, 0.);
    }

    #[test]
    fn half_rest_dist_each_wall() {
        let cfg = Config::default();
        let d = cfg.rest_dist / 2.;
        let expected = 1. * d / cfg.dt.powi(2);

        let left = OuterWalls.force(&at(d, 200.), &cfg);
        assert!((left.x - expected).abs() < 1e-9);

        let right = OuterWalls.force(&at(cfg.x_size - d, 200.), &cfg);
        assert!((right.x + expected).abs() < 1e-9);

        let floor = OuterWalls.force(&at(100., d), &cfg);
        assert!((floor.y - expected).abs() < 1e-9);

        let ceiling = OuterWalls.force(&at(100., cfg.y_size - d), &cfg);
        assert!((ceiling.y + expected).abs() < 1e-9);
    }

    #[test]
    fn margin_moves_walls_inward() {
        let cfg = Config {
            bound_x: 10.,
            ..Default::default()
        };
        let f = OuterWalls.force(&at(10.5, 200.), &cfg);
        assert!(f.x > 0.);
        let f = OuterWalls.force(&at(cfg.rest_dist / 2., 200.), &Config::default());
        assert!(f.x > 0.);
    }

    #[test]
    fn closed_gate_pushes_from_both_sides() {
        let cfg = gated_cfg(true);
        let left_of_a = wall_force(&at(299.5, 50.), &cfg);
        assert!(left_of_a.x < 0.);
        let right_of_a = wall_force(&at(300.5, 50.), &cfg);
        assert!(right_of_a.x > 0.);
        let left_of_b = wall_force(&at(339., 50.), &cfg);
        assert!(left_of_b.x < 0.);
    }

    #[test]
    fn open_gate_is_inert_but_walls_remain() {
        let cfg = gated_cfg(false);
        let f = wall_force(&at(299.5, 50.), &cfg);
        assert_eq!(f.x, 0.);

        // Gate segment and floor both in range; only the floor acts.
        let f = wall_force(&at(300.5, 0.5), &cfg);
        assert_eq!(f.x, 0.);
        assert!(f.y > 0.);
    }

    #[test]
    fn superposition_of_floor_and_gate() {
        let cfg = gated_cfg(true);
        let p = at(300.5, 0.5);
        let f = wall_force(&p, &cfg);
        let expected_x = spring_force(1., 0.5, &cfg);
        let expected_y = spring_force(1., 0.5, &cfg);
        assert!((f.x - expected_x).abs() < 1e-9);
        assert!((f.y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn gate_only_acts_over_its_span() {
        let cfg = gated_cfg(true);
        let f = wall_force(&at(300.5, 250.), &cfg);
        assert_eq!(f.x, 0.);
    }

    #[test]
    fn ceiling_anchor_span() {
        let cfg = Config::default();
        let gate = Gate::new(300., 340., 100., GateAnchor::Ceiling, true, &cfg).unwrap();
        assert_eq!(gate.segments[0].y_min, 380.);
        assert_eq!(gate.segments[0].y_max, 480.);
    }

    #[test]
    fn bad_gates_rejected() {
        let cfg = Config::default();
        let inverted = Gate::new(340., 300., 100., GateAnchor::Floor, true, &cfg);
        assert!(matches!(inverted, Err(Error::InvalidGate(_))));

        let outside = Gate::new(-10., 20., 100., GateAnchor::Floor, true, &cfg);
        assert!(matches!(outside, Err(Error::InvalidGate(_))));

        let too_tall = Gate::new(300., 340., 1_000., GateAnchor::Floor, true, &cfg);
        assert!(matches!(too_tall, Err(Error::InvalidGate(_))));
    }

    #[test]
    fn latch_closes_once() {
        let cfg = Config::default();
        let mut gate = Gate::new(300., 340., 100., GateAnchor::Floor, false, &cfg).unwrap();
        gate.auto_close_after = Some(2.);

        assert!(!gate.apply_latch(Duration::from_millis(1_500)));
        assert!(!gate.is_closed());

        assert!(gate.apply_latch(Duration::from_secs(2)));
        assert!(gate.is_closed());

        // A manual open after the latch fired is kept.
        gate.set_closed(false);
        assert!(!gate.apply_latch(Duration::from_secs(10)));
        assert!(!gate.is_closed());
    }
}
