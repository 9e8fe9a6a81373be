//! Drives a run: owns the current generation and config, the gate's wall-clock latch, and the
//! snapshot history.

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::{
    config::Config,
    error::Result,
    particle::Particle,
    playback::SnapShot,
    properties,
    step::{advance, calibrate},
};

const LOG_RATIO: usize = 100;

pub struct State {
    pub config: Config,
    pub particles: Vec<Particle>,
    pub snapshots: Vec<SnapShot>,
    pub time_elapsed: f64,
    pub step_count: usize,
    /// The gate latch measures from here.
    started: Instant,
}

impl State {
    pub fn new(mut config: Config, particles: Vec<Particle>) -> Result<Self> {
        config.validate()?;

        // The latch is per run; a config saved after it fired must be able to fire again.
        if let Some(gate) = &mut config.gate {
            gate.latch_fired = false;
        }

        let mut result = Self {
            config,
            particles,
            snapshots: Vec::new(),
            time_elapsed: 0.,
            step_count: 0,
            started: Instant::now(),
        };
        result.take_snapshot(); // Initial snapshot; t=0.
        Ok(result)
    }

    /// Replace `rest_rho` with an estimate from the current generation. Returns the new value.
    pub fn calibrate(&mut self) -> Result<f64> {
        self.config = calibrate(&self.particles, &self.config)?;
        Ok(self.config.rest_rho)
    }

    pub fn restart_clock(&mut self) {
        self.started = Instant::now();
    }

    /// Takes effect on the next step. Returns `false` if there's no gate.
    pub fn set_gate_closed(&mut self, closed: bool) -> bool {
        match &mut self.config.gate {
            Some(gate) => {
                gate.set_closed(closed);
                true
            }
            None => false,
        }
    }

    /// Flip the gate. Returns the new closed state, or `None` if there's no gate.
    pub fn toggle_gate(&mut self) -> Option<bool> {
        let gate = self.config.gate.as_mut()?;
        let closed = !gate.is_closed();
        gate.set_closed(closed);
        Some(closed)
    }

    pub fn gate_closed(&self) -> bool {
        self.config.gate.as_ref().is_some_and(|g| g.is_closed())
    }

    fn take_snapshot(&mut self) {
        let snap = SnapShot::new(
            &self.particles,
            self.time_elapsed,
            self.step_count,
            self.gate_closed(),
        );
        self.snapshots.push(snap);
    }

    /// Advance one step, evaluating the gate latch against wall-clock time since start.
    pub fn step(&mut self) -> Result<()> {
        let elapsed = self.started.elapsed();
        self.step_at(elapsed)
    }

    /// Advance one step, evaluating the gate latch against `elapsed`. The latch is checked once,
    /// before any particle is updated.
    pub fn step_at(&mut self, elapsed: Duration) -> Result<()> {
        if let Some(gate) = &mut self.config.gate {
            gate.apply_latch(elapsed);
        }

        self.particles = advance(&self.particles, &self.config)?;
        self.time_elapsed += self.config.dt;
        self.step_count += 1;

        let ratio = self.config.snapshot_ratio;
        if ratio != 0 && self.step_count % ratio == 0 {
            self.take_snapshot();
        }
        Ok(())
    }

    /// Run `config.num_timesteps` steps. Stops at the first failing step.
    pub fn run(&mut self) -> Result<()> {
        for t in 0..self.config.num_timesteps {
            if let Err(e) = self.step() {
                warn!("Step {} failed: {e}", self.step_count);
                return Err(e);
            }

            if t % LOG_RATIO == 0 {
                debug!(
                    "t: {:.2} Mean density: {:.4} KE: {:.3} Max speed: {:.3}",
                    self.time_elapsed,
                    properties::mean_density(&self.particles),
                    properties::kinetic_energy(&self.particles),
                    properties::max_speed(&self.particles),
                );
            }
        }
        Ok(())
    }
}
