//! SimWorld - the frame loop around a `Simulation`.

use esterify_core::{SimConfig, SimError, Simulation, Snapshot, TickOutcome};
use std::time::Duration;

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Frame index (starting at 1)
    pub frame: u64,

    /// Outcome of the core tick for this frame
    pub outcome: TickOutcome,
}

/// The SimWorld - drives a simulation at a fixed virtual frame rate.
///
/// Virtual time advances every frame, paused or not, the way a render loop
/// keeps drawing while the model is frozen.
pub struct SimWorld {
    /// The simulation being driven
    sim: Simulation,

    /// Frames per virtual second
    frame_rate_hz: u32,

    /// Frames run so far
    frame_count: u64,

    /// Virtual clock
    elapsed: Duration,
}

impl SimWorld {
    /// Creates a world and spawns the configured population.
    pub fn new(config: SimConfig, frame_rate_hz: u32) -> Result<Self, SimError> {
        if frame_rate_hz == 0 {
            return Err(SimError::invalid("frame rate must be > 0"));
        }
        Ok(Self {
            sim: Simulation::new(config)?,
            frame_rate_hz,
            frame_count: 0,
            elapsed: Duration::ZERO,
        })
    }

    /// Runs one frame: a core tick unless paused, then the clock moves on.
    pub fn frame(&mut self) -> FrameReport {
        let outcome = self.sim.tick();

        self.frame_count += 1;
        self.elapsed += Duration::from_secs_f64(1.0 / self.frame_rate_hz as f64);

        FrameReport {
            frame: self.frame_count,
            outcome,
        }
    }

    /// Current view for rendering.
    pub fn render(&self) -> Snapshot<'_> {
        self.sim.snapshot()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Mutable access for UI-style controls (pause, temperature, reset).
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    /// Returns the virtual time in seconds.
    pub fn time(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Returns the number of frames run.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn frame_rate_hz(&self) -> u32 {
        self.frame_rate_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_frame_advances_clock() {
        let mut world = SimWorld::new(SimConfig::default(), 60).unwrap();

        assert_eq!(world.frame_count(), 0);
        assert_eq!(world.time(), 0.0);

        let report = world.frame();

        assert_eq!(report.frame, 1);
        assert!(matches!(report.outcome, TickOutcome::Advanced(_)));
        assert!((world.time() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_paused_world_keeps_rendering() {
        let mut world = SimWorld::new(SimConfig::default(), 30).unwrap();
        world.simulation_mut().set_paused(true);
        let before = world.render().particles.to_vec();

        for _ in 0..10 {
            assert_eq!(world.frame().outcome, TickOutcome::Paused);
        }

        assert_eq!(world.frame_count(), 10);
        assert_eq!(world.render().particles, before.as_slice());
        assert_eq!(world.render().ticks, 0);
    }

    #[test]
    fn test_zero_frame_rate_rejected() {
        assert!(SimWorld::new(SimConfig::default(), 0).is_err());
    }
}
