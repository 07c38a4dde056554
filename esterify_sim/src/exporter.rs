//! JSON exporter for offline visualization.
//!
//! Records snapshots as frames so a separate viewer can replay a run.

use crate::error::RunError;
use esterify_core::{Snapshot, Species, SpeciesCounts, World};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// A single frame of simulation data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimFrame {
    /// Frame index
    pub frame: u64,

    /// Virtual time in seconds
    pub time_sec: f64,

    /// Population per species (HUD line)
    pub counts: SpeciesCounts,

    /// Temperature level
    pub temperature: u8,

    /// Diagnostic preset active
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub diagnostic: bool,

    /// Particle states
    pub particles: Vec<ParticleFrame>,
}

/// Drawing state of one particle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleFrame {
    pub species: Species,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub radius: f64,
}

impl SimFrame {
    /// Captures a snapshot.
    pub fn capture(frame: u64, time_sec: f64, snapshot: &Snapshot<'_>) -> Self {
        Self {
            frame,
            time_sec,
            counts: snapshot.counts,
            temperature: snapshot.temperature.level(),
            diagnostic: snapshot.diagnostic,
            particles: snapshot
                .particles
                .iter()
                .map(|p| ParticleFrame {
                    species: p.species,
                    x: p.position.x,
                    y: p.position.y,
                    angle: p.angle,
                    radius: p.radius,
                })
                .collect(),
        }
    }
}

/// Complete simulation export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimExport {
    /// Scenario name
    pub scenario: String,

    /// Seed used
    pub seed: u64,

    /// World size the coordinates refer to
    pub world: World,

    /// Duration in seconds
    pub duration_sec: f64,

    /// All frames
    pub frames: Vec<SimFrame>,

    /// Whether every invariant held
    pub passed: bool,

    /// Reactions over the whole run
    pub reactions: u64,
}

impl SimExport {
    /// Creates a new export container.
    pub fn new(scenario: &str, seed: u64, world: World) -> Self {
        Self {
            scenario: scenario.to_string(),
            seed,
            world,
            duration_sec: 0.0,
            frames: Vec::new(),
            passed: false,
            reactions: 0,
        }
    }

    /// Adds a frame.
    pub fn add_frame(&mut self, frame: SimFrame) {
        self.duration_sec = frame.time_sec;
        self.frames.push(frame);
    }

    /// Finalizes the export.
    pub fn finalize(&mut self, passed: bool, reactions: u64) {
        self.passed = passed;
        self.reactions = reactions;
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> Result<String, RunError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> Result<(), RunError> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
