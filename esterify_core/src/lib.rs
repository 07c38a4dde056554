//! Esterify Core - 2D particle simulation of an esterification reaction
//!
//! Labelled disks stand in for molecules of salicylic acid, methanol,
//! methyl salicylate and water. They drift, jitter with temperature, bounce
//! off the walls and off each other, and an acid meeting an alcohol may
//! turn into an ester and a water:
//!
//! ```text
//!   acid + alcohol ──► ester + water
//! ```
//!
//! # Tick pipeline
//!
//! ```text
//! ┌──────────────┐   ┌───────────────────────────────────────────┐
//! │  Integrator  │──►│             Pairwise scan (O(n²))          │
//! │ drift/jitter │   │  overlap? ─► Reaction engine ─► reacted?   │
//! │ spin/cap/wall│   │                 │ no              │ yes    │
//! └──────────────┘   │                 ▼                 ▼        │
//!                    │         elastic impulse      abort scan    │
//!                    └───────────────────────────────────────────┘
//! ```
//!
//! At most one reaction fires per tick: a reaction rewrites the particle
//! store, so the scan stops and leftover overlaps wait for the next tick.
//!
//! # Usage
//!
//! ```
//! use esterify_core::{Simulation, SimConfig};
//!
//! let mut sim = Simulation::new(SimConfig::default()).unwrap();
//! for _ in 0..60 {
//!     sim.tick();
//! }
//! let snapshot = sim.snapshot();
//! assert_eq!(snapshot.counts.total(), 30);
//! ```

pub mod collision;
pub mod error;
pub mod integrator;
pub mod math;
pub mod params;
pub mod particle;
pub mod reaction;
pub mod simulation;
pub mod spawner;
pub mod species;

// Re-export key types for convenience
pub use collision::{resolve_collision, resolve_pairs, CollisionOutcome, ScanReport};
pub use error::SimError;
pub use integrator::{integrate, wall_bounce};
pub use params::{MotionPreset, SimParams, Temperature, World};
pub use particle::{Particle, ParticleStore, Region, SpeciesCounts};
pub use reaction::try_react;
pub use simulation::{Population, SimConfig, Simulation, Snapshot, TickOutcome};
pub use spawner::spawn;
pub use species::{Species, SpeciesParams, SpeciesRegistry, STANDARD};
