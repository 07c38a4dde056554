//! Esterify Sim - headless driver for the esterification simulation
//!
//! Stands in for the presentation layer: it calls `tick()` once per frame
//! unless paused, "renders" by reading a snapshot, and checks the
//! bookkeeping a classroom viewer would rely on.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   ScenarioRunner                      │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │ SimWorld (frame loop + virtual clock)          │  │
//! │  │   ┌────────────────────────────────────────┐   │  │
//! │  │   │ esterify_core::Simulation              │   │  │
//! │  │   └────────────────────────────────────────┘   │  │
//! │  └────────────────────────────────────────────────┘  │
//! │         │ snapshot every frame                        │
//! │         ▼                                             │
//! │  invariant checks ──► ScenarioResult                  │
//! │         │                                             │
//! │         ▼                                             │
//! │  SimExport (JSON frames, optional)                    │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use esterify_sim::{ScenarioRunner, scenarios::ScenarioId};
//!
//! let runner = ScenarioRunner::new(42).with_duration(10.0);
//! let result = runner.run(ScenarioId::Heated)?;
//! assert!(result.passed);
//! ```

mod error;
mod exporter;
mod runner;
mod world;
pub mod scenarios;

pub use error::RunError;
pub use exporter::{ParticleFrame, SimExport, SimFrame};
pub use runner::{ScenarioResult, ScenarioRunner};
pub use scenarios::{ScenarioId, ScenarioSetup};
pub use world::{FrameReport, SimWorld};
