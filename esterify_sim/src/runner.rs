//! Scenario runner - drives a scenario frame by frame and checks the books.

use crate::error::RunError;
use crate::exporter::{SimExport, SimFrame};
use crate::scenarios::{ScenarioId, ScenarioSetup};
use crate::world::SimWorld;

use esterify_core::{SimConfig, Snapshot, Species, SpeciesCounts, World, STANDARD};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Results from running a scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    /// Scenario that was run
    pub scenario: String,

    /// Seed used
    pub seed: u64,

    /// Whether every per-frame check held
    pub passed: bool,

    /// Total frames executed
    pub total_frames: u64,

    /// Final virtual time in seconds
    pub final_time_secs: f64,

    /// Population right after the reset
    pub initial_counts: SpeciesCounts,

    /// Population at the end
    pub final_counts: SpeciesCounts,

    /// Reactions over the run
    pub reactions: u64,

    /// Ester formed over the limiting reactant, 0..=1
    pub conversion: f64,

    /// Molecules the spawner could not place
    pub spawn_shortfall: usize,

    /// Failure message if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

/// Runs scenarios.
pub struct ScenarioRunner {
    /// Configuration seed
    seed: u64,

    /// Frames per virtual second
    frame_rate_hz: u32,

    /// Duration in virtual seconds
    duration_secs: f64,

    /// World size
    world: World,
}

impl ScenarioRunner {
    /// Creates a new scenario runner.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            frame_rate_hz: 60,
            duration_secs: 30.0,
            world: World::default(),
        }
    }

    /// Sets the frame rate.
    pub fn with_frame_rate(mut self, hz: u32) -> Self {
        self.frame_rate_hz = hz;
        self
    }

    /// Sets the duration.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Sets the world size.
    pub fn with_world(mut self, world: World) -> Self {
        self.world = world;
        self
    }

    /// Runs a named scenario.
    pub fn run(&self, scenario: ScenarioId) -> Result<ScenarioResult, RunError> {
        info!("Starting scenario: {} (seed={})", scenario.name(), self.seed);
        self.execute(scenario.name(), scenario.setup(), None)
            .map(|(result, _)| result)
    }

    /// Runs an arbitrary setup under the given label.
    pub fn run_setup(&self, label: &str, setup: ScenarioSetup) -> Result<ScenarioResult, RunError> {
        info!("Starting run: {} (seed={})", label, self.seed);
        self.execute(label, setup, None).map(|(result, _)| result)
    }

    /// Runs a setup and records every `every`-th frame for export.
    pub fn run_with_export(
        &self,
        label: &str,
        setup: ScenarioSetup,
        every: u64,
    ) -> Result<(ScenarioResult, SimExport), RunError> {
        info!("Starting recorded run: {} (seed={}, every {} frames)", label, self.seed, every);
        let (result, export) = self.execute(label, setup, Some(every.max(1)))?;
        let export = export.unwrap_or_else(|| SimExport::new(label, self.seed, self.world));
        Ok((result, export))
    }

    fn execute(
        &self,
        label: &str,
        setup: ScenarioSetup,
        record_every: Option<u64>,
    ) -> Result<(ScenarioResult, Option<SimExport>), RunError> {
        let mut config = SimConfig::default()
            .with_seed(self.seed)
            .with_world(self.world)
            .with_population(setup.population);
        config.params.diagnostic_mode = setup.diagnostic;

        let mut world = SimWorld::new(config, self.frame_rate_hz)?;
        let mut export = record_every.map(|_| SimExport::new(label, self.seed, self.world));

        let initial = world.render().counts;
        let shortfall = world.simulation().spawn_shortfall();
        if shortfall > 0 {
            warn!("{}: {} molecules could not be placed", label, shortfall);
        }

        if let Some(export) = export.as_mut() {
            export.add_frame(SimFrame::capture(0, 0.0, &world.render()));
        }

        let target_frames = (self.duration_secs * self.frame_rate_hz as f64).round() as u64;
        let mut failure: Option<String> = None;
        let mut last_reactions = 0u64;

        for _ in 0..target_frames {
            let report = world.frame();
            let snapshot = world.render();

            if let Err(reason) = check_frame(&initial, &snapshot, last_reactions, &self.world) {
                warn!("{}: frame {} failed: {}", label, report.frame, reason);
                failure = Some(format!("frame {}: {}", report.frame, reason));
                break;
            }
            last_reactions = snapshot.reactions;

            if let (Some(export), Some(every)) = (export.as_mut(), record_every) {
                if report.frame % every == 0 {
                    export.add_frame(SimFrame::capture(report.frame, world.time(), &snapshot));
                }
            }

            if report.frame % (self.frame_rate_hz as u64 * 5).max(1) == 0 {
                debug!(
                    "  t={:.1}s | acid={} alcohol={} ester={} water={}",
                    world.time(),
                    snapshot.counts.acid,
                    snapshot.counts.alcohol,
                    snapshot.counts.ester,
                    snapshot.counts.water
                );
            }
        }

        let snapshot = world.render();
        let final_counts = snapshot.counts;
        let limiting = initial.acid.min(initial.alcohol);
        let conversion = if limiting > 0 {
            final_counts.ester as f64 / limiting as f64
        } else {
            0.0
        };
        let passed = failure.is_none();

        if let Some(export) = export.as_mut() {
            export.finalize(passed, snapshot.reactions);
        }

        let result = ScenarioResult {
            scenario: label.to_string(),
            seed: self.seed,
            passed,
            total_frames: world.frame_count(),
            final_time_secs: world.time(),
            initial_counts: initial,
            final_counts,
            reactions: snapshot.reactions,
            conversion,
            spawn_shortfall: shortfall,
            failure_reason: failure,
        };

        Ok((result, export))
    }
}

/// Checks the bookkeeping a viewer relies on after one frame.
fn check_frame(
    initial: &SpeciesCounts,
    snapshot: &Snapshot<'_>,
    last_reactions: u64,
    world: &World,
) -> Result<(), String> {
    let counts = &snapshot.counts;

    if counts.total() != initial.total() {
        return Err(format!(
            "particle count changed: {} -> {}",
            initial.total(),
            counts.total()
        ));
    }
    if counts.acid + counts.ester != initial.acid {
        return Err(format!(
            "acid not balanced: {} acid + {} ester != {}",
            counts.acid, counts.ester, initial.acid
        ));
    }
    if counts.alcohol + counts.ester != initial.alcohol {
        return Err(format!(
            "alcohol not balanced: {} alcohol + {} ester != {}",
            counts.alcohol, counts.ester, initial.alcohol
        ));
    }
    if counts.ester != counts.water {
        return Err(format!("{} ester but {} water", counts.ester, counts.water));
    }
    if snapshot.reactions > last_reactions + 1 {
        return Err(format!(
            "{} reactions in one frame",
            snapshot.reactions - last_reactions
        ));
    }

    // Collision push-apart runs after the wall pass, so a disk may poke out
    // until the next tick, by no more than one contact can push it.
    for particle in snapshot.particles {
        let p = &particle.position;
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(format!("non-finite position for {}", particle.species));
        }
        if !world.contains_disk(p.x, p.y, particle.radius, max_push_out(particle.species)) {
            return Err(format!(
                "{} escaped the world at ({:.1}, {:.1})",
                particle.species, p.x, p.y
            ));
        }
    }

    Ok(())
}

/// Furthest a single collision can shove a disk of `species`: full overlap
/// with the partner, weighted by the partner's share of the mass.
fn max_push_out(species: Species) -> f64 {
    let own = species.params();
    STANDARD
        .iter()
        .map(|(_, other)| {
            (own.collision_radius + other.collision_radius) * other.mass / (own.mass + other.mass)
        })
        .fold(0.0, f64::max)
}
