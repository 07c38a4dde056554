//! The simulation facade driven by an external frame loop.
//!
//! One [`Simulation::tick`] runs the integrator, then the pairwise scan
//! (reaction engine first, elastic resolution otherwise). The host decides
//! when to call it; nothing here reads the wall clock.

use crate::collision::{resolve_pairs, ScanReport};
use crate::error::Result;
use crate::integrator::integrate;
use crate::params::{SimParams, Temperature, World};
use crate::particle::{Particle, ParticleStore, SpeciesCounts};
use crate::spawner::spawn;
use crate::species::Species;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Initial population requested by a reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Population {
    /// Acid molecules to spawn
    pub acid: usize,

    /// Alcohol molecules to spawn
    pub alcohol: usize,

    /// Temperature level 1..=5
    pub temperature: u8,
}

impl Default for Population {
    fn default() -> Self {
        Self {
            acid: 12,
            alcohol: 18,
            temperature: 1,
        }
    }
}

/// Configuration for a simulation instance.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Seed for the physics RNG
    pub seed: u64,

    /// Box the particles live in
    pub world: World,

    /// Tunables and presets
    pub params: SimParams,

    /// Population spawned by `Simulation::new`
    pub population: Population,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world: World::default(),
            params: SimParams::default(),
            population: Population::default(),
        }
    }
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_world(mut self, world: World) -> Self {
        self.world = world;
        self
    }

    pub fn with_params(mut self, params: SimParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_population(mut self, population: Population) -> Self {
        self.population = population;
        self
    }
}

/// What a call to [`Simulation::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused: state left untouched
    Paused,

    /// One step was taken
    Advanced(ScanReport),
}

impl TickOutcome {
    /// True when this tick produced a reaction.
    pub fn reacted(&self) -> bool {
        matches!(self, TickOutcome::Advanced(report) if report.reacted)
    }
}

/// Read-only view of the simulation for rendering and HUD display.
///
/// Borrowed from the simulation; drop it before the next tick.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub particles: &'a [Particle],
    pub counts: SpeciesCounts,
    pub temperature: Temperature,
    pub paused: bool,
    pub diagnostic: bool,
    pub ticks: u64,
    pub reactions: u64,
}

/// The esterification simulation.
pub struct Simulation {
    /// Physics RNG (jitter, spawning, reaction draws)
    rng: ChaCha8Rng,

    /// Live particles
    store: ParticleStore,

    /// Mutable parameters
    params: SimParams,

    /// World bounds
    world: World,

    /// Pause flag; `tick` is a no-op while set
    paused: bool,

    /// Ticks advanced since the last reset
    ticks: u64,

    /// Reactions since the last reset
    reactions: u64,

    /// Particles the last reset asked for but could not place
    shortfall: usize,
}

impl Simulation {
    /// Creates a simulation and spawns its initial population.
    pub fn new(config: SimConfig) -> Result<Self> {
        let mut sim = Self::empty(config.seed, config.world, config.params)?;
        sim.configure(config.population)?;
        Ok(sim)
    }

    /// Creates a simulation with no particles.
    pub fn empty(seed: u64, world: World, params: SimParams) -> Result<Self> {
        world.validate()?;
        params.validate()?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            store: ParticleStore::new(),
            params,
            world,
            paused: false,
            ticks: 0,
            reactions: 0,
            shortfall: 0,
        })
    }

    /// Full reset: clears the store and respawns both reactant populations
    /// in their start regions. Unpauses.
    pub fn configure(&mut self, population: Population) -> Result<()> {
        let temperature = Temperature::new(population.temperature)?;
        let acid_region = self.world.acid_region()?;
        let alcohol_region = self.world.alcohol_region()?;

        self.params.temperature = temperature;
        self.store.clear();

        let acids = spawn(
            &mut self.rng,
            Species::Acid,
            population.acid,
            &acid_region,
            &self.params,
            self.store.as_slice(),
        )?;
        self.store.extend(acids);

        let alcohols = spawn(
            &mut self.rng,
            Species::Alcohol,
            population.alcohol,
            &alcohol_region,
            &self.params,
            self.store.as_slice(),
        )?;
        self.store.extend(alcohols);

        let counts = self.store.counts();
        self.shortfall = (population.acid - counts.acid) + (population.alcohol - counts.alcohol);
        self.paused = false;
        self.ticks = 0;
        self.reactions = 0;

        info!(
            "Reset: {} acid, {} alcohol at {}",
            counts.acid, counts.alcohol, temperature
        );
        Ok(())
    }

    /// Changes temperature without touching the particles.
    pub fn set_temperature(&mut self, level: u8) -> Result<()> {
        self.params.temperature = Temperature::new(level)?;
        debug!("Temperature set to {}", self.params.temperature);
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flips the pause flag and returns the new value.
    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Switches between the base and diagnostic presets.
    pub fn set_diagnostic_mode(&mut self, enabled: bool) {
        if self.params.diagnostic_mode != enabled {
            debug!("Diagnostic mode {}", if enabled { "ON" } else { "OFF" });
        }
        self.params.diagnostic_mode = enabled;
    }

    /// Flips diagnostic mode and returns the new value.
    pub fn toggle_diagnostic_mode(&mut self) -> bool {
        let enabled = !self.params.diagnostic_mode;
        self.set_diagnostic_mode(enabled);
        enabled
    }

    /// Advances one step unless paused.
    pub fn tick(&mut self) -> TickOutcome {
        if self.paused {
            return TickOutcome::Paused;
        }

        integrate(&mut self.store, &self.params, &self.world, &mut self.rng);
        let report = resolve_pairs(&mut self.store, &self.params, &mut self.rng);

        self.ticks += 1;
        if report.reacted {
            self.reactions += 1;
        }

        TickOutcome::Advanced(report)
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            particles: self.store.as_slice(),
            counts: self.store.counts(),
            temperature: self.params.temperature,
            paused: self.paused,
            diagnostic: self.params.diagnostic_mode,
            ticks: self.ticks,
            reactions: self.reactions,
        }
    }

    pub fn counts(&self) -> SpeciesCounts {
        self.store.counts()
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Particles the last reset could not place.
    pub fn spawn_shortfall(&self) -> usize {
        self.shortfall
    }

    /// Direct store access for harnesses that stage exact layouts.
    pub fn store_mut(&mut self) -> &mut ParticleStore {
        &mut self.store
    }
}
