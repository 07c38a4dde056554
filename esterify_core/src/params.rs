//! Simulation parameters, world bounds and fixed reference constants.

use crate::error::{Result, SimError};
use crate::particle::Region;
use crate::species::{Species, STANDARD};
use serde::{Deserialize, Serialize};

/// Nominal update cadence the velocities are expressed against.
pub const FRAME_RATE: f64 = 60.0;

/// Candidate placements tried per `spawn` call.
pub const SPAWN_ATTEMPTS: usize = 12_000;

/// Extra clearance between freshly spawned disks.
pub const SPAWN_MARGIN: f64 = 4.0;

/// Restitution coefficient for particle/particle impulses.
pub const RESTITUTION: f64 = 0.98;

/// Horizontal offset of each product from the reactant midpoint.
pub const PRODUCT_OFFSET: f64 = 14.0;

/// Lowest temperature level.
pub const MIN_TEMPERATURE: u8 = 1;

/// Highest temperature level.
pub const MAX_TEMPERATURE: u8 = 5;

// =============================================================================
// TEMPERATURE
// =============================================================================

/// Integer temperature control, 1 (cold) to 5 (hot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Temperature(u8);

impl Temperature {
    /// Validates a temperature level.
    pub fn new(level: u8) -> Result<Self> {
        if (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&level) {
            Ok(Self(level))
        } else {
            Err(SimError::invalid(format!(
                "temperature {} outside {}..={}",
                level, MIN_TEMPERATURE, MAX_TEMPERATURE
            )))
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Level as a float factor for the scaling formulas.
    pub fn factor(self) -> f64 {
        self.0 as f64
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self(MIN_TEMPERATURE)
    }
}

impl TryFrom<u8> for Temperature {
    type Error = SimError;

    fn try_from(level: u8) -> Result<Self> {
        Temperature::new(level)
    }
}

impl From<Temperature> for u8 {
    fn from(t: Temperature) -> u8 {
        t.0
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// =============================================================================
// MOTION PRESETS
// =============================================================================

/// A set of tunables that can be swapped as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionPreset {
    /// Seconds per tick
    pub time_step: f64,

    /// Scales how far a particle travels per tick
    pub speed_multiplier: f64,

    /// Base per-contact reaction probability
    pub reaction_chance: f64,

    /// Opposing x-velocity given to fresh products
    pub kick_impulse: f64,
}

impl MotionPreset {
    /// Classroom preset.
    pub const BASE: MotionPreset = MotionPreset {
        time_step: 1.0 / 60.0,
        speed_multiplier: 1.0,
        reaction_chance: 0.010,
        kick_impulse: 0.35,
    };

    /// Hidden developer preset: faster motion, more reactions, stronger kick.
    pub const DIAGNOSTIC: MotionPreset = MotionPreset {
        time_step: 1.0 / 60.0,
        speed_multiplier: 2.5,
        reaction_chance: 0.16,
        kick_impulse: 0.85,
    };

    /// Rejects values that would break the integrator or the Bernoulli draw.
    pub fn validate(&self) -> Result<()> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(SimError::invalid("time_step must be finite and > 0"));
        }
        if !self.speed_multiplier.is_finite() || self.speed_multiplier <= 0.0 {
            return Err(SimError::invalid("speed_multiplier must be finite and > 0"));
        }
        if !(0.0..=1.0).contains(&self.reaction_chance) {
            return Err(SimError::invalid("reaction_chance must lie in [0, 1]"));
        }
        if !self.kick_impulse.is_finite() {
            return Err(SimError::invalid("kick_impulse must be finite"));
        }
        Ok(())
    }
}

impl Default for MotionPreset {
    fn default() -> Self {
        Self::BASE
    }
}

// =============================================================================
// SIMULATION PARAMETERS
// =============================================================================

/// Mutable simulation parameters, owned by the `Simulation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Preset used in normal operation
    pub base: MotionPreset,

    /// Preset used while diagnostic mode is on
    pub diagnostic: MotionPreset,

    /// Current temperature level
    pub temperature: Temperature,

    /// Selects the diagnostic preset
    pub diagnostic_mode: bool,

    /// Thermal jitter per temperature level
    pub jitter_rate: f64,

    /// Extra speed-limit factor while diagnostic mode is on
    pub diagnostic_speed_cap: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            base: MotionPreset::BASE,
            diagnostic: MotionPreset::DIAGNOSTIC,
            temperature: Temperature::default(),
            diagnostic_mode: false,
            jitter_rate: 0.010,
            diagnostic_speed_cap: 1.25,
        }
    }
}

impl SimParams {
    /// The preset currently in force.
    pub fn active(&self) -> &MotionPreset {
        if self.diagnostic_mode {
            &self.diagnostic
        } else {
            &self.base
        }
    }

    /// Distance scale applied to velocity each tick.
    pub fn displacement_scale(&self) -> f64 {
        let preset = self.active();
        FRAME_RATE * preset.time_step * preset.speed_multiplier
    }

    /// Half-width of the uniform velocity jitter.
    pub fn jitter_amplitude(&self) -> f64 {
        self.jitter_rate * self.temperature.factor()
    }

    /// Per-contact reaction probability at the current temperature.
    pub fn reaction_probability(&self) -> f64 {
        self.active().reaction_chance * (0.6 + 0.4 * self.temperature.factor())
    }

    /// Speed bound enforced by the integrator.
    pub fn speed_limit(&self, species: Species) -> f64 {
        let cap = if self.diagnostic_mode {
            self.diagnostic_speed_cap
        } else {
            1.0
        };
        species.params().max_speed * (0.9 + 0.25 * self.temperature.factor()) * cap
    }

    /// Upper bound of the speed drawn for newly created particles.
    pub fn spawn_speed(&self, species: Species) -> f64 {
        species.params().max_speed * (0.75 + 0.25 * self.temperature.factor())
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.diagnostic.validate()?;
        if !self.jitter_rate.is_finite() || self.jitter_rate < 0.0 {
            return Err(SimError::invalid("jitter_rate must be finite and >= 0"));
        }
        if !self.diagnostic_speed_cap.is_finite() || self.diagnostic_speed_cap <= 0.0 {
            return Err(SimError::invalid("diagnostic_speed_cap must be finite and > 0"));
        }
        Ok(())
    }
}

// =============================================================================
// WORLD
// =============================================================================

/// The rectangular box `[0, width] × [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f64,
    pub height: f64,
}

impl World {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let world = Self { width, height };
        world.validate()?;
        Ok(world)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || !self.height.is_finite() || self.width <= 0.0 || self.height <= 0.0 {
            return Err(SimError::invalid(format!(
                "world must have positive finite size, got {}x{}",
                self.width, self.height
            )));
        }
        let min_side = 2.0 * STANDARD.largest_radius();
        if self.width < min_side || self.height < min_side {
            return Err(SimError::invalid(format!(
                "world {}x{} cannot hold a disk of diameter {}",
                self.width, self.height, min_side
            )));
        }
        Ok(())
    }

    /// Where the acid population starts (lower middle band).
    pub fn acid_region(&self) -> Result<Region> {
        Region::fraction_of(self, 0.25, 0.75, 0.60, 0.90)
    }

    /// Where the alcohol population starts (wide upper band).
    pub fn alcohol_region(&self) -> Result<Region> {
        Region::fraction_of(self, 0.15, 0.85, 0.18, 0.74)
    }

    /// True when a disk of `radius` at `(x, y)` lies inside the box, allowing `tolerance`.
    pub fn contains_disk(&self, x: f64, y: f64, radius: f64, tolerance: f64) -> bool {
        x - radius >= -tolerance
            && x + radius <= self.width + tolerance
            && y - radius >= -tolerance
            && y + radius <= self.height + tolerance
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 640.0,
        }
    }
}
