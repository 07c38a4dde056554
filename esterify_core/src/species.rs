//! Species registry - static physical parameters per molecule type.
//!
//! Four species take part in the esterification:
//!
//! ```text
//!   Acid (A)  +  Alcohol (B)  ──►  Ester (C)  +  Water (D)
//!   salicylic     methanol         methyl         H2O
//!   acid                           salicylate
//! ```
//!
//! Parameters are immutable for the lifetime of the process and are
//! addressed through the [`Species`] enum rather than string keys.

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual scale folded into the collision radii so disks match the drawn
/// molecules.
const VISUAL_SCALE: f64 = 1.45;

/// Molecule type of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Species {
    /// Reactant A - salicylic acid
    Acid = 0,

    /// Reactant B - methanol
    Alcohol = 1,

    /// Product C - methyl salicylate
    Ester = 2,

    /// Product D - water
    Water = 3,
}

impl Species {
    /// Number of registered species.
    pub const COUNT: usize = 4;

    /// All species in id order.
    pub const ALL: [Species; Species::COUNT] =
        [Species::Acid, Species::Alcohol, Species::Ester, Species::Water];

    /// Returns the numeric id.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Resolves a numeric id.
    pub fn from_id(id: u8) -> Result<Species> {
        Species::ALL
            .get(id as usize)
            .copied()
            .ok_or_else(|| SimError::unknown_species(id))
    }

    /// Short machine name.
    pub fn name(self) -> &'static str {
        match self {
            Species::Acid => "acid",
            Species::Alcohol => "alcohol",
            Species::Ester => "ester",
            Species::Water => "water",
        }
    }

    /// Human-readable compound name.
    pub fn compound(self) -> &'static str {
        match self {
            Species::Acid => "salicylic acid",
            Species::Alcohol => "methanol",
            Species::Ester => "methyl salicylate",
            Species::Water => "water",
        }
    }

    /// True exactly for one acid and one alcohol, in either order.
    pub fn is_reactant_pair(a: Species, b: Species) -> bool {
        matches!(
            (a, b),
            (Species::Acid, Species::Alcohol) | (Species::Alcohol, Species::Acid)
        )
    }

    /// Physical parameters from the standard registry.
    pub fn params(self) -> &'static SpeciesParams {
        STANDARD.lookup(self)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Species {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "acid" | "a" | "sa" => Ok(Species::Acid),
            "alcohol" | "b" | "meoh" => Ok(Species::Alcohol),
            "ester" | "c" | "ms" => Ok(Species::Ester),
            "water" | "d" | "h2o" => Ok(Species::Water),
            _ => Err(SimError::unknown_species(s)),
        }
    }
}

impl TryFrom<u8> for Species {
    type Error = SimError;

    fn try_from(id: u8) -> Result<Self> {
        Species::from_id(id)
    }
}

/// Static physical parameters of a species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeciesParams {
    /// Collision disk radius (world units)
    pub collision_radius: f64,

    /// Mass (arbitrary units, only ratios matter)
    pub mass: f64,

    /// Base speed limit before temperature scaling (units per reference frame)
    pub max_speed: f64,
}

/// Enum-indexed table of species parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesRegistry {
    entries: [SpeciesParams; Species::COUNT],
}

/// The process-wide registry.
pub static STANDARD: SpeciesRegistry = SpeciesRegistry {
    entries: [
        // Acid
        SpeciesParams { collision_radius: 18.0 * VISUAL_SCALE, mass: 5.0, max_speed: 0.55 },
        // Alcohol
        SpeciesParams { collision_radius: 14.0 * VISUAL_SCALE, mass: 1.0, max_speed: 1.55 },
        // Ester
        SpeciesParams { collision_radius: 19.0 * VISUAL_SCALE, mass: 4.6, max_speed: 0.75 },
        // Water
        SpeciesParams { collision_radius: 12.0 * VISUAL_SCALE, mass: 0.8, max_speed: 1.70 },
    ],
};

impl SpeciesRegistry {
    /// Returns the parameters of a species.
    pub fn lookup(&self, species: Species) -> &SpeciesParams {
        &self.entries[species as usize]
    }

    /// Returns the parameters of a raw species id.
    pub fn lookup_id(&self, id: u8) -> Result<&SpeciesParams> {
        Species::from_id(id).map(|s| self.lookup(s))
    }

    /// Largest collision radius of any species.
    pub fn largest_radius(&self) -> f64 {
        self.entries
            .iter()
            .map(|p| p.collision_radius)
            .fold(0.0, f64::max)
    }

    /// Iterates `(species, params)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (Species, &SpeciesParams)> {
        Species::ALL.iter().copied().zip(self.entries.iter())
    }
}
