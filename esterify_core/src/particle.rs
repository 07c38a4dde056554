//! Particles and the store that owns them.

use crate::error::{Result, SimError};
use crate::math::rand_range;
use crate::math::random_angle;
use crate::params::World;
use crate::species::Species;
use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bound on the per-frame spin assigned at creation (radians per tick).
pub const MAX_ANGULAR_VELOCITY: f64 = 0.015;

/// A live molecule in the simulation.
///
/// `radius` and `mass` are copied from the species registry when the
/// particle is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Molecule type
    pub species: Species,

    /// Centre position (world units)
    pub position: Vector2<f64>,

    /// Velocity (world units per reference frame)
    pub velocity: Vector2<f64>,

    /// Drawing orientation (radians)
    pub angle: f64,

    /// Constant spin applied to `angle` every tick
    pub angular_velocity: f64,

    /// Collision disk radius
    pub radius: f64,

    /// Mass
    pub mass: f64,
}

impl Particle {
    /// Creates a particle with a random orientation and spin.
    pub fn new<R: Rng + ?Sized>(
        species: Species,
        position: Vector2<f64>,
        velocity: Vector2<f64>,
        rng: &mut R,
    ) -> Self {
        let mut particle = Self::at_rest(species, position);
        particle.velocity = velocity;
        particle.angle = random_angle(rng);
        particle.angular_velocity = rand_range(rng, -MAX_ANGULAR_VELOCITY, MAX_ANGULAR_VELOCITY);
        particle
    }

    /// Creates a motionless, unrotated particle.
    pub fn at_rest(species: Species, position: Vector2<f64>) -> Self {
        let params = species.params();
        Self {
            species,
            position,
            velocity: Vector2::zeros(),
            angle: 0.0,
            angular_velocity: 0.0,
            radius: params.collision_radius,
            mass: params.mass,
        }
    }

    /// Builder-style velocity override.
    pub fn with_velocity(mut self, velocity: Vector2<f64>) -> Self {
        self.velocity = velocity;
        self
    }

    /// Current speed.
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Linear momentum `m·v`.
    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    /// Kinetic energy `½·m·|v|²`.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// True when the disks, grown by `margin`, intersect.
    pub fn overlaps(&self, other: &Particle, margin: f64) -> bool {
        (other.position - self.position).norm() < self.radius + other.radius + margin
    }
}

/// Axis-aligned rectangle used as a spawn area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Region {
    /// Creates a region, rejecting degenerate or non-finite bounds.
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Result<Self> {
        let finite = [x0, x1, y0, y1].iter().all(|v| v.is_finite());
        if !finite {
            return Err(SimError::invalid("region bounds must be finite"));
        }
        if x0 >= x1 || y0 >= y1 {
            return Err(SimError::invalid(format!(
                "degenerate region x:[{}, {}] y:[{}, {}]",
                x0, x1, y0, y1
            )));
        }
        Ok(Self { x0, x1, y0, y1 })
    }

    /// Region spanning the given fractions of the world extent.
    pub fn fraction_of(world: &World, fx0: f64, fx1: f64, fy0: f64, fy1: f64) -> Result<Self> {
        Self::new(
            world.width * fx0,
            world.width * fx1,
            world.height * fy0,
            world.height * fy1,
        )
    }

    /// Re-checks the bounds of a region built by struct literal.
    pub fn validate(&self) -> Result<()> {
        Self::new(self.x0, self.x1, self.y0, self.y1).map(|_| ())
    }

    /// Uniform point inside the region.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2<f64> {
        Vector2::new(
            rand_range(rng, self.x0, self.x1),
            rand_range(rng, self.y0, self.y1),
        )
    }
}

/// Per-species population counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesCounts {
    pub acid: usize,
    pub alcohol: usize,
    pub ester: usize,
    pub water: usize,
}

impl SpeciesCounts {
    /// Count for one species.
    pub fn get(&self, species: Species) -> usize {
        match species {
            Species::Acid => self.acid,
            Species::Alcohol => self.alcohol,
            Species::Ester => self.ester,
            Species::Water => self.water,
        }
    }

    fn bump(&mut self, species: Species) {
        match species {
            Species::Acid => self.acid += 1,
            Species::Alcohol => self.alcohol += 1,
            Species::Ester => self.ester += 1,
            Species::Water => self.water += 1,
        }
    }

    /// Total particle count.
    pub fn total(&self) -> usize {
        self.acid + self.alcohol + self.ester + self.water
    }
}

impl<'a> FromIterator<&'a Particle> for SpeciesCounts {
    fn from_iter<I: IntoIterator<Item = &'a Particle>>(iter: I) -> Self {
        let mut counts = SpeciesCounts::default();
        for particle in iter {
            counts.bump(particle.species);
        }
        counts
    }
}

/// Unordered collection of live particles.
///
/// Indices are only meaningful within a single tick; a reaction moves
/// particles around, so callers must not hold on to them.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Removes every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Mutable access to two distinct particles at once.
    ///
    /// # Panics
    /// If `i == j` or either index is out of bounds.
    pub fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Particle, &mut Particle) {
        assert_ne!(i, j, "pair_mut needs two distinct indices");
        if i < j {
            let (head, tail) = self.particles.split_at_mut(j);
            (&mut head[i], &mut tail[0])
        } else {
            let (head, tail) = self.particles.split_at_mut(i);
            (&mut tail[0], &mut head[j])
        }
    }

    /// Removes the particles at `i` and `j` and appends `replacements`.
    ///
    /// The higher index is removed first so the lower one still refers to
    /// the intended particle. Particles after the removed slots shift down.
    pub fn replace_pair(&mut self, i: usize, j: usize, replacements: [Particle; 2]) -> [Particle; 2] {
        let (hi, lo) = if i > j { (i, j) } else { (j, i) };
        let removed_hi = self.particles.remove(hi);
        let removed_lo = self.particles.remove(lo);
        self.particles.extend(replacements);
        [removed_lo, removed_hi]
    }

    /// Current population per species.
    pub fn counts(&self) -> SpeciesCounts {
        self.particles.iter().collect()
    }
}

impl Extend<Particle> for ParticleStore {
    fn extend<I: IntoIterator<Item = Particle>>(&mut self, iter: I) {
        self.particles.extend(iter);
    }
}

impl FromIterator<Particle> for ParticleStore {
    fn from_iter<I: IntoIterator<Item = Particle>>(iter: I) -> Self {
        Self {
            particles: iter.into_iter().collect(),
        }
    }
}
