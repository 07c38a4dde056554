//! Per-tick kinematics: drift, thermal jitter, spin, speed cap and walls.

use crate::math::rand_range;
use crate::params::{SimParams, World};
use crate::particle::{Particle, ParticleStore};
use rand::Rng;

/// Which wall(s) a particle touched during [`wall_bounce`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Advances every particle by one tick.
///
/// Updates are particle-local, so iteration order does not matter.
pub fn integrate<R: Rng + ?Sized>(
    store: &mut ParticleStore,
    params: &SimParams,
    world: &World,
    rng: &mut R,
) {
    let scale = params.displacement_scale();
    let jitter = params.jitter_amplitude();

    for particle in store.iter_mut() {
        particle.position += particle.velocity * scale;

        particle.velocity.x += rand_range(rng, -jitter, jitter);
        particle.velocity.y += rand_range(rng, -jitter, jitter);

        particle.angle += particle.angular_velocity;

        clamp_speed(particle, params.speed_limit(particle.species));

        wall_bounce(particle, world);
    }
}

/// Scales the velocity down to `limit` if it is faster, keeping its heading.
pub fn clamp_speed(particle: &mut Particle, limit: f64) {
    let speed = particle.speed();
    if speed > limit {
        particle.velocity *= limit / speed;
    }
}

/// Reflects a particle off the world boundary.
///
/// A disk crossing a wall is moved back so it touches the wall and the
/// velocity component normal to that wall is inverted. No energy is lost.
pub fn wall_bounce(particle: &mut Particle, world: &World) -> WallHits {
    let r = particle.radius;
    let mut hits = WallHits::default();

    if particle.position.x - r < 0.0 {
        particle.position.x = r;
        particle.velocity.x = -particle.velocity.x;
        hits.left = true;
    }
    if particle.position.x + r > world.width {
        particle.position.x = world.width - r;
        particle.velocity.x = -particle.velocity.x;
        hits.right = true;
    }
    if particle.position.y - r < 0.0 {
        particle.position.y = r;
        particle.velocity.y = -particle.velocity.y;
        hits.top = true;
    }
    if particle.position.y + r > world.height {
        particle.position.y = world.height - r;
        particle.velocity.y = -particle.velocity.y;
        hits.bottom = true;
    }

    hits
}
