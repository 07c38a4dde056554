//! Rejection-sampling spawner for non-overlapping populations.

use crate::error::Result;
use crate::math::random_velocity;
use crate::params::{SimParams, SPAWN_ATTEMPTS, SPAWN_MARGIN};
use crate::particle::{Particle, Region};
use crate::species::Species;
use rand::Rng;
use tracing::{debug, warn};

/// Places up to `count` particles of `species` inside `region`.
///
/// Each candidate gets a uniform position in the region and a random
/// velocity bounded by the temperature-scaled spawn speed. A candidate is
/// kept only if it clears every particle in `existing` and every particle
/// accepted earlier in this call by [`SPAWN_MARGIN`]. The whole call shares
/// a budget of [`SPAWN_ATTEMPTS`] candidates, so a crowded region yields
/// fewer particles than asked for. That shortfall is logged, not returned
/// as an error.
///
/// Nothing is inserted into a store; the caller owns the result.
pub fn spawn<R: Rng + ?Sized>(
    rng: &mut R,
    species: Species,
    count: usize,
    region: &Region,
    params: &SimParams,
    existing: &[Particle],
) -> Result<Vec<Particle>> {
    region.validate()?;

    let vmax = params.spawn_speed(species);
    let mut placed: Vec<Particle> = Vec::with_capacity(count);
    let mut attempts = 0usize;

    while placed.len() < count && attempts < SPAWN_ATTEMPTS {
        attempts += 1;

        let position = region.sample(rng);
        let velocity = random_velocity(rng, vmax);
        let candidate = Particle::new(species, position, velocity, rng);

        let clear = existing
            .iter()
            .chain(placed.iter())
            .all(|other| !candidate.overlaps(other, SPAWN_MARGIN));

        if clear {
            placed.push(candidate);
        }
    }

    if placed.len() < count {
        warn!(
            "Spawned {}/{} {} after {} attempts (region too dense)",
            placed.len(),
            count,
            species,
            attempts
        );
    } else {
        debug!("Spawned {} {} in {} attempts", count, species, attempts);
    }

    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::params::World;
    use nalgebra::Vector2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn assert_clear(particles: &[Particle]) {
        for (i, a) in particles.iter().enumerate() {
            for b in &particles[i + 1..] {
                let d = (b.position - a.position).norm();
                assert!(d >= a.radius + b.radius + SPAWN_MARGIN, "overlap at distance {}", d);
            }
        }
    }

    #[test]
    fn test_spawn_fills_roomy_region() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let params = SimParams::default();
        let region = World::default().alcohol_region().unwrap();

        let out = spawn(&mut rng, Species::Alcohol, 18, &region, &params, &[]).unwrap();

        assert_eq!(out.len(), 18);
        assert_clear(&out);
        for p in &out {
            assert!(p.position.x >= region.x0 && p.position.x < region.x1);
            assert!(p.position.y >= region.y0 && p.position.y < region.y1);
            let vmax = params.spawn_speed(Species::Alcohol);
            assert!(p.speed() <= vmax + 1e-9 && p.speed() >= 0.35 * vmax - 1e-9);
        }
    }

    #[test]
    fn test_spawn_avoids_existing_particles() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let params = SimParams::default();
        let region = Region::new(0.0, 300.0, 0.0, 300.0).unwrap();
        let existing = vec![Particle::at_rest(Species::Acid, Vector2::new(150.0, 150.0))];

        let out = spawn(&mut rng, Species::Water, 10, &region, &params, &existing).unwrap();

        let mut all = existing.clone();
        all.extend(out);
        assert_clear(&all);
    }

    #[test]
    fn test_spawn_underfills_dense_region() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let params = SimParams::default();
        // Room for a handful of acid disks at most
        let region = Region::new(0.0, 120.0, 0.0, 120.0).unwrap();

        let out = spawn(&mut rng, Species::Acid, 50, &region, &params, &[]).unwrap();

        assert!(!out.is_empty());
        assert!(out.len() < 50);
        assert_clear(&out);
    }

    #[test]
    fn test_spawn_zero_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let region = Region::new(0.0, 10.0, 0.0, 10.0).unwrap();
        let out = spawn(&mut rng, Species::Ester, 0, &region, &SimParams::default(), &[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_spawn_rejects_degenerate_region() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let region = Region { x0: 5.0, x1: 5.0, y0: 0.0, y1: 10.0 };
        let result = spawn(&mut rng, Species::Acid, 3, &region, &SimParams::default(), &[]);
        assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));
    }
}
