//! Stochastic esterification: acid + alcohol → ester + water.

use crate::math::random_velocity;
use crate::params::{SimParams, PRODUCT_OFFSET};
use crate::particle::{Particle, ParticleStore};
use crate::species::Species;
use nalgebra::Vector2;
use rand::Rng;
use tracing::debug;

/// Offers a colliding pair the chance to react.
///
/// Only an acid/alcohol pair is eligible; anything else returns `false`
/// without drawing a random number. Eligible pairs react when a uniform
/// draw in `[0, 1)` is at most [`SimParams::reaction_probability`]. Each
/// tick of contact is an independent trial.
///
/// On success the two reactants are removed and an ester and a water are
/// appended, straddling the reactants' midpoint and kicked apart along x.
/// Indices into `store` are invalid afterwards.
pub fn try_react<R: Rng + ?Sized>(
    store: &mut ParticleStore,
    i: usize,
    j: usize,
    params: &SimParams,
    rng: &mut R,
) -> bool {
    let (a, b) = match (store.get(i), store.get(j)) {
        (Some(a), Some(b)) if i != j => (a, b),
        _ => return false,
    };

    if !Species::is_reactant_pair(a.species, b.species) {
        return false;
    }

    let draw: f64 = rng.gen();
    if draw > params.reaction_probability() {
        return false;
    }

    let midpoint = (a.position + b.position) / 2.0;
    let kick = params.active().kick_impulse;

    let ester = spawn_product(Species::Ester, midpoint, -PRODUCT_OFFSET, kick, params, rng);
    let water = spawn_product(Species::Water, midpoint, PRODUCT_OFFSET, -kick, params, rng);

    store.replace_pair(i, j, [ester, water]);

    debug!(
        "Reaction at ({:.1}, {:.1}) - {} particles",
        midpoint.x,
        midpoint.y,
        store.len()
    );

    true
}

fn spawn_product<R: Rng + ?Sized>(
    species: Species,
    midpoint: Vector2<f64>,
    offset_x: f64,
    kick_x: f64,
    params: &SimParams,
    rng: &mut R,
) -> Particle {
    let mut velocity = random_velocity(rng, params.spawn_speed(species));
    velocity.x += kick_x;
    let position = midpoint + Vector2::new(offset_x, 0.0);
    Particle::new(species, position, velocity, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::mock::StepRng;

    fn at(species: Species, x: f64, y: f64) -> Particle {
        Particle::at_rest(species, Vector2::new(x, y))
    }

    fn store_of(particles: Vec<Particle>) -> ParticleStore {
        particles.into_iter().collect()
    }

    /// Every draw is 0.0, so any eligible pair reacts.
    fn forced() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Every draw is just below 1.0, so nothing reacts.
    fn refused() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_forced_reaction_replaces_reactants() {
        let mut store = store_of(vec![at(Species::Acid, 200.0, 300.0), at(Species::Alcohol, 230.0, 300.0)]);

        assert!(try_react(&mut store, 0, 1, &SimParams::default(), &mut forced()));

        let counts = store.counts();
        assert_eq!(counts.acid, 0);
        assert_eq!(counts.alcohol, 0);
        assert_eq!(counts.ester, 1);
        assert_eq!(counts.water, 1);
    }

    #[test]
    fn test_products_straddle_midpoint_with_kick() {
        let params = SimParams::default();
        let mut store = store_of(vec![at(Species::Alcohol, 200.0, 300.0), at(Species::Acid, 230.0, 310.0)]);

        assert!(try_react(&mut store, 1, 0, &params, &mut forced()));

        let ester = store.iter().find(|p| p.species == Species::Ester).unwrap();
        let water = store.iter().find(|p| p.species == Species::Water).unwrap();
        assert_relative_eq!(ester.position.x, 215.0 - PRODUCT_OFFSET, epsilon = 1e-9);
        assert_relative_eq!(water.position.x, 215.0 + PRODUCT_OFFSET, epsilon = 1e-9);
        assert_relative_eq!(ester.position.y, 305.0, epsilon = 1e-9);

        // Zero draws give heading 0 and the slowest speed in the band
        let kick = params.active().kick_impulse;
        assert_relative_eq!(
            ester.velocity.x,
            0.35 * params.spawn_speed(Species::Ester) + kick,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            water.velocity.x,
            0.35 * params.spawn_speed(Species::Water) - kick,
            epsilon = 1e-9
        );
        assert_eq!(ester.radius, Species::Ester.params().collision_radius);
        assert_eq!(water.mass, Species::Water.params().mass);
    }

    #[test]
    fn test_count_preserved_and_bystanders_kept() {
        let mut store = store_of(vec![
            at(Species::Water, 10.0, 10.0),
            at(Species::Acid, 200.0, 300.0),
            at(Species::Ester, 50.0, 50.0),
            at(Species::Alcohol, 230.0, 300.0),
        ]);

        assert!(try_react(&mut store, 1, 3, &SimParams::default(), &mut forced()));

        assert_eq!(store.len(), 4);
        assert_eq!(store.get(0).unwrap().position, Vector2::new(10.0, 10.0));
        assert_eq!(store.get(1).unwrap().position, Vector2::new(50.0, 50.0));
        assert_eq!(store.get(2).unwrap().species, Species::Ester);
        assert_eq!(store.get(3).unwrap().species, Species::Water);
    }

    #[test]
    fn test_ineligible_pairs_never_react() {
        let pairs = [
            (Species::Acid, Species::Acid),
            (Species::Alcohol, Species::Alcohol),
            (Species::Acid, Species::Water),
            (Species::Alcohol, Species::Ester),
            (Species::Ester, Species::Water),
        ];
        for (sa, sb) in pairs {
            let mut store = store_of(vec![at(sa, 100.0, 100.0), at(sb, 110.0, 100.0)]);
            let before = store.as_slice().to_vec();

            assert!(!try_react(&mut store, 0, 1, &SimParams::default(), &mut forced()));
            assert_eq!(store.as_slice(), before.as_slice());
        }
    }

    #[test]
    fn test_probability_miss_leaves_store_alone() {
        let mut store = store_of(vec![at(Species::Acid, 100.0, 100.0), at(Species::Alcohol, 110.0, 100.0)]);

        assert!(!try_react(&mut store, 0, 1, &SimParams::default(), &mut refused()));
        assert_eq!(store.counts().acid, 1);
        assert_eq!(store.counts().alcohol, 1);
    }

    #[test]
    fn test_zero_chance_reacts_only_on_zero_draw() {
        let mut params = SimParams::default();
        params.base.reaction_chance = 0.0;
        let mut store = store_of(vec![at(Species::Acid, 100.0, 100.0), at(Species::Alcohol, 110.0, 100.0)]);

        // A zero draw still satisfies draw <= 0
        assert!(try_react(&mut store, 0, 1, &params, &mut forced()));

        let mut store = store_of(vec![at(Species::Acid, 100.0, 100.0), at(Species::Alcohol, 110.0, 100.0)]);
        assert!(!try_react(&mut store, 0, 1, &params, &mut refused()));
    }

    #[test]
    fn test_out_of_range_index() {
        let mut store = store_of(vec![at(Species::Acid, 100.0, 100.0)]);
        assert!(!try_react(&mut store, 0, 5, &SimParams::default(), &mut forced()));
        assert!(!try_react(&mut store, 0, 0, &SimParams::default(), &mut forced()));
    }
}
