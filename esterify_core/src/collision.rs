//! Pairwise collision detection and elastic impulse resolution.

use crate::math::{separation, MIN_DISTANCE};
use crate::params::{SimParams, RESTITUTION};
use crate::particle::{Particle, ParticleStore};
use crate::reaction::try_react;
use rand::Rng;

/// What [`resolve_collision`] did with a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Disks do not overlap; nothing changed
    Apart,

    /// Pushed apart, but already moving away from each other, so no impulse
    Separating,

    /// Pushed apart and impulse applied
    Resolved,
}

/// Result of one pairwise scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Overlapping pairs that went through physical resolution
    pub contacts: usize,

    /// Whether a reaction fired (and cut the scan short)
    pub reacted: bool,
}

/// True when the two disks overlap.
pub fn in_contact(a: &Particle, b: &Particle) -> bool {
    (b.position - a.position).norm() < a.radius + b.radius
}

/// Resolves an overlapping pair as a near-elastic collision.
///
/// Both disks are first pushed apart along the line of centres, each by the
/// other's share of the total mass. If the pair is approaching, an impulse
/// with restitution [`RESTITUTION`] is then exchanged along the normal;
/// momentum is conserved exactly.
pub fn resolve_collision(a: &mut Particle, b: &mut Particle) -> CollisionOutcome {
    let delta = b.position - a.position;
    let dist = separation(&a.position, &b.position);
    let overlap = a.radius + b.radius - dist;
    if overlap <= 0.0 {
        return CollisionOutcome::Apart;
    }

    let normal = if delta.norm() >= MIN_DISTANCE {
        delta / dist
    } else {
        // Coincident centres: pick an arbitrary axis
        nalgebra::Vector2::x()
    };

    let total = a.mass + b.mass;
    a.position -= normal * (overlap * b.mass / total);
    b.position += normal * (overlap * a.mass / total);

    let relative = (b.velocity - a.velocity).dot(&normal);
    if relative >= 0.0 {
        return CollisionOutcome::Separating;
    }

    let impulse = -(1.0 + RESTITUTION) * relative / (1.0 / a.mass + 1.0 / b.mass);
    a.velocity -= normal * (impulse / a.mass);
    b.velocity += normal * (impulse / b.mass);

    CollisionOutcome::Resolved
}

/// Brute-force O(n²) scan over every unordered pair.
///
/// Each overlapping pair is first offered to the reaction engine. A
/// reaction rewrites the store, so the scan stops right there: at most one
/// reaction per tick, and the remaining overlaps are looked at next tick.
pub fn resolve_pairs<R: Rng + ?Sized>(
    store: &mut ParticleStore,
    params: &SimParams,
    rng: &mut R,
) -> ScanReport {
    let mut report = ScanReport::default();

    for i in 0..store.len() {
        for j in (i + 1)..store.len() {
            let touching = match (store.get(i), store.get(j)) {
                (Some(a), Some(b)) => in_contact(a, b),
                _ => false,
            };
            if !touching {
                continue;
            }

            if try_react(store, i, j, params, rng) {
                report.reacted = true;
                return report;
            }

            let (a, b) = store.pair_mut(i, j);
            resolve_collision(a, b);
            report.contacts += 1;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Species;
    use approx::assert_relative_eq;
    use nalgebra::Vector2;
    use rand::rngs::mock::StepRng;

    fn particle(species: Species, x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle::at_rest(species, Vector2::new(x, y)).with_velocity(Vector2::new(vx, vy))
    }

    #[test]
    fn test_head_on_conserves_momentum() {
        let mut a = particle(Species::Acid, 100.0, 100.0, 1.0, 0.0);
        let mut b = particle(Species::Water, 140.0, 100.0, -1.0, 0.0);
        let before = a.momentum() + b.momentum();

        assert_eq!(resolve_collision(&mut a, &mut b), CollisionOutcome::Resolved);

        let after = a.momentum() + b.momentum();
        assert_relative_eq!(before.x, after.x, epsilon = 1e-9);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-9);
        assert!(a.velocity.x < 1.0);
        assert!(b.velocity.x > 0.0);
    }

    #[test]
    fn test_energy_loss_matches_restitution() {
        let mut a = particle(Species::Alcohol, 100.0, 100.0, 1.0, 0.0);
        let mut b = particle(Species::Alcohol, 130.0, 100.0, -1.0, 0.0);

        resolve_collision(&mut a, &mut b);

        // Equal masses, head-on: velocities swap scaled by e
        assert_relative_eq!(a.velocity.x, -RESTITUTION, epsilon = 1e-12);
        assert_relative_eq!(b.velocity.x, RESTITUTION, epsilon = 1e-12);
        let ke = a.kinetic_energy() + b.kinetic_energy();
        assert!(ke < 1.0 && ke > 0.95);
    }

    #[test]
    fn test_depenetration_weighted_by_mass() {
        let mut heavy = particle(Species::Acid, 100.0, 100.0, 0.0, 0.0);
        let mut light = particle(Species::Alcohol, 140.0, 100.0, 0.0, 0.0);
        let overlap = heavy.radius + light.radius - 40.0;

        resolve_collision(&mut heavy, &mut light);

        let heavy_shift = 100.0 - heavy.position.x;
        let light_shift = light.position.x - 140.0;
        assert_relative_eq!(heavy_shift, overlap * 1.0 / 6.0, epsilon = 1e-9);
        assert_relative_eq!(light_shift, overlap * 5.0 / 6.0, epsilon = 1e-9);
        assert_relative_eq!(
            (light.position - heavy.position).norm(),
            heavy.radius + light.radius,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_separating_pair_keeps_velocities() {
        let mut a = particle(Species::Ester, 100.0, 100.0, -0.5, 0.1);
        let mut b = particle(Species::Water, 130.0, 100.0, 0.7, -0.2);

        assert_eq!(resolve_collision(&mut a, &mut b), CollisionOutcome::Separating);
        assert_eq!(a.velocity, Vector2::new(-0.5, 0.1));
        assert_eq!(b.velocity, Vector2::new(0.7, -0.2));
    }

    #[test]
    fn test_apart_pair_untouched() {
        let mut a = particle(Species::Water, 100.0, 100.0, 1.0, 0.0);
        let mut b = particle(Species::Water, 200.0, 100.0, -1.0, 0.0);
        let (a0, b0) = (a.clone(), b.clone());

        assert_eq!(resolve_collision(&mut a, &mut b), CollisionOutcome::Apart);
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_coincident_centres_stay_finite() {
        let mut a = particle(Species::Water, 100.0, 100.0, 0.0, 0.0);
        let mut b = particle(Species::Water, 100.0, 100.0, 0.0, 0.0);

        resolve_collision(&mut a, &mut b);

        assert!(a.position.x.is_finite() && b.position.x.is_finite());
        assert!((b.position - a.position).norm() > 0.0);
    }

    #[test]
    fn test_scan_resolves_non_reactive_contacts() {
        let mut store: ParticleStore = vec![
            particle(Species::Ester, 100.0, 100.0, 0.5, 0.0),
            particle(Species::Water, 130.0, 100.0, -0.5, 0.0),
            particle(Species::Acid, 500.0, 500.0, 0.0, 0.0),
        ]
        .into_iter()
        .collect();

        let report = resolve_pairs(&mut store, &SimParams::default(), &mut StepRng::new(0, 0));

        assert_eq!(report, ScanReport { contacts: 1, reacted: false });
        assert_eq!(store.len(), 3);
        // The light water molecule rebounds
        assert!(store.get(1).unwrap().velocity.x > 0.0);
    }

    #[test]
    fn test_scan_stops_after_first_reaction() {
        // Two overlapping acid/alcohol pairs far apart from each other
        let mut store: ParticleStore = vec![
            particle(Species::Acid, 100.0, 100.0, 0.0, 0.0),
            particle(Species::Alcohol, 120.0, 100.0, 0.0, 0.0),
            particle(Species::Acid, 600.0, 400.0, 0.0, 0.0),
            particle(Species::Alcohol, 620.0, 400.0, 0.0, 0.0),
        ]
        .into_iter()
        .collect();

        let report = resolve_pairs(&mut store, &SimParams::default(), &mut StepRng::new(0, 0));

        assert!(report.reacted);
        let counts = store.counts();
        assert_eq!(counts.ester, 1);
        assert_eq!(counts.water, 1);
        assert_eq!(counts.acid, 1);
        assert_eq!(counts.alcohol, 1);
    }

    #[test]
    fn test_scan_leaves_later_contacts_for_next_tick() {
        let ester = particle(Species::Ester, 600.0, 400.0, 0.5, 0.0);
        let water = particle(Species::Water, 630.0, 400.0, -0.5, 0.0);
        let mut store: ParticleStore = vec![
            particle(Species::Acid, 100.0, 100.0, 0.0, 0.0),
            particle(Species::Alcohol, 120.0, 100.0, 0.0, 0.0),
            ester.clone(),
            water.clone(),
        ]
        .into_iter()
        .collect();

        let report = resolve_pairs(&mut store, &SimParams::default(), &mut StepRng::new(0, 0));

        assert_eq!(report, ScanReport { contacts: 0, reacted: true });
        // Reactants removed from the front; the approaching pair shifted down untouched
        assert_eq!(store.get(0), Some(&ester));
        assert_eq!(store.get(1), Some(&water));
        assert!(in_contact(&ester, &water));
    }
}
