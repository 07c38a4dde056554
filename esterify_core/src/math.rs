//! Random draws and small vector helpers shared by the spawner, integrator
//! and reaction engine.

use nalgebra::Vector2;
use rand::Rng;
use std::f64::consts::TAU;

/// Smallest centre distance used when building a collision normal.
pub const MIN_DISTANCE: f64 = 1e-9;

/// Uniform draw in `[lo, hi)`.
///
/// Unlike `Rng::gen_range` this accepts `lo == hi` and returns `lo`.
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}

/// Uniform angle in `[0, 2π)`.
pub fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rand_range(rng, 0.0, TAU)
}

/// Random velocity with uniform heading and speed in `[0.35·vmax, vmax]`.
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, vmax: f64) -> Vector2<f64> {
    let heading = random_angle(rng);
    let speed = rand_range(rng, 0.35 * vmax, vmax);
    Vector2::new(heading.cos() * speed, heading.sin() * speed)
}

/// Distance between two points, floored at [`MIN_DISTANCE`].
pub fn separation(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    (b - a).norm().max(MIN_DISTANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rand_range_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = rand_range(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&x));
        }
    }

    #[test]
    fn test_rand_range_empty_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(rand_range(&mut rng, 1.5, 1.5), 1.5);
    }

    #[test]
    fn test_random_velocity_speed_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..1000 {
            let v = random_velocity(&mut rng, 2.0);
            let speed = v.norm();
            assert!(speed >= 0.7 - 1e-12 && speed <= 2.0 + 1e-12);
        }
    }

    #[test]
    fn test_zero_draw_gives_slowest_eastward_velocity() {
        let mut rng = StepRng::new(0, 0);
        let v = random_velocity(&mut rng, 1.0);
        assert!((v.x - 0.35).abs() < 1e-12);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_separation_floor() {
        let p = Vector2::new(3.0, 4.0);
        assert_eq!(separation(&p, &p), MIN_DISTANCE);
        assert!((separation(&Vector2::zeros(), &p) - 5.0).abs() < 1e-12);
    }
}
