//! Distance between feature vectors.

use num_traits::{AsPrimitive, Float};

/// Euclidean distance, `sqrt(sum((a_j - b_j)^2))`, accumulated in `f64`.
///
/// Both slices must have the same length. The estimator checks query
/// dimensions before calling this; debug builds assert it here as well.
pub fn euclidean_distance<F>(a: &[F], b: &[F]) -> f64
where
    F: Float + AsPrimitive<f64>,
{
    debug_assert_eq!(a.len(), b.len(), "Input vectors for Euclidean distance must have the same length.");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = AsPrimitive::<f64>::as_(*x) - AsPrimitive::<f64>::as_(*y);
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_euclidean_distance_known_values() {
        assert_abs_diff_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_abs_diff_eq!(
            euclidean_distance(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]),
            27.0_f64.sqrt(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(euclidean_distance(&[1.5f32], &[-0.5f32]), 2.0);
    }

    #[test]
    fn test_euclidean_distance_of_identical_points_is_zero() {
        let p = [0.3, -7.25, 1e6];
        assert_eq!(euclidean_distance(&p, &p), 0.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "same length")]
    fn test_euclidean_distance_rejects_length_mismatch() {
        euclidean_distance(&[0.0, 0.0, 100.0], &[0.0, 0.0]);
    }

    #[test]
    fn test_euclidean_distance_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let a: Vec<f64> = (0..4).map(|_| rng.gen_range(-100.0..100.0)).collect();
            let b: Vec<f64> = (0..4).map(|_| rng.gen_range(-100.0..100.0)).collect();
            assert_eq!(euclidean_distance(&a, &b), euclidean_distance(&b, &a));
        }
    }
}
