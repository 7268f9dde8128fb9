//! Randomness services used by tree generation and the search loops.
//!
//! All draws go through a caller-supplied [`Rng`], so a search run can be
//! seeded for reproducibility or drawn from entropy.

use crate::error::{SearchError, SearchResult};
use rand::Rng;
use rand::distributions::uniform::SampleUniform;
use rand::distributions::{Distribution, WeightedIndex};

/// Draw a value uniformly from the inclusive range `[min, max]`.
///
/// Reversed bounds are swapped rather than rejected.
pub fn uniform_int<T, R>(rng: &mut R, min: T, max: T) -> T
where
    T: SampleUniform + PartialOrd + Copy,
    R: Rng,
{
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(lo..=hi)
}

/// Return `true` with probability `p`.
///
/// `p` is clamped to `[0, 1]`; NaN never succeeds.
pub fn bernoulli<R: Rng>(rng: &mut R, p: f64) -> bool {
    if p.is_nan() {
        return false;
    }
    rng.gen_bool(p.clamp(0.0, 1.0))
}

/// A categorical distribution over a fixed set of values.
///
/// Weights need not sum to one. Zero-weight entries are legal and simply
/// never drawn, as long as at least one weight is positive.
#[derive(Debug, Clone)]
pub struct Weighted<T> {
    values: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T> Weighted<T> {
    /// Build a distribution from parallel value and weight slices.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] if the slices differ in length,
    /// are empty, contain a negative or non-finite weight, or sum to zero.
    pub fn new(values: Vec<T>, weights: &[f64]) -> SearchResult<Self> {
        if values.len() != weights.len() {
            return Err(SearchError::InvalidConfig(format!(
                "{} values but {} weights",
                values.len(),
                weights.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(SearchError::InvalidConfig("non-finite weight".to_string()));
        }
        let index = WeightedIndex::new(weights)
            .map_err(|e| SearchError::InvalidConfig(format!("bad weights: {e}")))?;
        Ok(Self { values, index })
    }

    /// Draw one value.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> &T {
        &self.values[self.index.sample(rng)]
    }
}

/// Pick one of `values` with probability proportional to its weight.
///
/// Convenience wrapper over [`Weighted`] for one-off draws.
///
/// # Errors
///
/// Same conditions as [`Weighted::new`].
pub fn weighted_choice<'a, T, R: Rng>(
    rng: &mut R,
    values: &'a [T],
    weights: &[f64],
) -> SearchResult<&'a T> {
    let table = Weighted::new(values.iter().collect(), weights)?;
    Ok(*table.choose(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_uniform_int_bounds() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..1000 {
            let v = uniform_int(&mut rng, 0i64, 9);
            assert!((0..=9).contains(&v));
        }
        assert_eq!(uniform_int(&mut rng, 4u8, 4), 4);
        let v = uniform_int(&mut rng, 9usize, 0);
        assert!((0..=9).contains(&v));
    }

    #[test]
    fn test_bernoulli_extremes() {
        let mut rng = SmallRng::seed_from_u64(2);
        assert!(bernoulli(&mut rng, 1.0));
        assert!(!bernoulli(&mut rng, 0.0));
        assert!(bernoulli(&mut rng, 7.0));
        assert!(!bernoulli(&mut rng, f64::NAN));
    }

    #[test]
    fn test_weighted_zero_entries_unreachable() {
        let mut rng = SmallRng::seed_from_u64(3);
        let values = [1, 2, 3];
        for _ in 0..500 {
            let v = weighted_choice(&mut rng, &values, &[50.0, 0.0, 0.0]).unwrap();
            assert_eq!(*v, 1);
        }
    }

    #[test]
    fn test_weighted_proportions() {
        let mut rng = SmallRng::seed_from_u64(4);
        let table = Weighted::new(vec!['a', 'b'], &[3.0, 1.0]).unwrap();
        let mut a = 0;
        for _ in 0..4000 {
            if *table.choose(&mut rng) == 'a' {
                a += 1;
            }
        }
        // Expect ~3000
        assert!((2700..3300).contains(&a), "got {a}");
    }

    #[test]
    fn test_weighted_rejects_degenerate() {
        assert!(Weighted::new(vec![1, 2], &[0.0, 0.0]).is_err());
        assert!(Weighted::new(vec![1, 2], &[1.0]).is_err());
        assert!(Weighted::new(vec![1], &[-1.0]).is_err());
        assert!(Weighted::<i32>::new(Vec::new(), &[]).is_err());
        assert!(Weighted::new(vec![1], &[f64::INFINITY]).is_err());
    }
}
