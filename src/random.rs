//! Random number helpers.
//!
//! Every operator in this crate takes its random source explicitly. The
//! [`Environment`](crate::ga::Environment) owns one [`GeneticRng`] and lends
//! it to each operator, so a run is fully determined by its seed.

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};

/// The generator type owned by an environment.
pub type GeneticRng = StdRng;

/// Creates a seeded generator.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_genetics::random::create_rng;
///
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.random::<u64>(), b.random::<u64>());
/// ```
pub fn create_rng(seed: u64) -> GeneticRng {
    StdRng::seed_from_u64(seed)
}

/// Shuffles a slice in place.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Returns a uniformly chosen element, or `None` for an empty slice.
pub fn choose<'a, T, R: Rng>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(42);
        let mut b = create_rng(42);
        for _ in 0..100 {
            assert_eq!(a.random::<u32>(), b.random::<u32>());
        }
    }
}
