//! Random sequence generation and marker insertion.
//!
//! Both functions take the random source as a parameter so callers can pass a
//! seeded generator (see [`seeded_rng`]) and get reproducible output.
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::record::{splice, ALPHABET};

/// Draw `length` symbols uniformly, with replacement, from A/C/G/T.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length).map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())]).collect()
}

/// Splice `marker` into `sequence` at a uniformly chosen offset in `0..=len`.
///
/// Returns the new text and the chosen offset (in characters). An empty marker
/// still consumes a random draw but leaves the sequence unchanged.
pub fn insert_marker<R: Rng + ?Sized>(rng: &mut R, sequence: &str, marker: &str) -> (String, usize) {
    let len = sequence.chars().count();
    let position = rng.gen_range(0..=len);
    (splice(sequence, marker, position), position)
}

/// Generator used when a seed is configured.
pub fn seeded_rng(seed: u64) -> Xoshiro256StarStar {
    Xoshiro256StarStar::seed_from_u64(seed)
}

/// Generator seeded from OS entropy.
pub fn entropy_rng() -> Xoshiro256StarStar {
    Xoshiro256StarStar::from_entropy()
}
