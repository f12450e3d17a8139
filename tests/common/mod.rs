#![allow(dead_code)]

/*
 * Sample inputs shared by the integration tests.
 */

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SAMPLE_LENGTH: usize = 100_000;

/// Bytes drawn with a skewed distribution: low values are much more likely.
pub fn skewed_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let x: f64 = rng.gen();
            (x * x * x * 256.0) as u8
        })
        .collect()
}

/// Bytes drawn uniformly from the whole alphabet.
pub fn uniform_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen()).collect()
}

pub fn lorem() -> &'static [u8] {
    b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
      tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
      quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat."
}
