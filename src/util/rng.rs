// Copyright (c) 2024 Mike Tsao

//! A small random-number generator for things like naming new files.

use byteorder::{BigEndian, ByteOrder};
use delegate::delegate;

/// A pseudorandom number generator for places that need variety, not
/// security.
#[derive(Debug)]
pub struct Rng(oorandom::Rand64);
impl Default for Rng {
    fn default() -> Self {
        let seed = Self::generate_seed().unwrap_or_else(|e| {
            log::warn!("falling back to a fixed seed: {e:?}");
            Self::FALLBACK_SEED
        });
        Self::new_with_seed(seed)
    }
}
#[allow(missing_docs)]
impl Rng {
    const FALLBACK_SEED: u128 = 0x6861_726d_6f6e_6963_6f6e;

    /// Pass the same number to [Rng::new_with_seed()] to get the same stream
    /// back again. Good for reproducing test failures.
    pub fn new_with_seed(seed: u128) -> Self {
        Self(oorandom::Rand64::new(seed))
    }

    /// Asks the OS for a seed suitable for [Rng].
    pub fn generate_seed() -> anyhow::Result<u128> {
        let mut bytes = [0u8; 16];

        getrandom::getrandom(&mut bytes)?;
        Ok(BigEndian::read_u128(&bytes))
    }

    /// Picks one item from the slice, or None if it's empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.rand_range(0..items.len() as u64) as usize)
        }
    }

    delegate! {
        to self.0 {
            pub fn rand_u64(&mut self) -> u64;
            pub fn rand_range(&mut self, range: core::ops::Range<u64>) -> u64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_stream() {
        let mut r1 = Rng::new_with_seed(1);
        let mut r2 = Rng::new_with_seed(2);
        assert!(
            (0..100).any(|_| r1.rand_u64() != r2.rand_u64()),
            "RNGs with different seeds should produce different streams"
        );

        let mut r1 = Rng::new_with_seed(1);
        let mut r2 = Rng::new_with_seed(1);
        assert!(
            (0..100).all(|_| r1.rand_u64() == r2.rand_u64()),
            "RNGs with same seeds should produce same streams."
        );
    }

    #[test]
    fn choose_stays_in_bounds() {
        let mut r = Rng::new_with_seed(7);
        let empty: [u8; 0] = [];
        assert!(r.choose(&empty).is_none());
        let items = ["a", "b", "c"];
        for _ in 0..50 {
            assert!(items.contains(r.choose(&items).unwrap()));
        }
    }
}
