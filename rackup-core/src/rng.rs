//! # Random Sequence Generator
//!
//! A tiny counter-based PRNG ([`Mulberry32`]) driving an in-place
//! Fisher-Yates shuffle. The draw must be reproducible: [`shuffle`] is a pure
//! function of `(items, seed)`, so the same seed and input order always yield
//! the same permutation. No cryptographic strength is required or provided.

use std::time::{SystemTime, UNIX_EPOCH};

/// A mulberry32 pseudo-random generator with a 32-bit counter state.
#[derive(Copy, Clone, Debug)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Creates a new `Mulberry32` seeded with `seed`.
    #[inline]
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Returns the next value in the sequence.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B79F5);

        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Returns the next value mapped into `[0.0, 1.0)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4294967296.0
    }
}

/// Permutes `items` in place using a Fisher-Yates shuffle driven by a
/// [`Mulberry32`] seeded with `seed`.
pub fn shuffle<T>(items: &mut [T], seed: u32) {
    let mut rng = Mulberry32::new(seed);

    for i in (1..items.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64) as usize;
        items.swap(i, j);
    }
}

/// Returns a seed derived from the system clock.
///
/// Draws made with a time-based seed are not reproducible; callers that need
/// to replay a draw must supply an explicit seed instead.
pub fn seed_from_time() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{shuffle, Mulberry32};

    #[test]
    fn test_mulberry32_deterministic() {
        let mut a = Mulberry32::new(42);
        let mut b = Mulberry32::new(42);

        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_shuffle_deterministic() {
        let mut a: Vec<u32> = (0..32).collect();
        let mut b = a.clone();

        shuffle(&mut a, 1337);
        shuffle(&mut b, 1337);

        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut items: Vec<u32> = (0..64).collect();
        shuffle(&mut items, 7);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..64).collect::<Vec<u32>>());
    }

    #[test]
    fn test_shuffle_seed_changes_order() {
        let mut a: Vec<u32> = (0..32).collect();
        let mut b = a.clone();

        shuffle(&mut a, 1);
        shuffle(&mut b, 2);

        assert_ne!(a, b);
    }
}
