//! Seedable pseudo-random stream shared by the transformer, overlay and generator.

use std::sync::atomic::{AtomicU64, Ordering};

/// Draw a fresh seed from the platform entropy source
pub fn fresh_seed() -> u32 {
    // Use getrandom for WASM-compatible random seeding
    let mut seed_bytes = [0u8; 4];
    getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
        // Fallback: use a static counter if getrandom fails
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
        seed_bytes = (counter as u32).to_le_bytes();
    });
    u32::from_le_bytes(seed_bytes)
}

/// Small PCG-style generator: the same seed always produces the same stream
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Generator seeded from the entropy source
    pub fn new() -> Self {
        Self::with_seed(fresh_seed())
    }

    pub fn with_seed(seed: u32) -> Self {
        Self {
            state: u64::from(seed).wrapping_add(1),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Uniform in `0..bound`; `bound` must be non-zero
    pub fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u32() as usize) % bound
    }

    /// Uniform in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick a random element, `None` for an empty slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.next_usize(items.len())])
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_usize(i + 1);
            slice.swap(i, j);
        }
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SimpleRng::with_seed(42);
        let mut b = SimpleRng::with_seed(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
        let mut c = SimpleRng::with_seed(43);
        let first: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let other: Vec<u32> = (0..8).map(|_| c.next_u32()).collect();
        assert_ne!(first, other);
    }

    #[test]
    fn test_ranges() {
        let mut rng = SimpleRng::with_seed(7);
        for _ in 0..1000 {
            assert!(rng.next_usize(5) < 5);
            let f = rng.next_f64();
            assert!((0.0..1.0).contains(&f));
        }
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SimpleRng::with_seed(3);
        let mut items: Vec<usize> = (0..20).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
        assert!(rng.choose::<usize>(&[]).is_none());
    }
}
