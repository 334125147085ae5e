//! String hashing and the double-hashing probe sequence.
//!
//! `hash(s, prime, m)` is the polynomial `Σ prime^(len-1-i) * s[i] mod m`,
//! evaluated with Horner's rule and reduced at every step so the accumulator
//! never exceeds `m`. Keys are treated as raw bytes.
//!
//! For a table of prime size `m`, attempt `i` of key `k` lands on
//! `(hash_a(k, m) + i * (hash_b(k, m) + 1)) mod m`. The step `hash_b + 1` is
//! in `[1, m]`; the single value `m` is congruent to zero and would pin the
//! probe to one slot, so that step is replaced by 1. Every step then lies in
//! `[1, m - 1]`, is coprime to `m`, and the first `m` attempts visit every
//! slot exactly once.

/// Polynomial string hash of `key` in `[0, m)`.
///
/// # Panics
///
/// Panics if `m` is zero.
#[inline]
pub fn hash(key: &[u8], prime: usize, m: usize) -> usize {
    assert!(m > 0, "hash modulus must be non-zero");
    let (p, m) = (prime as u128, m as u128);
    key.iter()
        .fold(0u128, |acc, &b| (acc * p + b as u128) % m) as usize
}

/// Iterator over the slot indices a key visits in a table of `capacity`
/// slots. Yields at most `capacity` indices.
#[derive(Debug, Clone)]
pub struct ProbeSeq {
    index: usize,
    step: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSeq {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(key: &[u8], prime_a: usize, prime_b: usize, capacity: usize) -> Self {
        assert!(capacity > 0, "slot array must be non-empty");
        let index = hash(key, prime_a, capacity);
        let step = match hash(key, prime_b, capacity) + 1 {
            s if s == capacity => 1,
            s => s,
        };
        Self {
            index,
            step,
            capacity,
            remaining: capacity,
        }
    }

    /// Distance between consecutive probes.
    pub fn step(&self) -> usize {
        self.step
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.index;
        // index and step are both < capacity, so the sum cannot wrap for any
        // capacity that fits in an allocation.
        self.index = (self.index + self.step) % self.capacity;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}
