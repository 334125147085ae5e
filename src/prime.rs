//! Prime helpers for sizing the slot array.
//!
//! Capacities stay modest, so plain trial division up to `√n` is enough and
//! no prime table is kept.

/// Deterministic primality test by trial division over `6k ± 1`.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5usize;
    // `i <= n / i` avoids overflowing `i * i` near `usize::MAX`.
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Smallest prime `>= n`. Returns `None` if no such prime fits in `usize`.
pub fn next_prime(n: usize) -> Option<usize> {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate = candidate.checked_add(1)?;
    }
    Some(candidate)
}
