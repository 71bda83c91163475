//! Restartable numeric sequence generators.
//!
//! Each generator is a cursor holding just enough state to compute its next
//! element plus the remaining budget. Nothing is computed until the caller
//! pulls, and [`Restartable::reset`] rewinds a generator in place.

use std::iter::FusedIterator;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, ToPrimitive, Zero};

use crate::error::{require_positive, Result};

/// A sequence that can be rewound to its first element.
pub trait Restartable: Iterator {
    fn reset(&mut self);
}

/// Trial-division primality test.
pub fn is_prime(candidate: u64) -> bool {
    if candidate < 2 {
        return false;
    }
    let mut divisor = 2u64;
    // `divisor <= candidate / divisor` is `divisor <= isqrt(candidate)` without overflow.
    while divisor <= candidate / divisor {
        if candidate % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

/// Witness bases for [`is_prime_bigint`]. Together they decide primality
/// exactly for every value below 3.3 * 10^24.
const WITNESSES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Primality for arbitrary integers.
///
/// Values that fit in `u64` go through [`is_prime`]. Wider values, whose
/// square root is out of reach for trial division, are checked with a strong
/// pseudoprime test against [`WITNESSES`].
pub fn is_prime_bigint(candidate: &BigInt) -> bool {
    if let Some(small) = candidate.to_u64() {
        return is_prime(small);
    }
    if candidate.sign() == Sign::Minus {
        return false;
    }
    let n = candidate.magnitude();
    if WITNESSES.iter().any(|&base| (n % base).is_zero()) {
        return false;
    }
    let n_minus_one = n - BigUint::one();
    // n is odd here, so n - 1 has at least one trailing zero bit.
    let shift = n_minus_one.trailing_zeros().unwrap_or(0);
    let odd = &n_minus_one >> shift;
    WITNESSES.iter().all(|&base| {
        let mut x = BigUint::from(base).modpow(&odd, n);
        if x.is_one() || x == n_minus_one {
            return true;
        }
        for _ in 1..shift {
            x = &x * &x % n;
            if x == n_minus_one {
                return true;
            }
        }
        false
    })
}

/// The first `count` Fibonacci numbers, starting `0, 1, 1, 2, …`.
pub fn fibonacci(count: i64) -> Result<Fibonacci> {
    let count = require_positive("count", count)?;
    tracing::debug!(count, "fibonacci generator");
    Ok(Fibonacci {
        current: BigInt::zero(),
        following: BigInt::one(),
        remaining: count,
        count,
    })
}

/// The first `count` primes in ascending order.
pub fn primes_by_count(count: i64) -> Result<PrimesByCount> {
    let count = require_positive("count", count)?;
    tracing::debug!(count, "primes-by-count generator");
    Ok(PrimesByCount {
        candidate: 2,
        remaining: count,
        count,
    })
}

/// Every prime `p` with `2 <= p <= maximum`.
pub fn primes_up_to(maximum: i64) -> Result<PrimesUpTo> {
    let maximum = require_positive("maximum", maximum)?;
    tracing::debug!(maximum, "primes-up-to generator");
    Ok(PrimesUpTo {
        candidate: 2,
        maximum,
    })
}

#[derive(Debug, Clone)]
pub struct Fibonacci {
    current: BigInt,
    following: BigInt,
    remaining: u64,
    count: u64,
}

impl Iterator for Fibonacci {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let after = &self.current + &self.following;
        let following = std::mem::replace(&mut self.following, after);
        Some(std::mem::replace(&mut self.current, following))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Fibonacci {}

impl FusedIterator for Fibonacci {}

impl Restartable for Fibonacci {
    fn reset(&mut self) {
        self.current.set_zero();
        self.following.set_one();
        self.remaining = self.count;
    }
}

#[derive(Debug, Clone)]
pub struct PrimesByCount {
    candidate: u64,
    remaining: u64,
    count: u64,
}

impl Iterator for PrimesByCount {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        while !is_prime(self.candidate) {
            self.candidate += 1;
        }
        let prime = self.candidate;
        self.candidate += 1;
        self.remaining -= 1;
        Some(prime)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PrimesByCount {}

impl FusedIterator for PrimesByCount {}

impl Restartable for PrimesByCount {
    fn reset(&mut self) {
        self.candidate = 2;
        self.remaining = self.count;
    }
}

#[derive(Debug, Clone)]
pub struct PrimesUpTo {
    candidate: u64,
    maximum: u64,
}

impl Iterator for PrimesUpTo {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        while self.candidate <= self.maximum {
            let candidate = self.candidate;
            self.candidate += 1;
            if is_prime(candidate) {
                return Some(candidate);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let span = self.maximum.saturating_sub(self.candidate).saturating_add(1);
        (0, usize::try_from(span).ok())
    }
}

impl FusedIterator for PrimesUpTo {}

impl Restartable for PrimesUpTo {
    fn reset(&mut self) {
        self.candidate = 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_are_not_prime() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
    }

    #[test]
    fn perfect_squares_of_primes_are_rejected() {
        for p in [2u64, 3, 5, 7, 11, 13, 97] {
            assert!(!is_prime(p * p), "{} is a square", p * p);
        }
    }

    #[test]
    fn large_prime_near_u32_max() {
        assert!(is_prime(4_294_967_291));
        assert!(!is_prime(4_294_967_293));
    }

    #[test]
    fn wide_values_use_the_witness_test() {
        let wide = |text: &str| text.parse::<BigInt>().expect("bigint");
        // 2^64 + 13 and 2^89 - 1 are prime.
        assert!(is_prime_bigint(&wide("18446744073709551629")));
        assert!(is_prime_bigint(&wide("618970019642690137449562111")));
        // 2^64 + 1 = 274177 * 67280421310721
        assert!(!is_prime_bigint(&wide("18446744073709551617")));
        // (2^32 + 15)^2, a square with no small factor
        assert!(!is_prime_bigint(&wide("18446744202558570721")));
        assert!(!is_prime_bigint(&wide("-18446744073709551629")));
    }

    #[test]
    fn narrow_values_match_trial_division() {
        for value in -5i64..200 {
            let expected = u64::try_from(value).is_ok_and(is_prime);
            assert_eq!(is_prime_bigint(&BigInt::from(value)), expected, "{value}");
        }
    }

    #[test]
    fn fibonacci_cursor_advances_two_values() {
        let mut fib = fibonacci(3).expect("fibonacci");
        fib.next();
        assert_eq!(fib.current, BigInt::one());
        assert_eq!(fib.following, BigInt::one());
        assert_eq!(fib.remaining, 2);
    }

    #[test]
    fn primes_up_to_size_hint_shrinks() {
        let mut primes = primes_up_to(10).expect("primes");
        assert_eq!(primes.size_hint(), (0, Some(9)));
        primes.next();
        assert_eq!(primes.size_hint(), (0, Some(8)));
    }
}
