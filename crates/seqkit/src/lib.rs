//! Generic sequence combinators and restartable numeric generators.
//!
//! ```
//! use seqkit::{filter, primes_by_count, sort_by};
//!
//! let odd_primes = filter(primes_by_count(6)?, |p| p % 2 == 1);
//! let by_last_digit = sort_by(odd_primes, |a, b| (a % 10).cmp(&(b % 10)));
//! assert_eq!(by_last_digit, vec![11, 3, 13, 5, 7]);
//! # Ok::<(), seqkit::SeqError>(())
//! ```

mod combinators;
mod error;
mod generators;
mod pipeline;
mod sort;

pub use combinators::{
    compare_by_key, compare_by_value, filter, reverse, sort_by, transform, Filter, Transform,
};
pub use error::{Result, SeqError};
pub use generators::{
    fibonacci, is_prime, is_prime_bigint, primes_by_count, primes_up_to, Fibonacci, PrimesByCount,
    PrimesUpTo, Restartable,
};
pub use pipeline::{Comparison, Mapping, Pipeline, Predicate, Source, Stage};
