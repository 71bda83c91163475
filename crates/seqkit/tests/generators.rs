use num_bigint::BigInt;

use seqkit::{
    fibonacci, filter, primes_by_count, primes_up_to, Restartable, SeqError,
};

fn ints(values: &[i64]) -> Vec<BigInt> {
    values.iter().copied().map(BigInt::from).collect()
}

#[test]
fn fibonacci_single_value() {
    let values: Vec<BigInt> = fibonacci(1).expect("fibonacci").collect();
    assert_eq!(values, ints(&[0]));
}

#[test]
fn fibonacci_first_seven() {
    let values: Vec<BigInt> = fibonacci(7).expect("fibonacci").collect();
    assert_eq!(values, ints(&[0, 1, 1, 2, 3, 5, 8]));
}

#[test]
fn fibonacci_does_not_overflow_fixed_width() {
    let last = fibonacci(200).expect("fibonacci").last().expect("last");
    let expected: BigInt = "173402521172797813159685037284371942044301"
        .parse()
        .expect("literal");
    assert_eq!(last, expected);
}

#[test]
fn fibonacci_reports_exact_length() {
    let mut fib = fibonacci(5).expect("fibonacci");
    assert_eq!(fib.len(), 5);
    fib.next();
    assert_eq!(fib.len(), 4);
}

#[test]
fn primes_by_count_first_five() {
    let primes: Vec<u64> = primes_by_count(5).expect("primes").collect();
    assert_eq!(primes, vec![2, 3, 5, 7, 11]);
}

#[test]
fn primes_by_count_hundredth_prime() {
    assert_eq!(primes_by_count(100).expect("primes").last(), Some(541));
}

#[test]
fn primes_up_to_ten() {
    let primes: Vec<u64> = primes_up_to(10).expect("primes").collect();
    assert_eq!(primes, vec![2, 3, 5, 7]);
}

#[test]
fn primes_up_to_includes_a_prime_maximum() {
    let primes: Vec<u64> = primes_up_to(13).expect("primes").collect();
    assert_eq!(primes.last(), Some(&13));
}

#[test]
fn primes_up_to_one_is_empty() {
    assert_eq!(primes_up_to(1).expect("primes").count(), 0);
    assert_eq!(primes_up_to(2).expect("primes").collect::<Vec<_>>(), vec![2]);
}

#[test]
fn non_positive_bounds_are_rejected() {
    assert_eq!(
        fibonacci(0).map(|_| ()),
        Err(SeqError::InvalidArgument {
            name: "count",
            value: 0
        })
    );
    assert!(matches!(
        primes_by_count(0),
        Err(SeqError::InvalidArgument { value: 0, .. })
    ));
    assert!(matches!(
        primes_up_to(0),
        Err(SeqError::InvalidArgument { value: 0, .. })
    ));
    assert!(matches!(
        fibonacci(-3),
        Err(SeqError::InvalidArgument { value: -3, .. })
    ));
}

#[test]
fn reset_replays_the_same_sequence() {
    let mut fib = fibonacci(6).expect("fibonacci");
    let first: Vec<BigInt> = fib.by_ref().collect();
    assert_eq!(fib.next(), None);
    fib.reset();
    let second: Vec<BigInt> = fib.collect();
    assert_eq!(first, second);

    let mut primes = primes_by_count(4).expect("primes");
    primes.next();
    primes.next();
    primes.reset();
    assert_eq!(primes.collect::<Vec<_>>(), vec![2, 3, 5, 7]);

    let mut bounded = primes_up_to(20).expect("primes");
    let first: Vec<u64> = bounded.by_ref().take(3).collect();
    bounded.reset();
    assert_eq!(bounded.take(3).collect::<Vec<_>>(), first);
}

#[test]
fn fresh_invocations_are_independent() {
    let mut a = primes_by_count(3).expect("primes");
    a.next();
    let b: Vec<u64> = primes_by_count(3).expect("primes").collect();
    assert_eq!(b, vec![2, 3, 5]);
    assert_eq!(a.collect::<Vec<_>>(), vec![3, 5]);
}

#[test]
fn generators_compose_with_combinators() {
    let twin_candidates: Vec<u64> =
        filter(primes_up_to(50).expect("primes"), |p| seqkit::is_prime(p + 2)).collect();
    assert_eq!(twin_candidates, vec![3, 5, 11, 17, 29, 41]);
}

#[test]
fn early_stop_only_computes_what_was_pulled() {
    let mut primes = primes_by_count(i64::MAX).expect("primes");
    assert_eq!(primes.next(), Some(2));
    assert_eq!(primes.next(), Some(3));
}

#[test]
fn fibonacci_with_huge_count_yields_on_demand() {
    let fib = fibonacci(i64::MAX).expect("fibonacci");
    assert_eq!(fib.len(), usize::try_from(i64::MAX).unwrap_or(usize::MAX));
    let first_large = filter(fib, |value| *value > BigInt::from(1_000))
        .next()
        .expect("a value above 1000");
    assert_eq!(first_large, BigInt::from(1_597));
}
