//! Text-described pipelines: one source followed by any number of stages.
//!
//! ```text
//! primes:10 filter:gt=5 map:square sort:desc
//! ```
//!
//! Sources and stages parse from strings, so a stage can arrive without the
//! function it needs (`filter` instead of `filter:even`). [`Pipeline::run`]
//! rejects that with [`SeqError::NullArgument`] before any element is produced.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::combinators::{filter, reverse, sort_by, transform};
use crate::error::{Result, SeqError};
use crate::generators::{fibonacci, is_prime_bigint, primes_by_count, primes_up_to};

type Values<'a> = Box<dyn Iterator<Item = BigInt> + 'a>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Fibonacci(i64),
    PrimesByCount(i64),
    PrimesUpTo(i64),
    Values(Vec<BigInt>),
}

impl Source {
    /// The numeric bound of a generator source.
    pub fn bound(&self) -> Option<i64> {
        match self {
            Source::Fibonacci(count) | Source::PrimesByCount(count) => Some(*count),
            Source::PrimesUpTo(maximum) => Some(*maximum),
            Source::Values(_) => None,
        }
    }

    fn generate(&self) -> Result<Values<'_>> {
        let values: Values<'_> = match self {
            Source::Fibonacci(count) => Box::new(fibonacci(*count)?),
            Source::PrimesByCount(count) => Box::new(primes_by_count(*count)?.map(BigInt::from)),
            Source::PrimesUpTo(maximum) => Box::new(primes_up_to(*maximum)?.map(BigInt::from)),
            Source::Values(values) => Box::new(values.iter().cloned()),
        };
        Ok(values)
    }
}

impl FromStr for Source {
    type Err = SeqError;

    fn from_str(text: &str) -> Result<Self> {
        let (name, arg) = text.split_once(':').unwrap_or((text, ""));
        match name {
            "fib" | "fibonacci" => Ok(Source::Fibonacci(parse_bound(arg)?)),
            "primes" => Ok(Source::PrimesByCount(parse_bound(arg)?)),
            "primes-upto" => Ok(Source::PrimesUpTo(parse_bound(arg)?)),
            "values" => {
                let values = arg
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(parse_bigint)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Source::Values(values))
            }
            _ => Err(SeqError::UnknownSource(text.to_string())),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Fibonacci(count) => write!(f, "fib:{count}"),
            Source::PrimesByCount(count) => write!(f, "primes:{count}"),
            Source::PrimesUpTo(maximum) => write!(f, "primes-upto:{maximum}"),
            Source::Values(values) => {
                let joined = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "values:{joined}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Even,
    Odd,
    Prime,
    GreaterThan(BigInt),
    LessThan(BigInt),
    DivisibleBy(BigInt),
}

impl Predicate {
    pub fn test(&self, value: &BigInt) -> bool {
        match self {
            Predicate::Even => (value % 2u32).is_zero(),
            Predicate::Odd => !(value % 2u32).is_zero(),
            Predicate::Prime => is_prime_bigint(value),
            Predicate::GreaterThan(limit) => value > limit,
            Predicate::LessThan(limit) => value < limit,
            Predicate::DivisibleBy(divisor) => (value % divisor).is_zero(),
        }
    }
}

impl FromStr for Predicate {
    type Err = SeqError;

    fn from_str(text: &str) -> Result<Self> {
        match text.split_once('=') {
            None => match text {
                "even" => Ok(Predicate::Even),
                "odd" => Ok(Predicate::Odd),
                "prime" => Ok(Predicate::Prime),
                _ => Err(SeqError::UnknownStage(format!("filter:{text}"))),
            },
            Some(("gt", arg)) => Ok(Predicate::GreaterThan(parse_bigint(arg)?)),
            Some(("lt", arg)) => Ok(Predicate::LessThan(parse_bigint(arg)?)),
            Some(("div", arg)) => {
                let divisor = parse_bigint(arg)?;
                if divisor.is_zero() {
                    return Err(SeqError::InvalidArgument {
                        name: "divisor",
                        value: 0,
                    });
                }
                Ok(Predicate::DivisibleBy(divisor))
            }
            Some(_) => Err(SeqError::UnknownStage(format!("filter:{text}"))),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Even => write!(f, "even"),
            Predicate::Odd => write!(f, "odd"),
            Predicate::Prime => write!(f, "prime"),
            Predicate::GreaterThan(limit) => write!(f, "gt={limit}"),
            Predicate::LessThan(limit) => write!(f, "lt={limit}"),
            Predicate::DivisibleBy(divisor) => write!(f, "div={divisor}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapping {
    Square,
    Double,
    Negate,
    Add(BigInt),
    DigitSum,
}

impl Mapping {
    pub fn apply(&self, value: BigInt) -> BigInt {
        match self {
            Mapping::Square => &value * &value,
            Mapping::Double => value * 2u32,
            Mapping::Negate => -value,
            Mapping::Add(amount) => value + amount,
            Mapping::DigitSum => BigInt::from(digit_sum(&value)),
        }
    }
}

impl FromStr for Mapping {
    type Err = SeqError;

    fn from_str(text: &str) -> Result<Self> {
        match text.split_once('=') {
            None => match text {
                "square" => Ok(Mapping::Square),
                "double" => Ok(Mapping::Double),
                "negate" => Ok(Mapping::Negate),
                "digit-sum" => Ok(Mapping::DigitSum),
                _ => Err(SeqError::UnknownStage(format!("map:{text}"))),
            },
            Some(("add", arg)) => Ok(Mapping::Add(parse_bigint(arg)?)),
            Some(_) => Err(SeqError::UnknownStage(format!("map:{text}"))),
        }
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mapping::Square => write!(f, "square"),
            Mapping::Double => write!(f, "double"),
            Mapping::Negate => write!(f, "negate"),
            Mapping::Add(amount) => write!(f, "add={amount}"),
            Mapping::DigitSum => write!(f, "digit-sum"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Ascending,
    Descending,
    DigitSum,
    LastDigit,
}

impl Comparison {
    pub fn compare(&self, a: &BigInt, b: &BigInt) -> Ordering {
        match self {
            Comparison::Ascending => a.cmp(b),
            Comparison::Descending => b.cmp(a),
            Comparison::DigitSum => digit_sum(a).cmp(&digit_sum(b)),
            Comparison::LastDigit => last_digit(a).cmp(&last_digit(b)),
        }
    }

    /// Stable sort under this comparison. Digit keys are computed once per
    /// element rather than once per comparison.
    pub fn sort<I>(&self, values: I) -> Vec<BigInt>
    where
        I: IntoIterator<Item = BigInt>,
    {
        match self {
            Comparison::Ascending | Comparison::Descending => {
                sort_by(values, |a, b| self.compare(a, b))
            }
            Comparison::DigitSum => sort_by_cached_key(values, digit_sum),
            Comparison::LastDigit => sort_by_cached_key(values, last_digit),
        }
    }
}

fn sort_by_cached_key<I, K>(values: I, key: fn(&BigInt) -> K) -> Vec<BigInt>
where
    I: IntoIterator<Item = BigInt>,
    K: Ord,
{
    let keyed = transform(values, |value| (key(&value), value));
    sort_by(keyed, |a, b| a.0.cmp(&b.0))
        .into_iter()
        .map(|(_, value)| value)
        .collect()
}

impl FromStr for Comparison {
    type Err = SeqError;

    fn from_str(text: &str) -> Result<Self> {
        match text {
            "asc" => Ok(Comparison::Ascending),
            "desc" => Ok(Comparison::Descending),
            "digit-sum" => Ok(Comparison::DigitSum),
            "last-digit" => Ok(Comparison::LastDigit),
            _ => Err(SeqError::UnknownStage(format!("sort:{text}"))),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Comparison::Ascending => "asc",
            Comparison::Descending => "desc",
            Comparison::DigitSum => "digit-sum",
            Comparison::LastDigit => "last-digit",
        };
        f.write_str(name)
    }
}

/// A pipeline step. `None` marks a stage whose function was not supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Filter(Option<Predicate>),
    Transform(Option<Mapping>),
    SortBy(Option<Comparison>),
    Reverse,
}

impl Stage {
    fn check(&self) -> Result<()> {
        match self {
            Stage::Filter(predicate) => require(predicate.as_ref(), "filter predicate").map(drop),
            Stage::Transform(mapping) => require(mapping.as_ref(), "map function").map(drop),
            Stage::SortBy(comparison) => require(comparison.as_ref(), "sort comparison").map(drop),
            Stage::Reverse => Ok(()),
        }
    }

    fn apply<'a>(&'a self, values: Values<'a>) -> Result<Values<'a>> {
        let values: Values<'a> = match self {
            Stage::Filter(predicate) => {
                let predicate = require(predicate.as_ref(), "filter predicate")?;
                Box::new(filter(values, move |value| predicate.test(value)))
            }
            Stage::Transform(mapping) => {
                let mapping = require(mapping.as_ref(), "map function")?;
                Box::new(transform(values, move |value| mapping.apply(value)))
            }
            Stage::SortBy(comparison) => {
                let comparison = require(comparison.as_ref(), "sort comparison")?;
                Box::new(comparison.sort(values).into_iter())
            }
            Stage::Reverse => Box::new(reverse(values)?.into_iter()),
        };
        Ok(values)
    }
}

impl FromStr for Stage {
    type Err = SeqError;

    fn from_str(text: &str) -> Result<Self> {
        let (name, arg) = match text.split_once(':') {
            Some((name, arg)) => (name, Some(arg).filter(|arg| !arg.is_empty())),
            None => (text, None),
        };
        match name {
            "filter" => Ok(Stage::Filter(arg.map(str::parse::<Predicate>).transpose()?)),
            "map" => Ok(Stage::Transform(arg.map(str::parse::<Mapping>).transpose()?)),
            "sort" => Ok(Stage::SortBy(arg.map(str::parse::<Comparison>).transpose()?)),
            "reverse" if arg.is_none() => Ok(Stage::Reverse),
            _ => Err(SeqError::UnknownStage(text.to_string())),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn with_arg<T: fmt::Display>(
            f: &mut fmt::Formatter<'_>,
            name: &str,
            arg: Option<&T>,
        ) -> fmt::Result {
            match arg {
                Some(arg) => write!(f, "{name}:{arg}"),
                None => f.write_str(name),
            }
        }
        match self {
            Stage::Filter(predicate) => with_arg(f, "filter", predicate.as_ref()),
            Stage::Transform(mapping) => with_arg(f, "map", mapping.as_ref()),
            Stage::SortBy(comparison) => with_arg(f, "sort", comparison.as_ref()),
            Stage::Reverse => f.write_str("reverse"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    source: Option<Source>,
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a source and stage list. An absent source is kept absent and
    /// only reported by [`Pipeline::run`].
    pub fn parse<S: AsRef<str>>(source: Option<&str>, stages: &[S]) -> Result<Self> {
        let source = source.map(str::parse::<Source>).transpose()?;
        let stages = stages
            .iter()
            .map(|stage| stage.as_ref().parse::<Stage>())
            .collect::<Result<Vec<Stage>>>()?;
        Ok(Self { source, stages })
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Checks every argument without producing any element.
    pub fn validate(&self) -> Result<&Source> {
        let source = require(self.source.as_ref(), "source")?;
        for stage in &self.stages {
            stage.check()?;
        }
        Ok(source)
    }

    pub fn run(&self) -> Result<Vec<BigInt>> {
        let source = self.validate()?;
        tracing::debug!(%source, stages = self.stages.len(), "running pipeline");
        let mut values = source.generate()?;
        for stage in &self.stages {
            tracing::trace!(%stage, "applying stage");
            values = stage.apply(values)?;
        }
        Ok(values.collect())
    }
}

fn require<'a, T>(value: Option<&'a T>, what: &str) -> Result<&'a T> {
    value.ok_or_else(|| SeqError::NullArgument(what.to_string()))
}

fn parse_bound(text: &str) -> Result<i64> {
    text.trim()
        .parse()
        .map_err(|_| SeqError::InvalidNumber(text.to_string()))
}

fn parse_bigint(text: &str) -> Result<BigInt> {
    text.trim()
        .parse()
        .map_err(|_| SeqError::InvalidNumber(text.to_string()))
}

fn digit_sum(value: &BigInt) -> u64 {
    value
        .magnitude()
        .to_radix_le(10)
        .into_iter()
        .map(u64::from)
        .sum()
}

fn last_digit(value: &BigInt) -> u8 {
    (value.magnitude() % 10u32).to_u8().unwrap_or(0)
}
