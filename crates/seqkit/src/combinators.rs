//! Higher-order operations over arbitrary sequences.
//!
//! [`filter`] and [`transform`] are lazy: they wrap the source iterator and
//! call the supplied closure only as output is pulled, once per element and in
//! source order. [`sort_by`] and [`reverse`] have to see every element before
//! producing the first one, so they collect into a `Vec`.
//!
//! None of the operations mutate their input. Passing `&vec` or `vec.iter()`
//! keeps the original untouched; passing `vec` by value hands it over.
//!
//! ```
//! use seqkit::{filter, reverse, sort_by, transform};
//!
//! let words = ["pear", "fig", "apple", "kiwi"];
//! let short: Vec<_> = filter(words, |w| w.len() <= 4).collect();
//! let lengths: Vec<_> = transform(&short, |w| w.len()).collect();
//! assert_eq!(lengths, vec![4, 3, 4]);
//!
//! let sorted = sort_by(short, |a, b| a.len().cmp(&b.len()));
//! assert_eq!(sorted, vec!["fig", "pear", "kiwi"]);
//! assert_eq!(reverse(sorted).unwrap(), vec!["kiwi", "pear", "fig"]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::error::{Result, SeqError};
use crate::sort::merge_sort;

/// Lazily yields the elements of `source` for which `predicate` holds.
pub fn filter<I, P>(source: I, predicate: P) -> Filter<I::IntoIter, P>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    Filter {
        inner: source.into_iter(),
        predicate,
    }
}

/// Lazily applies `mapping` to every element of `source`.
pub fn transform<I, F, R>(source: I, mapping: F) -> Transform<I::IntoIter, F>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> R,
{
    Transform {
        inner: source.into_iter(),
        mapping,
    }
}

/// Returns the elements of `source` ordered by `comparison`.
///
/// The sort is stable, so sorting by a secondary key and then by a primary
/// key yields an ordering on both. Empty input gives an empty `Vec`.
pub fn sort_by<I, C>(source: I, mut comparison: C) -> Vec<I::Item>
where
    I: IntoIterator,
    C: FnMut(&I::Item, &I::Item) -> Ordering,
{
    let items: Vec<I::Item> = source.into_iter().collect();
    tracing::trace!(len = items.len(), "sort_by");
    merge_sort(items, &mut comparison)
}

/// Returns the elements of `source` back to front.
///
/// Unlike the other combinators an empty source is an error
/// ([`SeqError::EmptySequence`]), not an empty result.
pub fn reverse<I>(source: I) -> Result<Vec<I::Item>>
where
    I: IntoIterator,
{
    let mut items: Vec<I::Item> = source.into_iter().collect();
    if items.is_empty() {
        return Err(SeqError::EmptySequence);
    }
    items.reverse();
    Ok(items)
}

/// Natural ordering, for use as a [`sort_by`] comparison.
pub fn compare_by_value<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// Builds a comparison that orders by an extracted key.
pub fn compare_by_key<T, K, F>(mut key: F) -> impl FnMut(&T, &T) -> Ordering
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    move |a: &T, b: &T| key(a).cmp(&key(b))
}

/// Iterator returned by [`filter`].
#[derive(Clone)]
pub struct Filter<I, P> {
    inner: I,
    predicate: P,
}

impl<I: fmt::Debug, P> fmt::Debug for Filter<I, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter").field("inner", &self.inner).finish()
    }
}

impl<I, P> Iterator for Filter<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        for item in self.inner.by_ref() {
            if (self.predicate)(&item) {
                return Some(item);
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.inner.size_hint();
        (0, upper)
    }
}

impl<I, P> FusedIterator for Filter<I, P>
where
    I: FusedIterator,
    P: FnMut(&I::Item) -> bool,
{
}

/// Iterator returned by [`transform`].
#[derive(Clone)]
pub struct Transform<I, F> {
    inner: I,
    mapping: F,
}

impl<I: fmt::Debug, F> fmt::Debug for Transform<I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<I, F, R> Iterator for Transform<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> R,
{
    type Item = R;

    #[inline]
    fn next(&mut self) -> Option<R> {
        self.inner.next().map(&mut self.mapping)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, F, R> ExactSizeIterator for Transform<I, F>
where
    I: ExactSizeIterator,
    F: FnMut(I::Item) -> R,
{
}

impl<I, F, R> FusedIterator for Transform<I, F>
where
    I: FusedIterator,
    F: FnMut(I::Item) -> R,
{
}
