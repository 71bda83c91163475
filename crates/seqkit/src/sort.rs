use std::cmp::Ordering;

// Runs at or below this length are finished with insertion sort.
const INSERTION_RUN: usize = 12;

/// Stable top-down merge sort.
///
/// Elements that compare `Equal` keep the order they had in `items`: insertion
/// only moves an element left past strictly greater neighbours, and the merge
/// prefers the left half on ties.
pub(crate) fn merge_sort<T, C>(mut items: Vec<T>, compare: &mut C) -> Vec<T>
where
    C: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= INSERTION_RUN {
        insertion_sort(&mut items, compare);
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, compare);
    let right = merge_sort(right, compare);
    merge(left, right, compare)
}

fn insertion_sort<T, C>(items: &mut [T], compare: &mut C)
where
    C: FnMut(&T, &T) -> Ordering,
{
    for index in 1..items.len() {
        let mut cursor = index;
        while cursor > 0 && compare(&items[cursor - 1], &items[cursor]) == Ordering::Greater {
            items.swap(cursor - 1, cursor);
            cursor -= 1;
        }
    }
}

fn merge<T, C>(left: Vec<T>, right: Vec<T>, compare: &mut C) -> Vec<T>
where
    C: FnMut(&T, &T) -> Ordering,
{
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(l, r) == Ordering::Greater,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        if take_right {
            out.extend(right.next());
        } else {
            out.extend(left.next());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_key(a: &(i32, usize), b: &(i32, usize)) -> Ordering {
        a.0.cmp(&b.0)
    }

    fn tagged(keys: &[i32]) -> Vec<(i32, usize)> {
        keys.iter().copied().zip(0..).collect()
    }

    fn assert_stable(sorted: &[(i32, usize)]) {
        for pair in sorted.windows(2) {
            assert!(pair[0].0 <= pair[1].0, "out of order: {pair:?}");
            if pair[0].0 == pair[1].0 {
                assert!(pair[0].1 < pair[1].1, "equal keys reordered: {pair:?}");
            }
        }
    }

    #[test]
    fn insertion_run_is_stable() {
        let mut items = tagged(&[3, 1, 3, 2, 1, 3]);
        insertion_sort(&mut items, &mut by_key);
        assert_stable(&items);
    }

    #[test]
    fn merge_prefers_left_on_ties() {
        let left = vec![(1, 0), (2, 1)];
        let right = vec![(1, 2), (2, 3)];
        let merged = merge(left, right, &mut by_key);
        assert_eq!(merged, vec![(1, 0), (1, 2), (2, 1), (2, 3)]);
    }

    #[test]
    fn long_input_with_many_duplicates_stays_stable() {
        let keys: Vec<i32> = (0..257).map(|i| (i * 7919) % 5).collect();
        let sorted = merge_sort(tagged(&keys), &mut by_key);
        assert_eq!(sorted.len(), keys.len());
        assert_stable(&sorted);
    }

    #[test]
    fn comparison_count_is_bounded() {
        let mut calls = 0usize;
        let items: Vec<i32> = (0..1024).rev().collect();
        let sorted = merge_sort(items, &mut |a: &i32, b: &i32| {
            calls += 1;
            a.cmp(b)
        });
        assert_eq!(sorted, (0..1024).collect::<Vec<_>>());
        assert!(calls < 1024 * 16, "too many comparisons: {calls}");
    }
}
