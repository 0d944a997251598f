//! Lazy subset enumeration for the max-revenue strategy.
//!
//! Subsets come out in lexicographic index order: every subset starting with
//! the first item (followed by the subsets of the remaining tail), then every
//! subset starting with the second item, and so on. Items inside a subset
//! keep their input order.

/// Iterator over every `k`-item subset of a slice.
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    done: bool,
}

impl<'a, T> Combinations<'a, T> {
    fn new(items: &'a [T], k: usize) -> Self {
        Combinations {
            items,
            indices: (0..k).collect(),
            done: k == 0 || k > items.len(),
        }
    }

    /// Move `indices` to the next subset in lexicographic order.
    fn advance(&mut self) {
        let n = self.items.len();
        let k = self.indices.len();
        // Rightmost position that can still move right.
        let Some(pos) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            self.done = true;
            return;
        };
        self.indices[pos] += 1;
        for i in pos + 1..k {
            self.indices[i] = self.indices[i - 1] + 1;
        }
    }
}

impl<'a, T> Iterator for Combinations<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let subset = self.indices.iter().map(|&i| &self.items[i]).collect();
        self.advance();
        Some(subset)
    }
}

/// Every subset of exactly `k` items. Yields nothing when `k` is zero or
/// larger than `items.len()`.
pub fn combinations<T>(items: &[T], k: usize) -> Combinations<'_, T> {
    Combinations::new(items, k)
}

/// Every non-empty subset: all 1-item subsets, then all 2-item subsets, up
/// to the whole input. Yields `2^n - 1` subsets for `n` items.
pub fn all_combinations<T>(items: &[T]) -> impl Iterator<Item = Vec<&T>> {
    (1..=items.len()).flat_map(move |k| combinations(items, k))
}
