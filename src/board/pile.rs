//! LIFO piles for tiles and event cards.
//!
//! The top of a pile is the back of the underlying vector: `draw` pops from
//! the back, `push_bottom` inserts at the front. Backed by `im::Vector` so a
//! snapshot of a full pile is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

/// An ordered stack of items, drawn from the top.
///
/// ```
/// use rust_trinity::board::Pile;
///
/// let mut pile: Pile<u32> = Pile::from_bottom_up([1, 2, 3]);
/// assert_eq!(pile.peek(2), vec![3, 2]);
/// assert_eq!(pile.draw(), Some(3));
/// pile.push_bottom(9);
/// assert_eq!(pile.to_vec(), vec![9, 1, 2]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile<T: Clone> {
    items: Vector<T>,
}

impl<T: Clone> Default for Pile<T> {
    fn default() -> Self {
        Self { items: Vector::new() }
    }
}

impl<T: Clone> Pile<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pile from items listed bottom first.
    pub fn from_bottom_up(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take the top item; `None` when empty.
    pub fn draw(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    /// Put an item at the bottom.
    pub fn push_bottom(&mut self, item: T) {
        self.items.push_front(item);
    }

    /// Copies of the top `n` items, topmost first.
    #[must_use]
    pub fn peek(&self, n: usize) -> Vec<T> {
        self.items.iter().rev().take(n).cloned().collect()
    }

    /// Rearrange the top `n` items.
    ///
    /// `order` lists indices into [`Pile::peek`]'s output (0 = current top);
    /// the first listed item becomes the new top. Returns false and leaves
    /// the pile untouched unless `order` is a permutation of `0..n` with
    /// `n <= len`.
    pub fn reorder_top(&mut self, order: &[usize]) -> bool {
        let n = order.len();
        if n > self.items.len() {
            return false;
        }
        let mut seen = vec![false; n];
        for &i in order {
            if i >= n || seen[i] {
                return false;
            }
            seen[i] = true;
        }

        let top = self.peek(n);
        let keep = self.items.len() - n;
        self.items.truncate(keep);
        for &i in order.iter().rev() {
            self.items.push_back(top[i].clone());
        }
        true
    }

    /// Shuffle the whole pile.
    pub fn shuffle(&mut self, rng: &mut crate::core::GameRng) {
        let mut items: Vec<T> = self.items.iter().cloned().collect();
        rng.shuffle(&mut items);
        self.items = items.into_iter().collect();
    }

    /// Items bottom first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }

    /// Iterate bottom first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}
