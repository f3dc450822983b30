//! Ordered, filterable result sequences.
//!
//! Every query on [`crate::Model`] and every child listing on a view returns a
//! [`Selection`]. Filters consume and return the selection, so they chain:
//!
//! ```ignore
//! let messages = model.messages().to_generate().visible().not_nested();
//! ```
//!
//! Filtering never reorders.

use std::ops::Deref;

use crate::semantics::{Nestable, Semantic};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    items: Vec<T>,
}

impl<T> Selection<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn retain(mut self, keep: impl FnMut(&T) -> bool) -> Self {
        self.items.retain(keep);
        self
    }
}

impl<T: Semantic> Selection<T> {
    /// Keep entities whose derived visibility is true.
    pub fn visible(self) -> Self {
        self.retain(T::is_visible)
    }

    /// Keep entities that are not deprecated, directly or by inheritance.
    pub fn not_deprecated(self) -> Self {
        self.retain(|e| !e.is_deprecated())
    }

    /// Keep entities whose owning file is in the to-generate set.
    pub fn to_generate(self) -> Self {
        self.retain(T::is_generated)
    }
}

impl<T: Nestable> Selection<T> {
    /// Keep top-level declarations only.
    pub fn not_nested(self) -> Self {
        self.retain(|e| !e.is_nested())
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Deref for Selection<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for Selection<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for Selection<T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Selection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Selection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
