// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy pre-order iterators over the store.

use core::hash::Hash;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::store::SelectionStore;

/// Pre-order iterator over every effectively checked node.
///
/// Returned by [`SelectionEngine::checked_nodes`](crate::SelectionEngine::checked_nodes)
/// and [`SelectionEngine::checked_leaves`](crate::SelectionEngine::checked_leaves).
/// It reads the store as it was when created; subtrees whose root is
/// unchecked are skipped without being visited.
#[derive(Clone, Debug)]
pub struct CheckedNodes<'a, K> {
    store: &'a SelectionStore<K>,
    stack: SmallVec<[K; 16]>,
    leaves_only: bool,
}

impl<'a, K: Copy + Eq + Hash> CheckedNodes<'a, K> {
    pub(crate) fn new(store: &'a SelectionStore<K>, leaves_only: bool) -> Self {
        let stack = store.roots().iter().rev().copied().collect();
        Self {
            store,
            stack,
            leaves_only,
        }
    }
}

impl<K: Copy + Eq + Hash> Iterator for CheckedNodes<'_, K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let store = self.store;
        while let Some(id) = self.stack.pop() {
            let Some(entry) = store.get(id) else {
                continue;
            };
            if entry.state.is_unchecked() {
                continue;
            }
            let is_leaf = entry.children.is_empty();
            self.stack.extend(entry.children.iter().rev().copied());
            if entry.state.is_checked() && (is_leaf || !self.leaves_only) {
                return Some(id);
            }
        }
        None
    }
}

impl<K: Copy + Eq + Hash> FusedIterator for CheckedNodes<'_, K> {}

/// Pre-order iterator over `(id, explicit)` pairs of childless nodes.
///
/// Returned by [`SelectionEngine::explicit_selection`](crate::SelectionEngine::explicit_selection).
#[derive(Clone, Debug)]
pub struct ExplicitSelection<'a, K> {
    store: &'a SelectionStore<K>,
    stack: SmallVec<[K; 16]>,
}

impl<'a, K: Copy + Eq + Hash> ExplicitSelection<'a, K> {
    pub(crate) fn new(store: &'a SelectionStore<K>) -> Self {
        let stack = store.roots().iter().rev().copied().collect();
        Self { store, stack }
    }
}

impl<K: Copy + Eq + Hash> Iterator for ExplicitSelection<'_, K> {
    type Item = (K, bool);

    fn next(&mut self) -> Option<(K, bool)> {
        let store = self.store;
        while let Some(id) = self.stack.pop() {
            let Some(entry) = store.get(id) else {
                continue;
            };
            if entry.children.is_empty() {
                return Some((id, entry.explicit));
            }
            self.stack.extend(entry.children.iter().rev().copied());
        }
        None
    }
}

impl<K: Copy + Eq + Hash> FusedIterator for ExplicitSelection<'_, K> {}
