// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree accessors: the [`TreeSource`] trait and a small owned [`StaticTree`].

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

/// Read-only view of a host's tree topology.
///
/// The engine copies what it needs out of a `TreeSource` during
/// [`attach`](crate::SelectionEngine::attach) and
/// [`resync`](crate::SelectionEngine::resync); it never keeps a borrow.
///
/// Implementations must describe a forest: every child listed by
/// [`children`](Self::children) reports the listing node as its
/// [`parent`](Self::parent), and every id is reachable from exactly one root.
pub trait TreeSource<K> {
    /// Every node id. Roots (ids without a parent) are ordered as they appear here.
    fn ids(&self) -> impl Iterator<Item = K> + '_;

    /// Ordered children of `id`. Empty for leaves and unknown ids.
    fn children(&self, id: K) -> &[K];

    /// Parent of `id`, or `None` for roots and unknown ids.
    fn parent(&self, id: K) -> Option<K>;
}

#[derive(Clone, Debug)]
struct Links<K> {
    parent: Option<K>,
    children: Vec<K>,
}

/// An owned, insertion-ordered tree implementing [`TreeSource`].
///
/// Handy for hosts that do not already keep a parent/child structure, and for tests.
///
/// ```rust
/// use understory_tree_select::{StaticTree, TreeSource};
///
/// let mut tree = StaticTree::new();
/// assert!(tree.insert(None, "root"));
/// assert!(tree.insert(Some("root"), "a"));
/// assert!(!tree.insert(Some("missing"), "b"));
///
/// assert_eq!(tree.children("root"), &["a"]);
/// assert_eq!(tree.parent("a"), Some("root"));
/// ```
#[derive(Clone, Debug)]
pub struct StaticTree<K> {
    order: Vec<K>,
    links: HashMap<K, Links<K>>,
}

impl<K> Default for StaticTree<K> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            links: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> StaticTree<K> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id` as the last child of `parent` (or as a new root when `None`).
    ///
    /// Returns `false`, leaving the tree unchanged, if `id` already exists or
    /// `parent` is unknown.
    pub fn insert(&mut self, parent: Option<K>, id: K) -> bool {
        if self.links.contains_key(&id) {
            return false;
        }
        if let Some(p) = parent {
            let Some(links) = self.links.get_mut(&p) else {
                return false;
            };
            links.children.push(id);
        }
        self.links.insert(
            id,
            Links {
                parent,
                children: Vec::new(),
            },
        );
        self.order.push(id);
        true
    }

    /// Remove `id` and its whole subtree. Returns `false` if `id` is unknown.
    pub fn remove(&mut self, id: K) -> bool {
        let Some(links) = self.links.get(&id) else {
            return false;
        };
        if let Some(p) = links.parent
            && let Some(parent) = self.links.get_mut(&p)
        {
            parent.children.retain(|c| *c != id);
        }
        let mut stack = alloc::vec![id];
        while let Some(n) = stack.pop() {
            if let Some(removed) = self.links.remove(&n) {
                stack.extend(removed.children);
            }
        }
        let links = &self.links;
        self.order.retain(|n| links.contains_key(n));
        true
    }

    /// Returns `true` if `id` is part of the tree.
    pub fn contains(&self, id: K) -> bool {
        self.links.contains_key(&id)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K: Copy + Eq + Hash> TreeSource<K> for StaticTree<K> {
    fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.order.iter().copied()
    }

    fn children(&self, id: K) -> &[K] {
        self.links
            .get(&id)
            .map(|l| l.children.as_slice())
            .unwrap_or(&[])
    }

    fn parent(&self, id: K) -> Option<K> {
        self.links.get(&id).and_then(|l| l.parent)
    }
}
