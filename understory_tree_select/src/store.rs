// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection store: a validated topology snapshot plus per-node state.
//!
//! Each node keeps an explicit flag (its own selection) and an effective
//! [`CheckState`]. Childless nodes take their effective state straight from
//! the explicit flag; every other node derives it from its children.

use alloc::vec::Vec;
use core::hash::Hash;
use core::mem;

use hashbrown::{HashMap, HashSet};
use smallvec::{SmallVec, smallvec};

use crate::change::{StateChange, record};
use crate::error::SelectionError;
use crate::source::TreeSource;
use crate::types::CheckState;

#[derive(Clone, Debug)]
pub(crate) struct Entry<K> {
    pub(crate) parent: Option<K>,
    pub(crate) children: SmallVec<[K; 4]>,
    pub(crate) explicit: bool,
    pub(crate) state: CheckState,
}

#[derive(Clone, Debug)]
pub(crate) struct SelectionStore<K> {
    roots: SmallVec<[K; 1]>,
    entries: HashMap<K, Entry<K>>,
}

/// Combine children's effective states.
///
/// All checked gives checked, all unchecked gives unchecked, anything else
/// (including any intermediate child) is intermediate. An empty input is
/// unchecked; callers only derive nodes that have children.
pub(crate) fn derive(states: impl IntoIterator<Item = CheckState>) -> CheckState {
    let mut any_checked = false;
    let mut any_unchecked = false;
    for s in states {
        match s {
            CheckState::Checked => any_checked = true,
            CheckState::Unchecked => any_unchecked = true,
            CheckState::Intermediate => return CheckState::Intermediate,
        }
        if any_checked && any_unchecked {
            return CheckState::Intermediate;
        }
    }
    CheckState::from_checked(any_checked)
}

impl<K: Copy + Eq + Hash> SelectionStore<K> {
    /// Copy and validate the topology of `tree`. Every node starts unchecked.
    pub(crate) fn snapshot<T: TreeSource<K>>(tree: &T) -> Result<Self, SelectionError<K>> {
        let mut entries: HashMap<K, Entry<K>> = HashMap::new();
        let mut roots = SmallVec::new();
        let mut order = Vec::new();
        for id in tree.ids() {
            let parent = tree.parent(id);
            let entry = Entry {
                parent,
                children: tree.children(id).iter().copied().collect(),
                explicit: false,
                state: CheckState::Unchecked,
            };
            if entries.insert(id, entry).is_some() {
                return Err(SelectionError::InconsistentTree(id));
            }
            if parent.is_none() {
                roots.push(id);
            }
            order.push(id);
        }

        for &id in &order {
            let entry = &entries[&id];
            if let Some(p) = entry.parent
                && !entries.contains_key(&p)
            {
                return Err(SelectionError::InconsistentTree(id));
            }
            for &c in &entry.children {
                match entries.get(&c) {
                    Some(child) if child.parent == Some(id) => {}
                    _ => return Err(SelectionError::InconsistentTree(c)),
                }
            }
        }

        // Links agree; now every id must be reached exactly once from the roots.
        let mut seen: HashSet<K> = HashSet::with_capacity(order.len());
        let mut stack: SmallVec<[K; 16]> = roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(SelectionError::InconsistentTree(id));
            }
            stack.extend(entries[&id].children.iter().rev().copied());
        }
        if let Some(&orphan) = order.iter().find(|id| !seen.contains(*id)) {
            return Err(SelectionError::InconsistentTree(orphan));
        }

        Ok(Self { roots, entries })
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn roots(&self) -> &[K] {
        &self.roots
    }

    pub(crate) fn get(&self, id: K) -> Option<&Entry<K>> {
        self.entries.get(&id)
    }

    pub(crate) fn entry(&self, id: K) -> Result<&Entry<K>, SelectionError<K>> {
        self.entries.get(&id).ok_or(SelectionError::UnknownNode(id))
    }

    /// All ids in pre-order (roots in source order, children in listed order).
    pub(crate) fn pre_order(&self) -> Vec<K> {
        let mut out = Vec::with_capacity(self.entries.len());
        let mut stack: SmallVec<[K; 16]> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.entries[&id].children.iter().rev().copied());
        }
        out
    }

    fn derive_node(&self, id: K) -> CheckState {
        let entry = &self.entries[&id];
        if entry.children.is_empty() {
            CheckState::from_checked(entry.explicit)
        } else {
            derive(entry.children.iter().map(|c| self.entries[c].state))
        }
    }

    /// Recompute every effective state from explicit flags, bottom-up.
    pub(crate) fn derive_all(&mut self) {
        for id in self.pre_order().into_iter().rev() {
            let state = self.derive_node(id);
            if let Some(entry) = self.entries.get_mut(&id) {
                entry.state = state;
            }
        }
    }

    /// Set explicit flags from a seed, then derive.
    ///
    /// With `inherit`, a node without its own seed entry takes the flag of its
    /// nearest seeded ancestor, and an unseeded node with children ends up
    /// with the flag its derived state implies, as subtree-mode writes leave it.
    pub(crate) fn apply_seed(&mut self, seed: &HashMap<K, bool>, inherit: bool) {
        let mut stack: SmallVec<[(K, Option<bool>); 16]> =
            self.roots.iter().rev().map(|&r| (r, None)).collect();
        while let Some((id, inherited)) = stack.pop() {
            let flag = seed.get(&id).copied().or(inherited);
            let Some(entry) = self.entries.get_mut(&id) else {
                continue;
            };
            entry.explicit = flag.unwrap_or(false);
            let pass = if inherit { flag } else { None };
            stack.extend(entry.children.iter().rev().map(|&c| (c, pass)));
        }
        self.derive_all();
        if inherit {
            for (id, entry) in &mut self.entries {
                if !entry.children.is_empty() && !seed.contains_key(id) {
                    entry.explicit = entry.state.is_checked();
                }
            }
        }
    }

    /// Carry explicit flags over from `old` for every id both stores share.
    pub(crate) fn inherit_explicit(&mut self, old: &Self) {
        for (id, entry) in &mut self.entries {
            if let Some(prev) = old.entries.get(id) {
                entry.explicit = prev.explicit;
            }
        }
        self.derive_all();
    }

    /// Write `checked` to `id` and all of its descendants, recording in pre-order.
    pub(crate) fn write_subtree(&mut self, id: K, checked: bool, out: &mut Vec<StateChange<K>>) {
        let target = CheckState::from_checked(checked);
        let mut stack: SmallVec<[K; 16]> = smallvec![id];
        while let Some(n) = stack.pop() {
            let Some(entry) = self.entries.get_mut(&n) else {
                continue;
            };
            entry.explicit = checked;
            let old = mem::replace(&mut entry.state, target);
            record(out, n, old, target);
            stack.extend(entry.children.iter().rev().copied());
        }
    }

    /// Write `checked` to `id` only. Nodes with children keep their derived state.
    pub(crate) fn write_node(&mut self, id: K, checked: bool, out: &mut Vec<StateChange<K>>) {
        let Some(entry) = self.entries.get_mut(&id) else {
            return;
        };
        entry.explicit = checked;
        if entry.children.is_empty() {
            let new = CheckState::from_checked(checked);
            let old = mem::replace(&mut entry.state, new);
            record(out, id, old, new);
        }
    }

    /// Re-derive the ancestors of `id`, nearest first, stopping at the first
    /// ancestor whose state does not change.
    ///
    /// With `sync_explicit`, each changed ancestor's explicit flag follows its
    /// new state, so a cleared folder stays cleared if it later loses its
    /// children.
    pub(crate) fn propagate_up(
        &mut self,
        id: K,
        sync_explicit: bool,
        out: &mut Vec<StateChange<K>>,
    ) {
        let mut current = self.entries.get(&id).and_then(|e| e.parent);
        while let Some(ancestor) = current {
            let new = self.derive_node(ancestor);
            let Some(entry) = self.entries.get_mut(&ancestor) else {
                break;
            };
            if entry.state == new {
                break;
            }
            if sync_explicit {
                entry.explicit = new.is_checked();
            }
            let old = mem::replace(&mut entry.state, new);
            record(out, ancestor, old, new);
            current = entry.parent;
        }
    }

    /// Returns `true` if every stored state matches its derivation.
    pub(crate) fn is_consistent(&self) -> bool {
        self.entries.iter().all(|(&id, e)| {
            let leaf_ok = !e.children.is_empty() || !e.state.is_intermediate();
            leaf_ok && e.state == self.derive_node(id)
        })
    }
}
