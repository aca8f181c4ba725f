// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection engine: attachment, writes, propagation, and queries.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::change::{ListenerId, Listeners, StateChange, record};
use crate::error::SelectionError;
use crate::iter::{CheckedNodes, ExplicitSelection};
use crate::source::TreeSource;
use crate::store::SelectionStore;
use crate::types::{CheckState, IntermediateToggle, SelectionConfig, SelectionMode};

/// Tri-state selection over an attached tree.
///
/// The engine owns a snapshot of the tree's topology and the state of every
/// node in it. Writes go through [`set_state`](Self::set_state),
/// [`toggle`](Self::toggle), [`set_all`](Self::set_all), and
/// [`resync`](Self::resync); each runs to completion, returns the batch of
/// [`StateChange`]s it caused, and then hands that batch to subscribed
/// listeners.
///
/// ## Example
///
/// ```rust
/// use understory_tree_select::{CheckState, SelectionEngine, SelectionMode, StaticTree};
///
/// let mut tree = StaticTree::new();
/// tree.insert(None, "root");
/// tree.insert(Some("root"), "a");
/// tree.insert(Some("a"), "a1");
/// tree.insert(Some("a"), "a2");
/// tree.insert(Some("root"), "b");
///
/// let mut engine = SelectionEngine::with_mode(SelectionMode::Subtree);
/// engine.attach(&tree).unwrap();
///
/// engine.set_state("a", CheckState::Checked).unwrap();
/// assert_eq!(engine.state("a2"), Ok(CheckState::Checked));
/// assert_eq!(engine.state("root"), Ok(CheckState::Intermediate));
///
/// let checked: Vec<_> = engine.checked_nodes().unwrap().collect();
/// assert_eq!(checked, ["a", "a1", "a2"]);
/// ```
pub struct SelectionEngine<K> {
    config: SelectionConfig,
    store: Option<SelectionStore<K>>,
    listeners: Listeners<K>,
}

impl<K> fmt::Debug for SelectionEngine<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionEngine")
            .field("config", &self.config)
            .field("attached", &self.store.is_some())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl<K> Default for SelectionEngine<K> {
    fn default() -> Self {
        Self::new(SelectionConfig::default())
    }
}

impl<K> SelectionEngine<K> {
    /// Create a detached engine with the given configuration.
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            store: None,
            listeners: Listeners::default(),
        }
    }

    /// Create a detached engine using `mode` and default settings otherwise.
    pub fn with_mode(mode: SelectionMode) -> Self {
        Self::new(SelectionConfig::default().with_mode(mode))
    }

    /// Current configuration.
    pub fn config(&self) -> SelectionConfig {
        self.config
    }

    /// Active propagation mode.
    pub fn mode(&self) -> SelectionMode {
        self.config.mode
    }

    /// Change how [`IntermediateToggle`] is resolved by [`toggle`](Self::toggle).
    pub fn set_intermediate_toggle(&mut self, toggle: IntermediateToggle) {
        self.config.intermediate_toggle = toggle;
    }

    /// Returns `true` while a tree is attached.
    pub fn is_attached(&self) -> bool {
        self.store.is_some()
    }

    /// Drop the attached tree. Every previously valid id becomes unknown.
    ///
    /// Listeners stay subscribed; no notification is sent.
    pub fn detach(&mut self) {
        if self.store.take().is_some() {
            trace_event!(debug, "detached tree");
        }
    }

    /// Register a listener for change batches.
    ///
    /// The listener runs after each completed operation that changed at least
    /// one node, in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(&[StateChange<K>]) + 'static) -> ListenerId {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

impl<K: Copy + Eq + Hash> SelectionEngine<K> {
    /// Attach `tree` with every node unchecked, replacing any previous attachment.
    ///
    /// On error the engine keeps whatever it had before.
    pub fn attach<T: TreeSource<K>>(&mut self, tree: &T) -> Result<(), SelectionError<K>> {
        let store = SelectionStore::snapshot(tree)?;
        trace_event!(debug, nodes = store.len(), "attached tree");
        self.store = Some(store);
        Ok(())
    }

    /// Attach `tree` and seed explicit selections.
    ///
    /// Ids missing from `seed` start unchecked. In [`SelectionMode::Subtree`],
    /// a seeded node passes its flag down to descendants that have no seed
    /// entry of their own (the nearest seeded ancestor wins, whatever the
    /// seed order). Every other state is then derived.
    ///
    /// Fails with [`SelectionError::UnknownNode`] if a seed id is not in `tree`.
    pub fn attach_with_seed<T, I>(&mut self, tree: &T, seed: I) -> Result<(), SelectionError<K>>
    where
        T: TreeSource<K>,
        I: IntoIterator<Item = (K, bool)>,
    {
        let mut store = SelectionStore::snapshot(tree)?;
        let seed: HashMap<K, bool> = seed.into_iter().collect();
        if let Some(&unknown) = seed.keys().find(|id| store.get(**id).is_none()) {
            return Err(SelectionError::UnknownNode(unknown));
        }
        store.apply_seed(&seed, self.config.mode == SelectionMode::Subtree);
        trace_event!(
            debug,
            nodes = store.len(),
            seeded = seed.len(),
            "attached tree with seed"
        );
        self.store = Some(store);
        Ok(())
    }

    /// Re-snapshot the topology of `tree` after external edits.
    ///
    /// Explicit flags of ids present before and after are kept, new ids start
    /// unchecked, and removed ids become unknown. All effective states are
    /// re-derived; changes are reported for surviving ids in pre-order.
    pub fn resync<T: TreeSource<K>>(
        &mut self,
        tree: &T,
    ) -> Result<Vec<StateChange<K>>, SelectionError<K>> {
        let old = self.store.as_ref().ok_or(SelectionError::NotAttached)?;
        let mut store = SelectionStore::snapshot(tree)?;
        store.inherit_explicit(old);

        let mut changes = Vec::new();
        for id in store.pre_order() {
            if let (Some(prev), Some(now)) = (old.get(id), store.get(id)) {
                record(&mut changes, id, prev.state, now.state);
            }
        }
        trace_event!(
            debug,
            nodes = store.len(),
            changes = changes.len(),
            "resynced tree"
        );
        self.store = Some(store);
        self.listeners.notify(&changes);
        Ok(changes)
    }

    /// Switch the propagation mode for future writes. Returns the previous mode.
    ///
    /// Existing states are left as they are: the derivation rule does not
    /// depend on the mode, so the store is already consistent.
    pub fn set_mode(&mut self, mode: SelectionMode) -> SelectionMode {
        let previous = core::mem::replace(&mut self.config.mode, mode);
        if let Some(store) = &self.store {
            debug_assert!(store.is_consistent(), "store drifted from its derivation");
        }
        if previous != mode {
            trace_event!(debug, ?mode, "selection mode changed");
        }
        previous
    }

    /// Effective state of `id`.
    pub fn state(&self, id: K) -> Result<CheckState, SelectionError<K>> {
        Ok(self.attached()?.entry(id)?.state)
    }

    /// Explicit flag of `id`: its own selection, independent of children.
    ///
    /// For childless nodes this agrees with [`state`](Self::state). For other
    /// nodes it only records the last direct write in [`SelectionMode::Node`]
    /// (or a cascade in [`SelectionMode::Subtree`]).
    pub fn explicit_state(&self, id: K) -> Result<bool, SelectionError<K>> {
        Ok(self.attached()?.entry(id)?.explicit)
    }

    /// Set `id` to `desired` and propagate according to the active mode.
    ///
    /// `desired` must be [`CheckState::Checked`] or [`CheckState::Unchecked`].
    /// Returns the changes in order: the target, its descendants top-down
    /// (subtree mode), then its ancestors bottom-up.
    pub fn set_state(
        &mut self,
        id: K,
        desired: CheckState,
    ) -> Result<Vec<StateChange<K>>, SelectionError<K>> {
        self.attached()?.entry(id)?;
        let checked = match desired {
            CheckState::Checked => true,
            CheckState::Unchecked => false,
            CheckState::Intermediate => return Err(SelectionError::InvalidState(id)),
        };
        Ok(self.apply(id, checked))
    }

    /// Flip `id`.
    ///
    /// A checked node becomes unchecked and an unchecked node becomes checked.
    /// An intermediate node follows [`SelectionConfig::intermediate_toggle`].
    /// In [`SelectionMode::Node`], a node with children flips only its
    /// explicit flag: its effective state is derived from its children, so the
    /// call returns an empty batch and notifies nobody. Hosts that want every
    /// click to show a change should disable the control for such nodes.
    pub fn toggle(&mut self, id: K) -> Result<Vec<StateChange<K>>, SelectionError<K>> {
        let entry = self.attached()?.entry(id)?;
        let checked = if self.config.mode == SelectionMode::Node && !entry.children.is_empty() {
            !entry.explicit
        } else {
            match entry.state {
                CheckState::Checked => false,
                CheckState::Unchecked => true,
                CheckState::Intermediate => {
                    self.config.intermediate_toggle == IntermediateToggle::Check
                }
            }
        };
        Ok(self.apply(id, checked))
    }

    /// Check (`true`) or clear (`false`) every node, regardless of mode.
    pub fn set_all(&mut self, checked: bool) -> Result<Vec<StateChange<K>>, SelectionError<K>> {
        let store = self.store.as_mut().ok_or(SelectionError::NotAttached)?;
        let mut changes = Vec::new();
        let roots: Vec<K> = store.roots().to_vec();
        for root in roots {
            store.write_subtree(root, checked, &mut changes);
        }
        trace_event!(trace, checked, changes = changes.len(), "set all");
        self.listeners.notify(&changes);
        Ok(changes)
    }

    /// Every effectively checked node, in pre-order.
    ///
    /// The iterator is computed from the current store each time this is
    /// called. Fails with [`SelectionError::NotAttached`] while detached.
    pub fn checked_nodes(&self) -> Result<CheckedNodes<'_, K>, SelectionError<K>> {
        Ok(CheckedNodes::new(self.attached()?, false))
    }

    /// Checked childless nodes only, in pre-order.
    pub fn checked_leaves(&self) -> Result<CheckedNodes<'_, K>, SelectionError<K>> {
        Ok(CheckedNodes::new(self.attached()?, true))
    }

    /// `(id, explicit)` for every childless node, in pre-order.
    ///
    /// This is all that needs persisting: feed it back through
    /// [`attach_with_seed`](Self::attach_with_seed) to rebuild the same states.
    pub fn explicit_selection(&self) -> Result<ExplicitSelection<'_, K>, SelectionError<K>> {
        Ok(ExplicitSelection::new(self.attached()?))
    }

    /// Number of nodes in the attached tree (zero while detached).
    pub fn len(&self) -> usize {
        self.store.as_ref().map_or(0, SelectionStore::len)
    }

    /// Returns `true` if no nodes are attached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `id` is part of the attached tree.
    pub fn contains(&self, id: K) -> bool {
        self.store.as_ref().is_some_and(|s| s.get(id).is_some())
    }

    /// Parent of `id` in the attached snapshot.
    pub fn parent(&self, id: K) -> Result<Option<K>, SelectionError<K>> {
        Ok(self.attached()?.entry(id)?.parent)
    }

    /// Children of `id` in the attached snapshot.
    pub fn children(&self, id: K) -> Result<&[K], SelectionError<K>> {
        Ok(self.attached()?.entry(id)?.children.as_slice())
    }

    fn attached(&self) -> Result<&SelectionStore<K>, SelectionError<K>> {
        self.store.as_ref().ok_or(SelectionError::NotAttached)
    }

    /// Write an already-validated id and notify.
    fn apply(&mut self, id: K, checked: bool) -> Vec<StateChange<K>> {
        let mut changes = Vec::new();
        let Some(store) = self.store.as_mut() else {
            return changes;
        };
        match self.config.mode {
            SelectionMode::Node => store.write_node(id, checked, &mut changes),
            SelectionMode::Subtree => store.write_subtree(id, checked, &mut changes),
        }
        let sync_explicit = self.config.mode == SelectionMode::Subtree;
        store.propagate_up(id, sync_explicit, &mut changes);
        debug_assert!(store.is_consistent(), "propagation left the store inconsistent");
        trace_event!(trace, checked, changes = changes.len(), "applied selection");
        self.listeners.notify(&changes);
        changes
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;
    use crate::source::StaticTree;

    use crate::types::CheckState::{Checked, Intermediate, Unchecked};

    /// `root{a{a1,a2}, b}`
    fn sample() -> StaticTree<&'static str> {
        let mut tree = StaticTree::new();
        tree.insert(None, "root");
        tree.insert(Some("root"), "a");
        tree.insert(Some("a"), "a1");
        tree.insert(Some("a"), "a2");
        tree.insert(Some("root"), "b");
        tree
    }

    fn attached(mode: SelectionMode) -> SelectionEngine<&'static str> {
        let mut engine = SelectionEngine::with_mode(mode);
        engine.attach(&sample()).unwrap();
        engine
    }

    fn states(engine: &SelectionEngine<&'static str>, ids: &[&'static str]) -> Vec<CheckState> {
        ids.iter().map(|id| engine.state(*id).unwrap()).collect()
    }

    fn change(node: &'static str, old: CheckState, new: CheckState) -> StateChange<&'static str> {
        StateChange { node, old, new }
    }

    #[test]
    fn subtree_check_marks_descendants_and_mixes_root() {
        let mut engine = attached(SelectionMode::Subtree);
        engine.set_state("a", Checked).unwrap();
        assert_eq!(
            states(&engine, &["a", "a1", "a2", "root", "b"]),
            [Checked, Checked, Checked, Intermediate, Unchecked]
        );

        engine.set_state("b", Checked).unwrap();
        assert_eq!(engine.state("root"), Ok(Checked));
    }

    #[test]
    fn node_mode_leaves_siblings_alone() {
        let mut tree = StaticTree::new();
        tree.insert(None, "root");
        tree.insert(Some("root"), "a");
        tree.insert(Some("a"), "a1");
        tree.insert(Some("a"), "a2");

        let mut engine = SelectionEngine::with_mode(SelectionMode::Node);
        engine.attach(&tree).unwrap();
        let changes = engine.set_state("a1", Checked).unwrap();
        assert_eq!(
            states(&engine, &["a1", "a2", "a", "root"]),
            [Checked, Unchecked, Intermediate, Intermediate]
        );
        assert!(changes.iter().all(|c| c.node != "a2"));
    }

    #[test]
    fn node_mode_on_parent_keeps_descendants() {
        let mut engine = attached(SelectionMode::Node);
        let changes = engine.set_state("a", Checked).unwrap();
        assert!(changes.is_empty(), "a is derived from its children");
        assert_eq!(engine.explicit_state("a"), Ok(true));
        assert_eq!(engine.explicit_state("a1"), Ok(false));
        assert_eq!(engine.state("a"), Ok(Unchecked));
    }

    #[test]
    fn notifications_are_ordered_target_descendants_ancestors() {
        let mut engine = attached(SelectionMode::Subtree);
        let changes = engine.set_state("a", Checked).unwrap();
        assert_eq!(
            changes,
            [
                change("a", Unchecked, Checked),
                change("a1", Unchecked, Checked),
                change("a2", Unchecked, Checked),
                change("root", Unchecked, Intermediate),
            ]
        );
    }

    #[test]
    fn repeated_write_is_silent() {
        let mut engine = attached(SelectionMode::Subtree);
        let batches = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&batches);
        engine.subscribe(move |batch| sink.borrow_mut().push(batch.to_vec()));

        let first = engine.set_state("a1", Checked).unwrap();
        let second = engine.set_state("a1", Checked).unwrap();
        assert_eq!(first.len(), 3);
        assert!(second.is_empty());
        assert_eq!(batches.borrow().len(), 1, "only the first write notifies");
        assert_eq!(batches.borrow()[0], first);
    }

    #[test]
    fn toggle_flips_and_resolves_intermediate() {
        let mut engine = attached(SelectionMode::Subtree);
        engine.toggle("a1").unwrap();
        assert_eq!(engine.state("a"), Ok(Intermediate));

        engine.toggle("a").unwrap();
        assert_eq!(states(&engine, &["a", "a1", "a2"]), [Checked; 3]);

        engine.toggle("a").unwrap();
        assert_eq!(states(&engine, &["a", "a1", "a2"]), [Unchecked; 3]);

        engine.set_intermediate_toggle(IntermediateToggle::Uncheck);
        engine.toggle("a1").unwrap();
        engine.toggle("root").unwrap();
        assert!(engine.checked_nodes().unwrap().next().is_none());
    }

    #[test]
    fn toggle_in_node_mode_flips_explicit_flag_of_parent() {
        let mut engine = attached(SelectionMode::Node);
        let changes = engine.toggle("a").unwrap();
        assert!(changes.is_empty(), "no effective state moves");
        assert_eq!(engine.state("a"), Ok(Unchecked));
        assert_eq!(engine.explicit_state("a"), Ok(true));
        engine.toggle("a").unwrap();
        assert_eq!(engine.explicit_state("a"), Ok(false));
    }

    #[test]
    fn root_toggle_covers_whole_tree() {
        let mut engine = attached(SelectionMode::Subtree);
        let changes = engine.toggle("root").unwrap();
        assert_eq!(changes.len(), 5);
        assert_eq!(engine.checked_nodes().unwrap().count(), 5);
        assert_eq!(
            engine.checked_leaves().unwrap().collect::<Vec<_>>(),
            ["a1", "a2", "b"]
        );
    }

    #[test]
    fn errors_leave_store_untouched() {
        let mut engine: SelectionEngine<&str> = SelectionEngine::default();
        assert_eq!(engine.state("a"), Err(SelectionError::NotAttached));
        assert_eq!(engine.checked_nodes().err(), Some(SelectionError::NotAttached));
        assert_eq!(engine.checked_leaves().err(), Some(SelectionError::NotAttached));
        assert_eq!(
            engine.explicit_selection().err(),
            Some(SelectionError::NotAttached)
        );
        assert_eq!(
            engine.set_state("a", Checked),
            Err(SelectionError::NotAttached)
        );

        engine.attach(&sample()).unwrap();
        assert_eq!(
            engine.set_state("zz", Checked),
            Err(SelectionError::UnknownNode("zz"))
        );
        assert_eq!(
            engine.set_state("a", Intermediate),
            Err(SelectionError::InvalidState("a"))
        );
        assert_eq!(engine.checked_nodes().unwrap().count(), 0);
    }

    #[test]
    fn detach_invalidates_ids() {
        let mut engine = attached(SelectionMode::Subtree);
        engine.set_state("b", Checked).unwrap();
        engine.detach();
        assert!(!engine.is_attached());
        assert_eq!(engine.state("b"), Err(SelectionError::NotAttached));
        assert_eq!(engine.checked_nodes().err(), Some(SelectionError::NotAttached));
        assert_eq!(
            engine.explicit_selection().err(),
            Some(SelectionError::NotAttached)
        );
        assert!(engine.is_empty());
    }

    #[test]
    fn mode_switch_keeps_states() {
        let mut engine = attached(SelectionMode::Subtree);
        engine.set_state("a", Checked).unwrap();
        let before = states(&engine, &["root", "a", "a1", "a2", "b"]);

        assert_eq!(engine.set_mode(SelectionMode::Node), SelectionMode::Subtree);
        assert_eq!(states(&engine, &["root", "a", "a1", "a2", "b"]), before);

        // Node mode now governs: unchecking `a1` does not touch `a2`.
        engine.set_state("a1", Unchecked).unwrap();
        assert_eq!(states(&engine, &["a", "a1", "a2"]), [Intermediate, Unchecked, Checked]);
    }

    #[test]
    fn seed_inherits_in_subtree_mode_only() {
        let tree = sample();

        let mut subtree = SelectionEngine::with_mode(SelectionMode::Subtree);
        subtree
            .attach_with_seed(&tree, [("a", true), ("a2", false)])
            .unwrap();
        assert_eq!(
            states(&subtree, &["a1", "a2", "a", "root"]),
            [Checked, Unchecked, Intermediate, Intermediate]
        );

        let mut node = SelectionEngine::with_mode(SelectionMode::Node);
        node.attach_with_seed(&tree, [("a", true)]).unwrap();
        assert_eq!(node.state("a"), Ok(Unchecked));
        assert_eq!(node.explicit_state("a"), Ok(true));

        assert_eq!(
            node.attach_with_seed(&tree, [("nope", true)]),
            Err(SelectionError::UnknownNode("nope"))
        );
        assert_eq!(node.explicit_state("a"), Ok(true), "failed attach keeps old store");
    }

    #[test]
    fn resync_keeps_survivors_and_rederives() {
        let mut tree = sample();
        let mut engine = SelectionEngine::with_mode(SelectionMode::Node);
        engine.attach(&tree).unwrap();
        engine.set_state("a1", Checked).unwrap();
        assert_eq!(engine.state("a"), Ok(Intermediate));

        tree.remove("a2");
        tree.insert(Some("root"), "c");
        let changes = engine.resync(&tree).unwrap();

        assert_eq!(changes, vec![change("a", Intermediate, Checked)]);
        assert_eq!(engine.state("a2"), Err(SelectionError::UnknownNode("a2")));
        assert_eq!(engine.state("c"), Ok(Unchecked));
        assert_eq!(engine.state("root"), Ok(Intermediate));
    }

    #[test]
    fn resync_exposes_explicit_flag_of_new_leaf() {
        let mut tree = sample();
        let mut engine = SelectionEngine::with_mode(SelectionMode::Node);
        engine.attach(&tree).unwrap();
        engine.set_state("a", Checked).unwrap();

        tree.remove("a1");
        tree.remove("a2");
        engine.resync(&tree).unwrap();
        assert_eq!(engine.state("a"), Ok(Checked));
    }

    #[test]
    fn cleared_folder_stays_cleared_after_losing_children() {
        let mut tree = sample();
        let mut engine = attached(SelectionMode::Subtree);
        engine.set_state("a", Checked).unwrap();
        engine.set_state("a1", Unchecked).unwrap();
        engine.set_state("a2", Unchecked).unwrap();
        assert_eq!(engine.state("a"), Ok(Unchecked));
        assert_eq!(engine.explicit_state("a"), Ok(false));
        let saved: Vec<_> = engine.explicit_selection().unwrap().collect();

        tree.remove("a1");
        tree.remove("a2");
        let changes = engine.resync(&tree).unwrap();
        assert!(changes.is_empty(), "resync reported {changes:?}");
        assert_eq!(states(&engine, &["root", "a", "b"]), [Unchecked; 3]);

        // A store rebuilt from the saved leaves agrees after the same edit.
        let mut restored = SelectionEngine::with_mode(SelectionMode::Subtree);
        restored.attach_with_seed(&sample(), saved).unwrap();
        restored.resync(&tree).unwrap();
        for id in ["root", "a", "b"] {
            assert_eq!(restored.state(id), engine.state(id), "state of {id}");
        }
    }

    #[test]
    fn checked_folder_stays_checked_after_losing_children() {
        let mut tree = sample();
        let mut engine = attached(SelectionMode::Subtree);
        engine.set_state("a1", Checked).unwrap();
        engine.set_state("a2", Checked).unwrap();
        assert_eq!(engine.explicit_state("a"), Ok(true));

        tree.remove("a1");
        tree.remove("a2");
        engine.resync(&tree).unwrap();
        assert_eq!(engine.state("a"), Ok(Checked));
    }

    #[test]
    fn resync_requires_attachment() {
        let mut engine: SelectionEngine<&str> = SelectionEngine::default();
        assert_eq!(engine.resync(&sample()), Err(SelectionError::NotAttached));
    }

    #[test]
    fn explicit_selection_round_trips() {
        let mut engine = attached(SelectionMode::Subtree);
        engine.set_state("a2", Checked).unwrap();
        engine.set_state("b", Checked).unwrap();
        let saved: Vec<_> = engine.explicit_selection().unwrap().collect();
        assert_eq!(saved, [("a1", false), ("a2", true), ("b", true)]);

        let mut restored = SelectionEngine::with_mode(SelectionMode::Subtree);
        restored.attach_with_seed(&sample(), saved).unwrap();
        for id in ["root", "a", "a1", "a2", "b"] {
            assert_eq!(restored.state(id), engine.state(id), "state of {id}");
        }
    }

    #[test]
    fn set_all_clears_everything() {
        let mut engine = attached(SelectionMode::Node);
        engine.set_all(true).unwrap();
        assert_eq!(engine.checked_nodes().unwrap().count(), 5);
        let changes = engine.set_all(false).unwrap();
        assert_eq!(changes.len(), 5);
        assert_eq!(changes[0], change("root", Checked, Unchecked));
        assert!(engine.set_all(false).unwrap().is_empty());
    }

    #[test]
    fn topology_queries() {
        let engine = attached(SelectionMode::Subtree);
        assert_eq!(engine.len(), 5);
        assert!(engine.contains("a1"));
        assert!(!engine.contains("zz"));
        assert_eq!(engine.parent("a1"), Ok(Some("a")));
        assert_eq!(engine.parent("root"), Ok(None));
        assert_eq!(engine.children("a"), Ok(&["a1", "a2"][..]));
    }
}
