// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change records and listener registry.
//!
//! Every mutating engine call produces one batch of [`StateChange`] records,
//! one per node whose effective state actually changed. The batch is returned
//! to the caller and, if non-empty, handed to each subscribed listener after
//! the store is fully updated. Listeners receive only the batch, so they can
//! never observe a half-propagated store or reenter the engine.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::types::CheckState;

/// One node's effective state transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StateChange<K> {
    /// The node whose state changed.
    pub node: K,
    /// Effective state before the operation.
    pub old: CheckState,
    /// Effective state after the operation.
    pub new: CheckState,
}

/// Handle returned by [`SelectionEngine::subscribe`](crate::SelectionEngine::subscribe).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<K> = Box<dyn FnMut(&[StateChange<K>])>;

pub(crate) struct Listeners<K> {
    next_id: u64,
    entries: Vec<(ListenerId, Listener<K>)>,
}

impl<K> fmt::Debug for Listeners<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<K> Default for Listeners<K> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<K> Listeners<K> {
    pub(crate) fn subscribe(&mut self, listener: Listener<K>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Deliver a completed batch, in subscription order. Empty batches are dropped.
    pub(crate) fn notify(&mut self, batch: &[StateChange<K>]) {
        if batch.is_empty() {
            return;
        }
        for (_, listener) in &mut self.entries {
            listener(batch);
        }
    }
}

/// Push a record if `old` and `new` differ.
pub(crate) fn record<K>(out: &mut Vec<StateChange<K>>, node: K, old: CheckState, new: CheckState) {
    if old != new {
        out.push(StateChange { node, old, new });
    }
}
