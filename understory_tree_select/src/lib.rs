// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tree_select --heading-base-level=0

//! Understory Tree Select: tri-state selection propagation for trees.
//!
//! This crate keeps a consistent checked / unchecked / intermediate state for
//! every node of a tree while a user toggles arbitrary nodes, the model behind
//! checkbox trees in file pickers, permission editors, and layer panels.
//!
//! - Childless nodes hold an explicit state ([`CheckState::Checked`] or
//!   [`CheckState::Unchecked`]).
//! - Every other node derives its state from its children: all checked gives
//!   checked, all unchecked gives unchecked, anything else is
//!   [`CheckState::Intermediate`].
//! - A [`SelectionMode`] decides whether a write touches only the target
//!   ([`SelectionMode::Node`]) or cascades to its whole subtree
//!   ([`SelectionMode::Subtree`]). Ancestors are re-derived either way,
//!   nearest first, stopping as soon as one does not change.
//!
//! The crate does not render anything and does not own the host's tree. The
//! host describes its topology through [`TreeSource`] (or builds a
//! [`StaticTree`]); the engine copies it on [`SelectionEngine::attach`] and
//! again on [`SelectionEngine::resync`] after structural edits.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_tree_select::{CheckState, SelectionEngine, SelectionMode, StaticTree};
//!
//! // root
//! // └─ a
//! //    ├─ a1
//! //    └─ a2
//! let mut tree = StaticTree::new();
//! tree.insert(None, 0_u32);
//! tree.insert(Some(0), 1);
//! tree.insert(Some(1), 2);
//! tree.insert(Some(1), 3);
//!
//! let mut engine = SelectionEngine::with_mode(SelectionMode::Node);
//! engine.attach(&tree).unwrap();
//!
//! let changes = engine.set_state(2, CheckState::Checked).unwrap();
//! // a1, then a, then root: target first, ancestors bottom-up.
//! assert_eq!(changes.iter().map(|c| c.node).collect::<Vec<_>>(), [2, 1, 0]);
//! assert_eq!(engine.state(0), Ok(CheckState::Intermediate));
//! assert_eq!(engine.state(3), Ok(CheckState::Unchecked));
//! ```
//!
//! ## Change notifications
//!
//! Every write returns the [`StateChange`]s it caused: one record per node
//! whose effective state changed, never one per internal write. The same batch
//! is delivered to listeners registered with [`SelectionEngine::subscribe`],
//! after the operation has fully completed.
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_tree_select::{CheckState, SelectionEngine, StaticTree};
//!
//! let mut tree = StaticTree::new();
//! tree.insert(None, "root");
//! tree.insert(Some("root"), "leaf");
//!
//! let mut engine = SelectionEngine::default();
//! engine.attach(&tree).unwrap();
//!
//! let seen = Rc::new(Cell::new(0));
//! let sink = Rc::clone(&seen);
//! engine.subscribe(move |batch| sink.set(sink.get() + batch.len()));
//!
//! engine.toggle("leaf").unwrap();
//! assert_eq!(seen.get(), 2);
//! // Writing the same state again is silent.
//! engine.set_state("leaf", CheckState::Checked).unwrap();
//! assert_eq!(seen.get(), 2);
//! ```
//!
//! ## Persistence
//!
//! Only the explicit states of childless nodes need saving.
//! [`SelectionEngine::explicit_selection`] yields them in pre-order; pass them
//! to [`SelectionEngine::attach_with_seed`] to rebuild the same states later.
//!
//! ## Features
//!
//! - `tracing`: emit [`tracing`](https://docs.rs/tracing) events for attach,
//!   resync, mode changes, and each applied write.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

/// Forward to a `tracing` macro when the `tracing` feature is enabled.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::$level!($($arg)+);
    };
}

mod change;
mod engine;
mod error;
mod iter;
mod source;
mod store;
mod types;

pub use change::{ListenerId, StateChange};
pub use engine::SelectionEngine;
pub use error::SelectionError;
pub use iter::{CheckedNodes, ExplicitSelection};
pub use source::{StaticTree, TreeSource};
pub use types::{CheckState, IntermediateToggle, NodeSelectionState, SelectionConfig, SelectionMode};
