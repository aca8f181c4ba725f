// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type returned by fallible engine operations.

use core::fmt;

/// Failure of a selection operation.
///
/// A failed call never mutates the engine: validation runs before any write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError<K> {
    /// The id is not part of the currently attached tree.
    UnknownNode(K),
    /// A caller tried to force [`CheckState::Intermediate`](crate::CheckState::Intermediate)
    /// onto the given node; that state only arises by derivation.
    InvalidState(K),
    /// The engine has no attached tree.
    NotAttached,
    /// The supplied tree is not a consistent forest around the given node
    /// (mismatched parent/child links, a node listed twice, a cycle, or an
    /// id unreachable from the roots).
    InconsistentTree(K),
}

impl<K: fmt::Debug> fmt::Display for SelectionError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "node {id:?} is not part of the attached tree"),
            Self::InvalidState(id) => {
                write!(f, "node {id:?} cannot be set to intermediate directly")
            }
            Self::NotAttached => f.write_str("no tree is attached"),
            Self::InconsistentTree(id) => write!(f, "tree is inconsistent at node {id:?}"),
        }
    }
}

impl<K: fmt::Debug> core::error::Error for SelectionError<K> {}
