// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: selection modes, tri-state values, and engine configuration.

/// How a selection write on a node propagates to its descendants.
///
/// Ancestors are always recomputed, whichever mode is active.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Only the targeted node's own flag is written; descendants are untouched.
    Node,
    /// The targeted node and every descendant receive the same state.
    #[default]
    Subtree,
}

/// Tri-state value of a node, as rendered by a checkbox-like control.
///
/// Leaves are only ever [`Unchecked`](Self::Unchecked) or [`Checked`](Self::Checked).
/// [`Intermediate`](Self::Intermediate) arises by derivation on nodes whose
/// children disagree.
///
/// Some hosts name these states `None` / `Selected` / `Intermediate`; the
/// [`NONE`](Self::NONE) and [`SELECTED`](Self::SELECTED) constants spell the
/// same values that way.
///
/// ```rust
/// use understory_tree_select::CheckState;
///
/// assert_eq!(CheckState::NONE, CheckState::Unchecked);
/// assert_eq!(CheckState::from_checked(true), CheckState::SELECTED);
/// assert!(CheckState::Intermediate.is_intermediate());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CheckState {
    /// Not selected, and nothing below is selected.
    #[default]
    Unchecked,
    /// Some, but not all, of the subtree is selected.
    Intermediate,
    /// Selected, together with everything below.
    Checked,
}

/// Alternate name for [`CheckState`] used by hosts that speak of selections
/// rather than checkboxes.
pub type NodeSelectionState = CheckState;

impl CheckState {
    /// Alias of [`CheckState::Unchecked`].
    pub const NONE: Self = Self::Unchecked;
    /// Alias of [`CheckState::Checked`].
    pub const SELECTED: Self = Self::Checked;

    /// Map an explicit boolean selection onto a two-valued state.
    #[must_use]
    pub const fn from_checked(checked: bool) -> Self {
        if checked { Self::Checked } else { Self::Unchecked }
    }

    /// Returns `true` for [`CheckState::Checked`].
    #[must_use]
    pub const fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }

    /// Returns `true` for [`CheckState::Unchecked`].
    #[must_use]
    pub const fn is_unchecked(self) -> bool {
        matches!(self, Self::Unchecked)
    }

    /// Returns `true` for [`CheckState::Intermediate`].
    #[must_use]
    pub const fn is_intermediate(self) -> bool {
        matches!(self, Self::Intermediate)
    }
}

/// What [`toggle`](crate::SelectionEngine::toggle) does to a node whose
/// effective state is [`CheckState::Intermediate`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum IntermediateToggle {
    /// Select the whole node (the usual file-tree behavior).
    #[default]
    Check,
    /// Clear the whole node.
    Uncheck,
}

/// Policy knobs for a [`SelectionEngine`](crate::SelectionEngine).
///
/// ```rust
/// use understory_tree_select::{IntermediateToggle, SelectionConfig, SelectionMode};
///
/// let config = SelectionConfig::default()
///     .with_mode(SelectionMode::Node)
///     .with_intermediate_toggle(IntermediateToggle::Uncheck);
/// assert_eq!(config.mode, SelectionMode::Node);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Propagation mode for writes.
    pub mode: SelectionMode,
    /// Toggle target for intermediate nodes.
    pub intermediate_toggle: IntermediateToggle,
}

impl SelectionConfig {
    /// Set the propagation mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the toggle behavior for intermediate nodes.
    #[must_use]
    pub const fn with_intermediate_toggle(mut self, toggle: IntermediateToggle) -> Self {
        self.intermediate_toggle = toggle;
        self
    }
}
