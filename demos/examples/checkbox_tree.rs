// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Checkbox tree: drive a selection engine the way a file picker would.
//!
//! This example shows how to:
//! - describe a host tree with `StaticTree`,
//! - toggle nodes in subtree and node modes,
//! - listen for change batches and redraw only what changed,
//! - save the selection and restore it after the tree is edited.
//!
//! Run:
//! - `cargo run -p understory_tree_select_demos --example checkbox_tree`
//! - `RUST_LOG=understory_tree_select=trace cargo run -p understory_tree_select_demos --example checkbox_tree`

use std::cell::RefCell;
use std::rc::Rc;

use tracing_subscriber::EnvFilter;
use understory_tree_select::{
    CheckState, SelectionEngine, SelectionError, SelectionMode, StateChange, StaticTree,
    TreeSource,
};

fn glyph(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Intermediate => "[-]",
        CheckState::Checked => "[x]",
    }
}

fn print_tree(engine: &SelectionEngine<&'static str>, id: &'static str, depth: usize) {
    let Ok(state) = engine.state(id) else {
        return;
    };
    println!("{:indent$}{} {id}", "", glyph(state), indent = depth * 2);
    for child in engine.children(id).unwrap_or(&[]) {
        print_tree(engine, *child, depth + 1);
    }
}

fn main() -> Result<(), SelectionError<&'static str>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut tree = StaticTree::new();
    tree.insert(None, "project");
    tree.insert(Some("project"), "src");
    tree.insert(Some("src"), "main.rs");
    tree.insert(Some("src"), "lib.rs");
    tree.insert(Some("project"), "docs");
    tree.insert(Some("docs"), "guide.md");
    tree.insert(Some("project"), "README.md");

    let mut engine = SelectionEngine::with_mode(SelectionMode::Subtree);
    engine.attach(&tree)?;

    // A UI would repaint just these rows.
    let dirty: Rc<RefCell<Vec<StateChange<&'static str>>>> = Rc::default();
    let sink = Rc::clone(&dirty);
    engine.subscribe(move |batch| sink.borrow_mut().extend_from_slice(batch));

    println!("Check `src` (subtree mode):");
    engine.toggle("src")?;
    print_tree(&engine, "project", 0);
    println!("  repaint: {:?}", dirty.borrow().iter().map(|c| c.node).collect::<Vec<_>>());
    dirty.borrow_mut().clear();

    println!("\nUncheck `lib.rs` only (node mode):");
    engine.set_mode(SelectionMode::Node);
    engine.set_state("lib.rs", CheckState::Unchecked)?;
    print_tree(&engine, "project", 0);
    println!("  repaint: {:?}", dirty.borrow().iter().map(|c| c.node).collect::<Vec<_>>());

    let saved: Vec<_> = engine.explicit_selection()?.collect();
    println!("\nSaved leaf states: {saved:?}");

    // The host adds a file; the engine picks up the new shape on resync.
    tree.insert(Some("docs"), "faq.md");
    let changes = engine.resync(&tree)?;
    println!("Resync after adding `faq.md` changed {} node(s)", changes.len());

    let mut restored = SelectionEngine::with_mode(SelectionMode::Subtree);
    restored.attach_with_seed(&tree, saved)?;
    println!("\nRestored from saved states:");
    for root in tree.ids().filter(|id| tree.parent(*id).is_none()) {
        print_tree(&restored, root, 0);
    }

    let checked: Vec<_> = restored.checked_leaves()?.collect();
    println!("\nChecked files: {checked:?}");

    Ok(())
}
