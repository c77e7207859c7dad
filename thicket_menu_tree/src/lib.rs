// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_menu_tree --heading-base-level=0

//! Nested-menu coordination for Thicket Menu.
//!
//! A single [`thicket_menu::Machine`] deliberately knows nothing about
//! nesting: ArrowRight and ArrowLeft surface as submenu *signals*, not
//! transitions. This crate supplies the missing half: [`MenuTree`], a
//! generational arena of machines linked by which parent item anchors which
//! submenu. All structural rules live here:
//!
//! - **Exclusive child**: a parent has at most one open submenu; opening one
//!   closes its open sibling first.
//! - **Cascade close**: closing any menu closes its open descendant chain.
//! - **Implicit ancestor open**: opening a submenu under closed ancestors
//!   opens the chain root-down first.
//! - **Hover transfer**: while a submenu is open, highlighting a sibling
//!   anchor item shifts the open submenu to it.
//!
//! Cross-menu reactions run through a work queue, one machine transition at
//! a time, so dispatch is never re-entered.
//!
//! ```rust
//! use thicket_menu::{ItemDescriptor, KeyInput, MenuConfig, MenuEvent};
//! use thicket_menu_tree::MenuTree;
//!
//! let mut tree = MenuTree::new();
//! let root = tree.insert_root(MenuConfig::new("root"));
//! tree.machine_mut(root).unwrap().set_items(vec![
//!     ItemDescriptor::action("share", "Share"),
//!     ItemDescriptor::action("quit", "Quit"),
//! ]);
//! let share = tree.insert_submenu(root, "share", MenuConfig::new("share")).unwrap();
//!
//! // ArrowRight on the highlighted anchor opens its submenu.
//! tree.dispatch(root, MenuEvent::OpenRequest, 0);
//! tree.dispatch(root, MenuEvent::Key(KeyInput::ArrowRight), 16);
//! assert!(tree.machine(share).unwrap().is_open());
//!
//! // ArrowLeft closes it and returns the highlight to the anchor.
//! tree.dispatch(share, MenuEvent::Key(KeyInput::ArrowLeft), 32);
//! assert!(!tree.machine(share).unwrap().is_open());
//! assert_eq!(tree.machine(root).unwrap().active_id(), Some("share"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;

pub use tree::{MenuId, MenuTree, TreeSignals};
