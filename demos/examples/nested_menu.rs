// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested menus: one root with two submenus, coordinated by `MenuTree`.
//!
//! Shows the two structural rules in action: opening one submenu closes its
//! open sibling (exclusive child), and closing the root closes whatever
//! descendant chain is open (cascade close). Keyboard traversal drives the
//! whole thing through the root menu's forwarded keys.
//!
//! Run:
//! - `cargo run -p thicket_examples --example nested_menu`

use thicket_menu::{ItemDescriptor, KeyInput, MenuConfig, MenuEvent, Status};
use thicket_menu_tree::{MenuId, MenuTree};

fn status_line(tree: &MenuTree, labelled: &[(&str, MenuId)]) -> String {
    labelled
        .iter()
        .map(|(label, id)| {
            let status = tree
                .machine(*id)
                .map_or(Status::Closed, |m| m.status());
            let active = tree
                .machine(*id)
                .and_then(|m| m.active_id().map(str::to_owned));
            format!("{label}={status:?}({active:?})")
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn main() {
    let mut tree = MenuTree::new();

    let root = tree.insert_root(MenuConfig::new("root"));
    tree.machine_mut(root).unwrap().set_items(vec![
        ItemDescriptor::action("file", "File"),
        ItemDescriptor::action("edit", "Edit"),
        ItemDescriptor::action("quit", "Quit"),
    ]);

    let file = tree
        .insert_submenu(root, "file", MenuConfig::new("file"))
        .unwrap();
    tree.machine_mut(file).unwrap().set_items(vec![
        ItemDescriptor::action("new", "New File"),
        ItemDescriptor::action("save", "Save"),
    ]);

    let edit = tree
        .insert_submenu(root, "edit", MenuConfig::new("edit"))
        .unwrap();
    tree.machine_mut(edit).unwrap().set_items(vec![
        ItemDescriptor::action("undo", "Undo"),
        ItemDescriptor::action("redo", "Redo"),
    ]);

    let menus = [("root", root), ("file", file), ("edit", edit)];

    let script: Vec<(&'static str, MenuId, MenuEvent)> = vec![
        ("open root", root, MenuEvent::OpenRequest),
        (
            "arrow right opens File submenu",
            root,
            MenuEvent::Key(KeyInput::ArrowRight),
        ),
        (
            "hover Edit transfers the open submenu",
            root,
            MenuEvent::PointerEnterItem("edit".into()),
        ),
        (
            "arrow left returns to the anchor",
            edit,
            MenuEvent::Key(KeyInput::ArrowLeft),
        ),
        (
            "reopen Edit submenu directly",
            edit,
            MenuEvent::OpenRequest,
        ),
        ("close root cascades", root, MenuEvent::CloseRequest),
    ];

    let mut now = 0_u64;
    for (label, target, event) in script {
        println!("\n== {label} @ {now}ms ==");
        for (id, signal) in tree.dispatch(target, event, now) {
            println!("  signal [{id:?}]: {signal:?}");
        }
        println!("  {}", status_line(&tree, &menus));
        now += 250;
    }
}
