// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An options menu: a radio group plus a checkbox group under one trigger.
//!
//! This example plays the role of a UI host. It feeds item descriptors to
//! the machine, dispatches a scripted interaction sequence, mirrors
//! selection state from `ValueChange` signals the way a reactive frontend
//! would, and prints the projected prop bags for each rendered part.
//!
//! Run:
//! - `cargo run -p thicket_examples --example menu_options`

use std::collections::HashMap;

use kurbo::Rect;
use thicket_menu::{
    ItemDescriptor, KeyInput, Machine, MenuConfig, MenuEvent, MenuSignal, Part, PartFlags,
    ValueChange, connect,
};

fn catalog() -> Vec<ItemDescriptor> {
    vec![
        ItemDescriptor::radio("asc", "order", "asc", "Ascending"),
        ItemDescriptor::radio("desc", "order", "desc", "Descending"),
        ItemDescriptor::radio("none", "order", "none", "None"),
        ItemDescriptor::separator("sep"),
        ItemDescriptor::checkbox("email", "type", "email", "Email"),
        ItemDescriptor::checkbox("phone", "type", "phone", "Phone"),
        ItemDescriptor::checkbox("address", "type", "address", "Address"),
    ]
}

/// Host-side mirrors of the selection, updated only from signals.
#[derive(Debug, Default)]
struct Mirrors {
    order: String,
    types: Vec<String>,
}

impl Mirrors {
    fn apply(&mut self, change: &ValueChange) {
        match change {
            ValueChange::Single { group, value } if group == "order" => {
                self.order = value.clone();
            }
            ValueChange::Multi { group, values } if group == "type" => {
                self.types = values.clone();
            }
            _ => {}
        }
    }
}

fn render(menu: &Machine) {
    let trigger = connect(menu, Part::Trigger, None);
    let content = connect(menu, Part::Content, None);
    println!(
        "  trigger: id={:?} expanded={}",
        trigger.id,
        trigger.flags.contains(PartFlags::OPEN)
    );
    println!(
        "  content: role={:?} hidden={} active-descendant={:?}",
        content.role,
        content.flags.contains(PartFlags::HIDDEN),
        content
            .attrs
            .iter()
            .find(|(k, _)| *k == "aria-activedescendant")
            .map(|(_, v)| v.as_str()),
    );
    for item in menu.items() {
        let bag = connect(menu, Part::OptionItem, Some(item));
        println!(
            "  item {:<8} role={:?} highlighted={} checked={}",
            item.id,
            bag.role,
            bag.flags.contains(PartFlags::HIGHLIGHTED),
            bag.flags.contains(PartFlags::CHECKED),
        );
    }
}

fn main() {
    let mut menu = Machine::new(MenuConfig::new("options"));
    menu.set_items(catalog());
    menu.dispatch(MenuEvent::AnchorChanged(Rect::new(10.0, 10.0, 110.0, 40.0)), 0);

    let mut mirrors = Mirrors::default();
    let mut counts: HashMap<&'static str, usize> = HashMap::new();

    // A scripted session: open, pick a sort order by typeahead, toggle two
    // checkboxes, and close. Timestamps are milliseconds.
    let script: Vec<(&'static str, MenuEvent)> = vec![
        ("trigger press", MenuEvent::ToggleRequest),
        ("type 'd'", MenuEvent::Key(KeyInput::Char('d'))),
        ("enter", MenuEvent::Key(KeyInput::Enter)),
        ("hover email", MenuEvent::PointerEnterItem("email".into())),
        ("click email", MenuEvent::ActivateItem("email".into())),
        ("arrow down", MenuEvent::Key(KeyInput::ArrowDown)),
        ("space", MenuEvent::Key(KeyInput::Space)),
        ("escape", MenuEvent::Key(KeyInput::Escape)),
    ];

    let mut now = 0_u64;
    for (label, event) in script {
        println!("\n== {label} @ {now}ms ==");
        for signal in menu.dispatch(event, now) {
            match &signal {
                MenuSignal::ValueChange(change) => mirrors.apply(change),
                MenuSignal::OpenChange(_) => {
                    *counts.entry("open edges").or_default() += 1;
                }
                _ => {}
            }
            println!("  signal: {signal:?}");
        }
        render(&menu);
        // Option items keep the menu open; selection accumulates.
        println!("  mirrors: order={:?} types={:?}", mirrors.order, mirrors.types);
        now += 500;
    }

    println!(
        "\nfinal: order={:?} types={:?} ({} open edges)",
        mirrors.order,
        mirrors.types,
        counts.get("open edges").copied().unwrap_or_default(),
    );
}
