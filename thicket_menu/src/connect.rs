// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prop projection: machine state → renderer-neutral attribute bags.
//!
//! [`connect`] is a pure function of the machine and an optional item
//! descriptor; it never mutates and, given identical inputs, returns a bag
//! with identical semantic content. Identifiers are stably derived from the
//! machine's instance id.
//!
//! Event hooks are carried as *data*, not closures: each [`Hook`] names the
//! host-native event to wire ([`HookKind`]) and the action to take when it
//! fires — either dispatch a fixed [`MenuEvent`] back into the machine, or
//! forward normalized key input as [`MenuEvent::Key`]. Invoking a hook
//! therefore dispatches into the machine rather than mutating anything
//! directly, and the bag stays plain data a host can diff or serialize.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use bitflags::bitflags;

use crate::items::{ItemDescriptor, ItemKind};
use crate::machine::{Machine, MenuEvent};

/// The UI part a bag of props is projected for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    /// The element that opens/closes the menu on activation.
    Trigger,
    /// Decorative open-state indicator inside the trigger.
    Indicator,
    /// The element the positioning collaborator places.
    Positioner,
    /// The container holding the items, shown only while open.
    Content,
    /// One selectable entry; requires an [`ItemDescriptor`].
    OptionItem,
    /// The checked-state marker inside an option item.
    ItemIndicator,
    /// The label text inside an item.
    ItemText,
    /// A visual divider between items.
    Separator,
}

bitflags! {
    /// Renderer-neutral state bits carried by a [`PropsBag`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PartFlags: u8 {
        /// The menu is logically open.
        const OPEN        = 0b0000_0001;
        /// This item is the highlighted (active) one.
        const HIGHLIGHTED = 0b0000_0010;
        /// This option item's value is selected in its group.
        const CHECKED     = 0b0000_0100;
        /// This item is disabled.
        const DISABLED    = 0b0000_1000;
        /// This part should not be rendered/shown right now.
        const HIDDEN      = 0b0001_0000;
    }
}

/// Host-native event a [`Hook`] should be wired to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Pointer pressed on the part.
    PointerDown,
    /// Pointer released on the part.
    PointerUp,
    /// Pointer entered the part.
    PointerEnter,
    /// Pointer left the part.
    PointerLeave,
    /// A key was pressed while the part has focus.
    KeyDown,
}

/// What to do when the wired host event fires.
#[derive(Clone, Debug, PartialEq)]
pub enum HookAction {
    /// Dispatch this event into the machine.
    Dispatch(MenuEvent),
    /// Normalize the key and dispatch it as [`MenuEvent::Key`].
    ForwardKeys,
}

/// One event-hook placeholder in a [`PropsBag`].
#[derive(Clone, Debug, PartialEq)]
pub struct Hook {
    /// The host-native event to wire.
    pub kind: HookKind,
    /// The dispatch to perform when it fires.
    pub action: HookAction,
}

impl Hook {
    fn dispatch(kind: HookKind, event: MenuEvent) -> Self {
        Self {
            kind,
            action: HookAction::Dispatch(event),
        }
    }

    fn forward_keys() -> Self {
        Self {
            kind: HookKind::KeyDown,
            action: HookAction::ForwardKeys,
        }
    }
}

/// Ephemeral projection of machine state for one UI part.
///
/// Recomputed on every render; carries no state of its own.
#[derive(Clone, Debug, PartialEq)]
pub struct PropsBag {
    /// The part this bag was projected for.
    pub part: Part,
    /// Stable derived element identifier, when the part has one.
    pub id: Option<String>,
    /// ARIA-style role.
    pub role: Option<&'static str>,
    /// State bits.
    pub flags: PartFlags,
    /// Relational / derived string attributes (ARIA-style names).
    pub attrs: Vec<(&'static str, String)>,
    /// Event-hook placeholders the host wires to its native events.
    pub hooks: Vec<Hook>,
}

impl PropsBag {
    fn new(part: Part) -> Self {
        Self {
            part,
            id: None,
            role: None,
            flags: PartFlags::empty(),
            attrs: Vec::new(),
            hooks: Vec::new(),
        }
    }
}

fn part_id(machine: &Machine, suffix: &str) -> String {
    format!("{}:{suffix}", machine.id())
}

fn item_dom_id(machine: &Machine, item_id: &str) -> String {
    format!("{}:item:{item_id}", machine.id())
}

fn data_state(machine: &Machine) -> &'static str {
    if machine.is_open() { "open" } else { "closed" }
}

/// Project the props for `part`, with `item` supplied for the item parts.
///
/// Item parts ([`Part::OptionItem`], [`Part::ItemIndicator`],
/// [`Part::ItemText`]) called without a descriptor are a caller contract
/// violation: logged, and a bare bag is returned.
pub fn connect(machine: &Machine, part: Part, item: Option<&ItemDescriptor>) -> PropsBag {
    let mut bag = PropsBag::new(part);
    let open = machine.is_open();
    match part {
        Part::Trigger => {
            bag.id = Some(part_id(machine, "trigger"));
            bag.role = Some("button");
            bag.flags.set(PartFlags::OPEN, open);
            bag.attrs.push(("aria-haspopup", String::from("menu")));
            bag.attrs.push(("aria-controls", part_id(machine, "content")));
            bag.attrs
                .push(("aria-expanded", String::from(if open { "true" } else { "false" })));
            bag.attrs.push(("data-state", String::from(data_state(machine))));
            bag.hooks
                .push(Hook::dispatch(HookKind::PointerDown, MenuEvent::ToggleRequest));
            bag.hooks.push(Hook::forward_keys());
        }
        Part::Indicator => {
            bag.id = Some(part_id(machine, "indicator"));
            bag.flags.set(PartFlags::OPEN, open);
            bag.attrs.push(("data-state", String::from(data_state(machine))));
        }
        Part::Positioner => {
            bag.id = Some(part_id(machine, "positioner"));
            bag.flags.set(PartFlags::OPEN, open);
        }
        Part::Content => {
            bag.id = Some(part_id(machine, "content"));
            bag.role = Some("menu");
            bag.flags.set(PartFlags::OPEN, open);
            bag.flags.set(PartFlags::HIDDEN, !open);
            bag.attrs.push(("aria-labelledby", part_id(machine, "trigger")));
            bag.attrs.push(("data-state", String::from(data_state(machine))));
            if let Some(active) = machine.active_id() {
                bag.attrs
                    .push(("aria-activedescendant", item_dom_id(machine, active)));
            }
            bag.hooks.push(Hook::forward_keys());
        }
        Part::OptionItem => {
            let Some(d) = item else {
                log::warn!("OptionItem props requested without a descriptor");
                return bag;
            };
            bag.id = Some(item_dom_id(machine, &d.id));
            bag.role = Some(match d.kind {
                ItemKind::Action => "menuitem",
                ItemKind::RadioOption => "menuitemradio",
                ItemKind::CheckboxOption => "menuitemcheckbox",
                ItemKind::Separator => "separator",
            });
            let checked = machine.is_checked(d);
            bag.flags
                .set(PartFlags::HIGHLIGHTED, machine.active_id() == Some(d.id.as_str()));
            bag.flags.set(PartFlags::CHECKED, checked);
            bag.flags.set(PartFlags::DISABLED, d.disabled);
            if matches!(d.kind, ItemKind::RadioOption | ItemKind::CheckboxOption) {
                bag.attrs.push((
                    "aria-checked",
                    String::from(if checked { "true" } else { "false" }),
                ));
            }
            if let Some(value) = &d.value {
                bag.attrs.push(("data-value", value.clone()));
            }
            bag.hooks.push(Hook::dispatch(
                HookKind::PointerEnter,
                MenuEvent::PointerEnterItem(d.id.clone()),
            ));
            bag.hooks.push(Hook::dispatch(
                HookKind::PointerLeave,
                MenuEvent::PointerLeaveItem(d.id.clone()),
            ));
            bag.hooks.push(Hook::dispatch(
                HookKind::PointerUp,
                MenuEvent::ActivateItem(d.id.clone()),
            ));
        }
        Part::ItemIndicator => {
            let Some(d) = item else {
                log::warn!("ItemIndicator props requested without a descriptor");
                return bag;
            };
            bag.id = Some(format!("{}:indicator", item_dom_id(machine, &d.id)));
            let checked = machine.is_checked(d);
            bag.flags.set(PartFlags::CHECKED, checked);
            bag.flags.set(PartFlags::HIDDEN, !checked);
        }
        Part::ItemText => {
            let Some(d) = item else {
                log::warn!("ItemText props requested without a descriptor");
                return bag;
            };
            bag.id = Some(format!("{}:text", item_dom_id(machine, &d.id)));
        }
        Part::Separator => {
            bag.role = Some("separator");
            bag.attrs
                .push(("aria-orientation", String::from("horizontal")));
        }
    }
    bag
}
