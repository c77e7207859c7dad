// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_menu --heading-base-level=0

//! Thicket Menu: a renderer-agnostic accessible-menu interaction machine.
//!
//! This crate is the headless core behind a menu widget: it owns the
//! open/close lifecycle, keyboard navigation and typeahead, and radio/
//! checkbox option-group state, and it projects that state into
//! renderer-neutral attribute bags. It knows nothing about any particular
//! UI stack; hosts dispatch normalized events in and attach the projected
//! props to whatever they render.
//!
//! The core concepts are:
//!
//! - [`Machine`]: one menu instance, the exclusive owner of its
//!   [`Status`] lifecycle (`Closed`/`Opening`/`Open`/`Closing`),
//!   highlighted item, typeahead buffer, and option-group selection.
//! - [`MenuEvent`] / [`MenuSignal`]: the write path and its observable
//!   result. Every [`Machine::dispatch`] runs synchronously to completion
//!   and returns the signals the host must react to (open changes,
//!   highlight changes, value changes, reposition requests).
//! - [`KeyInput`] / [`route`]: a pure keyboard router translating keys into
//!   intents given the current status.
//! - [`ItemDescriptor`]: host-supplied per-render item data (id, kind,
//!   label, option value/group, disabled), matched across renders by id.
//! - [`connect`]: a pure projection of `(machine, part, item?)` into a
//!   [`PropsBag`] of stable ids, roles, [`PartFlags`], attributes, and
//!   event-hook placeholders.
//!
//! ## Minimal example
//!
//! ```rust
//! use thicket_menu::{
//!     ItemDescriptor, KeyInput, Machine, MenuConfig, MenuEvent, Part, PartFlags, connect,
//! };
//!
//! let mut menu = Machine::new(MenuConfig::new("demo"));
//! menu.set_items(vec![
//!     ItemDescriptor::action("new", "New File"),
//!     ItemDescriptor::action("open", "Open…"),
//! ]);
//!
//! // A trigger press opens the menu and highlights the first item.
//! let signals = menu.dispatch(MenuEvent::ToggleRequest, 0);
//! assert!(!signals.is_empty());
//! assert!(menu.is_open());
//! assert_eq!(menu.active_id(), Some("new"));
//!
//! // Arrow keys move the highlight; disabled items are skipped.
//! menu.dispatch(MenuEvent::Key(KeyInput::ArrowDown), 16);
//! assert_eq!(menu.active_id(), Some("open"));
//!
//! // Project renderer-neutral props for the content part.
//! let content = connect(&menu, Part::Content, None);
//! assert!(content.flags.contains(PartFlags::OPEN));
//! assert_eq!(content.role, Some("menu"));
//! ```
//!
//! ## Time and scheduling
//!
//! The machine owns no timers. Settle bridges for open/close animations and
//! the typeahead debounce are millisecond deadlines compared against the
//! host-supplied `now`: schedule a wakeup for [`Machine::next_deadline`] and
//! call [`Machine::poll`] when it arrives. All waiting is event-driven and
//! every pending deadline is cancelled by whatever supersedes it.
//!
//! ## Option groups
//!
//! Items of kind [`ItemKind::RadioOption`] / [`ItemKind::CheckboxOption`]
//! belong to named groups. Activation routes through the group manager and
//! emits a [`ValueChange`] — the only observable mutation path for
//! selection. [`SelectionMode`] picks whether the machine owns selection
//! truth (uncontrolled) or defers entirely to caller-fed values
//! (controlled).
//!
//! ## Submenus
//!
//! A single machine deliberately does not know which items anchor child
//! menus; ArrowRight/ArrowLeft surface as [`MenuSignal::OpenSubmenu`] /
//! [`MenuSignal::CloseSubmenu`] signals for a coordinator to interpret. See
//! the `thicket_menu_tree` crate for the nested-menu coordinator.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod connect;
mod intent;
mod items;
mod machine;
mod options;
mod typeahead;

pub use connect::{Hook, HookAction, HookKind, Part, PartFlags, PropsBag, connect};
pub use intent::{Intent, KeyInput, route};
pub use items::{Direction, ItemDescriptor, ItemId, ItemKind};
pub use machine::{Machine, MenuConfig, MenuEvent, MenuSignal, SelectionMode, Signals, Status};
pub use options::ValueChange;
