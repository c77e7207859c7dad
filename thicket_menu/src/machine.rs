// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction machine core: lifecycle, dispatch, highlight, timers.
//!
//! A [`Machine`] owns the state of one menu instance exclusively. The host
//! writes by dispatching [`MenuEvent`]s and reads by projecting props via
//! [`connect`](fn@crate::connect); every dispatch returns the [`MenuSignal`]s
//! the host must react to (open changes, highlight changes, value changes,
//! reposition requests, submenu intents).
//!
//! The machine owns no timers. Settle bridges (`Opening` → `Open`,
//! `Closing` → `Closed`) and the typeahead debounce are expressed as
//! millisecond deadlines compared against the host-supplied `now`; ask
//! [`Machine::next_deadline`] when to call [`Machine::poll`]. A deadline is
//! cancelled by whatever supersedes it, so the terminal status always
//! matches the most recent open/close request.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use smallvec::SmallVec;

use crate::intent::{Intent, KeyInput, route};
use crate::items::{self, Direction, ItemDescriptor, ItemId, ItemKind};
use crate::options::{OptionGroups, ValueChange};
use crate::typeahead::Typeahead;

/// Lifecycle phase of a menu instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Not shown. Terminal resting state.
    Closed,
    /// Open requested; waiting for the open settle (enter animation).
    Opening,
    /// Shown and interactive.
    Open,
    /// Close requested; waiting for the close settle (exit animation).
    Closing,
}

/// Who owns option-group selection truth.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// The machine owns selection; activation mutates it directly.
    Uncontrolled,
    /// The caller owns selection. Activation only emits the change that
    /// would result; the caller writes values back via
    /// [`Machine::set_group_value`] / [`Machine::set_group_values`].
    Controlled,
}

/// Construction-time configuration for one menu instance.
#[derive(Clone, Debug)]
pub struct MenuConfig {
    /// Stable instance identifier; part and item ids are derived from it.
    pub id: String,
    /// Start open.
    pub open: bool,
    /// Whether activating an [`ItemKind::Action`] item closes the menu.
    /// Option items never close on activation.
    pub close_on_select: bool,
    /// Whether next/prev highlight moves wrap at the edges.
    pub loop_focus: bool,
    /// Typeahead debounce window in milliseconds.
    pub typeahead_timeout_ms: u64,
    /// Settle duration bridging `Opening` → `Open`; 0 collapses them.
    pub open_settle_ms: u64,
    /// Settle duration bridging `Closing` → `Closed`; 0 collapses them.
    pub close_settle_ms: u64,
    /// Controlled vs. uncontrolled option-group selection.
    pub selection: SelectionMode,
}

impl MenuConfig {
    /// A configuration with the given instance id and defaults for the rest.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            open: false,
            close_on_select: true,
            loop_focus: true,
            typeahead_timeout_ms: 400,
            open_settle_ms: 0,
            close_settle_ms: 0,
            selection: SelectionMode::Uncontrolled,
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self::new("menu")
    }
}

/// An external event dispatched into the machine.
#[derive(Clone, Debug, PartialEq)]
pub enum MenuEvent {
    /// Open the menu (trigger activation, submenu hover, programmatic).
    OpenRequest,
    /// Close the menu (Escape, outside interaction, programmatic).
    CloseRequest,
    /// Toggle, as a trigger press does.
    ToggleRequest,
    /// A normalized key press, routed through the keyboard router.
    Key(KeyInput),
    /// The pointer entered an item.
    PointerEnterItem(ItemId),
    /// The pointer left an item.
    PointerLeaveItem(ItemId),
    /// Direct activation of an item (pointer up on it).
    ActivateItem(ItemId),
    /// The trigger/anchor geometry changed.
    AnchorChanged(Rect),
}

/// A state change the host must react to, emitted by dispatch/poll.
#[derive(Clone, Debug, PartialEq)]
pub enum MenuSignal {
    /// The menu logically opened (`true`, entering `Opening`) or closed
    /// (`false`, entering `Closing`). Edges strictly alternate.
    OpenChange(bool),
    /// The highlighted item changed.
    HighlightChange(Option<ItemId>),
    /// An option group's selection changed (or, in controlled mode, would
    /// change). See [`ValueChange`].
    ValueChange(ValueChange),
    /// Placement should be recomputed by the host's positioning
    /// collaborator, from the current trigger/content boundaries.
    Reposition,
    /// The highlighted item requested its submenu to open (ArrowRight).
    /// Meaningful only to a coordinator that knows the item anchors one.
    OpenSubmenu(ItemId),
    /// This menu asked to close in favor of its parent (ArrowLeft).
    CloseSubmenu,
}

/// Signals emitted by one dispatch or poll step.
pub type Signals = SmallVec<[MenuSignal; 2]>;

/// A single menu instance: the exclusive owner of its interaction state.
#[derive(Clone, Debug)]
pub struct Machine {
    config: MenuConfig,
    items: Vec<ItemDescriptor>,
    status: Status,
    active_id: Option<ItemId>,
    settle_deadline: Option<u64>,
    anchor: Option<Rect>,
    typeahead: Typeahead,
    groups: OptionGroups,
}

impl Machine {
    /// Create a machine from its configuration.
    pub fn new(config: MenuConfig) -> Self {
        let status = if config.open {
            Status::Open
        } else {
            Status::Closed
        };
        let typeahead = Typeahead::new(config.typeahead_timeout_ms);
        Self {
            config,
            items: Vec::new(),
            status,
            active_id: None,
            settle_deadline: None,
            anchor: None,
            typeahead,
            groups: OptionGroups::default(),
        }
    }

    /// The configuration this machine was built with.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// The stable instance identifier.
    pub fn id(&self) -> &str {
        &self.config.id
    }

    /// Current lifecycle phase.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the menu is logically open (`Opening` or `Open`).
    pub fn is_open(&self) -> bool {
        matches!(self.status, Status::Opening | Status::Open)
    }

    /// The currently highlighted item id, if any.
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// The descriptor set supplied for the current render pass.
    pub fn items(&self) -> &[ItemDescriptor] {
        &self.items
    }

    /// The current anchor rectangle, if the host reported one.
    pub fn anchor(&self) -> Option<Rect> {
        self.anchor
    }

    /// Replace the descriptor set for this render pass.
    ///
    /// A highlight naming an item that no longer exists or is no longer
    /// navigable is cleared, keeping the highlight invariant intact.
    pub fn set_items(&mut self, items: Vec<ItemDescriptor>) -> Signals {
        let mut out = Signals::new();
        self.items = items;
        let stale = self
            .active_id
            .as_deref()
            .is_some_and(|id| !items::find(&self.items, id).is_some_and(ItemDescriptor::is_navigable));
        if stale {
            self.set_active(None, &mut out);
        }
        out
    }

    /// Dispatch one external event at time `now_ms` (milliseconds).
    ///
    /// Transitions run to completion synchronously; the returned signals
    /// describe every observable change the event caused. Idempotent
    /// open/close requests are no-ops; events referencing unknown item ids
    /// are logged and absorbed, never fatal.
    pub fn dispatch(&mut self, event: MenuEvent, now_ms: u64) -> Signals {
        let mut out = Signals::new();
        self.typeahead.poll(now_ms);
        match event {
            MenuEvent::OpenRequest => self.request_open(Direction::First, now_ms, &mut out),
            MenuEvent::CloseRequest => self.request_close(now_ms, &mut out),
            MenuEvent::ToggleRequest => {
                if self.is_open() {
                    self.request_close(now_ms, &mut out);
                } else {
                    self.request_open(Direction::First, now_ms, &mut out);
                }
            }
            MenuEvent::Key(key) => {
                let intent = route(key, self.status);
                self.apply_intent(intent, now_ms, &mut out);
            }
            MenuEvent::PointerEnterItem(id) => {
                if self.is_open() {
                    match items::find(&self.items, &id) {
                        Some(d) if d.is_navigable() => {
                            let id = d.id.clone();
                            self.set_active(Some(id), &mut out);
                        }
                        Some(_) => {}
                        None => {
                            log::warn!("pointer enter for unknown item id {id:?}");
                        }
                    }
                }
            }
            MenuEvent::PointerLeaveItem(id) => {
                if self.active_id.as_deref() == Some(id.as_str()) {
                    self.set_active(None, &mut out);
                }
            }
            MenuEvent::ActivateItem(id) => self.activate(&id, now_ms, &mut out),
            MenuEvent::AnchorChanged(rect) => {
                self.anchor = Some(rect);
                if self.is_open() {
                    out.push(MenuSignal::Reposition);
                }
            }
        }
        out
    }

    /// Fire any settle or typeahead deadline that is due at `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Signals {
        let mut out = Signals::new();
        if self.settle_deadline.is_some_and(|d| now_ms >= d) {
            match self.status {
                Status::Opening => self.finish_open(&mut out),
                Status::Closing => self.finish_close(&mut out),
                // A stale deadline left by a superseded transition.
                Status::Closed | Status::Open => self.settle_deadline = None,
            }
        }
        self.typeahead.poll(now_ms);
        out
    }

    /// The earliest pending deadline, for host scheduling of [`Self::poll`].
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.settle_deadline, self.typeahead.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// End this machine's lifecycle: cancel pending deadlines and force the
    /// menu closed immediately, skipping any close settle.
    pub fn dispose(&mut self) -> Signals {
        let mut out = Signals::new();
        if self.is_open() {
            out.push(MenuSignal::OpenChange(false));
        }
        self.status = Status::Closed;
        self.settle_deadline = None;
        self.typeahead.clear();
        self.set_active(None, &mut out);
        out
    }

    /// Programmatically move the highlight.
    ///
    /// Highlighting a disabled item is refused; an unknown id is logged and
    /// absorbed. `None` clears the highlight.
    pub fn highlight(&mut self, id: Option<&str>) -> Signals {
        let mut out = Signals::new();
        match id {
            Some(id) => match items::find(&self.items, id) {
                Some(d) if d.is_navigable() => {
                    let id = d.id.clone();
                    self.set_active(Some(id), &mut out);
                }
                Some(_) => {}
                None => {
                    log::warn!("highlight for unknown item id {id:?}");
                }
            },
            None => self.set_active(None, &mut out),
        }
        out
    }

    /// Whether an option descriptor's value is currently selected.
    pub fn is_checked(&self, d: &ItemDescriptor) -> bool {
        self.groups.is_checked(d)
    }

    /// The selected value of a radio group, if any.
    pub fn group_value(&self, group: &str) -> Option<&str> {
        self.groups.single_value(group)
    }

    /// The selected values of a checkbox group, in descriptor order.
    pub fn group_values(&self, group: &str) -> Vec<String> {
        self.groups.multi_values(group, &self.items)
    }

    /// Overwrite a radio group's selection. In controlled mode this is the
    /// caller's write path after observing a [`ValueChange`].
    pub fn set_group_value(&mut self, group: &str, value: Option<String>) {
        self.groups.set_single(group, value);
    }

    /// Overwrite a checkbox group's selection. See [`Self::set_group_value`].
    pub fn set_group_values(&mut self, group: &str, values: impl IntoIterator<Item = String>) {
        self.groups.set_multi(group, values);
    }

    fn apply_intent(&mut self, intent: Intent, now_ms: u64, out: &mut Signals) {
        match intent {
            Intent::Open(edge) => self.request_open(edge, now_ms, out),
            Intent::MoveActive(direction) => {
                if self.is_open() {
                    let next = items::move_from(
                        &self.items,
                        self.active_id.as_deref(),
                        direction,
                        self.config.loop_focus,
                    )
                    .map(|d| d.id.clone());
                    if let Some(id) = next {
                        self.set_active(Some(id), out);
                    }
                }
            }
            Intent::ActivateCurrent => {
                if let Some(id) = self.active_id.clone() {
                    self.activate(&id, now_ms, out);
                }
            }
            Intent::Close => self.request_close(now_ms, out),
            Intent::OpenSubmenu => {
                if let Some(id) = self.active_id.clone() {
                    out.push(MenuSignal::OpenSubmenu(id));
                }
            }
            Intent::CloseSubmenu => out.push(MenuSignal::CloseSubmenu),
            Intent::AppendTypeahead(c) => {
                self.typeahead.append(c, now_ms);
                let hit = self
                    .typeahead
                    .find_match(&self.items, self.active_id.as_deref())
                    .map(|d| d.id.clone());
                if let Some(id) = hit {
                    self.set_active(Some(id), out);
                }
            }
            Intent::NoOp => {}
        }
    }

    /// Activate an item by id: option kinds route through the group manager,
    /// actions close the menu per `close_on_select`.
    fn activate(&mut self, id: &str, now_ms: u64, out: &mut Signals) {
        let Some(d) = items::find(&self.items, id).cloned() else {
            log::warn!("activation for unknown item id {id:?}");
            return;
        };
        if !d.is_navigable() {
            return;
        }
        match d.kind {
            ItemKind::Action => {
                if self.config.close_on_select {
                    self.request_close(now_ms, out);
                }
            }
            ItemKind::RadioOption | ItemKind::CheckboxOption => {
                let mutate = self.config.selection == SelectionMode::Uncontrolled;
                match self.groups.activate(&d, &self.items, mutate) {
                    Some(change) => out.push(MenuSignal::ValueChange(change)),
                    None => {
                        log::warn!("option item {id:?} is missing its group or value");
                    }
                }
            }
            // Separators are not navigable; the guard above already returned.
            ItemKind::Separator => {}
        }
    }

    fn request_open(&mut self, edge: Direction, now_ms: u64, out: &mut Signals) {
        match self.status {
            // Idempotent.
            Status::Open | Status::Opening => {}
            Status::Closed | Status::Closing => {
                // A pending close settle is superseded.
                self.status = Status::Opening;
                self.settle_deadline = None;
                out.push(MenuSignal::OpenChange(true));
                out.push(MenuSignal::Reposition);
                let initial = items::move_from(&self.items, None, edge, false).map(|d| d.id.clone());
                self.set_active(initial, out);
                if self.config.open_settle_ms == 0 {
                    self.finish_open(out);
                } else {
                    self.settle_deadline = Some(now_ms.saturating_add(self.config.open_settle_ms));
                }
            }
        }
    }

    fn request_close(&mut self, now_ms: u64, out: &mut Signals) {
        match self.status {
            // Idempotent.
            Status::Closed | Status::Closing => {}
            Status::Open | Status::Opening => {
                // A pending open settle is superseded.
                self.status = Status::Closing;
                self.settle_deadline = None;
                out.push(MenuSignal::OpenChange(false));
                if self.config.close_settle_ms == 0 {
                    self.finish_close(out);
                } else {
                    self.settle_deadline = Some(now_ms.saturating_add(self.config.close_settle_ms));
                }
            }
        }
    }

    fn finish_open(&mut self, _out: &mut Signals) {
        self.status = Status::Open;
        self.settle_deadline = None;
    }

    fn finish_close(&mut self, out: &mut Signals) {
        self.status = Status::Closed;
        self.settle_deadline = None;
        self.typeahead.clear();
        self.set_active(None, out);
    }

    fn set_active(&mut self, id: Option<ItemId>, out: &mut Signals) {
        if self.active_id != id {
            self.active_id = id.clone();
            out.push(MenuSignal::HighlightChange(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn abc() -> Vec<ItemDescriptor> {
        vec![
            ItemDescriptor::action("a", "Alpha"),
            ItemDescriptor::action("b", "Beta").disabled(),
            ItemDescriptor::action("c", "Gamma"),
        ]
    }

    fn open_machine(items: Vec<ItemDescriptor>) -> Machine {
        let mut m = Machine::new(MenuConfig::new("demo"));
        m.set_items(items);
        m.dispatch(MenuEvent::OpenRequest, 0);
        m
    }

    fn highlights(signals: &Signals) -> Vec<Option<ItemId>> {
        signals
            .iter()
            .filter_map(|s| match s {
                MenuSignal::HighlightChange(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn open_highlights_first_navigable_and_repositions() {
        let mut m = Machine::new(MenuConfig::new("demo"));
        m.set_items(abc());
        let out = m.dispatch(MenuEvent::OpenRequest, 0);
        assert_eq!(m.status(), Status::Open);
        assert!(out.contains(&MenuSignal::OpenChange(true)));
        assert!(out.contains(&MenuSignal::Reposition));
        assert_eq!(m.active_id(), Some("a"));
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let mut m = open_machine(abc());
        assert!(m.dispatch(MenuEvent::OpenRequest, 1).is_empty());
        let out = m.dispatch(MenuEvent::CloseRequest, 2);
        assert!(out.contains(&MenuSignal::OpenChange(false)));
        assert_eq!(m.status(), Status::Closed);
        assert!(m.dispatch(MenuEvent::CloseRequest, 3).is_empty());
    }

    #[test]
    fn navigation_skips_disabled_items() {
        // [a, b(disabled), c]; open then next lands on a, then c.
        let mut m = Machine::new(MenuConfig::new("demo"));
        m.set_items(abc());
        m.dispatch(MenuEvent::Key(KeyInput::ArrowDown), 0);
        assert_eq!(m.active_id(), Some("a"));
        m.dispatch(MenuEvent::Key(KeyInput::ArrowDown), 10);
        assert_eq!(m.active_id(), Some("c"));
    }

    #[test]
    fn arrow_up_open_highlights_last() {
        let mut m = Machine::new(MenuConfig::new("demo"));
        m.set_items(abc());
        m.dispatch(MenuEvent::Key(KeyInput::ArrowUp), 0);
        assert!(m.is_open());
        assert_eq!(m.active_id(), Some("c"));
    }

    #[test]
    fn wrap_can_be_disabled() {
        let mut config = MenuConfig::new("demo");
        config.loop_focus = false;
        let mut m = Machine::new(config);
        m.set_items(abc());
        m.dispatch(MenuEvent::OpenRequest, 0);
        m.dispatch(MenuEvent::Key(KeyInput::End), 1);
        assert_eq!(m.active_id(), Some("c"));
        m.dispatch(MenuEvent::Key(KeyInput::ArrowDown), 2);
        assert_eq!(m.active_id(), Some("c"));
    }

    #[test]
    fn settle_bridges_opening_and_closing() {
        let mut config = MenuConfig::new("demo");
        config.open_settle_ms = 100;
        config.close_settle_ms = 50;
        let mut m = Machine::new(config);
        m.set_items(abc());

        m.dispatch(MenuEvent::OpenRequest, 0);
        assert_eq!(m.status(), Status::Opening);
        assert_eq!(m.next_deadline(), Some(100));
        assert!(m.poll(99).is_empty());
        assert_eq!(m.status(), Status::Opening);
        m.poll(100);
        assert_eq!(m.status(), Status::Open);

        m.dispatch(MenuEvent::CloseRequest, 200);
        assert_eq!(m.status(), Status::Closing);
        let out = m.poll(250);
        assert_eq!(m.status(), Status::Closed);
        assert_eq!(highlights(&out), vec![None]);
    }

    #[test]
    fn close_during_opening_cancels_the_open_settle() {
        let mut config = MenuConfig::new("demo");
        config.open_settle_ms = 100;
        let mut m = Machine::new(config);
        m.set_items(abc());

        m.dispatch(MenuEvent::OpenRequest, 0);
        assert_eq!(m.status(), Status::Opening);
        let out = m.dispatch(MenuEvent::CloseRequest, 10);
        assert!(out.contains(&MenuSignal::OpenChange(false)));
        assert_eq!(m.status(), Status::Closed);
        // The superseded open settle must not fire later.
        assert!(m.poll(100).is_empty());
        assert_eq!(m.status(), Status::Closed);
    }

    #[test]
    fn reopen_during_closing_cancels_the_close_settle() {
        let mut config = MenuConfig::new("demo");
        config.close_settle_ms = 100;
        let mut m = Machine::new(config);
        m.set_items(abc());

        m.dispatch(MenuEvent::OpenRequest, 0);
        m.dispatch(MenuEvent::CloseRequest, 10);
        assert_eq!(m.status(), Status::Closing);
        m.dispatch(MenuEvent::OpenRequest, 20);
        assert_eq!(m.status(), Status::Open);
        m.poll(110);
        assert_eq!(m.status(), Status::Open, "stale close settle must not fire");
    }

    #[test]
    fn rapid_toggling_resolves_to_the_last_request() {
        let mut config = MenuConfig::new("demo");
        config.open_settle_ms = 30;
        config.close_settle_ms = 30;
        let mut m = Machine::new(config);
        m.set_items(abc());

        for t in 0..10_u64 {
            let event = if t % 2 == 0 {
                MenuEvent::OpenRequest
            } else {
                MenuEvent::CloseRequest
            };
            m.dispatch(event, t);
        }
        // Last request was a close at t=9; settle at t=39.
        m.poll(100);
        assert_eq!(m.status(), Status::Closed);
    }

    #[test]
    fn trigger_toggle_round_trip() {
        let mut m = Machine::new(MenuConfig::new("demo"));
        m.set_items(abc());
        m.dispatch(MenuEvent::ToggleRequest, 0);
        assert!(m.is_open());
        m.dispatch(MenuEvent::ToggleRequest, 1);
        assert_eq!(m.status(), Status::Closed);
    }

    #[test]
    fn pointer_enter_highlights_and_leave_clears() {
        let mut m = open_machine(abc());
        m.dispatch(MenuEvent::PointerEnterItem("c".into()), 1);
        assert_eq!(m.active_id(), Some("c"));
        // Leaving a different item does not clear the highlight.
        m.dispatch(MenuEvent::PointerLeaveItem("a".into()), 2);
        assert_eq!(m.active_id(), Some("c"));
        m.dispatch(MenuEvent::PointerLeaveItem("c".into()), 3);
        assert_eq!(m.active_id(), None);
    }

    #[test]
    fn pointer_enter_on_disabled_item_is_ignored() {
        let mut m = open_machine(abc());
        m.dispatch(MenuEvent::PointerEnterItem("b".into()), 1);
        assert_eq!(m.active_id(), Some("a"));
    }

    #[test]
    fn action_activation_closes_per_config() {
        let mut m = open_machine(abc());
        m.dispatch(MenuEvent::ActivateItem("a".into()), 1);
        assert_eq!(m.status(), Status::Closed);

        let mut config = MenuConfig::new("demo");
        config.close_on_select = false;
        let mut m = Machine::new(config);
        m.set_items(abc());
        m.dispatch(MenuEvent::OpenRequest, 0);
        m.dispatch(MenuEvent::ActivateItem("a".into()), 1);
        assert!(m.is_open());
    }

    #[test]
    fn option_activation_keeps_the_menu_open() {
        let items = vec![
            ItemDescriptor::radio("asc", "order", "asc", "Ascending"),
            ItemDescriptor::checkbox("x", "type", "x", "Type X"),
        ];
        let mut m = open_machine(items);
        let out = m.dispatch(MenuEvent::ActivateItem("asc".into()), 1);
        assert!(m.is_open());
        assert!(out.iter().any(|s| matches!(s, MenuSignal::ValueChange(_))));
        assert_eq!(m.group_value("order"), Some("asc"));

        m.dispatch(MenuEvent::ActivateItem("x".into()), 2);
        assert!(m.is_open());
        assert_eq!(m.group_values("type"), vec![String::from("x")]);
    }

    #[test]
    fn controlled_mode_emits_without_mutating() {
        let mut config = MenuConfig::new("demo");
        config.selection = SelectionMode::Controlled;
        let mut m = Machine::new(config);
        m.set_items(vec![ItemDescriptor::checkbox("x", "type", "x", "Type X")]);
        m.dispatch(MenuEvent::OpenRequest, 0);

        let out = m.dispatch(MenuEvent::ActivateItem("x".into()), 1);
        assert!(out.iter().any(|s| matches!(
            s,
            MenuSignal::ValueChange(ValueChange::Multi { values, .. }) if values == &vec![String::from("x")]
        )));
        // Machine state unchanged until the caller writes back.
        assert!(m.group_values("type").is_empty());
        m.set_group_values("type", [String::from("x")]);
        assert_eq!(m.group_values("type"), vec![String::from("x")]);
    }

    #[test]
    fn option_item_without_group_or_value_is_absorbed() {
        let items = vec![ItemDescriptor {
            id: String::from("broken"),
            kind: ItemKind::RadioOption,
            label: String::from("Broken"),
            value: None,
            group: Some(String::from("order")),
            disabled: false,
        }];
        let mut m = open_machine(items);
        let out = m.dispatch(MenuEvent::ActivateItem("broken".into()), 1);
        assert!(!out.iter().any(|s| matches!(s, MenuSignal::ValueChange(_))));
        assert!(m.is_open());
    }

    #[test]
    fn activating_unknown_or_disabled_items_is_absorbed() {
        let mut m = open_machine(abc());
        assert!(m.dispatch(MenuEvent::ActivateItem("nope".into()), 1).is_empty());
        assert!(m.dispatch(MenuEvent::ActivateItem("b".into()), 2).is_empty());
        assert!(m.is_open());
    }

    #[test]
    fn escape_closes_and_clears_highlight() {
        let mut m = open_machine(abc());
        let out = m.dispatch(MenuEvent::Key(KeyInput::Escape), 1);
        assert_eq!(m.status(), Status::Closed);
        assert!(out.contains(&MenuSignal::OpenChange(false)));
        assert_eq!(m.active_id(), None);
    }

    #[test]
    fn enter_activates_the_highlighted_item() {
        let mut m = open_machine(abc());
        m.dispatch(MenuEvent::Key(KeyInput::End), 1);
        assert_eq!(m.active_id(), Some("c"));
        m.dispatch(MenuEvent::Key(KeyInput::Enter), 2);
        assert_eq!(m.status(), Status::Closed);
    }

    #[test]
    fn typeahead_moves_the_highlight() {
        // Apple/Banana/Abacus: typing "ab" lands on Abacus.
        let items = vec![
            ItemDescriptor::action("apple", "Apple"),
            ItemDescriptor::action("banana", "Banana"),
            ItemDescriptor::action("abacus", "Abacus"),
        ];
        let mut m = open_machine(items);
        m.highlight(None);
        m.dispatch(MenuEvent::Key(KeyInput::Char('a')), 100);
        assert_eq!(m.active_id(), Some("apple"));
        m.dispatch(MenuEvent::Key(KeyInput::Char('b')), 200);
        assert_eq!(m.active_id(), Some("abacus"));
    }

    #[test]
    fn typeahead_buffer_expires_between_keystrokes() {
        let items = vec![
            ItemDescriptor::action("apple", "Apple"),
            ItemDescriptor::action("banana", "Banana"),
        ];
        let mut m = open_machine(items);
        m.highlight(None);
        m.dispatch(MenuEvent::Key(KeyInput::Char('a')), 0);
        assert_eq!(m.active_id(), Some("apple"));
        // 'b' arrives after the 400 ms window: a fresh buffer, matches Banana.
        m.dispatch(MenuEvent::Key(KeyInput::Char('b')), 500);
        assert_eq!(m.active_id(), Some("banana"));
    }

    #[test]
    fn submenu_intents_surface_as_signals() {
        let mut m = open_machine(abc());
        let out = m.dispatch(MenuEvent::Key(KeyInput::ArrowRight), 1);
        assert!(out.contains(&MenuSignal::OpenSubmenu(String::from("a"))));
        let out = m.dispatch(MenuEvent::Key(KeyInput::ArrowLeft), 2);
        assert!(out.contains(&MenuSignal::CloseSubmenu));
    }

    #[test]
    fn anchor_changes_reposition_only_while_open() {
        let rect = Rect::new(0.0, 0.0, 80.0, 24.0);
        let mut m = Machine::new(MenuConfig::new("demo"));
        m.set_items(abc());
        assert!(m.dispatch(MenuEvent::AnchorChanged(rect), 0).is_empty());
        assert_eq!(m.anchor(), Some(rect));
        m.dispatch(MenuEvent::OpenRequest, 1);
        let out = m.dispatch(MenuEvent::AnchorChanged(rect), 2);
        assert_eq!(out.as_slice(), &[MenuSignal::Reposition]);
    }

    #[test]
    fn set_items_clears_a_stale_highlight() {
        let mut m = open_machine(abc());
        assert_eq!(m.active_id(), Some("a"));
        let out = m.set_items(vec![ItemDescriptor::action("z", "Zeta")]);
        assert_eq!(highlights(&out), vec![None]);
        assert_eq!(m.active_id(), None);
    }

    #[test]
    fn dispose_cancels_deadlines_and_forces_closed() {
        let mut config = MenuConfig::new("demo");
        config.open_settle_ms = 100;
        let mut m = Machine::new(config);
        m.set_items(abc());
        m.dispatch(MenuEvent::OpenRequest, 0);
        m.dispatch(MenuEvent::Key(KeyInput::Char('a')), 1);
        assert!(m.next_deadline().is_some());

        let out = m.dispose();
        assert!(out.contains(&MenuSignal::OpenChange(false)));
        assert_eq!(m.status(), Status::Closed);
        assert!(m.next_deadline().is_none());
        assert_eq!(m.active_id(), None);
    }

    #[test]
    fn initially_open_machines_start_open_silently() {
        let mut config = MenuConfig::new("demo");
        config.open = true;
        let m = Machine::new(config);
        assert_eq!(m.status(), Status::Open);
    }
}
