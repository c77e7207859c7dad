// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item descriptors and navigation scans over the current descriptor set.
//!
//! Descriptors are supplied by the host on every render pass via
//! [`Machine::set_items`](crate::Machine::set_items); the machine matches them
//! across passes by `id` only and never retains host identity beyond that.

use alloc::string::String;

/// Identifier of an item, unique among the items supplied in one pass.
pub type ItemId = String;

/// The interaction variant of an item.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A plain activatable entry. Activation closes the menu by default.
    Action,
    /// A single-select option within a named group (at most one selected).
    RadioOption,
    /// A multi-select option within a named group (set membership toggles).
    CheckboxOption,
    /// A visual divider. Never navigable, never activatable.
    Separator,
}

/// Describes one entry of the menu for the current render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDescriptor {
    /// Unique id within the menu.
    pub id: ItemId,
    /// Interaction variant.
    pub kind: ItemKind,
    /// Human-readable label; feeds typeahead matching.
    pub label: String,
    /// Semantic value exchanged with the owning group. Present for
    /// [`ItemKind::RadioOption`] and [`ItemKind::CheckboxOption`].
    pub value: Option<String>,
    /// Owning option-group name. Present for option kinds.
    pub group: Option<String>,
    /// Disabled items are skipped by navigation and typeahead.
    pub disabled: bool,
}

impl ItemDescriptor {
    /// A plain action item.
    pub fn action(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::Action,
            label: label.into(),
            value: None,
            group: None,
            disabled: false,
        }
    }

    /// A radio option belonging to `group` with the given semantic `value`.
    pub fn radio(
        id: impl Into<String>,
        group: impl Into<String>,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::RadioOption,
            label: label.into(),
            value: Some(value.into()),
            group: Some(group.into()),
            disabled: false,
        }
    }

    /// A checkbox option belonging to `group` with the given semantic `value`.
    pub fn checkbox(
        id: impl Into<String>,
        group: impl Into<String>,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::CheckboxOption,
            label: label.into(),
            value: Some(value.into()),
            group: Some(group.into()),
            disabled: false,
        }
    }

    /// A separator. Only its `id` is meaningful.
    pub fn separator(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::Separator,
            label: String::new(),
            value: None,
            group: None,
            disabled: false,
        }
    }

    /// Mark this item disabled (builder style).
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Whether keyboard/pointer navigation may land on this item.
    pub fn is_navigable(&self) -> bool {
        !self.disabled && self.kind != ItemKind::Separator
    }
}

/// Direction of a highlight move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The next navigable item in descriptor order.
    Next,
    /// The previous navigable item in descriptor order.
    Prev,
    /// The first navigable item.
    First,
    /// The last navigable item.
    Last,
}

pub(crate) fn find<'a>(items: &'a [ItemDescriptor], id: &str) -> Option<&'a ItemDescriptor> {
    items.iter().find(|d| d.id == id)
}

pub(crate) fn first_navigable(items: &[ItemDescriptor]) -> Option<&ItemDescriptor> {
    items.iter().find(|d| d.is_navigable())
}

pub(crate) fn last_navigable(items: &[ItemDescriptor]) -> Option<&ItemDescriptor> {
    items.iter().rev().find(|d| d.is_navigable())
}

/// Resolve a highlight move over `items` in descriptor order.
///
/// Disabled items and separators are skipped. `Next`/`Prev` wrap only when
/// `wrap` is set; `First`/`Last` clamp. An absent or unknown `origin` makes
/// `Next` land on the first navigable item and `Prev` on the last, matching
/// entering the menu from either edge.
pub(crate) fn move_from<'a>(
    items: &'a [ItemDescriptor],
    origin: Option<&str>,
    direction: Direction,
    wrap: bool,
) -> Option<&'a ItemDescriptor> {
    match direction {
        Direction::First => first_navigable(items),
        Direction::Last => last_navigable(items),
        Direction::Next => {
            let Some(pos) = origin.and_then(|id| items.iter().position(|d| d.id == id)) else {
                return first_navigable(items);
            };
            let ahead = items[pos + 1..].iter().find(|d| d.is_navigable());
            match ahead {
                Some(d) => Some(d),
                None if wrap => first_navigable(items),
                None => None,
            }
        }
        Direction::Prev => {
            let Some(pos) = origin.and_then(|id| items.iter().position(|d| d.id == id)) else {
                return last_navigable(items);
            };
            let behind = items[..pos].iter().rev().find(|d| d.is_navigable());
            match behind {
                Some(d) => Some(d),
                None if wrap => last_navigable(items),
                None => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> vec::Vec<ItemDescriptor> {
        vec![
            ItemDescriptor::action("a", "Alpha"),
            ItemDescriptor::action("b", "Beta").disabled(),
            ItemDescriptor::separator("sep"),
            ItemDescriptor::action("c", "Gamma"),
        ]
    }

    #[test]
    fn next_skips_disabled_and_separators() {
        let items = sample();
        let next = move_from(&items, Some("a"), Direction::Next, true).unwrap();
        assert_eq!(next.id, "c");
    }

    #[test]
    fn prev_skips_disabled_and_separators() {
        let items = sample();
        let prev = move_from(&items, Some("c"), Direction::Prev, true).unwrap();
        assert_eq!(prev.id, "a");
    }

    #[test]
    fn next_wraps_only_when_requested() {
        let items = sample();
        assert_eq!(
            move_from(&items, Some("c"), Direction::Next, true).unwrap().id,
            "a"
        );
        assert!(move_from(&items, Some("c"), Direction::Next, false).is_none());
    }

    #[test]
    fn first_and_last_clamp() {
        let items = sample();
        assert_eq!(move_from(&items, Some("c"), Direction::First, false).unwrap().id, "a");
        assert_eq!(move_from(&items, Some("a"), Direction::Last, false).unwrap().id, "c");
    }

    #[test]
    fn absent_origin_enters_from_the_edge() {
        let items = sample();
        assert_eq!(move_from(&items, None, Direction::Next, true).unwrap().id, "a");
        assert_eq!(move_from(&items, None, Direction::Prev, true).unwrap().id, "c");
    }

    #[test]
    fn fully_disabled_set_yields_nothing() {
        let items = vec![
            ItemDescriptor::action("a", "Alpha").disabled(),
            ItemDescriptor::separator("sep"),
        ];
        assert!(move_from(&items, None, Direction::Next, true).is_none());
        assert!(first_navigable(&items).is_none());
        assert!(last_navigable(&items).is_none());
    }
}
