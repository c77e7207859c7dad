// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Option groups: radio and checkbox selection semantics over item subsets.
//!
//! Groups are not declared up front; they are implied by the descriptors the
//! host supplies (`group` + option kind). Selection is mutated exclusively
//! through item activation routed by the machine; the host observes
//! [`ValueChange`] notifications and, in controlled mode, writes values back
//! through the machine's `set_group_value(s)` methods.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::items::{ItemDescriptor, ItemKind};

/// Selection change produced by activating an option item.
///
/// This is the only externally observable mutation path for selection state.
/// Checkbox value lists are emitted in descriptor order so notifications are
/// deterministic across runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueChange {
    /// A radio group selected `value` (replacing any previous selection).
    Single {
        /// The owning group name.
        group: String,
        /// The newly selected value.
        value: String,
    },
    /// A checkbox group's membership changed; `values` is the full new set.
    Multi {
        /// The owning group name.
        group: String,
        /// The complete selection after the toggle, in descriptor order.
        values: Vec<String>,
    },
}

/// Machine-held selection state, keyed by group name.
///
/// In uncontrolled mode this is the source of truth. In controlled mode it
/// holds the caller-fed mirror that activation computes hypothetical changes
/// against; `activate` is called with `mutate = false` and leaves it alone.
#[derive(Clone, Debug, Default)]
pub(crate) struct OptionGroups {
    single: HashMap<String, String>,
    multi: HashMap<String, HashSet<String>>,
}

impl OptionGroups {
    /// Whether the descriptor's value is selected in its group.
    pub(crate) fn is_checked(&self, d: &ItemDescriptor) -> bool {
        let (Some(group), Some(value)) = (d.group.as_deref(), d.value.as_deref()) else {
            return false;
        };
        match d.kind {
            ItemKind::RadioOption => self.single.get(group).is_some_and(|v| v == value),
            ItemKind::CheckboxOption => self.multi.get(group).is_some_and(|s| s.contains(value)),
            _ => false,
        }
    }

    /// Compute the change produced by activating `d`, applying it to the
    /// stored state only when `mutate` is set (uncontrolled mode).
    ///
    /// Returns `None` for non-option kinds and for option descriptors that
    /// are missing their `group` or `value` (a caller contract violation the
    /// machine logs).
    pub(crate) fn activate(
        &mut self,
        d: &ItemDescriptor,
        items: &[ItemDescriptor],
        mutate: bool,
    ) -> Option<ValueChange> {
        let (group, value) = (d.group.clone()?, d.value.clone()?);
        match d.kind {
            ItemKind::RadioOption => {
                if mutate {
                    self.single.insert(group.clone(), value.clone());
                }
                Some(ValueChange::Single { group, value })
            }
            ItemKind::CheckboxOption => {
                let current = self.multi.entry(group.clone()).or_default();
                let mut next = current.clone();
                if !next.remove(value.as_str()) {
                    next.insert(value);
                }
                let values = ordered_values(&group, &next, items);
                if mutate {
                    *current = next;
                }
                Some(ValueChange::Multi { group, values })
            }
            _ => None,
        }
    }

    /// Overwrite a radio group's selection (controlled feed or programmatic set).
    pub(crate) fn set_single(&mut self, group: &str, value: Option<String>) {
        match value {
            Some(v) => {
                self.single.insert(String::from(group), v);
            }
            None => {
                self.single.remove(group);
            }
        }
    }

    /// Overwrite a checkbox group's selection (controlled feed or programmatic set).
    pub(crate) fn set_multi(&mut self, group: &str, values: impl IntoIterator<Item = String>) {
        self.multi
            .insert(String::from(group), values.into_iter().collect());
    }

    /// The selected value of a radio group, if any.
    pub(crate) fn single_value(&self, group: &str) -> Option<&str> {
        self.single.get(group).map(String::as_str)
    }

    /// The selected values of a checkbox group, in descriptor order.
    pub(crate) fn multi_values(&self, group: &str, items: &[ItemDescriptor]) -> Vec<String> {
        self.multi
            .get(group)
            .map(|set| ordered_values(group, set, items))
            .unwrap_or_default()
    }
}

/// Order a selection set deterministically: descriptor order first, then any
/// values without a matching descriptor in lexicographic order.
fn ordered_values(group: &str, set: &HashSet<String>, items: &[ItemDescriptor]) -> Vec<String> {
    let mut out: Vec<String> = items
        .iter()
        .filter(|d| {
            d.kind == ItemKind::CheckboxOption
                && d.group.as_deref() == Some(group)
                && d.value.as_deref().is_some_and(|v| set.contains(v))
        })
        .filter_map(|d| d.value.clone())
        .collect();
    let mut rest: Vec<String> = set
        .iter()
        .filter(|v| !out.iter().any(|o| o == *v))
        .cloned()
        .collect();
    rest.sort_unstable();
    out.extend(rest);
    out
}
