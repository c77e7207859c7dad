// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Search-by-typing over item labels.
//!
//! Policy (deliberately fixed and tested): ASCII case-insensitive *prefix*
//! match against [`ItemDescriptor::label`], scanning the descriptors in array
//! order starting strictly after the currently active item and wrapping once.
//! Each appended character restarts a debounce window
//! ([`MenuConfig::typeahead_timeout_ms`](crate::MenuConfig::typeahead_timeout_ms),
//! 400 ms by default); the buffer clears when the window elapses with no new
//! character. The crate owns no timer: deadlines are millisecond timestamps
//! compared against the host-supplied `now`.

use smallvec::SmallVec;

use crate::items::ItemDescriptor;

/// Accumulated typeahead characters plus the debounce deadline.
#[derive(Clone, Debug)]
pub(crate) struct Typeahead {
    buffer: SmallVec<[char; 8]>,
    deadline: Option<u64>,
    timeout_ms: u64,
}

impl Typeahead {
    pub(crate) fn new(timeout_ms: u64) -> Self {
        Self {
            buffer: SmallVec::new(),
            deadline: None,
            timeout_ms,
        }
    }

    /// Append a character and restart the debounce window.
    pub(crate) fn append(&mut self, c: char, now_ms: u64) {
        self.buffer.push(c);
        self.deadline = Some(now_ms.saturating_add(self.timeout_ms));
    }

    /// The pending debounce deadline, if a buffer is accumulating.
    pub(crate) fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Clear the buffer if the debounce window has elapsed.
    pub(crate) fn poll(&mut self, now_ms: u64) {
        if self.deadline.is_some_and(|d| now_ms >= d) {
            self.clear();
        }
    }

    pub(crate) fn clear(&mut self) {
        self.buffer.clear();
        self.deadline = None;
    }

    /// Find the item the current buffer selects, or `None` if nothing matches.
    ///
    /// Scans in descriptor order starting strictly after `active`, wrapping
    /// around once, and skips non-navigable items. An empty or fully-disabled
    /// set simply yields no match; the buffer still accumulates.
    pub(crate) fn find_match<'a>(
        &self,
        items: &'a [ItemDescriptor],
        active: Option<&str>,
    ) -> Option<&'a ItemDescriptor> {
        if self.buffer.is_empty() || items.is_empty() {
            return None;
        }
        let start = active
            .and_then(|id| items.iter().position(|d| d.id == id))
            .map_or(0, |pos| pos + 1);
        (0..items.len())
            .map(|offset| &items[(start + offset) % items.len()])
            .find(|d| d.is_navigable() && starts_with_ignore_ascii_case(&d.label, &self.buffer))
    }
}

fn starts_with_ignore_ascii_case(label: &str, prefix: &[char]) -> bool {
    let mut chars = label.chars();
    prefix.iter().all(|&p| {
        chars
            .next()
            .is_some_and(|c| c.eq_ignore_ascii_case(&p))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn fruit() -> vec::Vec<ItemDescriptor> {
        vec![
            ItemDescriptor::action("apple", "Apple"),
            ItemDescriptor::action("banana", "Banana"),
            ItemDescriptor::action("abacus", "Abacus"),
        ]
    }

    #[test]
    fn two_char_prefix_beats_single_char_continuation() {
        // "a" then "b" within the window lands on Abacus,
        // not Apple (which fails the "ab" prefix).
        let items = fruit();
        let mut t = Typeahead::new(400);
        t.append('a', 0);
        let first = t.find_match(&items, None).unwrap();
        assert_eq!(first.id, "apple");
        t.append('b', 100);
        let second = t.find_match(&items, Some("apple")).unwrap();
        assert_eq!(second.id, "abacus");
    }

    #[test]
    fn single_char_cycles_past_the_active_item() {
        let items = fruit();
        let mut t = Typeahead::new(400);
        t.append('a', 0);
        assert_eq!(t.find_match(&items, Some("apple")).unwrap().id, "abacus");
        assert_eq!(t.find_match(&items, Some("abacus")).unwrap().id, "apple");
    }

    #[test]
    fn matching_is_ascii_case_insensitive() {
        let items = fruit();
        let mut t = Typeahead::new(400);
        t.append('B', 0);
        assert_eq!(t.find_match(&items, None).unwrap().id, "banana");
    }

    #[test]
    fn disabled_items_never_match() {
        let items = vec![
            ItemDescriptor::action("apple", "Apple").disabled(),
            ItemDescriptor::action("abacus", "Abacus"),
        ];
        let mut t = Typeahead::new(400);
        t.append('a', 0);
        assert_eq!(t.find_match(&items, None).unwrap().id, "abacus");
    }

    #[test]
    fn buffer_accumulates_even_when_nothing_matches() {
        let items = vec![ItemDescriptor::action("apple", "Apple").disabled()];
        let mut t = Typeahead::new(400);
        t.append('a', 0);
        assert!(t.find_match(&items, None).is_none());
        assert_eq!(t.deadline(), Some(400));
    }

    #[test]
    fn window_elapse_clears_the_buffer() {
        let items = fruit();
        let mut t = Typeahead::new(400);
        t.append('a', 0);
        t.poll(399);
        assert_eq!(t.find_match(&items, None).unwrap().id, "apple");
        t.poll(400);
        assert!(t.find_match(&items, None).is_none());
        assert!(t.deadline().is_none());
    }

    #[test]
    fn each_character_restarts_the_window() {
        let items = fruit();
        let mut t = Typeahead::new(400);
        t.append('a', 0);
        t.append('b', 300);
        t.poll(400);
        assert_eq!(t.find_match(&items, None).unwrap().id, "abacus");
        t.poll(700);
        assert!(t.find_match(&items, None).is_none());
    }
}
