// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard routing: translate key input into machine intents.
//!
//! [`route`] is a pure function of the key and the current lifecycle
//! [`Status`]; it owns no state and performs no transition itself. The
//! machine applies the returned [`Intent`], and a coordinator may intercept
//! the submenu intents (a single machine does not know which of its items
//! anchor child menus).

use crate::items::Direction;
use crate::machine::Status;

/// Normalized keyboard input, renderer- and platform-neutral.
///
/// Hosts map their native key events onto this set; anything without a
/// mapping simply is not routed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyInput {
    /// Down arrow.
    ArrowDown,
    /// Up arrow.
    ArrowUp,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home / jump to first.
    Home,
    /// End / jump to last.
    End,
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Tab (focus leaves the menu).
    Tab,
    /// A printable character, candidate for typeahead.
    Char(char),
}

/// What a key press means given the current machine status.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Open the menu, highlighting the item at the given edge
    /// (`First` for ArrowDown/Enter/Space, `Last` for ArrowUp).
    Open(Direction),
    /// Move the highlight.
    MoveActive(Direction),
    /// Activate the currently highlighted item.
    ActivateCurrent,
    /// Close the menu.
    Close,
    /// Open the submenu anchored at the highlighted item, if any.
    OpenSubmenu,
    /// Close this menu if it is a submenu, returning to the parent.
    CloseSubmenu,
    /// Append a character to the typeahead buffer.
    AppendTypeahead(char),
    /// The key has no meaning in this status.
    NoOp,
}

/// Route a key press to an [`Intent`] for the given lifecycle status.
///
/// While closed (or closing), only the opening keys are meaningful; they are
/// expected to arrive from the trigger part. While open, arrows navigate,
/// Home/End clamp, Enter/Space activate, Escape and Tab close, left/right
/// arrows drive submenu traversal, and printable characters feed typeahead.
pub fn route(key: KeyInput, status: Status) -> Intent {
    match status {
        Status::Closed | Status::Closing => match key {
            KeyInput::ArrowDown | KeyInput::Enter | KeyInput::Space => {
                Intent::Open(Direction::First)
            }
            KeyInput::ArrowUp => Intent::Open(Direction::Last),
            _ => Intent::NoOp,
        },
        Status::Opening | Status::Open => match key {
            KeyInput::ArrowDown => Intent::MoveActive(Direction::Next),
            KeyInput::ArrowUp => Intent::MoveActive(Direction::Prev),
            KeyInput::Home => Intent::MoveActive(Direction::First),
            KeyInput::End => Intent::MoveActive(Direction::Last),
            KeyInput::Enter | KeyInput::Space => Intent::ActivateCurrent,
            KeyInput::Escape | KeyInput::Tab => Intent::Close,
            KeyInput::ArrowRight => Intent::OpenSubmenu,
            KeyInput::ArrowLeft => Intent::CloseSubmenu,
            KeyInput::Char(c) if !c.is_control() => Intent::AppendTypeahead(c),
            KeyInput::Char(_) => Intent::NoOp,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_menu_only_opens() {
        assert_eq!(
            route(KeyInput::ArrowDown, Status::Closed),
            Intent::Open(Direction::First)
        );
        assert_eq!(
            route(KeyInput::ArrowUp, Status::Closed),
            Intent::Open(Direction::Last)
        );
        assert_eq!(route(KeyInput::Escape, Status::Closed), Intent::NoOp);
        assert_eq!(route(KeyInput::Char('x'), Status::Closed), Intent::NoOp);
    }

    #[test]
    fn open_menu_navigates_and_activates() {
        assert_eq!(
            route(KeyInput::ArrowDown, Status::Open),
            Intent::MoveActive(Direction::Next)
        );
        assert_eq!(
            route(KeyInput::End, Status::Open),
            Intent::MoveActive(Direction::Last)
        );
        assert_eq!(route(KeyInput::Enter, Status::Open), Intent::ActivateCurrent);
        assert_eq!(route(KeyInput::Escape, Status::Open), Intent::Close);
        assert_eq!(route(KeyInput::Tab, Status::Open), Intent::Close);
    }

    #[test]
    fn submenu_arrows_route_while_open() {
        assert_eq!(route(KeyInput::ArrowRight, Status::Open), Intent::OpenSubmenu);
        assert_eq!(route(KeyInput::ArrowLeft, Status::Open), Intent::CloseSubmenu);
    }

    #[test]
    fn printable_chars_feed_typeahead_control_chars_do_not() {
        assert_eq!(
            route(KeyInput::Char('a'), Status::Open),
            Intent::AppendTypeahead('a')
        );
        assert_eq!(route(KeyInput::Char('\u{8}'), Status::Open), Intent::NoOp);
    }

    #[test]
    fn reopening_during_close_settle_routes_as_open() {
        assert_eq!(
            route(KeyInput::Enter, Status::Closing),
            Intent::Open(Direction::First)
        );
    }
}
