// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core coordinator implementation: the machine arena and its dispatch loop.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use smallvec::SmallVec;
use thicket_menu::{Intent, ItemId, Machine, MenuConfig, MenuEvent, MenuSignal, route};

/// Identifier for a menu in the tree (generational).
///
/// Stale ids (pointing at a removed or recycled slot) are rejected by every
/// tree operation rather than aliasing a newer menu.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MenuId(u32, u32);

impl MenuId {
    const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Signals collected from a tree operation, tagged with the menu that
/// produced each one.
///
/// Ordering is causal: a signal appears after whatever signal queued the
/// transition that produced it.
pub type TreeSignals = Vec<(MenuId, MenuSignal)>;

#[derive(Debug)]
struct Node {
    machine: Machine,
    parent: Option<MenuId>,
    /// The item in the parent menu that anchors this submenu. `None` for roots.
    parent_item: Option<ItemId>,
    children: SmallVec<[MenuId; 4]>,
    /// At most one child submenu is open at a time.
    open_child: Option<MenuId>,
}

/// A unit of deferred work in the dispatch loop.
///
/// Cross-menu reactions are queued instead of dispatched recursively, so a
/// machine is never re-entered while one of its transitions is still being
/// applied.
#[derive(Debug)]
enum Task {
    Event(MenuId, MenuEvent),
    Highlight(MenuId, Option<ItemId>),
}

/// A tree of coordinated menu machines.
///
/// Each node owns one [`Machine`]; edges record which parent item anchors
/// which submenu. The tree is the only component that knows the nesting
/// structure: individual machines surface submenu intents as signals
/// ([`MenuSignal::OpenSubmenu`] / [`MenuSignal::CloseSubmenu`]) and the tree
/// resolves them here, enforcing two structural rules:
///
/// - **Exclusive child**: opening a submenu closes any open sibling submenu
///   of the same parent first.
/// - **Cascade close**: closing a menu closes its open descendant chain.
///
/// ## Example
///
/// ```rust
/// use thicket_menu::{ItemDescriptor, MenuConfig, MenuEvent};
/// use thicket_menu_tree::MenuTree;
///
/// let mut tree = MenuTree::new();
/// let root = tree.insert_root(MenuConfig::new("root"));
/// tree.machine_mut(root).unwrap().set_items(vec![
///     ItemDescriptor::action("share", "Share"),
/// ]);
/// let sub = tree.insert_submenu(root, "share", MenuConfig::new("share")).unwrap();
///
/// tree.dispatch(root, MenuEvent::OpenRequest, 0);
/// tree.dispatch(sub, MenuEvent::OpenRequest, 16);
/// assert!(tree.machine(sub).unwrap().is_open());
///
/// // Closing the root cascades to the open submenu.
/// tree.dispatch(root, MenuEvent::CloseRequest, 32);
/// assert!(!tree.machine(sub).unwrap().is_open());
/// ```
pub struct MenuTree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for MenuTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("MenuTree")
            .field("menus_total", &total)
            .field("menus_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Default for MenuTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a root menu (no parent, no anchoring item).
    pub fn insert_root(&mut self, config: MenuConfig) -> MenuId {
        self.alloc(Machine::new(config), None, None)
    }

    /// Insert a submenu anchored at `parent_item` in `parent`.
    ///
    /// Returns `None` if `parent` is stale. The anchoring item does not have
    /// to exist in the parent's descriptors yet; items are typically fed per
    /// render and matched by id.
    pub fn insert_submenu(
        &mut self,
        parent: MenuId,
        parent_item: impl Into<ItemId>,
        config: MenuConfig,
    ) -> Option<MenuId> {
        if self.node(parent).is_none() {
            log::warn!("insert_submenu: stale parent {parent:?}");
            return None;
        }
        let id = self.alloc(Machine::new(config), Some(parent), Some(parent_item.into()));
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        Some(id)
    }

    fn alloc(&mut self, machine: Machine, parent: Option<MenuId>, item: Option<ItemId>) -> MenuId {
        let node = Node {
            machine,
            parent,
            parent_item: item,
            children: SmallVec::new(),
            open_child: None,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(node);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "MenuId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(node));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "MenuId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        MenuId::new(idx, generation)
    }

    /// Remove a menu and its whole subtree, disposing each machine.
    ///
    /// Disposal runs leaf-up so no child outlives its parent's bookkeeping.
    /// Signals emitted by forced closes are returned; stale ids are a no-op.
    pub fn remove(&mut self, id: MenuId) -> TreeSignals {
        let mut out = TreeSignals::new();
        if self.node(id).is_none() {
            return out;
        }
        if let Some(parent) = self.node(id).and_then(|n| n.parent)
            && let Some(p) = self.node_mut(parent)
        {
            p.children.retain(|c| *c != id);
            if p.open_child == Some(id) {
                p.open_child = None;
            }
        }
        self.remove_subtree(id, &mut out);
        out
    }

    fn remove_subtree(&mut self, id: MenuId, out: &mut TreeSignals) {
        let children = match self.node(id) {
            Some(n) => n.children.clone(),
            None => return,
        };
        for child in children {
            self.remove_subtree(child, out);
        }
        if let Some(n) = self.nodes[id.idx()].as_mut() {
            for signal in n.machine.dispose() {
                out.push((id, signal));
            }
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Whether `id` refers to a live menu.
    pub fn contains(&self, id: MenuId) -> bool {
        self.node(id).is_some()
    }

    /// The machine behind `id`, if live.
    pub fn machine(&self, id: MenuId) -> Option<&Machine> {
        self.node(id).map(|n| &n.machine)
    }

    /// Mutable access to the machine behind `id`, if live.
    ///
    /// Intended for per-render feeds (`set_items`, controlled group values).
    /// Route events through [`MenuTree::dispatch`] instead of calling the
    /// machine's `dispatch` directly, or cross-menu rules will not run.
    pub fn machine_mut(&mut self, id: MenuId) -> Option<&mut Machine> {
        self.node_mut(id).map(|n| &mut n.machine)
    }

    /// The parent menu of `id`, if any.
    pub fn parent_of(&self, id: MenuId) -> Option<MenuId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// The currently open child submenu of `id`, if any.
    pub fn open_child_of(&self, id: MenuId) -> Option<MenuId> {
        self.node(id).and_then(|n| n.open_child)
    }

    /// Dispatch an event to one menu and run every cross-menu reaction it
    /// triggers to completion.
    ///
    /// Any event that would open a menu whose ancestors are closed — an
    /// [`MenuEvent::OpenRequest`], a [`MenuEvent::ToggleRequest`] while
    /// closed, or an opening key — opens the ancestor chain first,
    /// root-down, so an orphaned open submenu can never exist.
    pub fn dispatch(&mut self, id: MenuId, event: MenuEvent, now_ms: u64) -> TreeSignals {
        let mut queue = VecDeque::new();
        if self.event_opens(id, &event) {
            for ancestor in self.closed_ancestors(id) {
                queue.push_back(Task::Event(ancestor, MenuEvent::OpenRequest));
            }
        }
        queue.push_back(Task::Event(id, event));
        self.run(queue, now_ms)
    }

    /// Whether `event` would open `id` given its current status.
    fn event_opens(&self, id: MenuId, event: &MenuEvent) -> bool {
        let Some(machine) = self.machine(id) else {
            return false;
        };
        match event {
            MenuEvent::OpenRequest => true,
            MenuEvent::ToggleRequest => !machine.is_open(),
            MenuEvent::Key(key) => matches!(route(*key, machine.status()), Intent::Open(_)),
            _ => false,
        }
    }

    /// Advance every pending deadline in the tree that `now_ms` has reached.
    pub fn poll(&mut self, now_ms: u64) -> TreeSignals {
        let live: Vec<MenuId> = self.live_ids().collect();
        let mut out = TreeSignals::new();
        for id in live {
            let mut queue = VecDeque::new();
            let signals = match self.node_mut(id) {
                Some(n) => n.machine.poll(now_ms),
                None => continue, // removed by an earlier reaction this poll
            };
            self.react(id, &signals, &mut queue);
            out.extend(signals.into_iter().map(|s| (id, s)));
            out.extend(self.run(queue, now_ms));
        }
        out
    }

    /// The earliest pending deadline across all menus, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.nodes
            .iter()
            .flatten()
            .filter_map(|n| n.machine.next_deadline())
            .min()
    }

    /// Work-queue dispatch loop. Each task dispatches into exactly one
    /// machine; reactions to the resulting signals are queued, never nested.
    fn run(&mut self, mut queue: VecDeque<Task>, now_ms: u64) -> TreeSignals {
        let mut out = TreeSignals::new();
        while let Some(task) = queue.pop_front() {
            let (id, signals) = match task {
                Task::Event(id, event) => {
                    let Some(n) = self.node_mut(id) else {
                        log::warn!("dispatch: stale menu {id:?}");
                        continue;
                    };
                    (id, n.machine.dispatch(event, now_ms))
                }
                Task::Highlight(id, item) => {
                    let Some(n) = self.node_mut(id) else {
                        continue;
                    };
                    (id, n.machine.highlight(item.as_deref()))
                }
            };
            self.react(id, &signals, &mut queue);
            out.extend(signals.into_iter().map(|s| (id, s)));
        }
        out
    }

    /// Translate one menu's signals into cross-menu tasks.
    fn react(&mut self, id: MenuId, signals: &[MenuSignal], queue: &mut VecDeque<Task>) {
        for signal in signals {
            match signal {
                MenuSignal::OpenChange(true) => {
                    if let Some(parent) = self.parent_of(id) {
                        let previous = self.open_child_of(parent);
                        if let Some(sibling) = previous
                            && sibling != id
                        {
                            queue.push_back(Task::Event(sibling, MenuEvent::CloseRequest));
                        }
                        if let Some(p) = self.node_mut(parent) {
                            p.open_child = Some(id);
                        }
                    }
                }
                MenuSignal::OpenChange(false) => {
                    if let Some(parent) = self.parent_of(id)
                        && let Some(p) = self.node_mut(parent)
                        && p.open_child == Some(id)
                    {
                        p.open_child = None;
                    }
                    // Cascade: the child's own close will recurse further down.
                    if let Some(child) = self.open_child_of(id) {
                        queue.push_back(Task::Event(child, MenuEvent::CloseRequest));
                    }
                }
                MenuSignal::OpenSubmenu(item) => {
                    if let Some(child) = self.anchored_child(id, item) {
                        queue.push_back(Task::Event(child, MenuEvent::OpenRequest));
                    }
                }
                MenuSignal::CloseSubmenu => {
                    // Roots have no parent to return to; ignore.
                    if let Some(parent) = self.parent_of(id) {
                        let anchor = self.node(id).and_then(|n| n.parent_item.clone());
                        queue.push_back(Task::Event(id, MenuEvent::CloseRequest));
                        queue.push_back(Task::Highlight(parent, anchor));
                    }
                }
                MenuSignal::HighlightChange(Some(item)) => {
                    // Hover transfer: when some submenu of this menu is
                    // already open, moving the highlight onto a different
                    // anchoring item shifts the open submenu to it.
                    if let Some(open) = self.open_child_of(id)
                        && let Some(target) = self.anchored_child(id, item)
                        && target != open
                    {
                        queue.push_back(Task::Event(open, MenuEvent::CloseRequest));
                        queue.push_back(Task::Event(target, MenuEvent::OpenRequest));
                    }
                }
                _ => {}
            }
        }
    }

    /// The child of `id` anchored at `item`, if one exists.
    fn anchored_child(&self, id: MenuId, item: &str) -> Option<MenuId> {
        let node = self.node(id)?;
        node.children.iter().copied().find(|&c| {
            self.node(c)
                .is_some_and(|n| n.parent_item.as_deref() == Some(item))
        })
    }

    /// Closed ancestors of `id`, root first.
    fn closed_ancestors(&self, id: MenuId) -> Vec<MenuId> {
        let mut chain = Vec::new();
        let mut cursor = self.parent_of(id);
        while let Some(ancestor) = cursor {
            if self.machine(ancestor).is_some_and(|m| !m.is_open()) {
                chain.push(ancestor);
            }
            cursor = self.parent_of(ancestor);
        }
        chain.reverse();
        chain
    }

    fn live_ids(&self) -> impl Iterator<Item = MenuId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(idx, slot)| {
            slot.as_ref().map(|_| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "MenuId uses 32-bit indices by design."
                )]
                MenuId::new(idx as u32, self.generations[idx])
            })
        })
    }

    fn node(&self, id: MenuId) -> Option<&Node> {
        self.nodes
            .get(id.idx())?
            .as_ref()
            .filter(|_| self.generations[id.idx()] == id.1)
    }

    fn node_mut(&mut self, id: MenuId) -> Option<&mut Node> {
        let generation = *self.generations.get(id.idx())?;
        self.nodes
            .get_mut(id.idx())?
            .as_mut()
            .filter(|_| generation == id.1)
    }
}
