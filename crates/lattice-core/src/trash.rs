// crates/lattice-core/src/trash.rs
//! Deferred widget destruction.
//!
//! `trash_add` only flips a widget to [`NodeState::Trashed`] and unlinks it,
//! so any traversal still holding its handle keeps valid memory behind it.
//! Slots are released by `trash_clear`, which the frame driver calls once
//! layout, paint and event dispatch are done.

use crate::{DirtyFlags, NodeId, NodeState, Position, WidgetTree};
use std::collections::VecDeque;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct TrashQueue {
    pending: VecDeque<NodeId>,
}

impl TrashQueue {
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.pending.contains(&id)
    }
}

impl WidgetTree {
    /// Marks a widget dead and queues it for finalization.
    ///
    /// Returns false when the handle is already trashed, stale, or the root.
    pub fn trash_add(&mut self, id: NodeId) -> bool {
        if id == self.root() {
            warn!("Refusing to trash the root widget");
            return false;
        }
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        node.state = NodeState::Trashed;
        let out_of_flow = node.style.position() == Position::Absolute;

        if let Some(parent) = self.unlink(id) {
            let flags = if out_of_flow {
                DirtyFlags::REPAINT
            } else {
                DirtyFlags::REFLOW | DirtyFlags::REPAINT
            };
            self.mark_dirty(parent, flags);
        }
        self.trash.pending.push_back(id);
        debug!("Trashed {}", id);
        true
    }

    pub fn is_trashed(&self, id: NodeId) -> bool {
        self.node_any(id)
            .is_some_and(|node| node.state == NodeState::Trashed)
    }

    pub fn trash(&self) -> &TrashQueue {
        &self.trash
    }

    /// Finalizes everything in the queue, including widgets queued by
    /// destroy hooks while draining. Returns the number of queue entries
    /// finalized.
    ///
    /// Does nothing while a traversal is in progress.
    pub fn trash_clear(&mut self) -> usize {
        if self.is_traversing() {
            warn!(
                "trash_clear called during a traversal, {} entries left queued",
                self.trash.len()
            );
            return 0;
        }

        let mut finalized = 0;
        while let Some(id) = self.trash.pending.pop_front() {
            if !self.is_trashed(id) {
                warn!("Skipping stale trash entry {}", id);
                continue;
            }
            let freed = self.destroy_subtree(id);
            debug!("Finalized {} ({} widgets)", id, freed);
            finalized += 1;
        }
        finalized
    }

    /// Runs destroy hooks and releases slots for `id` and its descendants.
    /// Descendants trashed on their own are left for their queue entry.
    /// A descendant whose hook attached it to a live widget survives with
    /// its subtree.
    fn destroy_subtree(&mut self, id: NodeId) -> usize {
        let mut freed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if next != id && self.is_trashed(next) {
                continue;
            }
            let hook = match self.node_any_mut(next) {
                Some(node) => node.destroy_hook.take(),
                None => continue,
            };
            if let Some(hook) = hook {
                hook(self, next);
                if next != id && (self.is_trashed(next) || self.has_live_parent(next)) {
                    debug!("Destroy hook of {} kept it out of this pass", next);
                    continue;
                }
            }
            if let Some(node) = self.release(next) {
                stack.extend(node.children.iter().rev().copied());
                freed += 1;
            }
        }
        freed
    }

    fn has_live_parent(&self, id: NodeId) -> bool {
        self.parent(id).is_some_and(|parent| self.is_live(parent))
    }
}

#[cfg(test)]
mod tests {
    use crate::{NodeId, WidgetKind, WidgetTree};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_trashed_node_is_invisible_but_allocated() {
        let mut tree = WidgetTree::new();
        let child = tree.create(WidgetKind::Container);
        tree.append(tree.root(), child).unwrap();

        assert!(tree.trash_add(child));
        assert!(!tree.is_live(child));
        assert!(tree.get(child).is_none());
        assert!(tree.set_style_str(child, "width", "5px").is_err());
        assert!(tree.children(tree.root()).is_empty());
        assert_eq!(tree.len(), 2);

        assert_eq!(tree.trash_clear(), 1);
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_trashed(child));
    }

    #[test]
    fn test_double_add_finalizes_once() {
        let mut tree = WidgetTree::new();
        let child = tree.create(WidgetKind::Container);
        tree.append(tree.root(), child).unwrap();

        let runs = Rc::new(RefCell::new(0));
        let counter = runs.clone();
        tree.set_destroy_hook(child, Box::new(move |_, _| *counter.borrow_mut() += 1))
            .unwrap();

        assert!(tree.trash_add(child));
        assert!(!tree.trash_add(child));
        assert_eq!(tree.trash().len(), 1);
        assert_eq!(tree.trash_clear(), 1);
        assert_eq!(*runs.borrow(), 1);
        assert_eq!(tree.trash_clear(), 0);
    }

    #[test]
    fn test_hook_enqueue_is_drained_in_same_pass() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let first = tree.create(WidgetKind::Container);
        let second = tree.create(WidgetKind::Container);
        tree.append(root, first).unwrap();
        tree.append(root, second).unwrap();

        tree.set_destroy_hook(first, Box::new(move |tree, _| {
            tree.trash_add(second);
        }))
        .unwrap();

        tree.trash_add(first);
        assert_eq!(tree.trash_clear(), 2);
        assert!(tree.trash().is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_children_freed_with_parent() {
        let mut tree = WidgetTree::new();
        let parent = tree.create(WidgetKind::Container);
        tree.append(tree.root(), parent).unwrap();
        let order = Rc::new(RefCell::new(Vec::<NodeId>::new()));
        let mut children = Vec::new();
        for _ in 0..3 {
            let child = tree.create(WidgetKind::Button);
            tree.append(parent, child).unwrap();
            let log = order.clone();
            tree.set_destroy_hook(child, Box::new(move |_, id| log.borrow_mut().push(id)))
                .unwrap();
            children.push(child);
        }

        tree.detach(parent).unwrap();
        // Children stay addressable until the drain.
        assert!(tree.is_live(children[0]));
        assert_eq!(tree.trash_clear(), 1);
        assert_eq!(*order.borrow(), children);
        assert!(children.iter().all(|child| !tree.is_live(*child)));
    }

    #[test]
    fn test_hook_can_rescue_a_descendant() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let dialog = tree.create(WidgetKind::Container);
        let toolbar = tree.create(WidgetKind::Container);
        let button = tree.create(WidgetKind::Button);
        let label = tree.create(WidgetKind::Container);
        tree.append(root, dialog).unwrap();
        tree.append(dialog, toolbar).unwrap();
        tree.append(toolbar, button).unwrap();
        tree.append(dialog, label).unwrap();

        // The toolbar outlives its dialog by moving to the root.
        tree.set_destroy_hook(toolbar, Box::new(|tree, id| {
            let root = tree.root();
            tree.append(root, id).unwrap();
        }))
        .unwrap();

        tree.detach(dialog).unwrap();
        assert_eq!(tree.trash_clear(), 1);

        assert!(tree.is_live(toolbar));
        assert!(tree.is_live(button));
        assert!(!tree.is_live(label));
        assert_eq!(tree.children(root), vec![toolbar]);
        assert_eq!(tree.parent(toolbar), Some(root));
        assert_eq!(tree.children(toolbar), vec![button]);
        assert_eq!(tree.len(), 3);
        assert!(tree.children(root).iter().all(|child| tree.get(*child).is_some()));
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut tree = WidgetTree::new();
        let child = tree.create(WidgetKind::Container);
        tree.append(tree.root(), child).unwrap();
        tree.trash_add(child);
        tree.trash_clear();

        let reused = tree.create(WidgetKind::Container);
        assert_eq!(reused.index, child.index);
        assert_ne!(reused.generation, child.generation);
        assert!(!tree.trash_add(child));
        assert!(tree.is_live(reused));
    }

    #[test]
    fn test_clear_refused_mid_traversal() {
        let mut tree = WidgetTree::new();
        let child = tree.create(WidgetKind::Container);
        tree.append(tree.root(), child).unwrap();
        let cleared = tree.traverse(|tree| {
            tree.trash_add(child);
            tree.trash_clear()
        });
        assert_eq!(cleared, 0);
        assert_eq!(tree.trash_clear(), 1);
    }

    #[test]
    fn test_empty_trashes_all_children() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        for _ in 0..4 {
            let child = tree.create(WidgetKind::Container);
            tree.append(root, child).unwrap();
        }
        assert_eq!(tree.empty(root).unwrap(), 4);
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.trash_clear(), 4);
    }
}
