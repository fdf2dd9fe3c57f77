//! Depth-first traversal of a container's subtree.
//!
//! Two flavors exist:
//!
//! - [`Subtree`] borrows the arena. The borrow checker already rules out mutation while it
//!   is alive, so it needs no runtime checks.
//! - [`SubtreeCursor`] holds no borrow and is advanced against the arena explicitly. It
//!   snapshots the subtree's [`Signature`] on creation and fails fast with
//!   [`ContainerError::ConcurrentModification`] once the subtree has changed.
//!
//! Both yield items in pre-order: each direct child in insertion order, immediately followed
//! by its own subtree when it is a container.

use std::fmt;

use super::{ContainerError, ItemArena};
use crate::item::ItemId;

/// Aggregate modification state of a subtree.
///
/// `changes` sums the modification counters of every container in the subtree (root
/// included). `latest` is the newest arena revision recorded by any of them; any structural
/// change inside the subtree stamps its direct holder with a fresh revision, so `latest`
/// strictly increases even when a detached child takes its counters away from the sum.
///
/// Changes to ancestors of the root are not part of the signature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    pub changes: u64,
    pub latest: u64,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.changes, self.latest)
    }
}

/// Borrowing pre-order iterator over a subtree.
pub struct Subtree<'a> {
    arena: &'a ItemArena,
    stack: Vec<std::slice::Iter<'a, ItemId>>,
}

impl<'a> Subtree<'a> {
    pub(super) fn new(arena: &'a ItemArena, children: &'a [ItemId]) -> Self {
        Self {
            arena,
            stack: vec![children.iter()],
        }
    }
}

impl Iterator for Subtree<'_> {
    type Item = ItemId;

    fn next(&mut self) -> Option<ItemId> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(&id) => {
                    if let Some(container) = self.arena.get(id).and_then(|item| item.as_container())
                    {
                        self.stack.push(container.children().iter());
                    }
                    return Some(id);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Fail-fast pre-order cursor over a subtree.
///
/// The cursor is not restartable; create a new one to traverse again.
#[derive(Clone, Debug)]
pub struct SubtreeCursor {
    root: ItemId,
    expected: Signature,
    /// Containers being walked, with the index of the next child to visit.
    stack: Vec<(ItemId, usize)>,
}

impl SubtreeCursor {
    pub(super) fn new(root: ItemId, expected: Signature) -> Self {
        Self {
            root,
            expected,
            stack: vec![(root, 0)],
        }
    }

    pub fn root(&self) -> ItemId {
        self.root
    }

    /// Signature captured when the cursor was created.
    pub fn expected(&self) -> Signature {
        self.expected
    }

    /// Produces the next item, or `None` once the subtree is exhausted.
    ///
    /// Fails with [`ContainerError::ConcurrentModification`] if anything in the subtree
    /// changed since the cursor was created.
    pub fn advance(&mut self, arena: &ItemArena) -> Result<Option<ItemId>, ContainerError> {
        let found = arena.signature(self.root)?;
        if found != self.expected {
            tracing::debug!(
                "traversal of {} invalidated ({} -> {})",
                self.root,
                self.expected,
                found
            );
            return Err(ContainerError::ConcurrentModification {
                container: self.root,
                expected: self.expected,
                found,
            });
        }

        while let Some((container, next)) = self.stack.last_mut() {
            let children = arena.children(*container)?;
            let Some(&id) = children.get(*next) else {
                self.stack.pop();
                continue;
            };
            *next += 1;
            if arena.get(id).is_some_and(|item| item.is_container()) {
                self.stack.push((id, 0));
            }
            return Ok(Some(id));
        }
        Ok(None)
    }

    /// Drains the remaining items, stopping at the first error.
    pub fn collect_remaining(&mut self, arena: &ItemArena) -> Result<Vec<ItemId>, ContainerError> {
        let mut items = Vec::new();
        while let Some(id) = self.advance(arena)? {
            items.push(id);
        }
        Ok(items)
    }
}
