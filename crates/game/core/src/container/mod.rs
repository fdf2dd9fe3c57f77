//! Containers: items that hold other items.
//!
//! All items live in an [`ItemArena`] and are addressed by [`ItemId`]. A container stores
//! the handles of its direct children and nothing else; there are no parent links. The
//! holder of an item is re-derived by searching down from a known ancestor, and
//! "is contained" is a flag that only arena operations flip.
//!
//! # Invariants
//!
//! - An item is a direct child of at most one container, and no container holds itself
//!   directly or transitively.
//! - The weight, volume and count of a container's direct children never exceed its
//!   [`Capacity`]. Only insertion is gated; a flexible child that grows later is not
//!   re-checked against its holder.
//! - Each container's modification counter strictly increases with every structural change
//!   to its own direct children.

mod arena;
mod error;
mod iter;

pub use arena::ItemArena;
pub use error::{ContainerError, FitViolation};
pub use iter::{Signature, Subtree, SubtreeCursor};

use crate::item::{ItemId, ItemSpec};

/// Limits applied to the direct contents of a container.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capacity {
    pub max_weight: f32,
    pub max_volume: f32,
    pub max_count: usize,
}

impl Capacity {
    /// No limits at all. Used by item groups, piles and inventories.
    pub const UNBOUNDED: Self = Self {
        max_weight: f32::INFINITY,
        max_volume: f32::INFINITY,
        max_count: usize::MAX,
    };

    pub const fn new(max_weight: f32, max_volume: f32, max_count: usize) -> Self {
        Self {
            max_weight,
            max_volume,
            max_count,
        }
    }

    /// Only a weight limit; volume and count are unbounded.
    pub const fn by_weight(max_weight: f32) -> Self {
        Self {
            max_weight,
            ..Self::UNBOUNDED
        }
    }

    pub(crate) fn invalid_limit(&self) -> Option<(&'static str, f32)> {
        [
            ("max_weight", self.max_weight),
            ("max_volume", self.max_volume),
        ]
        .into_iter()
        .find(|(_, value)| !(*value >= 0.0))
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Everything needed to create a container in an arena.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerSpec {
    pub item: ItemSpec,
    pub capacity: Capacity,
    /// A rigid container keeps its shape: its observable volume is always
    /// `capacity.max_volume`. A flexible one occupies only what it currently holds.
    pub rigid: bool,
}

impl ContainerSpec {
    pub fn new(item: ItemSpec, capacity: Capacity, rigid: bool) -> Self {
        Self {
            item,
            capacity,
            rigid,
        }
    }

    /// A weightless, costless container without limits.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            item: ItemSpec::new(name, 0.0, 0.0, 0.0),
            capacity: Capacity::UNBOUNDED,
            rigid: false,
        }
    }
}

/// Container state attached to an [`Item`](crate::Item).
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    capacity: Capacity,
    rigid: bool,
    children: Vec<ItemId>,
    modifications: u64,
    /// Arena revision of the last change to `children`.
    stamp: u64,
}

impl Container {
    pub(crate) fn new(capacity: Capacity, rigid: bool) -> Self {
        Self {
            capacity,
            rigid,
            children: Vec::new(),
            modifications: 0,
            stamp: 0,
        }
    }

    pub(crate) fn with_children(capacity: Capacity, children: Vec<ItemId>) -> Self {
        Self {
            children,
            ..Self::new(capacity, false)
        }
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn is_rigid(&self) -> bool {
        self.rigid
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    /// Number of structural changes made to this container's direct children.
    pub fn modification_count(&self) -> u64 {
        self.modifications
    }

    pub(crate) fn stamp(&self) -> u64 {
        self.stamp
    }

    pub(crate) fn holds_directly(&self, item: ItemId) -> bool {
        self.children.contains(&item)
    }

    pub(crate) fn push(&mut self, item: ItemId, revision: u64) {
        self.children.push(item);
        self.record_change(revision);
    }

    pub(crate) fn take(&mut self, item: ItemId, revision: u64) -> bool {
        let Some(position) = self.children.iter().position(|&child| child == item) else {
            return false;
        };
        self.children.remove(position);
        self.record_change(revision);
        true
    }

    pub(crate) fn take_all(&mut self, revision: u64) -> Vec<ItemId> {
        self.record_change(revision);
        std::mem::take(&mut self.children)
    }

    fn record_change(&mut self, revision: u64) {
        self.modifications += 1;
        self.stamp = revision;
    }
}
