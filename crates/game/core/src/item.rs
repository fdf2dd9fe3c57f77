//! Item-related types.
//!
//! This module contains the foundational item types:
//! - ItemId: stable handle into an [`ItemArena`](crate::ItemArena)
//! - ItemSpec: the immutable physical description of an item
//! - Item: an arena node, either a plain item or a container

use std::fmt;

use crate::container::{Capacity, Container};

/// Stable handle to an item stored in an [`ItemArena`](crate::ItemArena).
///
/// Handles are never reused; an arena only ever grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl ItemId {
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Physical description of an item, fixed at construction.
///
/// Weight is measured in pounds, volume in cubic feet and cost in copper pieces.
/// The name identifies similar instances of an item; it is not unique.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSpec {
    pub name: String,
    pub weight: f32,
    pub volume: f32,
    pub cost: f32,
}

impl ItemSpec {
    pub fn new(name: impl Into<String>, weight: f32, volume: f32, cost: f32) -> Self {
        Self {
            name: name.into(),
            weight,
            volume,
            cost,
        }
    }

    /// Returns the first measure that is negative or NaN.
    pub(crate) fn invalid_measure(&self) -> Option<(&'static str, f32)> {
        [
            ("weight", self.weight),
            ("volume", self.volume),
            ("cost", self.cost),
        ]
        .into_iter()
        .find(|(_, value)| !(*value >= 0.0))
    }
}

/// A node of the containment tree.
///
/// Items expose read-only accessors; membership (`is_contained`) is only ever changed
/// by the arena's container operations.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    spec: ItemSpec,
    contained: bool,
    container: Option<Container>,
}

impl Item {
    pub(crate) fn plain(spec: ItemSpec) -> Self {
        Self {
            spec,
            contained: false,
            container: None,
        }
    }

    pub(crate) fn with_container(spec: ItemSpec, container: Container) -> Self {
        Self {
            spec,
            contained: false,
            container: Some(container),
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Weight of this item alone, excluding anything it holds.
    pub fn own_weight(&self) -> f32 {
        self.spec.weight
    }

    /// Declared volume of this item alone.
    ///
    /// For containers the observable volume is computed by
    /// [`ItemArena::volume`](crate::ItemArena::volume) instead.
    pub fn own_volume(&self) -> f32 {
        self.spec.volume
    }

    pub fn cost(&self) -> f32 {
        self.spec.cost
    }

    pub fn spec(&self) -> &ItemSpec {
        &self.spec
    }

    /// Returns true while some container lists this item among its direct children.
    #[inline]
    pub fn is_contained(&self) -> bool {
        self.contained
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.container.is_some()
    }

    pub fn as_container(&self) -> Option<&Container> {
        self.container.as_ref()
    }

    /// Capacity limits, if this item is a container.
    pub fn capacity(&self) -> Option<Capacity> {
        self.container.as_ref().map(Container::capacity)
    }

    pub(crate) fn as_container_mut(&mut self) -> Option<&mut Container> {
        self.container.as_mut()
    }

    pub(crate) fn set_contained(&mut self, contained: bool) {
        self.contained = contained;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_and_nan_measures() {
        assert_eq!(ItemSpec::new("Ball", 1.0, 0.1, 1.0).invalid_measure(), None);
        assert_eq!(
            ItemSpec::new("Ball", -1.0, 0.1, 1.0).invalid_measure(),
            Some(("weight", -1.0))
        );
        let (field, value) = ItemSpec::new("Ball", 1.0, 0.1, f32::NAN)
            .invalid_measure()
            .unwrap();
        assert_eq!(field, "cost");
        assert!(value.is_nan());
    }

    #[test]
    fn item_id_displays_with_hash_prefix() {
        assert_eq!(ItemId(7).to_string(), "#7");
    }
}
