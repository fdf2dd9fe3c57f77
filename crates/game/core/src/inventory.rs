//! Character inventory.
//!
//! An inventory is an unconstrained item group owned by exactly one character. Its weight
//! ceiling is not stored: every insertion compares against the holder's heavy load for the
//! strength passed in at call time, so a change in strength immediately changes what can be
//! picked up. Items already carried are never evicted when the ceiling drops.

use crate::config::PackConfig;
use crate::container::{ContainerError, ItemArena};
use crate::encumbrance::Encumbrance;
use crate::item::ItemId;

/// Handle to a character's inventory group.
///
/// Route insertions through [`Inventory::add`] / [`Inventory::receive`]; calling
/// [`ItemArena::add`] on [`Inventory::id`] directly bypasses the strength ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Inventory {
    root: ItemId,
}

impl Inventory {
    /// Creates the inventory group for a character named `owner`.
    pub fn new(arena: &mut ItemArena, owner: &str) -> Result<Self, ContainerError> {
        let root = arena.insert_group(format!("{owner}{}", PackConfig::INVENTORY_NAME_SUFFIX))?;
        Ok(Self { root })
    }

    pub fn id(&self) -> ItemId {
        self.root
    }

    /// Weight ceiling for a holder of `strength`.
    pub fn max_weight(strength: u32) -> u64 {
        Encumbrance::Heavy.capacity(strength)
    }

    /// True if carrying `item` on top of the current load stays within the heavy load.
    pub fn admits(
        &self,
        arena: &ItemArena,
        item: ItemId,
        strength: u32,
    ) -> Result<bool, ContainerError> {
        let load = arena.weight(self.root)? + arena.weight(item)?;
        Ok(f64::from(load) <= Self::max_weight(strength) as f64)
    }

    /// Picks up a free-standing item.
    ///
    /// Returns `Ok(false)` if the item is too heavy for `strength` or already held
    /// somewhere.
    pub fn add(
        &self,
        arena: &mut ItemArena,
        item: ItemId,
        strength: u32,
    ) -> Result<bool, ContainerError> {
        if arena.is_contained(item)? {
            return Ok(false);
        }
        if !self.admits(arena, item, strength)? {
            tracing::warn!(
                "{} refused: over heavy load {} for strength {}",
                item,
                Self::max_weight(strength),
                strength
            );
            return Ok(false);
        }
        arena.add(self.root, item)
    }

    /// Moves an item from below `source` straight into this inventory.
    ///
    /// Rearranging items already in the inventory does not change its weight and skips the
    /// strength check.
    pub fn receive(
        &self,
        arena: &mut ItemArena,
        source: ItemId,
        item: ItemId,
        strength: u32,
    ) -> Result<bool, ContainerError> {
        if !arena.contains(self.root, item)? && !self.admits(arena, item, strength)? {
            tracing::warn!("{} refused from {}: too heavy", item, source);
            return Ok(false);
        }
        arena.move_item(source, item, self.root)
    }

    pub fn remove(&self, arena: &mut ItemArena, item: ItemId) -> Result<bool, ContainerError> {
        arena.remove(self.root, item)
    }

    pub fn contains(&self, arena: &ItemArena, item: ItemId) -> Result<bool, ContainerError> {
        arena.contains(self.root, item)
    }

    pub fn contains_all(
        &self,
        arena: &ItemArena,
        items: &[ItemId],
    ) -> Result<bool, ContainerError> {
        arena.contains_all(self.root, items)
    }

    /// Total carried weight.
    pub fn weight(&self, arena: &ItemArena) -> Result<f32, ContainerError> {
        arena.weight(self.root)
    }

    /// Everything carried, in traversal order.
    pub fn items(&self, arena: &ItemArena) -> Result<Vec<ItemId>, ContainerError> {
        Ok(arena.iter(self.root)?.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemSpec;

    #[test]
    fn ceiling_follows_strength_at_call_time() {
        let mut arena = ItemArena::new();
        let inventory = Inventory::new(&mut arena, "Steve").unwrap();
        let anvil = arena
            .insert_item(ItemSpec::new("Anvil", 120.0, 1.0, 500.0))
            .unwrap();

        // Heavy load is 100 lb at strength 10 and 130 lb at strength 12.
        assert!(!inventory.add(&mut arena, anvil, 10).unwrap());
        assert!(!arena.is_contained(anvil).unwrap());
        assert!(inventory.add(&mut arena, anvil, 12).unwrap());
        assert!(inventory.contains(&arena, anvil).unwrap());
    }

    #[test]
    fn already_held_items_are_refused_before_the_weight_check() {
        let mut arena = ItemArena::new();
        let inventory = Inventory::new(&mut arena, "Steve").unwrap();
        let cart = arena.insert_group("Cart").unwrap();
        let anvil = arena
            .insert_item(ItemSpec::new("Anvil", 120.0, 1.0, 500.0))
            .unwrap();
        arena.add(cart, anvil).unwrap();

        // Held by the cart: refused as contained, whatever the strength.
        assert!(!inventory.add(&mut arena, anvil, 10).unwrap());
        assert!(!inventory.add(&mut arena, anvil, 30).unwrap());
        assert!(arena.contains(cart, anvil).unwrap());
    }

    #[test]
    fn foreign_handles_are_errors() {
        let mut arena = ItemArena::new();
        let inventory = Inventory::new(&mut arena, "Steve").unwrap();
        let foreign = ItemId(42);
        assert_eq!(
            inventory.contains(&arena, foreign),
            Ok(false),
            "unknown handles are simply not found below a valid container"
        );

        let other = ItemArena::new();
        assert_eq!(
            inventory.contains(&other, foreign),
            Err(ContainerError::UnknownItem {
                item: inventory.id()
            })
        );
        assert!(inventory.contains_all(&other, &[foreign]).is_err());
    }

    #[test]
    fn inventory_is_named_after_owner() {
        let mut arena = ItemArena::new();
        let inventory = Inventory::new(&mut arena, "Steve").unwrap();
        assert_eq!(
            arena.get(inventory.id()).unwrap().name(),
            "Steve's inventory"
        );
        assert_eq!(inventory.weight(&arena).unwrap(), 0.0);
    }
}
