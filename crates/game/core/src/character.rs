//! Characters and what they carry.

use crate::config::PackConfig;
use crate::container::{ContainerError, ItemArena};
use crate::encumbrance::Encumbrance;
use crate::inventory::Inventory;
use crate::item::ItemId;

/// A creature that carries exactly one [`Inventory`].
///
/// Strength is read whenever capacity matters and is never cached by the inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Character {
    name: String,
    strength: u32,
    base_speed: u32,
    inventory: Inventory,
}

impl Character {
    /// Creates a character with default stats.
    pub fn new(arena: &mut ItemArena, name: impl Into<String>) -> Result<Self, ContainerError> {
        Self::from_config(arena, name, &PackConfig::default())
    }

    /// Creates a character with the config's default stats.
    pub fn from_config(
        arena: &mut ItemArena,
        name: impl Into<String>,
        config: &PackConfig,
    ) -> Result<Self, ContainerError> {
        Self::with_stats(
            arena,
            name,
            config.default_strength,
            config.default_base_speed,
        )
    }

    pub fn with_stats(
        arena: &mut ItemArena,
        name: impl Into<String>,
        strength: u32,
        base_speed: u32,
    ) -> Result<Self, ContainerError> {
        let name = name.into();
        let inventory = Inventory::new(arena, &name)?;
        Ok(Self {
            name,
            strength,
            base_speed,
            inventory,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    /// Changes strength. Carried items stay even if they now exceed the heavy load.
    pub fn set_strength(&mut self, strength: u32) {
        self.strength = strength;
    }

    pub fn base_speed(&self) -> u32 {
        self.base_speed
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn pick(&self, arena: &mut ItemArena, item: ItemId) -> Result<bool, ContainerError> {
        self.inventory.add(arena, item, self.strength)
    }

    /// Takes an item out of some other container (a chest, a pile) without letting go of it.
    pub fn take_from(
        &self,
        arena: &mut ItemArena,
        source: ItemId,
        item: ItemId,
    ) -> Result<bool, ContainerError> {
        self.inventory.receive(arena, source, item, self.strength)
    }

    pub fn drop(&self, arena: &mut ItemArena, item: ItemId) -> Result<bool, ContainerError> {
        self.inventory.remove(arena, item)
    }

    pub fn has(&self, arena: &ItemArena, item: ItemId) -> Result<bool, ContainerError> {
        self.inventory.contains(arena, item)
    }

    pub fn has_all(&self, arena: &ItemArena, items: &[ItemId]) -> Result<bool, ContainerError> {
        self.inventory.contains_all(arena, items)
    }

    /// Snapshot of everything carried, nested items included.
    pub fn inventory_items(&self, arena: &ItemArena) -> Result<Vec<ItemId>, ContainerError> {
        self.inventory.items(arena)
    }

    /// Current load tier from carried weight and current strength.
    pub fn encumbrance(&self, arena: &ItemArena) -> Result<Encumbrance, ContainerError> {
        let weight = self.inventory.weight(arena)?;
        Ok(Encumbrance::classify(weight, self.strength))
    }

    /// Movement speed after encumbrance.
    pub fn speed(&self, arena: &ItemArena) -> Result<u32, ContainerError> {
        Ok(self.encumbrance(arena)?.speed(self.base_speed))
    }
}
