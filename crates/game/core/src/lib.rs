//! Nested, capacity-constrained inventories for tabletop-RPG characters.
//!
//! `pathminder-core` models items that can be nested inside containers with weight,
//! volume and count limits, and derives a character's carrying capacity and movement
//! penalties from strength through [`Encumbrance`].
//!
//! Every item lives in an [`ItemArena`] and is addressed by an [`ItemId`]; all
//! containment changes flow through the arena's container operations.
pub mod character;
pub mod config;
pub mod container;
pub mod encumbrance;
pub mod error;
pub mod inventory;
pub mod item;

pub use character::Character;
pub use config::PackConfig;
pub use container::{
    Capacity, Container, ContainerError, ContainerSpec, FitViolation, ItemArena, Signature,
    Subtree, SubtreeCursor,
};
pub use encumbrance::Encumbrance;
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use inventory::Inventory;
pub use item::{Item, ItemId, ItemSpec};
