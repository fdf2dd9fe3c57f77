/// Rule defaults and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PackConfig {
    /// Strength score of characters created without explicit stats.
    pub default_strength: u32,
    /// Unencumbered movement speed (feet) of characters created without explicit stats.
    pub default_base_speed: u32,
}

impl PackConfig {
    // ===== fixed naming =====
    /// Prefix of the name given to the pile produced by emptying a container.
    pub const PILE_NAME_PREFIX: &'static str = "Pile, contents of: ";
    /// Suffix appended to a character's name to name their inventory.
    pub const INVENTORY_NAME_SUFFIX: &'static str = "'s inventory";

    // ===== runtime-tunable defaults =====
    /// Average human strength.
    pub const DEFAULT_STRENGTH: u32 = 10;
    /// Speed of a medium-sized humanoid.
    pub const DEFAULT_BASE_SPEED: u32 = 30;

    pub fn new() -> Self {
        Self {
            default_strength: Self::DEFAULT_STRENGTH,
            default_base_speed: Self::DEFAULT_BASE_SPEED,
        }
    }

    pub fn with_defaults(default_strength: u32, default_base_speed: u32) -> Self {
        Self {
            default_strength,
            default_base_speed,
        }
    }
}

impl Default for PackConfig {
    fn default() -> Self {
        Self::new()
    }
}
