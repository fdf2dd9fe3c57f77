//! Encumbrance - carrying capacity and its effect on movement.
//!
//! Capacity is anchored on the heavy-load table (Pathfinder Core Rulebook ch. 7,
//! table 7-4). Every other tier is a fixed fraction or multiple of the heavy load:
//!
//! ```text
//! Light          = Heavy / 3
//! Medium         = 2 × Heavy / 3
//! Heavy          = table[STR]                                    (STR < 30)
//!                = table[STR % 10 + 20] × 4^((STR - index) / 10) (STR ≥ 30)
//! Overencumbered = 2 × Heavy
//! Unbearable     = unreachable upper bound
//! ```

/// Heavy load limits in pounds for strength 0..=29.
const HEAVY_LOADS: [u64; 30] = [
    0, 10, 20, 30, 40, 50, 60, 70, 80, 90, //
    100, 115, 130, 150, 175, 200, 230, 260, 300, 350, //
    400, 460, 520, 600, 700, 800, 920, 1040, 1200, 1400,
];

/// Load tier of a creature, in ascending severity.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Encumbrance {
    /// Unhindered.
    #[default]
    Light,
    /// Slowed; dexterity bonus capped at +3.
    Medium,
    /// Slowed; dexterity bonus capped at +1.
    Heavy,
    /// Barely able to move.
    Overencumbered,
    /// Sentinel above every reachable load; a creature here cannot act.
    Unbearable,
}

impl Encumbrance {
    /// All tiers, lightest first.
    pub const ALL: [Self; 5] = [
        Self::Light,
        Self::Medium,
        Self::Heavy,
        Self::Overencumbered,
        Self::Unbearable,
    ];

    /// Largest capacity any tier below [`Encumbrance::Unbearable`] reports.
    pub const MAX_FINITE_CAPACITY: u64 = u64::MAX - 1;

    /// Maximum weight (pounds) a creature of `strength` can carry while staying at or
    /// below this tier.
    ///
    /// Finite tiers saturate at [`Self::MAX_FINITE_CAPACITY`], so the unbearable sentinel
    /// stays strictly above every other tier even at extreme strength.
    pub fn capacity(self, strength: u32) -> u64 {
        let heavy = heavy_load(strength);
        let capacity = match self {
            Self::Light => heavy / 3,
            Self::Medium => heavy.saturating_mul(2) / 3,
            Self::Heavy => heavy,
            Self::Overencumbered => heavy.saturating_mul(2),
            Self::Unbearable => return u64::MAX,
        };
        capacity.min(Self::MAX_FINITE_CAPACITY)
    }

    /// Movement speed at this tier for a creature whose unencumbered speed is `base_speed`.
    ///
    /// Medium and heavy loads reduce speed to two thirds, rounded up to the next multiple
    /// of five feet (30 → 20, 20 → 15).
    pub fn speed(self, base_speed: u32) -> u32 {
        match self {
            Self::Light => base_speed,
            Self::Medium | Self::Heavy => 5 * base_speed.saturating_mul(2).div_ceil(15),
            Self::Overencumbered => 1,
            Self::Unbearable => 0,
        }
    }

    /// Lightest tier whose capacity is at least `weight`.
    ///
    /// Always returns a tier; anything beyond every finite capacity is
    /// [`Encumbrance::Unbearable`].
    pub fn classify(weight: f32, strength: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|tier| f64::from(weight) <= tier.capacity(strength) as f64)
            .unwrap_or(Self::Unbearable)
    }

    /// Maximum dexterity bonus to armor class, `None` when uncapped.
    pub const fn max_dex_bonus(self) -> Option<i32> {
        match self {
            Self::Light => None,
            Self::Medium => Some(3),
            Self::Heavy => Some(1),
            Self::Overencumbered | Self::Unbearable => Some(0),
        }
    }

    /// Penalty applied to strength- and dexterity-based skill checks.
    pub const fn armor_check_penalty(self) -> i32 {
        match self {
            Self::Medium => -3,
            Self::Heavy => -6,
            Self::Light | Self::Overencumbered | Self::Unbearable => 0,
        }
    }

    /// Speed multiplier used when running.
    pub const fn run_multiplier(self) -> u32 {
        match self {
            Self::Light | Self::Medium => 4,
            Self::Heavy => 3,
            Self::Overencumbered | Self::Unbearable => 0,
        }
    }

    /// Returns true if a creature at this tier can still move.
    pub const fn can_move(self) -> bool {
        !matches!(self, Self::Unbearable)
    }
}

/// Heavy load for `strength`, extrapolated fourfold per ten points beyond the table.
fn heavy_load(strength: u32) -> u64 {
    if let Some(&load) = HEAVY_LOADS.get(strength as usize) {
        return load;
    }
    let index = strength % 10 + 20;
    let factor = 4u64.saturating_pow((strength - index) / 10);
    HEAVY_LOADS[index as usize].saturating_mul(factor)
}
