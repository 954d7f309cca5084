//! Tunable planner rules, loaded from `rules.toml`

use crate::types::{CombatSkillId, ItemId};
use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every rule constant of the planner. Missing keys fall back to the in-game values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rules {
    /// Skill points available at max level
    #[serde(default = "default_level_cap")]
    pub level_cap: u32,
    /// Combat points are `level_cap / combat_point_divisor`, rounded down
    #[serde(default = "default_combat_point_divisor")]
    pub combat_point_divisor: u32,
    #[serde(default)]
    pub held_space: HeldSpaceRules,
    #[serde(default)]
    pub weight: WeightRules,
    #[serde(default)]
    pub weapons: WeaponRules,
    #[serde(default)]
    pub explosives: ExplosiveRules,
    #[serde(default)]
    pub concealment: ConcealmentRules,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            level_cap: default_level_cap(),
            combat_point_divisor: default_combat_point_divisor(),
            held_space: HeldSpaceRules::default(),
            weight: WeightRules::default(),
            weapons: WeaponRules::default(),
            explosives: ExplosiveRules::default(),
            concealment: ConcealmentRules::default(),
        }
    }
}

impl Rules {
    /// Load rules from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            error: e,
            path: path.to_path_buf(),
        })?;
        toml::from_str(&content).map_err(|e| CatalogError::Rules {
            error: e,
            path: Some(path.to_path_buf()),
        })
    }

    /// Parse rules from a TOML string
    pub fn parse(toml: &str) -> Result<Self, CatalogError> {
        toml::from_str(toml).map_err(|e| CatalogError::Rules {
            error: e,
            path: None,
        })
    }

    pub fn combat_point_cap(&self) -> u32 {
        if self.combat_point_divisor == 0 {
            return 0;
        }
        self.level_cap / self.combat_point_divisor
    }
}

fn default_level_cap() -> u32 {
    55
}
fn default_combat_point_divisor() -> u32 {
    7
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeldSpaceRules {
    #[serde(default = "default_base_held_space")]
    pub base: u32,
    /// Skill group whose nodes grant extra pockets
    #[serde(default = "default_pocket_group")]
    pub extra_pocket_group: String,
    #[serde(default = "default_pocket_threshold")]
    pub extra_pocket_threshold: usize,
    #[serde(default = "default_pocket_bonus")]
    pub extra_pocket_bonus: u32,
    /// Held item that adds one slot of its own
    #[serde(default = "default_pocket_item")]
    pub pocket_item: ItemId,
    #[serde(default = "default_pocket_item_bonus")]
    pub pocket_item_bonus: u32,
}

impl Default for HeldSpaceRules {
    fn default() -> Self {
        HeldSpaceRules {
            base: default_base_held_space(),
            extra_pocket_group: default_pocket_group(),
            extra_pocket_threshold: default_pocket_threshold(),
            extra_pocket_bonus: default_pocket_bonus(),
            pocket_item: default_pocket_item(),
            pocket_item_bonus: default_pocket_item_bonus(),
        }
    }
}

fn default_base_held_space() -> u32 {
    6
}
fn default_pocket_group() -> String {
    "es".to_string()
}
fn default_pocket_threshold() -> usize {
    2
}
fn default_pocket_bonus() -> u32 {
    2
}
fn default_pocket_item() -> ItemId {
    21
}
fn default_pocket_item_bonus() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightRules {
    /// Carried weight above this starts to cost dodge
    #[serde(default = "default_weight_threshold")]
    pub threshold: f64,
    /// Weight multiplier for items inside a backpack
    #[serde(default = "default_backpack_factor")]
    pub backpack_factor: f64,
    /// Dodge multiplier gained per point of excess raw weight
    #[serde(default = "default_dodge_per_excess")]
    pub dodge_per_excess: f64,
}

impl Default for WeightRules {
    fn default() -> Self {
        WeightRules {
            threshold: default_weight_threshold(),
            backpack_factor: default_backpack_factor(),
            dodge_per_excess: default_dodge_per_excess(),
        }
    }
}

fn default_weight_threshold() -> f64 {
    12.0
}
fn default_backpack_factor() -> f64 {
    0.8
}
fn default_dodge_per_excess() -> f64 {
    1.0208
}

/// Weapon count limits for one loadout style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponLimits {
    pub max_weapons: u32,
    pub max_primary: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponRules {
    #[serde(default = "default_limits")]
    pub default: WeaponLimits,
    #[serde(default = "default_full_auto_skill")]
    pub full_auto_skill: CombatSkillId,
    #[serde(default = "default_full_auto_limits")]
    pub full_auto: WeaponLimits,
    #[serde(default = "default_woc_skill")]
    pub weapon_of_choice_skill: CombatSkillId,
    #[serde(default = "default_woc_limits")]
    pub weapon_of_choice: WeaponLimits,
}

impl Default for WeaponRules {
    fn default() -> Self {
        WeaponRules {
            default: default_limits(),
            full_auto_skill: default_full_auto_skill(),
            full_auto: default_full_auto_limits(),
            weapon_of_choice_skill: default_woc_skill(),
            weapon_of_choice: default_woc_limits(),
        }
    }
}

fn default_limits() -> WeaponLimits {
    WeaponLimits {
        max_weapons: 2,
        max_primary: 1,
    }
}
fn default_full_auto_skill() -> CombatSkillId {
    20
}
fn default_full_auto_limits() -> WeaponLimits {
    WeaponLimits {
        max_weapons: 3,
        max_primary: 2,
    }
}
fn default_woc_skill() -> CombatSkillId {
    19
}
fn default_woc_limits() -> WeaponLimits {
    WeaponLimits {
        max_weapons: 1,
        max_primary: 1,
    }
}

/// Combat skills that raise one item's copy cap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosiveRules {
    #[serde(default = "default_explosive_group")]
    pub group: String,
    #[serde(default = "default_explosive_threshold")]
    pub threshold: usize,
    #[serde(default = "default_explosive_item")]
    pub item: ItemId,
    #[serde(default = "default_raised_cap")]
    pub raised_cap: u32,
}

impl Default for ExplosiveRules {
    fn default() -> Self {
        ExplosiveRules {
            group: default_explosive_group(),
            threshold: default_explosive_threshold(),
            item: default_explosive_item(),
            raised_cap: default_raised_cap(),
        }
    }
}

fn default_explosive_group() -> String {
    "os".to_string()
}
fn default_explosive_threshold() -> usize {
    2
}
fn default_explosive_item() -> ItemId {
    15
}
fn default_raised_cap() -> u32 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcealmentRules {
    /// Largest weapon space that stays concealed without bonuses
    #[serde(default = "default_concealed_base")]
    pub base: u32,
    #[serde(default = "default_concealed_group")]
    pub group: String,
    #[serde(default = "default_concealed_threshold")]
    pub group_threshold: usize,
    /// Held item that extends the concealment threshold
    #[serde(default = "default_holster_item")]
    pub holster_item: ItemId,
}

impl Default for ConcealmentRules {
    fn default() -> Self {
        ConcealmentRules {
            base: default_concealed_base(),
            group: default_concealed_group(),
            group_threshold: default_concealed_threshold(),
            holster_item: default_holster_item(),
        }
    }
}

fn default_concealed_base() -> u32 {
    5
}
fn default_concealed_group() -> String {
    "incon".to_string()
}
fn default_concealed_threshold() -> usize {
    2
}
fn default_holster_item() -> ItemId {
    22
}
