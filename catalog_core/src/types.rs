use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Skill node identifier (stable small integer, also the bit index in share links)
pub type SkillId = u32;
/// Combat skill node identifier
pub type CombatSkillId = u32;
/// Item definition identifier
pub type ItemId = u32;

/// Which catalog list a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Skill,
    CombatSkill,
    Item,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Skill => write!(f, "skill"),
            NodeKind::CombatSkill => write!(f, "combat skill"),
            NodeKind::Item => write!(f, "item"),
        }
    }
}

/// Selection cost tier of a skill node. Exactly one applies per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillTier {
    Core,
    Major,
    Minor,
}

impl SkillTier {
    /// Core wins over major when a record sets both flags
    pub fn from_flags(core_skill: bool, major_skill: bool) -> Self {
        if core_skill {
            SkillTier::Core
        } else if major_skill {
            SkillTier::Major
        } else {
            SkillTier::Minor
        }
    }
}

/// Item categories as they appear in the item data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    WeaponPrimary,
    WeaponSecondary,
    WeaponMod,
    Tools,
    Combat,
    Concealed,
    Armour,
    Offhand,
    #[serde(other)]
    Other,
}

impl ItemType {
    pub fn is_weapon(&self) -> bool {
        matches!(self, ItemType::WeaponPrimary | ItemType::WeaponSecondary)
    }

    pub fn is_primary_weapon(&self) -> bool {
        matches!(self, ItemType::WeaponPrimary)
    }

    /// Equipped types that never count against held space
    pub fn is_held_exempt(&self) -> bool {
        matches!(
            self,
            ItemType::WeaponPrimary
                | ItemType::WeaponSecondary
                | ItemType::Armour
                | ItemType::Offhand
        )
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemType::WeaponPrimary => "weaponprimary",
            ItemType::WeaponSecondary => "weaponsecondary",
            ItemType::WeaponMod => "weaponmod",
            ItemType::Tools => "tools",
            ItemType::Combat => "combat",
            ItemType::Concealed => "concealed",
            ItemType::Armour => "armour",
            ItemType::Offhand => "offhand",
            ItemType::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Bag size tiers. The tier name is what share links store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BagKind {
    Satchel,
    Backpack,
    Duffel,
}

impl BagKind {
    pub fn all() -> &'static [BagKind] {
        &[BagKind::Satchel, BagKind::Backpack, BagKind::Duffel]
    }

    /// Capacity from the bag size table
    pub fn space(&self) -> u32 {
        match self {
            BagKind::Satchel => 4,
            BagKind::Backpack => 8,
            BagKind::Duffel => 16,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BagKind::Satchel => "satchel",
            BagKind::Backpack => "backpack",
            BagKind::Duffel => "duffel",
        }
    }
}

impl fmt::Display for BagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bag name outside the size table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown bag '{0}'")]
pub struct ParseBagKindError(pub String);

impl FromStr for BagKind {
    type Err = ParseBagKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BagKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseBagKindError(s.to_string()))
    }
}

/// Where a carried item lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Held,
    Bag,
}

impl Location {
    /// The location an item leaves when moved into `self`
    pub fn other(&self) -> Location {
        match self {
            Location::Held => Location::Bag,
            Location::Bag => Location::Held,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Held => write!(f, "held"),
            Location::Bag => write!(f, "bag"),
        }
    }
}
