//! build_core - Player build state and the rules that keep it legal
//!
//! - [`SkillGraph`]: connectivity rules for the skill graph
//! - [`CombatSkills`]: mutual exclusivity for combat skills
//! - [`Inventory`]: weapon, space, and copy-cap gates for carried items
//! - [`codec`]: share-link query string round trip

mod bitfield;
mod build;
pub mod codec;
mod diff;
mod exclusivity;
mod inventory;
mod overrides;
mod selection;

#[cfg(test)]
mod test_support;

pub use bitfield::{BitField, ParseBitFieldError};
pub use build::{Bag, PlayerBuild};
pub use codec::{decode_query, encode_query};
pub use diff::SelectionDiff;
pub use exclusivity::CombatSkills;
pub use inventory::{Inventory, WeaponCounts};
pub use overrides::CatalogOverrides;
pub use selection::{DeselectPolicy, SkillGraph};

use catalog_core::{CombatSkillId, ItemId, Location, SkillId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Toggle {
    Selected,
    Deselected,
}

/// A mutation that failed a gate. Routine user feedback, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unknown skill {0}")]
    UnknownSkill(SkillId),
    #[error("skill {0} is already selected")]
    AlreadySelected(SkillId),
    #[error("skill {0} is not connected to the current selection")]
    NotConnected(SkillId),
    #[error("skill {0} is not selected")]
    NotSelected(SkillId),
    #[error("deselecting skill {skill} would strand {stranded:?}")]
    WouldStrand {
        skill: SkillId,
        stranded: Vec<SkillId>,
    },
    #[error("unknown combat skill {0}")]
    UnknownCombatSkill(CombatSkillId),
    #[error("combat skill {0} is already selected")]
    CombatAlreadySelected(CombatSkillId),
    #[error("combat skill {0} is not selected")]
    CombatNotSelected(CombatSkillId),
    #[error("unknown item {0}")]
    UnknownItem(ItemId),
    #[error("weapon limit of {max} reached")]
    WeaponLimit { max: u32 },
    #[error("primary weapon limit of {max} reached")]
    PrimaryLimit { max: u32 },
    #[error("no bag equipped")]
    NoBag,
    #[error("item {0} takes no space and cannot go in a bag")]
    NotBaggable(ItemId),
    #[error("{location} space exceeded: {used} used + {space} > {capacity}")]
    InsufficientSpace {
        location: Location,
        used: u32,
        space: u32,
        capacity: u32,
    },
    #[error("item {item} is limited to {cap} copies")]
    CapReached { item: ItemId, cap: u32 },
    #[error("item {item} is not in {location}")]
    ItemNotPresent { item: ItemId, location: Location },
    #[error("removing item {item} would leave {used} held space over a capacity of {capacity}")]
    HeldSpaceInUse {
        item: ItemId,
        used: u32,
        capacity: u32,
    },
}
