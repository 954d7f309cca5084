use crate::types::{CombatSkillId, SkillId, SkillTier};
use serde::{Deserialize, Serialize};

/// Layout position. Only the archetype sectors read it; selection rules never do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A node of the prerequisite-linked skill graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillNode {
    pub id: SkillId,
    pub name: String,
    /// Category tag driving stat effects
    pub group: String,
    pub tier: SkillTier,
    /// Neighbours, symmetrized at load, sorted, without self references
    pub connections: Vec<SkillId>,
    pub position: Position,
}

impl SkillNode {
    pub fn is_core(&self) -> bool {
        self.tier == SkillTier::Core
    }

    pub fn is_major(&self) -> bool {
        self.tier == SkillTier::Major
    }

    pub fn is_minor(&self) -> bool {
        self.tier == SkillTier::Minor
    }

    pub fn is_adjacent_to(&self, other: SkillId) -> bool {
        self.connections.binary_search(&other).is_ok()
    }
}

/// A node of the combat skill graph, whose edges are conflicts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatSkillNode {
    pub id: CombatSkillId,
    pub name: String,
    pub group: String,
    /// Conflict partners, symmetrized at load
    pub mutual_exclusivity: Vec<CombatSkillId>,
    pub position: Position,
}

impl CombatSkillNode {
    pub fn conflicts_with(&self, other: CombatSkillId) -> bool {
        self.mutual_exclusivity.binary_search(&other).is_ok()
    }
}
