//! catalog_core - Immutable reference data for the build planner
//!
//! A [`Catalog`] is loaded once (from a data directory or JSON strings),
//! validated, and then shared read-only by every build session.

mod catalog;
pub mod item;
pub mod records;
pub mod rules;
pub mod skill;
pub mod types;

pub use catalog::Catalog;
pub use item::{ItemCap, ItemDef};
pub use rules::{ConcealmentRules, Rules, WeaponLimits};
pub use skill::{CombatSkillNode, Position, SkillNode};
pub use types::{
    BagKind, CombatSkillId, ItemId, ItemType, Location, NodeKind, ParseBagKindError, SkillId,
    SkillTier,
};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading or validating catalog data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Parse error in '{path:?}': {error}")]
    Parse {
        error: serde_json::Error,
        path: Option<PathBuf>,
    },
    #[error("Rules parse error in '{path:?}': {error}")]
    Rules {
        error: toml::de::Error,
        path: Option<PathBuf>,
    },
    #[error("Invalid {kind} id: '{raw}'")]
    InvalidId { kind: NodeKind, raw: String },
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: NodeKind, id: u32 },
    #[error("{kind} {from} references unknown id {to}")]
    DanglingReference { kind: NodeKind, from: u32, to: u32 },
}
