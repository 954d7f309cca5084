//! Raw catalog records, shaped like the JSON data files

use crate::types::{ItemType, NodeKind};
use crate::CatalogError;
use serde::Deserialize;

/// Ids appear both as strings (`"12"`, sometimes padded) and as integers
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u32),
    Text(String),
}

impl RawId {
    pub fn resolve(&self, kind: NodeKind) -> Result<u32, CatalogError> {
        match self {
            RawId::Number(n) => Ok(*n),
            RawId::Text(s) => s.trim().parse().map_err(|_| CatalogError::InvalidId {
                kind,
                raw: s.clone(),
            }),
        }
    }
}

/// An entry of `skills.json`
#[derive(Debug, Clone, Deserialize)]
pub struct SkillRecord {
    pub id: RawId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub core_skill: bool,
    #[serde(default)]
    pub major_skill: bool,
    pub connections: Vec<RawId>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// An entry of `combatskills.json`
#[derive(Debug, Clone, Deserialize)]
pub struct CombatSkillRecord {
    pub id: RawId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub group: String,
    #[serde(rename = "mutual-exclusivity", alias = "mutualExclusivity")]
    pub mutual_exclusivity: Vec<RawId>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// An entry of `items.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRecord {
    pub id: RawId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub space: i32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default = "default_cap")]
    pub cap: i64,
    #[serde(default)]
    pub concealed: bool,
}

fn default_cap() -> i64 {
    -1
}
