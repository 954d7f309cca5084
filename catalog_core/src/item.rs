use crate::types::{ItemId, ItemType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum simultaneous copies of an item across held items and the bag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCap {
    Unlimited,
    Limited(u32),
}

impl ItemCap {
    /// Data files use `-1` (any negative) for unlimited
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            ItemCap::Unlimited
        } else {
            ItemCap::Limited(raw.min(u32::MAX as i64) as u32)
        }
    }

    /// Whether one more copy may join `existing` copies
    pub fn admits(&self, existing: u32) -> bool {
        match self {
            ItemCap::Unlimited => true,
            ItemCap::Limited(cap) => existing < *cap,
        }
    }

    pub fn limit(&self) -> Option<u32> {
        match self {
            ItemCap::Unlimited => None,
            ItemCap::Limited(cap) => Some(*cap),
        }
    }
}

impl fmt::Display for ItemCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemCap::Unlimited => write!(f, "unlimited"),
            ItemCap::Limited(cap) => write!(f, "{}", cap),
        }
    }
}

/// An item definition from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub item_type: ItemType,
    /// Capacity cost; `<= 0` takes no space
    pub space: i32,
    pub weight: f64,
    pub cap: ItemCap,
    pub concealed: bool,
}

impl ItemDef {
    /// Space charged against a location, zero for space-free items
    pub fn space_cost(&self) -> u32 {
        self.space.max(0) as u32
    }

    pub fn takes_space(&self) -> bool {
        self.space > 0
    }
}
