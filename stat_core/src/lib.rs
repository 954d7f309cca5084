//! stat_core - Derived stats for a player build
//!
//! This library provides:
//! - EffectTables: per-group stat deltas for skills and combat skills
//! - StatAccumulator: raw deltas summed over a build
//! - StatSheet: the finished, display-ready figures
//! - Archetype and PointBudget: classification and point accounting
//! - Planner: a session that owns a build and notifies listeners on change
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use stat_core::prelude::*;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::load_dir(Path::new("data/")).unwrap());
//! let mut planner = Planner::new(catalog);
//! planner.subscribe(|sheet: &StatSheet, _: &SelectionDiff| println!("{}", sheet.archetype));
//!
//! planner.select_skill(0).unwrap();
//! planner.select_combat(9).unwrap();
//! println!("{}", planner.sheet());
//! println!("?{}", planner.query_string());
//! ```

pub mod aggregator;
pub mod archetype;
pub mod budget;
pub mod effects;
pub mod planner;
pub mod prelude;
pub mod sheet;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;
use thiserror::Error;

// Core API - what most users need
pub use planner::{BuildListener, Planner};
pub use sheet::{StatSheet, CORE_SKILL_WARNING};

// Building blocks
pub use aggregator::StatAccumulator;
pub use archetype::{Archetype, Sector};
pub use budget::{BudgetStatus, PointBudget};
pub use effects::{EffectTable, EffectTables, GroupEffect, Stat};

/// Error loading effect tables
#[derive(Debug, Error)]
pub enum StatError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Parse error in '{path:?}': {error}")]
    Parse {
        error: toml::de::Error,
        path: Option<PathBuf>,
    },
}
