//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

// Session
pub use crate::planner::{BuildListener, Planner};
pub use crate::sheet::StatSheet;

// Derived figures
pub use crate::archetype::Archetype;
pub use crate::budget::{BudgetStatus, PointBudget};
pub use crate::effects::{EffectTables, Stat};

// Re-exports from the engines
pub use build_core::{DeselectPolicy, PlayerBuild, Rejection, SelectionDiff, Toggle};
pub use catalog_core::{BagKind, Catalog, Location};
