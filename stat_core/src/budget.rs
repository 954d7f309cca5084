//! Skill and combat point budgets. Informational only: nothing here blocks a selection.

use build_core::PlayerBuild;
use catalog_core::{Catalog, SkillTier};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Under,
    At,
    Over,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetStatus::Under => write!(f, "under limit"),
            BudgetStatus::At => write!(f, "at limit"),
            BudgetStatus::Over => write!(f, "over limit"),
        }
    }
}

/// Points spent against a cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointBudget {
    pub spent: u32,
    pub cap: u32,
    pub status: BudgetStatus,
}

impl PointBudget {
    pub fn new(spent: u32, cap: u32) -> Self {
        let status = if spent > cap {
            BudgetStatus::Over
        } else if spent == cap {
            BudgetStatus::At
        } else {
            BudgetStatus::Under
        };
        PointBudget { spent, cap, status }
    }

    /// The first core skill is free, further cores and majors cost 2, minors cost 1
    pub fn skill_points(catalog: &Catalog, build: &PlayerBuild) -> Self {
        let mut cores: u32 = 0;
        let mut spent: u32 = 0;
        for skill in build
            .selected_skills()
            .iter()
            .filter_map(|id| catalog.skill(*id))
        {
            match skill.tier {
                SkillTier::Core => cores += 1,
                SkillTier::Major => spent += 2,
                SkillTier::Minor => spent += 1,
            }
        }
        spent += cores.saturating_sub(1) * 2;
        PointBudget::new(spent, catalog.rules().level_cap)
    }

    /// One point per selected combat skill
    pub fn combat_points(catalog: &Catalog, build: &PlayerBuild) -> Self {
        let spent = build.selected_combat_skills().len() as u32;
        PointBudget::new(spent, catalog.rules().combat_point_cap())
    }
}

impl fmt::Display for PointBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.spent, self.cap, self.status)
    }
}
