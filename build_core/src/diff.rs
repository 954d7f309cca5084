use crate::build::PlayerBuild;
use catalog_core::{CombatSkillId, SkillId};
use serde::Serialize;

/// What a mutation changed, so a renderer only touches what moved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionDiff {
    pub skills_added: Vec<SkillId>,
    pub skills_removed: Vec<SkillId>,
    pub combat_added: Vec<CombatSkillId>,
    pub combat_removed: Vec<CombatSkillId>,
    pub held_changed: bool,
    pub bag_changed: bool,
}

impl SelectionDiff {
    pub fn between(before: &PlayerBuild, after: &PlayerBuild) -> Self {
        SelectionDiff {
            skills_added: after
                .selected_skills()
                .difference(before.selected_skills())
                .copied()
                .collect(),
            skills_removed: before
                .selected_skills()
                .difference(after.selected_skills())
                .copied()
                .collect(),
            combat_added: after
                .selected_combat_skills()
                .difference(before.selected_combat_skills())
                .copied()
                .collect(),
            combat_removed: before
                .selected_combat_skills()
                .difference(after.selected_combat_skills())
                .copied()
                .collect(),
            held_changed: before.held_items() != after.held_items(),
            bag_changed: before.bag() != after.bag(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == SelectionDiff::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::Bag;
    use catalog_core::BagKind;

    #[test]
    fn test_identical_builds() {
        let build = PlayerBuild::new();
        assert!(SelectionDiff::between(&build, &build.clone()).is_empty());
    }

    #[test]
    fn test_reports_changes() {
        let mut before = PlayerBuild::new();
        before.selected_skills.extend([0, 1]);
        before.selected_combat_skills.insert(5);

        let mut after = before.clone();
        after.selected_skills.remove(&1);
        after.selected_skills.insert(2);
        after.selected_combat_skills.remove(&5);
        after.selected_combat_skills.insert(6);
        after.bag = Some(Bag::new(BagKind::Satchel));

        let diff = SelectionDiff::between(&before, &after);
        assert_eq!(diff.skills_added, vec![2]);
        assert_eq!(diff.skills_removed, vec![1]);
        assert_eq!(diff.combat_added, vec![6]);
        assert_eq!(diff.combat_removed, vec![5]);
        assert!(!diff.held_changed);
        assert!(diff.bag_changed);
        assert!(!diff.is_empty());
    }
}
