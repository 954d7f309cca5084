use crate::build::PlayerBuild;
use crate::{Rejection, Toggle};
use catalog_core::{Catalog, CombatSkillId};
use tracing::debug;

/// Combat skill engine: at most one skill of any conflict pair is selected
#[derive(Debug, Clone, Copy)]
pub struct CombatSkills<'a> {
    catalog: &'a Catalog,
}

impl<'a> CombatSkills<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        CombatSkills { catalog }
    }

    /// Select a combat skill, first dropping every selected conflict partner.
    ///
    /// Returns the displaced partners. Displacement is one level deep: partners of
    /// the displaced skills are untouched.
    pub fn select(
        &self,
        build: &mut PlayerBuild,
        id: CombatSkillId,
    ) -> Result<Vec<CombatSkillId>, Rejection> {
        let node = self
            .catalog
            .combat_skill(id)
            .ok_or(Rejection::UnknownCombatSkill(id))?;

        if build.has_combat_skill(id) {
            debug!(combat_skill = id, "combat skill already selected");
            return Err(Rejection::CombatAlreadySelected(id));
        }

        let mut displaced = Vec::new();
        for conflict in &node.mutual_exclusivity {
            if build.selected_combat_skills.remove(conflict) {
                displaced.push(*conflict);
            }
        }

        build.selected_combat_skills.insert(id);
        debug!(combat_skill = id, ?displaced, "combat skill selected");
        Ok(displaced)
    }

    pub fn deselect(&self, build: &mut PlayerBuild, id: CombatSkillId) -> Result<(), Rejection> {
        if self.catalog.combat_skill(id).is_none() {
            return Err(Rejection::UnknownCombatSkill(id));
        }
        if !build.selected_combat_skills.remove(&id) {
            debug!(combat_skill = id, "combat skill not selected");
            return Err(Rejection::CombatNotSelected(id));
        }
        debug!(combat_skill = id, "combat skill deselected");
        Ok(())
    }

    /// Tap behaviour: deselect if selected, otherwise select (displacing conflicts)
    pub fn toggle(&self, build: &mut PlayerBuild, id: CombatSkillId) -> Result<Toggle, Rejection> {
        if build.has_combat_skill(id) {
            self.deselect(build, id).map(|_| Toggle::Deselected)
        } else {
            self.select(build, id).map(|_| Toggle::Selected)
        }
    }
}
