//! StatAccumulator - Collects group effect deltas before the sheet formulas run

use crate::effects::{EffectTable, EffectTables, Stat};
use build_core::PlayerBuild;
use catalog_core::Catalog;
use serde::Serialize;

/// Raw stat deltas summed over every selected skill and combat skill
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatAccumulator {
    // === Survival ===
    pub max_health: f64,
    pub max_stamina: f64,
    pub stamina_regen: f64,
    pub damage_reduction: f64,

    // === Counters ===
    pub agility: f64,
    pub brute_strength: f64,
    pub extra_explosives: f64,

    // === Movement ===
    pub dodge_rate: f64,
    pub crouched_dodge: f64,

    // === Offense ===
    pub crit_chance: f64,
    pub crit_damage: f64,
    pub reload_speed: f64,
    pub aiming_speed: f64,
    pub extra_ammo: f64,
    pub combat_item_recharge: f64,
    pub execution_damage: f64,
    pub vital_damage: f64,
    pub takedown_damage: f64,
    pub close_quarters_damage: f64,

    // === Tools and hacking ===
    pub drill_speed: f64,
    pub lockpick_speed: f64,
    pub hack_speed: f64,
    pub hack_detection: f64,
    pub hack_resource_cost: f64,
    pub tech_use_speed: f64,

    // === Detection (percent reductions) ===
    pub crouched_detection: f64,
    pub suspicious_detection: f64,
    pub disguised_detection: f64,
    pub camera_detection: f64,
}

impl StatAccumulator {
    pub fn new() -> Self {
        StatAccumulator::default()
    }

    /// Sum the effects of every selected node. Ids missing from the catalog add nothing.
    pub fn from_build(tables: &EffectTables, catalog: &Catalog, build: &PlayerBuild) -> Self {
        let mut acc = StatAccumulator::new();

        for skill in build
            .selected_skills()
            .iter()
            .filter_map(|id| catalog.skill(*id))
        {
            acc.apply_group(&tables.skills, &skill.group);
        }
        for skill in build
            .selected_combat_skills()
            .iter()
            .filter_map(|id| catalog.combat_skill(*id))
        {
            acc.apply_group(&tables.combat, &skill.group);
        }

        acc
    }

    pub fn apply_group(&mut self, table: &EffectTable, group: &str) {
        for (stat, value) in table.effects_for(group) {
            self.apply(*stat, *value);
        }
    }

    /// Add one delta
    pub fn apply(&mut self, stat: Stat, value: f64) {
        match stat {
            Stat::MaxHealth => self.max_health += value,
            Stat::MaxStamina => self.max_stamina += value,
            Stat::StaminaRegen => self.stamina_regen += value,
            Stat::DamageReduction => self.damage_reduction += value,

            Stat::Agility => self.agility += value,
            Stat::BruteStrength => self.brute_strength += value,
            Stat::ExtraExplosives => self.extra_explosives += value,

            Stat::DodgeRate => self.dodge_rate += value,
            Stat::CrouchedDodge => self.crouched_dodge += value,

            Stat::CritChance => self.crit_chance += value,
            Stat::CritDamage => self.crit_damage += value,
            Stat::ReloadSpeed => self.reload_speed += value,
            Stat::AimingSpeed => self.aiming_speed += value,
            Stat::ExtraAmmo => self.extra_ammo += value,
            Stat::CombatItemRecharge => self.combat_item_recharge += value,
            Stat::ExecutionDamage => self.execution_damage += value,
            Stat::VitalDamage => self.vital_damage += value,
            Stat::TakedownDamage => self.takedown_damage += value,
            Stat::CloseQuartersDamage => self.close_quarters_damage += value,

            Stat::DrillSpeed => self.drill_speed += value,
            Stat::LockpickSpeed => self.lockpick_speed += value,
            Stat::HackSpeed => self.hack_speed += value,
            Stat::HackDetection => self.hack_detection += value,
            Stat::HackResourceCost => self.hack_resource_cost += value,
            Stat::TechUseSpeed => self.tech_use_speed += value,

            Stat::CrouchedDetection => self.crouched_detection += value,
            Stat::SuspiciousDetection => self.suspicious_detection += value,
            Stat::DisguisedDetection => self.disguised_detection += value,
            Stat::CameraDetection => self.camera_detection += value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build_with, catalog};

    #[test]
    fn test_empty_build() {
        let catalog = catalog();
        let acc =
            StatAccumulator::from_build(&EffectTables::default(), &catalog, &PlayerBuild::new());
        assert_eq!(acc, StatAccumulator::new());
    }

    #[test]
    fn test_apply_is_additive() {
        let mut acc = StatAccumulator::new();
        acc.apply(Stat::ReloadSpeed, 3.0);
        acc.apply(Stat::ReloadSpeed, 20.0);
        acc.apply(Stat::HackDetection, -5.0);
        assert_eq!(acc.reload_speed, 23.0);
        assert_eq!(acc.hack_detection, -5.0);
    }

    #[test]
    fn test_skill_and_combat_effects_combine() {
        let catalog = catalog();
        let build = build_with(&catalog, &[0, 1], &[19, 3]);

        let acc = StatAccumulator::from_build(&EffectTables::default(), &catalog, &build);
        // Two fh skills, weapon of choice, hair trigger
        assert_eq!(acc.lockpick_speed, 10.0);
        assert_eq!(acc.reload_speed, 3.0 + 3.0 + 20.0 + 20.0);
        assert_eq!(acc.extra_ammo, 50.0);
        assert_eq!(acc.aiming_speed, 20.0);
    }

    #[test]
    fn test_custom_table() {
        let catalog = catalog();
        let build = build_with(&catalog, &[16, 17], &[]);

        let mut tables = EffectTables::default();
        tables.skills = EffectTable::from_rows([crate::effects::GroupEffect {
            group: "con".to_string(),
            stat: Stat::MaxHealth,
            value: 7.0,
        }]);

        let acc = StatAccumulator::from_build(&tables, &catalog, &build);
        assert_eq!(acc.max_health, 14.0);
        assert_eq!(acc.max_stamina, 0.0);
    }
}
