//! Group effect tables
//!
//! Each selected skill (and each selected combat skill) adds a fixed set of stat
//! deltas determined only by its group. The tables are data: adding a group means
//! adding rows, not touching the aggregator.

use crate::StatError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Stat counters that group effects feed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    MaxHealth,
    MaxStamina,
    StaminaRegen,
    Agility,
    BruteStrength,
    DodgeRate,
    CrouchedDodge,
    CritChance,
    CritDamage,
    ReloadSpeed,
    AimingSpeed,
    DrillSpeed,
    LockpickSpeed,
    HackSpeed,
    HackDetection,
    HackResourceCost,
    TechUseSpeed,
    CrouchedDetection,
    SuspiciousDetection,
    DisguisedDetection,
    CameraDetection,
    DamageReduction,
    CombatItemRecharge,
    ExtraAmmo,
    ExecutionDamage,
    VitalDamage,
    TakedownDamage,
    CloseQuartersDamage,
    ExtraExplosives,
}

/// One row of an effect table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEffect {
    pub group: String,
    pub stat: Stat,
    pub value: f64,
}

impl GroupEffect {
    fn new(group: &str, stat: Stat, value: f64) -> Self {
        GroupEffect {
            group: group.to_string(),
            stat,
            value,
        }
    }
}

/// Group name to the stat deltas one selected node of that group contributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectTable {
    effects: HashMap<String, Vec<(Stat, f64)>>,
}

impl EffectTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: impl IntoIterator<Item = GroupEffect>) -> Self {
        let mut table = EffectTable::new();
        for row in rows {
            table.insert(row);
        }
        table
    }

    pub fn insert(&mut self, row: GroupEffect) {
        self.effects.entry(row.group).or_default().push((row.stat, row.value));
    }

    /// Deltas for a group; unknown groups contribute nothing
    pub fn effects_for(&self, group: &str) -> &[(Stat, f64)] {
        self.effects.get(group).map(|e| e.as_slice()).unwrap_or(&[])
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.effects.keys().map(|g| g.as_str())
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// In-game values for skill groups
    pub fn default_skills() -> Self {
        EffectTable::from_rows([
            GroupEffect::new("ea", Stat::HackSpeed, 5.0),
            GroupEffect::new("ea", Stat::HackDetection, -5.0),
            GroupEffect::new("ci", Stat::HackResourceCost, 5.0),
            GroupEffect::new("ci", Stat::CritChance, 1.5),
            GroupEffect::new("sd", Stat::CameraDetection, 4.0),
            GroupEffect::new("te", Stat::TechUseSpeed, 5.0),
            GroupEffect::new("fh", Stat::LockpickSpeed, 5.0),
            GroupEffect::new("fh", Stat::ReloadSpeed, 3.0),
            GroupEffect::new("lp", Stat::CrouchedDetection, 4.0),
            GroupEffect::new("lp", Stat::DodgeRate, 3.0),
            GroupEffect::new("dis", Stat::SuspiciousDetection, 5.0),
            GroupEffect::new("mas", Stat::DisguisedDetection, 4.0),
            GroupEffect::new("af", Stat::DrillSpeed, 5.0),
            GroupEffect::new("con", Stat::MaxStamina, 6.0),
            GroupEffect::new("con", Stat::StaminaRegen, 0.03),
            GroupEffect::new("agil", Stat::Agility, 1.0),
            GroupEffect::new("bs", Stat::BruteStrength, 1.0),
        ])
    }

    /// In-game values for combat skill groups
    pub fn default_combat() -> Self {
        EffectTable::from_rows([
            GroupEffect::new("re", Stat::DamageReduction, 20.0),
            GroupEffect::new("hp", Stat::ReloadSpeed, 20.0),
            GroupEffect::new("hp", Stat::AimingSpeed, 20.0),
            GroupEffect::new("scav", Stat::CombatItemRecharge, 25.0),
            GroupEffect::new("ar", Stat::ExtraAmmo, 25.0),
            GroupEffect::new("ls", Stat::CritChance, 10.0),
            GroupEffect::new("vit", Stat::MaxHealth, 20.0),
            GroupEffect::new("ht", Stat::CrouchedDodge, 20.0),
            GroupEffect::new("exe", Stat::ExecutionDamage, 25.0),
            GroupEffect::new("vt", Stat::VitalDamage, 15.0),
            GroupEffect::new("os", Stat::ExtraExplosives, 1.0),
            GroupEffect::new("woc", Stat::ExtraAmmo, 50.0),
            GroupEffect::new("woc", Stat::ReloadSpeed, 20.0),
            GroupEffect::new("tc", Stat::TakedownDamage, 20.0),
            GroupEffect::new("cdg", Stat::CloseQuartersDamage, 50.0),
            GroupEffect::new("cs", Stat::CritDamage, 100.0),
        ])
    }
}

/// Both effect tables used by the aggregator
#[derive(Debug, Clone, PartialEq)]
pub struct EffectTables {
    pub skills: EffectTable,
    pub combat: EffectTable,
}

impl Default for EffectTables {
    fn default() -> Self {
        EffectTables {
            skills: EffectTable::default_skills(),
            combat: EffectTable::default_combat(),
        }
    }
}

/// On-disk layout. A table that is left out keeps its built-in rows.
#[derive(Debug, Deserialize)]
struct EffectsFile {
    #[serde(default)]
    skill_effects: Option<Vec<GroupEffect>>,
    #[serde(default)]
    combat_effects: Option<Vec<GroupEffect>>,
}

impl EffectTables {
    /// Load effect tables from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, StatError> {
        let content = std::fs::read_to_string(path).map_err(|e| StatError::Io {
            error: e,
            path: path.to_path_buf(),
        })?;
        let file = toml::from_str(&content).map_err(|e| StatError::Parse {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        Ok(Self::from_file(file))
    }

    /// Parse effect tables from a TOML string
    pub fn parse(toml: &str) -> Result<Self, StatError> {
        let file = toml::from_str(toml).map_err(|e| StatError::Parse { error: e, path: None })?;
        Ok(Self::from_file(file))
    }

    fn from_file(file: EffectsFile) -> Self {
        let defaults = EffectTables::default();
        EffectTables {
            skills: file
                .skill_effects
                .map(EffectTable::from_rows)
                .unwrap_or(defaults.skills),
            combat: file
                .combat_effects
                .map(EffectTable::from_rows)
                .unwrap_or(defaults.combat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let tables = EffectTables::default();
        assert_eq!(
            tables.skills.effects_for("con"),
            &[(Stat::MaxStamina, 6.0), (Stat::StaminaRegen, 0.03)]
        );
        assert_eq!(
            tables.combat.effects_for("woc"),
            &[(Stat::ExtraAmmo, 50.0), (Stat::ReloadSpeed, 20.0)]
        );
        assert!(tables.combat.effects_for("fa").is_empty());
        assert!(tables.skills.effects_for("nope").is_empty());
        assert_eq!(tables.skills.len(), 12);
    }

    #[test]
    fn test_parse_replaces_one_table() {
        let toml = r#"
[[skill_effects]]
group = "con"
stat = "max_stamina"
value = 10.0

[[skill_effects]]
group = "new"
stat = "max_health"
value = 5.0
"#;
        let tables = EffectTables::parse(toml).unwrap();
        assert_eq!(tables.skills.effects_for("con"), &[(Stat::MaxStamina, 10.0)]);
        assert_eq!(tables.skills.effects_for("new"), &[(Stat::MaxHealth, 5.0)]);
        assert!(tables.skills.effects_for("ea").is_empty());
        assert_eq!(tables.combat, EffectTable::default_combat());
    }

    #[test]
    fn test_groups_list_each_group_once() {
        let table = EffectTable::from_rows([
            GroupEffect::new("woc", Stat::ExtraAmmo, 50.0),
            GroupEffect::new("cs", Stat::CritDamage, 100.0),
            GroupEffect::new("woc", Stat::ReloadSpeed, 20.0),
        ]);
        let mut groups: Vec<&str> = table.groups().collect();
        groups.sort_unstable();
        assert_eq!(groups, vec!["cs", "woc"]);
        assert_eq!(table.len(), 2);

        assert!(EffectTable::new().groups().next().is_none());
    }

    #[test]
    fn test_parse_unknown_stat() {
        let toml = r#"
[[combat_effects]]
group = "vit"
stat = "luck"
value = 1.0
"#;
        assert!(matches!(
            EffectTables::parse(toml),
            Err(StatError::Parse { path: None, .. })
        ));
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("effects.toml");
        std::fs::write(
            &path,
            "[[combat_effects]]\ngroup = \"vit\"\nstat = \"max_health\"\nvalue = 40.0\n",
        )
        .unwrap();

        let tables = EffectTables::load_from_path(&path).unwrap();
        assert_eq!(tables.combat.effects_for("vit"), &[(Stat::MaxHealth, 40.0)]);
        assert_eq!(tables.skills, EffectTable::default_skills());

        let missing = EffectTables::load_from_path(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(StatError::Io { .. })));
    }
}
