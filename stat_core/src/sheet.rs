//! The stat sheet: every figure the planner shows for a build

use crate::aggregator::StatAccumulator;
use crate::archetype::Archetype;
use crate::budget::PointBudget;
use crate::effects::EffectTables;
use build_core::{CatalogOverrides, Inventory, PlayerBuild};
use catalog_core::{BagKind, Catalog, Location};
use serde::Serialize;
use std::fmt;

pub const CORE_SKILL_WARNING: &str = "You need to select at least one core skill!";

const BASE_HEALTH: f64 = 100.0;
const BASE_STAMINA: f64 = 100.0;
const BASE_STAMINA_REGEN: f64 = 15.0;
/// Speeds are shown as a percentage of normal
const BASE_SPEED: f64 = 100.0;
const AGILITY_THRESHOLD: f64 = 2.0;
const AGILITY_REGEN_MULTIPLIER: f64 = 1.5;

/// Computed figures for one build. Same inputs, bit-identical sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatSheet {
    pub archetype: Archetype,

    // Survival
    pub health: f64,
    pub stamina: f64,
    pub stamina_regen: f64,
    pub dodge_chance: f64,
    pub crouched_dodge_chance: f64,
    pub damage_reduction: f64,

    // Offense
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
    pub extra_explosives: f64,
    pub explosive_cap: Option<u32>,
    pub brute_strength: f64,

    // Tools
    pub drill_speed: f64,
    pub lockpick_speed: f64,
    pub hack_speed: f64,
    pub tech_use_speed: f64,

    // Multipliers, 1.0 is unmodified
    pub network_resource_usage: f64,
    pub hack_detection: f64,
    pub crouched_detection: f64,
    pub suspicious_detection: f64,
    pub disguised_detection: f64,
    pub camera_detection: f64,

    // Inventory
    pub weight: f64,
    pub raw_weight: f64,
    pub excess_weight: f64,
    pub excess_raw_weight: f64,
    pub held_space_used: u32,
    pub held_space: u32,
    pub bag: Option<BagKind>,
    pub bag_space_used: u32,
    pub bag_space: u32,
    pub weapons: u32,
    pub max_weapons: u32,
    pub primary_weapons: u32,
    pub max_primary_weapons: u32,
    pub concealed_threshold: u32,
    pub has_concealed_item: bool,

    // Budgets
    pub skill_points: PointBudget,
    pub combat_points: PointBudget,
    pub core_skill_warning: Option<String>,
}

impl StatSheet {
    /// Compute with the built-in effect tables
    pub fn compute(catalog: &Catalog, build: &PlayerBuild) -> Self {
        Self::compute_with(&EffectTables::default(), catalog, build)
    }

    pub fn compute_with(tables: &EffectTables, catalog: &Catalog, build: &PlayerBuild) -> Self {
        let acc = StatAccumulator::from_build(tables, catalog, build);
        let inventory = Inventory::new(catalog);
        let rules = catalog.rules();

        let excess_raw_weight = inventory.excess_raw_weight(build);
        let dodge_multiplier = excess_raw_weight * rules.weight.dodge_per_excess + 1.0;
        let agility_multiplier = if acc.agility >= AGILITY_THRESHOLD {
            AGILITY_REGEN_MULTIPLIER
        } else {
            1.0
        };

        let explosive_cap = catalog
            .item(rules.explosives.item)
            .and_then(|item| CatalogOverrides::derive(catalog, build).cap(item).limit());

        let limits = inventory.weapon_limits(build);
        let counts = inventory.weapon_counts(build);

        let has_core = build
            .selected_skills()
            .iter()
            .filter_map(|id| catalog.skill(*id))
            .any(|skill| skill.is_core());

        StatSheet {
            archetype: Archetype::classify(catalog, build),

            health: BASE_HEALTH + acc.max_health,
            stamina: BASE_STAMINA + acc.max_stamina,
            stamina_regen: BASE_STAMINA_REGEN * (1.0 + acc.stamina_regen) * agility_multiplier,
            dodge_chance: acc.dodge_rate * dodge_multiplier,
            crouched_dodge_chance: (acc.dodge_rate + acc.crouched_dodge) * dodge_multiplier,
            damage_reduction: acc.damage_reduction,

            crit_chance: acc.crit_chance,
            crit_damage: acc.crit_damage,
            reload_speed: BASE_SPEED + acc.reload_speed,
            aiming_speed: BASE_SPEED + acc.aiming_speed,
            extra_ammo: acc.extra_ammo,
            combat_item_recharge: acc.combat_item_recharge,
            execution_damage: acc.execution_damage,
            vital_damage: acc.vital_damage,
            takedown_damage: acc.takedown_damage,
            close_quarters_damage: acc.close_quarters_damage,
            extra_explosives: acc.extra_explosives,
            explosive_cap,
            brute_strength: acc.brute_strength,

            drill_speed: BASE_SPEED + acc.drill_speed,
            lockpick_speed: BASE_SPEED + acc.lockpick_speed,
            hack_speed: BASE_SPEED + acc.hack_speed,
            tech_use_speed: BASE_SPEED + acc.tech_use_speed,

            network_resource_usage: reduction(acc.hack_resource_cost),
            hack_detection: reduction(-acc.hack_detection),
            crouched_detection: reduction(acc.crouched_detection),
            suspicious_detection: reduction(acc.suspicious_detection),
            disguised_detection: reduction(acc.disguised_detection),
            camera_detection: reduction(acc.camera_detection),

            weight: inventory.effective_weight(build),
            raw_weight: inventory.raw_weight(build),
            excess_weight: inventory.excess_weight(build),
            excess_raw_weight,
            held_space_used: inventory.used_space(build.held_items(), Location::Held),
            held_space: inventory.held_capacity(build),
            bag: build.bag().map(|bag| bag.kind()),
            bag_space_used: inventory.used_space(build.items_in(Location::Bag), Location::Bag),
            bag_space: inventory.bag_capacity(build),
            weapons: counts.total(),
            max_weapons: limits.max_weapons,
            primary_weapons: counts.primary,
            max_primary_weapons: limits.max_primary,
            concealed_threshold: inventory.concealed_threshold(build),
            has_concealed_item: inventory.has_concealed_item(build),

            skill_points: PointBudget::skill_points(catalog, build),
            combat_points: PointBudget::combat_points(catalog, build),
            core_skill_warning: (!has_core).then(|| CORE_SKILL_WARNING.to_string()),
        }
    }
}

/// Percentage reduction as a multiplier
fn reduction(percent: f64) -> f64 {
    1.0 - percent / 100.0
}

impl fmt::Display for StatSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Class: {}", self.archetype)?;
        writeln!(f, "Skill points: {}", self.skill_points)?;
        writeln!(f, "Combat points: {}", self.combat_points)?;
        if let Some(warning) = &self.core_skill_warning {
            writeln!(f, "{}", warning)?;
        }

        writeln!(f)?;
        writeln!(f, "Health: {}", self.health)?;
        writeln!(f, "Stamina: {}", self.stamina)?;
        writeln!(f, "Stamina regen: {}", self.stamina_regen)?;
        writeln!(f, "Dodge chance: {}%", self.dodge_chance)?;
        writeln!(f, "Crouched dodge chance: {}%", self.crouched_dodge_chance)?;
        writeln!(f, "Damage reduction: {}%", self.damage_reduction)?;
        writeln!(f, "Crit chance: {}%", self.crit_chance)?;
        writeln!(f, "Crit damage: +{}%", self.crit_damage)?;
        writeln!(f, "Reload speed: {}%", self.reload_speed)?;
        writeln!(f, "Aiming speed: {}%", self.aiming_speed)?;
        writeln!(f, "Extra ammo: +{}%", self.extra_ammo)?;
        writeln!(f, "Combat item recharge: +{}%", self.combat_item_recharge)?;
        writeln!(f, "Execution damage: +{}%", self.execution_damage)?;
        writeln!(f, "Vital damage: +{}%", self.vital_damage)?;
        writeln!(f, "Takedown damage: +{}%", self.takedown_damage)?;
        writeln!(f, "Close quarters damage: +{}%", self.close_quarters_damage)?;
        writeln!(f, "Extra explosives: {}", self.extra_explosives)?;
        if let Some(cap) = self.explosive_cap {
            writeln!(f, "Explosive cap: {}", cap)?;
        }
        writeln!(f, "Brute strength: {}", self.brute_strength)?;

        writeln!(f)?;
        writeln!(f, "Drill speed: {}%", self.drill_speed)?;
        writeln!(f, "Lockpicking speed: {}%", self.lockpick_speed)?;
        writeln!(f, "Hacking speed: {}%", self.hack_speed)?;
        writeln!(f, "Tech use speed: {}%", self.tech_use_speed)?;
        writeln!(f, "Network resource usage: x{}", self.network_resource_usage)?;
        writeln!(f, "Hack detection: x{}", self.hack_detection)?;
        writeln!(f, "Crouched detection speed: x{}", self.crouched_detection)?;
        writeln!(f, "Suspicious detection speed: x{}", self.suspicious_detection)?;
        writeln!(f, "Disguised detection speed: x{}", self.disguised_detection)?;
        writeln!(f, "Camera detection speed: x{}", self.camera_detection)?;

        writeln!(f)?;
        writeln!(f, "Weight: {} (raw {})", self.weight, self.raw_weight)?;
        writeln!(f, "Held space: {}/{}", self.held_space_used, self.held_space)?;
        match self.bag {
            Some(bag) => writeln!(f, "Bag ({}): {}/{}", bag, self.bag_space_used, self.bag_space)?,
            None => writeln!(f, "Bag: none")?,
        }
        writeln!(
            f,
            "Weapons: {}/{} ({}/{} primary)",
            self.weapons, self.max_weapons, self.primary_weapons, self.max_primary_weapons
        )?;
        write!(
            f,
            "Concealable weapon space: {}{}",
            self.concealed_threshold,
            if self.has_concealed_item {
                ", carrying a concealed item"
            } else {
                ""
            }
        )
    }
}
