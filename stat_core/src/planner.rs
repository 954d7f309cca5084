//! Planner session: owns one build, runs every mutation through the engines, and
//! tells listeners what changed

use crate::effects::EffectTables;
use crate::sheet::StatSheet;
use build_core::{
    decode_query, encode_query, CombatSkills, DeselectPolicy, Inventory, PlayerBuild, Rejection,
    SelectionDiff, SkillGraph, Toggle,
};
use catalog_core::{BagKind, Catalog, CombatSkillId, ItemId, Location, SkillId};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Render callback, fired after every successful mutation
pub trait BuildListener {
    fn on_build_changed(&mut self, sheet: &StatSheet, diff: &SelectionDiff);
}

impl<F> BuildListener for F
where
    F: FnMut(&StatSheet, &SelectionDiff),
{
    fn on_build_changed(&mut self, sheet: &StatSheet, diff: &SelectionDiff) {
        self(sheet, diff)
    }
}

pub struct Planner {
    catalog: Arc<Catalog>,
    tables: EffectTables,
    policy: DeselectPolicy,
    build: PlayerBuild,
    sheet: StatSheet,
    listeners: Vec<Box<dyn BuildListener>>,
}

impl fmt::Debug for Planner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Planner")
            .field("policy", &self.policy)
            .field("build", &self.build)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Planner {
    /// Empty build over a shared catalog
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_build(catalog, PlayerBuild::new())
    }

    /// Start from a share link
    pub fn from_query(catalog: Arc<Catalog>, query: &str) -> Self {
        let build = decode_query(&catalog, query);
        Self::with_build(catalog, build)
    }

    fn with_build(catalog: Arc<Catalog>, build: PlayerBuild) -> Self {
        let tables = EffectTables::default();
        let sheet = StatSheet::compute_with(&tables, &catalog, &build);
        Planner {
            catalog,
            tables,
            policy: DeselectPolicy::default(),
            build,
            sheet,
            listeners: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: DeselectPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_effects(mut self, tables: EffectTables) -> Self {
        self.tables = tables;
        self.sheet = StatSheet::compute_with(&self.tables, &self.catalog, &self.build);
        self
    }

    pub fn subscribe(&mut self, listener: impl BuildListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn build(&self) -> &PlayerBuild {
        &self.build
    }

    /// Sheet for the current build
    pub fn sheet(&self) -> &StatSheet {
        &self.sheet
    }

    pub fn policy(&self) -> DeselectPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: DeselectPolicy) {
        self.policy = policy;
    }

    /// Share link for the current build, without the leading `?`
    pub fn query_string(&self) -> String {
        encode_query(&self.build)
    }

    pub fn select_skill(&mut self, id: SkillId) -> Result<(), Rejection> {
        self.mutate(|catalog, policy, build| {
            SkillGraph::new(catalog)
                .with_policy(policy)
                .select(build, id)
        })
    }

    pub fn deselect_skill(&mut self, id: SkillId) -> Result<(), Rejection> {
        self.mutate(|catalog, policy, build| {
            SkillGraph::new(catalog)
                .with_policy(policy)
                .deselect(build, id)
        })
    }

    pub fn toggle_skill(&mut self, id: SkillId) -> Result<Toggle, Rejection> {
        self.mutate(|catalog, policy, build| {
            SkillGraph::new(catalog)
                .with_policy(policy)
                .toggle(build, id)
        })
    }

    /// Returns the combat skills displaced by the selection
    pub fn select_combat(&mut self, id: CombatSkillId) -> Result<Vec<CombatSkillId>, Rejection> {
        self.mutate(|catalog, _, build| CombatSkills::new(catalog).select(build, id))
    }

    pub fn deselect_combat(&mut self, id: CombatSkillId) -> Result<(), Rejection> {
        self.mutate(|catalog, _, build| CombatSkills::new(catalog).deselect(build, id))
    }

    pub fn toggle_combat(&mut self, id: CombatSkillId) -> Result<Toggle, Rejection> {
        self.mutate(|catalog, _, build| CombatSkills::new(catalog).toggle(build, id))
    }

    pub fn add_item(&mut self, id: ItemId, location: Location) -> Result<(), Rejection> {
        self.mutate(|catalog, _, build| Inventory::new(catalog).add_item(build, id, location))
    }

    pub fn move_item(&mut self, id: ItemId, to: Location) -> Result<(), Rejection> {
        self.mutate(|catalog, _, build| Inventory::new(catalog).move_item(build, id, to))
    }

    pub fn remove_item(&mut self, id: ItemId, location: Location) -> Result<(), Rejection> {
        self.mutate(|catalog, _, build| {
            Inventory::new(catalog).remove_item(build, id, location)
        })
    }

    pub fn equip_bag(&mut self, kind: BagKind) {
        self.commit(|catalog, build| Inventory::new(catalog).equip_bag(build, kind));
    }

    pub fn unequip_bag(&mut self) {
        self.commit(|catalog, build| {
            Inventory::new(catalog).unequip_bag(build);
        });
    }

    /// Replace the build with one decoded from a share link
    pub fn load_query(&mut self, query: &str) {
        self.commit(|catalog, build| *build = decode_query(catalog, query));
    }

    /// Back to the empty build
    pub fn reset(&mut self) {
        self.commit(|_, build| build.reset());
    }

    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&Catalog, DeselectPolicy, &mut PlayerBuild) -> Result<T, Rejection>,
    ) -> Result<T, Rejection> {
        let catalog = Arc::clone(&self.catalog);
        let before = self.build.clone();
        let value = op(&catalog, self.policy, &mut self.build)?;
        self.refresh(&before);
        Ok(value)
    }

    fn commit(&mut self, op: impl FnOnce(&Catalog, &mut PlayerBuild)) {
        let catalog = Arc::clone(&self.catalog);
        let before = self.build.clone();
        op(&catalog, &mut self.build);
        self.refresh(&before);
    }

    fn refresh(&mut self, before: &PlayerBuild) {
        self.sheet = StatSheet::compute_with(&self.tables, &self.catalog, &self.build);
        let diff = SelectionDiff::between(before, &self.build);
        debug!(?diff, listeners = self.listeners.len(), "build changed");
        for listener in &mut self.listeners {
            listener.on_build_changed(&self.sheet, &diff);
        }
    }
}
