use crate::build::PlayerBuild;
use catalog_core::{Catalog, ItemCap, ItemDef, ItemId};
use std::collections::HashMap;

/// Item fields that depend on the current build, recomputed on demand.
///
/// The catalog itself never changes; lookups that care about build-dependent
/// values go through an override set derived from `(catalog, build)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogOverrides {
    caps: HashMap<ItemId, ItemCap>,
}

impl CatalogOverrides {
    /// Derive the overrides for a build. Same inputs, same overrides.
    pub fn derive(catalog: &Catalog, build: &PlayerBuild) -> Self {
        let mut caps = HashMap::new();

        let explosives = &catalog.rules().explosives;
        if build.combat_skills_in_group(catalog, &explosives.group) >= explosives.threshold
            && catalog.item(explosives.item).is_some()
        {
            caps.insert(explosives.item, ItemCap::Limited(explosives.raised_cap));
        }

        CatalogOverrides { caps }
    }

    /// Effective copy cap for an item
    pub fn cap(&self, item: &ItemDef) -> ItemCap {
        self.caps.get(&item.id).copied().unwrap_or(item.cap)
    }

    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }
}
