use catalog_core::{BagKind, Catalog, CombatSkillId, ItemId, Location, SkillId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The equipped bag and its contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bag {
    pub(crate) kind: BagKind,
    pub(crate) space: u32,
    pub(crate) items: Vec<ItemId>,
}

impl Bag {
    /// An empty bag, with space copied from the size table
    pub fn new(kind: BagKind) -> Self {
        Bag {
            kind,
            space: kind.space(),
            items: Vec::new(),
        }
    }

    pub fn kind(&self) -> BagKind {
        self.kind
    }

    pub fn space(&self) -> u32 {
        self.space
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }
}

/// Everything a player has chosen. Only the engines mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBuild {
    pub(crate) selected_skills: BTreeSet<SkillId>,
    pub(crate) selected_combat_skills: BTreeSet<CombatSkillId>,
    pub(crate) held_items: Vec<ItemId>,
    pub(crate) bag: Option<Bag>,
}

impl PlayerBuild {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_skills.is_empty()
            && self.selected_combat_skills.is_empty()
            && self.held_items.is_empty()
            && self.bag.is_none()
    }

    /// Back to the empty build
    pub fn reset(&mut self) {
        *self = PlayerBuild::default();
    }

    pub fn selected_skills(&self) -> &BTreeSet<SkillId> {
        &self.selected_skills
    }

    pub fn selected_combat_skills(&self) -> &BTreeSet<CombatSkillId> {
        &self.selected_combat_skills
    }

    pub fn has_skill(&self, id: SkillId) -> bool {
        self.selected_skills.contains(&id)
    }

    pub fn has_combat_skill(&self, id: CombatSkillId) -> bool {
        self.selected_combat_skills.contains(&id)
    }

    pub fn held_items(&self) -> &[ItemId] {
        &self.held_items
    }

    pub fn bag(&self) -> Option<&Bag> {
        self.bag.as_ref()
    }

    /// Contents of a location; a missing bag reads as empty
    pub fn items_in(&self, location: Location) -> &[ItemId] {
        match location {
            Location::Held => &self.held_items,
            Location::Bag => self.bag.as_ref().map(|b| b.items.as_slice()).unwrap_or(&[]),
        }
    }

    /// Held items followed by bag items
    pub fn all_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.held_items
            .iter()
            .chain(self.items_in(Location::Bag).iter())
            .copied()
    }

    /// Copies of an item across held items and the bag
    pub fn item_count(&self, id: ItemId) -> u32 {
        self.all_items().filter(|item| *item == id).count() as u32
    }

    pub fn is_holding(&self, id: ItemId) -> bool {
        self.held_items.contains(&id)
    }

    /// Selected skills belonging to a group
    pub fn skills_in_group(&self, catalog: &Catalog, group: &str) -> usize {
        self.selected_skills
            .iter()
            .filter_map(|id| catalog.skill(*id))
            .filter(|skill| skill.group == group)
            .count()
    }

    /// Selected combat skills belonging to a group
    pub fn combat_skills_in_group(&self, catalog: &Catalog, group: &str) -> usize {
        self.selected_combat_skills
            .iter()
            .filter_map(|id| catalog.combat_skill(*id))
            .filter(|skill| skill.group == group)
            .count()
    }

    pub(crate) fn items_mut(&mut self, location: Location) -> Option<&mut Vec<ItemId>> {
        match location {
            Location::Held => Some(&mut self.held_items),
            Location::Bag => self.bag.as_mut().map(|b| &mut b.items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::catalog;

    #[test]
    fn test_empty_build() {
        let build = PlayerBuild::new();
        assert!(build.is_empty());
        assert!(build.items_in(Location::Bag).is_empty());
        assert_eq!(build.item_count(3), 0);
    }

    #[test]
    fn test_item_count_spans_locations() {
        let mut build = PlayerBuild::new();
        build.held_items = vec![6, 6, 3];
        build.bag = Some(Bag {
            kind: BagKind::Satchel,
            space: 4,
            items: vec![6],
        });
        assert_eq!(build.item_count(6), 3);
        assert_eq!(build.all_items().collect::<Vec<_>>(), vec![6, 6, 3, 6]);
    }

    #[test]
    fn test_group_counts() {
        let catalog = catalog();
        let mut build = PlayerBuild::new();
        build.selected_skills.extend([3, 4, 0]);
        build.selected_combat_skills.extend([1, 2, 0]);
        assert_eq!(build.skills_in_group(&catalog, "es"), 2);
        assert_eq!(build.skills_in_group(&catalog, "con"), 1);
        assert_eq!(build.combat_skills_in_group(&catalog, "os"), 2);
    }

    #[test]
    fn test_reset() {
        let mut build = PlayerBuild::new();
        build.selected_skills.insert(0);
        build.bag = Some(Bag::new(BagKind::Duffel));
        build.reset();
        assert!(build.is_empty());
    }

    #[test]
    fn test_serde_keeps_duplicates() {
        let mut build = PlayerBuild::new();
        build.selected_skills.insert(2);
        build.held_items = vec![4, 4];
        build.bag = Some(Bag::new(BagKind::Backpack));

        let json = serde_json::to_string(&build).unwrap();
        assert!(json.contains("\"kind\":\"backpack\""));
        let restored: PlayerBuild = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, build);
    }
}
