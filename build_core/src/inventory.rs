//! Inventory rules: weapon counts, held/bag space, per-item copy caps, weight

use crate::build::{Bag, PlayerBuild};
use crate::overrides::CatalogOverrides;
use crate::Rejection;
use catalog_core::{BagKind, Catalog, ItemCap, ItemDef, ItemId, ItemType, Location, WeaponLimits};
use tracing::debug;

/// Weapons currently carried, held and bagged together
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeaponCounts {
    pub primary: u32,
    pub secondary: u32,
}

impl WeaponCounts {
    pub fn total(&self) -> u32 {
        self.primary + self.secondary
    }

    fn remove_one(&mut self, item_type: ItemType) {
        match item_type {
            ItemType::WeaponPrimary => self.primary = self.primary.saturating_sub(1),
            ItemType::WeaponSecondary => self.secondary = self.secondary.saturating_sub(1),
            _ => {}
        }
    }
}

/// Inventory engine
#[derive(Debug, Clone, Copy)]
pub struct Inventory<'a> {
    catalog: &'a Catalog,
}

impl<'a> Inventory<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Inventory { catalog }
    }

    /// Add one copy of an item to a location.
    ///
    /// With `moving`, the copy comes out of the other location instead of out of
    /// thin air. Gates run in order (existence, weapon count, space, copy cap) and
    /// nothing changes unless all of them pass.
    pub fn try_add_item(
        &self,
        build: &mut PlayerBuild,
        id: ItemId,
        location: Location,
        moving: bool,
    ) -> Result<(), Rejection> {
        if let Err(rejection) = self.check_add(build, id, location, moving) {
            debug!(item = id, %location, moving, %rejection, "item add rejected");
            return Err(rejection);
        }

        if let Some(target) = build.items_mut(location) {
            target.push(id);
        }
        if moving {
            if let Some(source) = build.items_mut(location.other()) {
                if let Some(index) = source.iter().position(|item| *item == id) {
                    source.remove(index);
                }
            }
        }

        debug!(item = id, %location, moving, "item added");
        Ok(())
    }

    pub fn add_item(
        &self,
        build: &mut PlayerBuild,
        id: ItemId,
        location: Location,
    ) -> Result<(), Rejection> {
        self.try_add_item(build, id, location, false)
    }

    /// Move one copy into `to` from the other location
    pub fn move_item(
        &self,
        build: &mut PlayerBuild,
        id: ItemId,
        to: Location,
    ) -> Result<(), Rejection> {
        self.try_add_item(build, id, to, true)
    }

    /// Run every add gate without touching the build
    pub fn check_add(
        &self,
        build: &PlayerBuild,
        id: ItemId,
        location: Location,
        moving: bool,
    ) -> Result<&'a ItemDef, Rejection> {
        let item = self.catalog.item(id).ok_or(Rejection::UnknownItem(id))?;

        if moving && !build.items_in(location.other()).contains(&id) {
            return Err(Rejection::ItemNotPresent {
                item: id,
                location: location.other(),
            });
        }

        self.check_weapons(build, item, moving)?;
        self.check_space(build, item, location)?;

        let mut existing = build.item_count(id);
        if moving {
            existing = existing.saturating_sub(1);
        }
        let cap = self.item_cap(build, item);
        if !cap.admits(existing) {
            return Err(Rejection::CapReached {
                item: id,
                cap: cap.limit().unwrap_or(u32::MAX),
            });
        }

        Ok(item)
    }

    fn check_weapons(
        &self,
        build: &PlayerBuild,
        item: &ItemDef,
        moving: bool,
    ) -> Result<(), Rejection> {
        if !item.item_type.is_weapon() {
            return Ok(());
        }

        let limits = self.weapon_limits(build);
        let mut counts = self.weapon_counts(build);
        if moving {
            counts.remove_one(item.item_type);
        }

        if counts.total() + 1 > limits.max_weapons {
            return Err(Rejection::WeaponLimit {
                max: limits.max_weapons,
            });
        }
        if item.item_type.is_primary_weapon() && counts.primary + 1 > limits.max_primary {
            return Err(Rejection::PrimaryLimit {
                max: limits.max_primary,
            });
        }
        Ok(())
    }

    fn check_space(
        &self,
        build: &PlayerBuild,
        item: &ItemDef,
        location: Location,
    ) -> Result<(), Rejection> {
        let capacity = match location {
            Location::Held => {
                if item.item_type.is_held_exempt() {
                    return Ok(());
                }
                self.held_capacity(build)
            }
            Location::Bag => {
                let Some(bag) = build.bag() else {
                    return Err(Rejection::NoBag);
                };
                if !item.takes_space() {
                    return Err(Rejection::NotBaggable(item.id));
                }
                bag.space()
            }
        };

        let used = self.used_space(build.items_in(location), location);
        let space = item.space_cost();
        if used + space > capacity {
            return Err(Rejection::InsufficientSpace {
                location,
                used,
                space,
                capacity,
            });
        }
        Ok(())
    }

    /// Remove one copy of an item from a location.
    ///
    /// Dropping a held item that raises held capacity is refused while the
    /// remaining held items would no longer fit.
    pub fn remove_item(
        &self,
        build: &mut PlayerBuild,
        id: ItemId,
        location: Location,
    ) -> Result<(), Rejection> {
        let mut after = build.clone();
        let removed = after.items_mut(location).and_then(|items| {
            let index = items.iter().position(|item| *item == id)?;
            Some(items.remove(index))
        });
        if removed.is_none() {
            debug!(item = id, %location, "item not present");
            return Err(Rejection::ItemNotPresent { item: id, location });
        }

        if location == Location::Held {
            let capacity = self.held_capacity(&after);
            let used = self.used_space(after.held_items(), Location::Held);
            if used > capacity && capacity < self.held_capacity(build) {
                debug!(item = id, used, capacity, "removal would overflow held space");
                return Err(Rejection::HeldSpaceInUse {
                    item: id,
                    used,
                    capacity,
                });
            }
        }

        *build = after;
        debug!(item = id, %location, "item removed");
        Ok(())
    }

    /// Equip a fresh, empty bag, replacing any current bag and its contents
    pub fn equip_bag(&self, build: &mut PlayerBuild, kind: BagKind) {
        build.bag = Some(Bag::new(kind));
        debug!(bag = %kind, "bag equipped");
    }

    /// Drop the bag and its contents
    pub fn unequip_bag(&self, build: &mut PlayerBuild) -> Option<Bag> {
        let bag = build.bag.take();
        if let Some(ref bag) = bag {
            debug!(bag = %bag.kind(), "bag removed");
        }
        bag
    }

    /// Space used by a list of items in a location. Held space ignores equip-type items.
    pub fn used_space(&self, items: &[ItemId], location: Location) -> u32 {
        items
            .iter()
            .filter_map(|id| self.catalog.item(*id))
            .filter(|item| !(location == Location::Held && item.item_type.is_held_exempt()))
            .map(|item| item.space_cost())
            .sum()
    }

    pub fn held_capacity(&self, build: &PlayerBuild) -> u32 {
        let rules = &self.catalog.rules().held_space;
        let mut capacity = rules.base;
        let pockets = build.skills_in_group(self.catalog, &rules.extra_pocket_group);
        if pockets >= rules.extra_pocket_threshold {
            capacity += rules.extra_pocket_bonus;
        }
        if build.is_holding(rules.pocket_item) {
            capacity += rules.pocket_item_bonus;
        }
        capacity
    }

    /// Equipped bag's space, zero without a bag
    pub fn bag_capacity(&self, build: &PlayerBuild) -> u32 {
        build.bag().map(|bag| bag.space()).unwrap_or(0)
    }

    /// Limits after combat-skill overrides; full auto wins over weapon of choice
    pub fn weapon_limits(&self, build: &PlayerBuild) -> WeaponLimits {
        let rules = &self.catalog.rules().weapons;
        if build.has_combat_skill(rules.full_auto_skill) {
            rules.full_auto
        } else if build.has_combat_skill(rules.weapon_of_choice_skill) {
            rules.weapon_of_choice
        } else {
            rules.default
        }
    }

    pub fn weapon_counts(&self, build: &PlayerBuild) -> WeaponCounts {
        let mut counts = WeaponCounts::default();
        for item in build.all_items().filter_map(|id| self.catalog.item(id)) {
            match item.item_type {
                ItemType::WeaponPrimary => counts.primary += 1,
                ItemType::WeaponSecondary => counts.secondary += 1,
                _ => {}
            }
        }
        counts
    }

    /// Copy cap after build-dependent overrides
    pub fn item_cap(&self, build: &PlayerBuild, item: &ItemDef) -> ItemCap {
        CatalogOverrides::derive(self.catalog, build).cap(item)
    }

    /// Sum of carried item weights
    pub fn raw_weight(&self, build: &PlayerBuild) -> f64 {
        build
            .all_items()
            .filter_map(|id| self.catalog.item(id))
            .map(|item| item.weight)
            .sum()
    }

    /// Carried weight with backpack contents discounted
    pub fn effective_weight(&self, build: &PlayerBuild) -> f64 {
        let held: f64 = build
            .held_items()
            .iter()
            .filter_map(|id| self.catalog.item(*id))
            .map(|item| item.weight)
            .sum();

        let Some(bag) = build.bag() else {
            return held;
        };
        let factor = if bag.kind() == BagKind::Backpack {
            self.catalog.rules().weight.backpack_factor
        } else {
            1.0
        };
        let bagged: f64 = bag
            .items()
            .iter()
            .filter_map(|id| self.catalog.item(*id))
            .map(|item| item.weight * factor)
            .sum();

        held + bagged
    }

    pub fn excess_weight(&self, build: &PlayerBuild) -> f64 {
        (self.effective_weight(build) - self.catalog.rules().weight.threshold).max(0.0)
    }

    pub fn excess_raw_weight(&self, build: &PlayerBuild) -> f64 {
        (self.raw_weight(build) - self.catalog.rules().weight.threshold).max(0.0)
    }

    /// Largest weapon space that can still be concealed
    pub fn concealed_threshold(&self, build: &PlayerBuild) -> u32 {
        let rules = &self.catalog.rules().concealment;
        let mut threshold = rules.base;
        if build.skills_in_group(self.catalog, &rules.group) >= rules.group_threshold {
            threshold += 1;
        }
        if build.is_holding(rules.holster_item) {
            threshold += 1;
        }
        threshold
    }

    pub fn can_be_concealed(&self, build: &PlayerBuild, item: &ItemDef) -> bool {
        if !item.item_type.is_weapon() {
            return true;
        }
        item.space_cost() <= self.concealed_threshold(build)
    }

    pub fn has_concealed_item(&self, build: &PlayerBuild) -> bool {
        build
            .held_items()
            .iter()
            .filter_map(|id| self.catalog.item(*id))
            .any(|item| item.concealed)
    }
}
