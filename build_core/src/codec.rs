//! Share-link codec
//!
//! A build maps to a query string of up to five parameters. Id sets travel as the
//! decimal form of a [`BitField`]; the bag travels as its tier name. Empty parts are
//! left out, and decoding never fails: anything unreadable decodes as empty.

use crate::bitfield::BitField;
use crate::build::{Bag, PlayerBuild};
use catalog_core::{BagKind, Catalog};
use std::collections::BTreeSet;
use tracing::warn;

pub const SKILLS_PARAM: &str = "skills";
pub const COMBAT_PARAM: &str = "combat";
pub const HELD_ITEMS_PARAM: &str = "helditems";
pub const BAG_PARAM: &str = "bag";
pub const BAG_ITEMS_PARAM: &str = "bagitems";

/// Encode a build as a query string, without the leading `?`.
///
/// Item lists are written as sets, so repeated copies of an item decode as one.
pub fn encode_query(build: &PlayerBuild) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();

    if !build.selected_skills().is_empty() {
        params.push((SKILLS_PARAM, encode_ids(build.selected_skills().iter().copied())));
    }
    if !build.selected_combat_skills().is_empty() {
        params.push((
            COMBAT_PARAM,
            encode_ids(build.selected_combat_skills().iter().copied()),
        ));
    }
    if !build.held_items().is_empty() {
        params.push((HELD_ITEMS_PARAM, encode_ids(build.held_items().iter().copied())));
    }
    if let Some(bag) = build.bag() {
        params.push((BAG_PARAM, bag.kind().to_string()));
        if !bag.items().is_empty() {
            params.push((BAG_ITEMS_PARAM, encode_ids(bag.items().iter().copied())));
        }
    }

    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_ids(ids: impl Iterator<Item = u32>) -> String {
    BitField::from_ids(ids).to_string()
}

/// Decode a query string against a catalog.
///
/// A leading `?` is optional and the first occurrence of a parameter wins. Ids above
/// the catalog's highest id are ignored, as are ids the catalog does not know.
/// Decoded contents are taken as given; no selection or inventory gate runs.
pub fn decode_query(catalog: &Catalog, query: &str) -> PlayerBuild {
    let query = query.trim();
    let query = query.strip_prefix('?').unwrap_or(query);
    let params = Params::parse(query);

    let mut build = PlayerBuild::new();

    build.selected_skills = decode_ids(
        &params,
        SKILLS_PARAM,
        catalog.highest_skill_id(),
        |id| catalog.skill(id).is_some(),
    )
    .into_iter()
    .collect();

    build.selected_combat_skills = decode_ids(
        &params,
        COMBAT_PARAM,
        catalog.highest_combat_skill_id(),
        |id| catalog.combat_skill(id).is_some(),
    )
    .into_iter()
    .collect();

    let item_known = |id| catalog.item(id).is_some();
    build.held_items = decode_ids(&params, HELD_ITEMS_PARAM, catalog.highest_item_id(), item_known);

    if let Some(raw) = params.get(BAG_PARAM) {
        match raw.parse::<BagKind>() {
            Ok(kind) => {
                let mut bag = Bag::new(kind);
                bag.items =
                    decode_ids(&params, BAG_ITEMS_PARAM, catalog.highest_item_id(), item_known);
                build.bag = Some(bag);
            }
            Err(error) => warn!(param = BAG_PARAM, %error, "ignoring bag parameter"),
        }
    }

    build
}

fn decode_ids(
    params: &Params<'_>,
    key: &str,
    highest: Option<u32>,
    known: impl Fn(u32) -> bool,
) -> Vec<u32> {
    let Some(raw) = params.get(key) else {
        return Vec::new();
    };
    let field = match raw.parse::<BitField>() {
        Ok(field) => field,
        Err(error) => {
            warn!(param = key, %error, "ignoring malformed parameter");
            return Vec::new();
        }
    };
    let Some(highest) = highest else {
        return Vec::new();
    };

    let mut ids = Vec::new();
    for id in field.ids_up_to(highest) {
        if known(id) {
            ids.push(id);
        } else {
            warn!(param = key, id, "dropping id missing from catalog");
        }
    }
    ids
}

/// Query parameters, first occurrence of each key kept
struct Params<'q> {
    pairs: Vec<(&'q str, &'q str)>,
}

impl<'q> Params<'q> {
    fn parse(query: &'q str) -> Self {
        let mut seen = BTreeSet::new();
        let pairs = query
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| part.split_once('=').unwrap_or((part, "")))
            .filter(|(key, _)| seen.insert(*key))
            .collect();
        Params { pairs }
    }

    fn get(&self, key: &str) -> Option<&'q str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::catalog;
    use catalog_core::Location;
    use proptest::prelude::*;

    fn sample_build() -> PlayerBuild {
        let mut build = PlayerBuild::new();
        build.selected_skills.extend([0, 1]);
        build.selected_combat_skills.insert(5);
        build.held_items = vec![3, 6];
        let mut bag = Bag::new(BagKind::Satchel);
        bag.items = vec![6];
        build.bag = Some(bag);
        build
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_query(&PlayerBuild::new()), "");
    }

    #[test]
    fn test_encode() {
        assert_eq!(
            encode_query(&sample_build()),
            "skills=3&combat=32&helditems=72&bag=satchel&bagitems=64"
        );
    }

    #[test]
    fn test_encode_empty_bag() {
        let mut build = PlayerBuild::new();
        build.bag = Some(Bag::new(BagKind::Duffel));
        assert_eq!(encode_query(&build), "bag=duffel");
    }

    #[test]
    fn test_duplicates_collapse() {
        let catalog = catalog();
        let mut build = PlayerBuild::new();
        build.held_items = vec![6, 6, 3];
        let query = encode_query(&build);
        assert_eq!(query, "helditems=72");
        assert_eq!(decode_query(&catalog, &query).held_items(), &[3, 6]);
    }

    #[test]
    fn test_decode() {
        let catalog = catalog();
        let build = decode_query(
            &catalog,
            "?skills=3&combat=32&helditems=72&bag=satchel&bagitems=64",
        );
        assert_eq!(build, sample_build());
        assert_eq!(build.bag().unwrap().space(), 4);
        assert_eq!(build.items_in(Location::Bag), &[6]);
    }

    #[test]
    fn test_decode_empty_and_missing() {
        let catalog = catalog();
        assert!(decode_query(&catalog, "").is_empty());
        assert!(decode_query(&catalog, "?").is_empty());
        assert!(decode_query(&catalog, "skills=&combat=").is_empty());
        assert!(decode_query(&catalog, "unrelated=5").is_empty());
    }

    #[test]
    fn test_malformed_parts_fail_soft() {
        let catalog = catalog();
        let build = decode_query(&catalog, "skills=abc&combat=32&helditems=-4");
        assert!(build.selected_skills().is_empty());
        assert_eq!(build.selected_combat_skills().iter().copied().collect::<Vec<_>>(), vec![5]);
        assert!(build.held_items().is_empty());
    }

    #[test]
    fn test_unknown_bag_means_no_bag() {
        let catalog = catalog();
        let build = decode_query(&catalog, "bag=crate&bagitems=64");
        assert!(build.bag().is_none());
    }

    #[test]
    fn test_bag_items_need_a_bag() {
        let catalog = catalog();
        let build = decode_query(&catalog, "bagitems=64");
        assert!(build.is_empty());
    }

    #[test]
    fn test_ids_above_bound_vanish() {
        let catalog = catalog();
        // Skill 10 is past the highest skill id, 9
        let build = decode_query(&catalog, "skills=1025");
        assert_eq!(build.selected_skills().iter().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_unknown_ids_dropped() {
        let catalog = catalog();
        // Combat 3 and item 10 fall inside the bound but do not exist
        let build = decode_query(&catalog, "combat=9&helditems=1024");
        assert_eq!(build.selected_combat_skills().iter().copied().collect::<Vec<_>>(), vec![0]);
        assert!(build.held_items().is_empty());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let catalog = catalog();
        let build = decode_query(&catalog, "skills=1&skills=2");
        assert_eq!(build.selected_skills().iter().copied().collect::<Vec<_>>(), vec![0]);
    }

    fn subset(ids: Vec<u32>) -> impl Strategy<Value = Vec<u32>> {
        let len = ids.len();
        proptest::sample::subsequence(ids, 0..=len)
    }

    proptest! {
        #[test]
        fn prop_query_round_trip(
            skills in subset((0..10).collect()),
            combat in subset(vec![0, 1, 2, 5, 6, 7, 19, 20]),
            held in subset(vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 15, 21, 22]),
            bag_items in subset(vec![0, 1, 2, 3, 4, 6, 7, 8, 9, 15]),
            bag_kind in proptest::option::of(proptest::sample::select(BagKind::all().to_vec())),
        ) {
            let catalog = catalog();
            let mut build = PlayerBuild::new();
            build.selected_skills = skills.into_iter().collect();
            build.selected_combat_skills = combat.into_iter().collect();
            build.held_items = held;
            if let Some(kind) = bag_kind {
                let mut bag = Bag::new(kind);
                bag.items = bag_items;
                build.bag = Some(bag);
            }

            let decoded = decode_query(&catalog, &encode_query(&build));
            prop_assert_eq!(decoded, build);
        }
    }
}
