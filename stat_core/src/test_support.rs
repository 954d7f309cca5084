use build_core::{decode_query, BitField, PlayerBuild};
use catalog_core::Catalog;

pub(crate) fn catalog() -> Catalog {
    Catalog::from_json(
        include_str!("../../data/skills.json"),
        include_str!("../../data/combatskills.json"),
        include_str!("../../data/items.json"),
    )
    .unwrap()
}

/// A build with exactly these selections, bypassing the selection gates
pub(crate) fn build_with(catalog: &Catalog, skills: &[u32], combat: &[u32]) -> PlayerBuild {
    let query = format!(
        "skills={}&combat={}",
        BitField::from_ids(skills.iter().copied()),
        BitField::from_ids(combat.iter().copied())
    );
    decode_query(catalog, &query)
}
