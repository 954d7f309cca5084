use catalog_core::Catalog;

pub(crate) fn catalog() -> Catalog {
    Catalog::from_json(
        include_str!("../tests/fixtures/skills.json"),
        include_str!("../tests/fixtures/combatskills.json"),
        include_str!("../tests/fixtures/items.json"),
    )
    .unwrap()
}
