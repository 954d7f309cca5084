use crate::item::{ItemCap, ItemDef};
use crate::records::{CombatSkillRecord, ItemRecord, RawId, SkillRecord};
use crate::rules::Rules;
use crate::skill::{CombatSkillNode, Position, SkillNode};
use crate::types::{CombatSkillId, ItemId, ItemType, NodeKind, SkillId, SkillTier};
use crate::CatalogError;
use serde::de::DeserializeOwned;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::info;

pub const SKILLS_FILE: &str = "skills.json";
pub const COMBAT_SKILLS_FILE: &str = "combatskills.json";
pub const ITEMS_FILE: &str = "items.json";
pub const RULES_FILE: &str = "rules.toml";

/// Immutable reference data shared by every build session
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    skills: HashMap<SkillId, SkillNode>,
    combat_skills: HashMap<CombatSkillId, CombatSkillNode>,
    items: HashMap<ItemId, ItemDef>,
    rules: Rules,
}

impl Catalog {
    /// Load a catalog directory: the three JSON lists plus an optional `rules.toml`
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let skills: Vec<SkillRecord> = read_json(&dir.join(SKILLS_FILE))?;
        let combat_skills: Vec<CombatSkillRecord> = read_json(&dir.join(COMBAT_SKILLS_FILE))?;
        let items: Vec<ItemRecord> = read_json(&dir.join(ITEMS_FILE))?;

        let rules_path = dir.join(RULES_FILE);
        let rules = if rules_path.exists() {
            Rules::load_from_path(&rules_path)?
        } else {
            Rules::default()
        };

        Self::from_records(skills, combat_skills, items, rules)
    }

    /// Build a catalog from JSON strings, with default rules
    pub fn from_json(skills: &str, combat_skills: &str, items: &str) -> Result<Self, CatalogError> {
        Self::from_records(
            parse_json(skills)?,
            parse_json(combat_skills)?,
            parse_json(items)?,
            Rules::default(),
        )
    }

    /// Validate records and build the lookup maps.
    ///
    /// Skill connections and combat exclusivity are symmetrized: an edge declared on
    /// one side only applies in both directions. A reference to an id that does not
    /// exist fails the load.
    pub fn from_records(
        skills: Vec<SkillRecord>,
        combat_skills: Vec<CombatSkillRecord>,
        items: Vec<ItemRecord>,
        rules: Rules,
    ) -> Result<Self, CatalogError> {
        let skills = build_skills(skills)?;
        let combat_skills = build_combat_skills(combat_skills)?;
        let items = build_items(items)?;

        info!(
            skills = skills.len(),
            combat_skills = combat_skills.len(),
            items = items.len(),
            "catalog loaded"
        );

        Ok(Catalog {
            skills,
            combat_skills,
            items,
            rules,
        })
    }

    /// Replace the rules, keeping the node data
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn skill(&self, id: SkillId) -> Option<&SkillNode> {
        self.skills.get(&id)
    }

    pub fn combat_skill(&self, id: CombatSkillId) -> Option<&CombatSkillNode> {
        self.combat_skills.get(&id)
    }

    pub fn item(&self, id: ItemId) -> Option<&ItemDef> {
        self.items.get(&id)
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillNode> {
        self.skills.values()
    }

    pub fn combat_skills(&self) -> impl Iterator<Item = &CombatSkillNode> {
        self.combat_skills.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemDef> {
        self.items.values()
    }

    /// Items of one type, in id order
    pub fn items_of_type(&self, item_type: ItemType) -> Vec<&ItemDef> {
        let mut matching: Vec<&ItemDef> = self
            .items
            .values()
            .filter(|item| item.item_type == item_type)
            .collect();
        matching.sort_by_key(|item| item.id);
        matching
    }

    pub fn highest_skill_id(&self) -> Option<SkillId> {
        self.skills.keys().max().copied()
    }

    pub fn highest_combat_skill_id(&self) -> Option<CombatSkillId> {
        self.combat_skills.keys().max().copied()
    }

    pub fn highest_item_id(&self) -> Option<ItemId> {
        self.items.keys().max().copied()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        error: e,
        path: path.to_path_buf(),
    })?;
    serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
        error: e,
        path: Some(path.to_path_buf()),
    })
}

fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, CatalogError> {
    serde_json::from_str(content).map_err(|e| CatalogError::Parse {
        error: e,
        path: None,
    })
}

fn resolve_all(ids: &[RawId], kind: NodeKind) -> Result<Vec<u32>, CatalogError> {
    ids.iter().map(|id| id.resolve(kind)).collect()
}

/// Turn declared edges into a symmetric adjacency map, rejecting dangling ends
fn symmetrize(
    declared: &HashMap<u32, Vec<u32>>,
    kind: NodeKind,
) -> Result<HashMap<u32, Vec<u32>>, CatalogError> {
    let mut adjacency: HashMap<u32, BTreeSet<u32>> =
        declared.keys().map(|id| (*id, BTreeSet::new())).collect();

    for (from, targets) in declared {
        for to in targets {
            if !declared.contains_key(to) {
                return Err(CatalogError::DanglingReference {
                    kind,
                    from: *from,
                    to: *to,
                });
            }
            if from == to {
                continue;
            }
            adjacency.entry(*from).or_default().insert(*to);
            adjacency.entry(*to).or_default().insert(*from);
        }
    }

    Ok(adjacency
        .into_iter()
        .map(|(id, set)| (id, set.into_iter().collect()))
        .collect())
}

fn build_skills(records: Vec<SkillRecord>) -> Result<HashMap<SkillId, SkillNode>, CatalogError> {
    let mut nodes = HashMap::with_capacity(records.len());
    let mut declared = HashMap::with_capacity(records.len());

    for record in records {
        let id = record.id.resolve(NodeKind::Skill)?;
        let connections = resolve_all(&record.connections, NodeKind::Skill)?;
        if declared.insert(id, connections).is_some() {
            return Err(CatalogError::DuplicateId {
                kind: NodeKind::Skill,
                id,
            });
        }
        nodes.insert(
            id,
            SkillNode {
                id,
                name: record.name,
                group: record.group,
                tier: SkillTier::from_flags(record.core_skill, record.major_skill),
                connections: Vec::new(),
                position: Position {
                    x: record.x,
                    y: record.y,
                },
            },
        );
    }

    let mut adjacency = symmetrize(&declared, NodeKind::Skill)?;
    for (id, node) in nodes.iter_mut() {
        node.connections = adjacency.remove(id).unwrap_or_default();
    }
    Ok(nodes)
}

fn build_combat_skills(
    records: Vec<CombatSkillRecord>,
) -> Result<HashMap<CombatSkillId, CombatSkillNode>, CatalogError> {
    let mut nodes = HashMap::with_capacity(records.len());
    let mut declared = HashMap::with_capacity(records.len());

    for record in records {
        let id = record.id.resolve(NodeKind::CombatSkill)?;
        let conflicts = resolve_all(&record.mutual_exclusivity, NodeKind::CombatSkill)?;
        if declared.insert(id, conflicts).is_some() {
            return Err(CatalogError::DuplicateId {
                kind: NodeKind::CombatSkill,
                id,
            });
        }
        nodes.insert(
            id,
            CombatSkillNode {
                id,
                name: record.name,
                group: record.group,
                mutual_exclusivity: Vec::new(),
                position: Position {
                    x: record.x,
                    y: record.y,
                },
            },
        );
    }

    let mut adjacency = symmetrize(&declared, NodeKind::CombatSkill)?;
    for (id, node) in nodes.iter_mut() {
        node.mutual_exclusivity = adjacency.remove(id).unwrap_or_default();
    }
    Ok(nodes)
}

fn build_items(records: Vec<ItemRecord>) -> Result<HashMap<ItemId, ItemDef>, CatalogError> {
    let mut items = HashMap::with_capacity(records.len());

    for record in records {
        let id = record.id.resolve(NodeKind::Item)?;
        let item = ItemDef {
            id,
            name: record.name,
            item_type: record.item_type,
            space: record.space,
            weight: record.weight,
            cap: ItemCap::from_raw(record.cap),
            concealed: record.concealed,
        };
        if items.insert(id, item).is_some() {
            return Err(CatalogError::DuplicateId {
                kind: NodeKind::Item,
                id,
            });
        }
    }

    Ok(items)
}
