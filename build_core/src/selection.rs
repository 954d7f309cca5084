//! Skill graph selection rules
//!
//! A skill may be selected when it touches the current selection, or when it is a
//! core skill and nothing is selected yet. Deselection follows a [`DeselectPolicy`].

use crate::build::PlayerBuild;
use crate::{Rejection, Toggle};
use catalog_core::{Catalog, SkillId, SkillNode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use tracing::debug;

/// How deselection treats skills that would lose their path to a core skill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeselectPolicy {
    /// Any selected skill may be removed, even if that strands others
    #[default]
    Permissive,
    /// Refuse removals that cut another selected non-core skill off from every core skill
    PreserveConnectivity,
}

/// Selection engine over the skill graph
#[derive(Debug, Clone, Copy)]
pub struct SkillGraph<'a> {
    catalog: &'a Catalog,
    policy: DeselectPolicy,
}

impl<'a> SkillGraph<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        SkillGraph {
            catalog,
            policy: DeselectPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DeselectPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DeselectPolicy {
        self.policy
    }

    /// Whether `select` would accept this skill
    pub fn can_select(&self, build: &PlayerBuild, id: SkillId) -> bool {
        self.check_select(build, id).is_ok()
    }

    fn check_select(&self, build: &PlayerBuild, id: SkillId) -> Result<&'a SkillNode, Rejection> {
        let node = self.catalog.skill(id).ok_or(Rejection::UnknownSkill(id))?;

        if build.has_skill(id) {
            return Err(Rejection::AlreadySelected(id));
        }

        if build.selected_skills.is_empty() && node.is_core() {
            return Ok(node);
        }

        if node.connections.iter().any(|n| build.has_skill(*n)) {
            Ok(node)
        } else {
            Err(Rejection::NotConnected(id))
        }
    }

    pub fn select(&self, build: &mut PlayerBuild, id: SkillId) -> Result<(), Rejection> {
        if let Err(rejection) = self.check_select(build, id) {
            debug!(skill = id, %rejection, "skill selection rejected");
            return Err(rejection);
        }
        build.selected_skills.insert(id);
        debug!(skill = id, "skill selected");
        Ok(())
    }

    pub fn deselect(&self, build: &mut PlayerBuild, id: SkillId) -> Result<(), Rejection> {
        if !build.has_skill(id) {
            let rejection = if self.catalog.skill(id).is_some() {
                Rejection::NotSelected(id)
            } else {
                Rejection::UnknownSkill(id)
            };
            debug!(skill = id, %rejection, "skill deselection rejected");
            return Err(rejection);
        }

        if self.policy == DeselectPolicy::PreserveConnectivity {
            let stranded = self.newly_stranded(build, id);
            if !stranded.is_empty() {
                debug!(skill = id, ?stranded, "skill deselection would strand skills");
                return Err(Rejection::WouldStrand { skill: id, stranded });
            }
        }

        build.selected_skills.remove(&id);
        debug!(skill = id, "skill deselected");
        Ok(())
    }

    /// Select if unselected, otherwise deselect
    pub fn toggle(&self, build: &mut PlayerBuild, id: SkillId) -> Result<Toggle, Rejection> {
        if build.has_skill(id) {
            self.deselect(build, id).map(|_| Toggle::Deselected)
        } else {
            self.select(build, id).map(|_| Toggle::Selected)
        }
    }

    /// Selected non-core skills with no path to a selected core skill
    pub fn stranded(&self, selection: &BTreeSet<SkillId>) -> Vec<SkillId> {
        let mut visited: BTreeSet<SkillId> = BTreeSet::new();
        let mut queue: VecDeque<SkillId> = VecDeque::new();

        for id in selection {
            if self.catalog.skill(*id).is_some_and(|n| n.is_core()) {
                visited.insert(*id);
                queue.push_back(*id);
            }
        }

        while let Some(current) = queue.pop_front() {
            let Some(node) = self.catalog.skill(current) else {
                continue;
            };
            for neighbour in &node.connections {
                if selection.contains(neighbour) && visited.insert(*neighbour) {
                    queue.push_back(*neighbour);
                }
            }
        }

        selection
            .iter()
            .filter(|id| !visited.contains(*id))
            .copied()
            .collect()
    }

    /// Skills that are connected now but would be stranded once `id` is removed
    fn newly_stranded(&self, build: &PlayerBuild, id: SkillId) -> Vec<SkillId> {
        let before: BTreeSet<SkillId> = self.stranded(&build.selected_skills).into_iter().collect();

        let mut remaining = build.selected_skills.clone();
        remaining.remove(&id);

        self.stranded(&remaining)
            .into_iter()
            .filter(|s| !before.contains(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::catalog;

    fn selected(build: &PlayerBuild) -> Vec<SkillId> {
        build.selected_skills().iter().copied().collect()
    }

    #[test]
    fn test_first_pick_must_be_core() {
        let catalog = catalog();
        let graph = SkillGraph::new(&catalog);
        let mut build = PlayerBuild::new();

        assert!(!graph.can_select(&build, 1));
        assert_eq!(graph.select(&mut build, 1), Err(Rejection::NotConnected(1)));
        assert!(build.is_empty());

        assert!(graph.can_select(&build, 0));
        graph.select(&mut build, 0).unwrap();
        assert_eq!(selected(&build), vec![0]);
    }

    #[test]
    fn test_second_core_needs_connection() {
        let catalog = catalog();
        let graph = SkillGraph::new(&catalog);
        let mut build = PlayerBuild::new();
        graph.select(&mut build, 0).unwrap();

        // Core 7 is isolated: not a first pick any more, and not adjacent
        assert_eq!(graph.select(&mut build, 7), Err(Rejection::NotConnected(7)));
    }

    #[test]
    fn test_can_select_rules() {
        let catalog = catalog();
        let graph = SkillGraph::new(&catalog);
        let mut build = PlayerBuild::new();
        graph.select(&mut build, 0).unwrap();

        assert!(!graph.can_select(&build, 0), "already selected");
        assert!(graph.can_select(&build, 1));
        assert!(graph.can_select(&build, 2));
        assert!(!graph.can_select(&build, 3), "no selected neighbour");
        assert!(!graph.can_select(&build, 99), "unknown id");
    }

    #[test]
    fn test_walk_the_chain() {
        let catalog = catalog();
        let graph = SkillGraph::new(&catalog);
        let mut build = PlayerBuild::new();
        for id in [0, 1, 3, 4, 5, 6] {
            graph.select(&mut build, id).unwrap();
        }
        assert_eq!(selected(&build), vec![0, 1, 3, 4, 5, 6]);
        assert!(graph.stranded(build.selected_skills()).is_empty());
    }

    #[test]
    fn test_select_rejects_duplicate() {
        let catalog = catalog();
        let graph = SkillGraph::new(&catalog);
        let mut build = PlayerBuild::new();
        graph.select(&mut build, 0).unwrap();
        assert_eq!(graph.select(&mut build, 0), Err(Rejection::AlreadySelected(0)));
    }

    #[test]
    fn test_permissive_deselect_strands() {
        let catalog = catalog();
        let graph = SkillGraph::new(&catalog);
        let mut build = PlayerBuild::new();
        for id in [0, 1, 3] {
            graph.select(&mut build, id).unwrap();
        }

        graph.deselect(&mut build, 1).unwrap();
        assert_eq!(selected(&build), vec![0, 3]);
        assert_eq!(graph.stranded(build.selected_skills()), vec![3]);
    }

    #[test]
    fn test_strict_deselect_refuses_stranding() {
        let catalog = catalog();
        let graph = SkillGraph::new(&catalog).with_policy(DeselectPolicy::PreserveConnectivity);
        let mut build = PlayerBuild::new();
        for id in [0, 1, 3] {
            graph.select(&mut build, id).unwrap();
        }

        assert_eq!(
            graph.deselect(&mut build, 1),
            Err(Rejection::WouldStrand {
                skill: 1,
                stranded: vec![3]
            })
        );
        assert_eq!(selected(&build), vec![0, 1, 3]);

        // Leaves come off freely
        graph.deselect(&mut build, 3).unwrap();
        graph.deselect(&mut build, 1).unwrap();
        assert_eq!(selected(&build), vec![0]);
    }

    #[test]
    fn test_strict_deselect_allows_alternate_core_path() {
        let catalog = catalog();
        let graph = SkillGraph::new(&catalog).with_policy(DeselectPolicy::PreserveConnectivity);
        let mut build = PlayerBuild::new();
        for id in [0, 1, 3, 4, 5] {
            graph.select(&mut build, id).unwrap();
        }

        // 3 and 4 still reach core 5 without 1
        graph.deselect(&mut build, 1).unwrap();
        assert_eq!(selected(&build), vec![0, 3, 4, 5]);
    }

    #[test]
    fn test_strict_deselect_ignores_already_stranded() {
        let catalog = catalog();
        let permissive = SkillGraph::new(&catalog);
        let strict = SkillGraph::new(&catalog).with_policy(DeselectPolicy::PreserveConnectivity);
        let mut build = PlayerBuild::new();
        for id in [0, 2, 1, 3] {
            permissive.select(&mut build, id).unwrap();
        }
        permissive.deselect(&mut build, 1).unwrap();
        assert_eq!(permissive.stranded(build.selected_skills()), vec![3]);

        // Removing 2 strands nothing new
        strict.deselect(&mut build, 2).unwrap();
        assert_eq!(selected(&build), vec![0, 3]);
    }

    #[test]
    fn test_last_core_can_always_go() {
        let catalog = catalog();
        let graph = SkillGraph::new(&catalog).with_policy(DeselectPolicy::PreserveConnectivity);
        let mut build = PlayerBuild::new();
        graph.select(&mut build, 0).unwrap();
        graph.deselect(&mut build, 0).unwrap();
        assert!(build.is_empty());
    }

    #[test]
    fn test_deselect_unselected() {
        let catalog = catalog();
        let graph = SkillGraph::new(&catalog);
        let mut build = PlayerBuild::new();
        assert_eq!(graph.deselect(&mut build, 2), Err(Rejection::NotSelected(2)));
        assert_eq!(graph.deselect(&mut build, 42), Err(Rejection::UnknownSkill(42)));
    }

    #[test]
    fn test_toggle() {
        let catalog = catalog();
        let graph = SkillGraph::new(&catalog);
        let mut build = PlayerBuild::new();
        assert_eq!(graph.toggle(&mut build, 7), Ok(Toggle::Selected));
        assert_eq!(graph.toggle(&mut build, 8), Ok(Toggle::Selected));
        assert_eq!(graph.toggle(&mut build, 8), Ok(Toggle::Deselected));
        assert_eq!(graph.toggle(&mut build, 9), Err(Rejection::NotConnected(9)));
        assert_eq!(selected(&build), vec![7]);
    }

    #[test]
    fn test_select_deselect_round_trip_both_policies() {
        let catalog = catalog();
        for policy in [DeselectPolicy::Permissive, DeselectPolicy::PreserveConnectivity] {
            let graph = SkillGraph::new(&catalog).with_policy(policy);
            let mut build = PlayerBuild::new();
            graph.select(&mut build, 0).unwrap();
            graph.select(&mut build, 1).unwrap();
            let before = build.clone();

            graph.select(&mut build, 3).unwrap();
            graph.deselect(&mut build, 3).unwrap();
            assert_eq!(build, before, "policy {:?}", policy);
        }
    }
}
