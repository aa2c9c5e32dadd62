//! Class definition loading and validation.
//!
//! Reads `classes/<id>/{metadata,talents,spells}.json` under a data
//! directory. Metadata failures degrade to a placeholder; talent/spell
//! failures degrade to an empty definition so the engines always receive
//! something valid. Validation here is the only place malformed data
//! (duplicate ids, dangling or cyclic prerequisites) is caught; the
//! engines assume definitions are sound and never re-validate.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::class::{ClassDefinition, ClassInfo};
use crate::error::{Error, Result};
use crate::spell::SpellList;
use crate::talent::TalentTree;

/// Loads class definitions from a data directory.
pub struct ClassLoader {
    data_dir: PathBuf,
}

impl ClassLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn class_dir(&self, class_id: &str) -> PathBuf {
        self.data_dir.join("classes").join(class_id)
    }

    /// Discover class ids by their metadata files, sorted for stable output.
    pub fn list_classes(&self) -> Vec<String> {
        let pattern = self
            .data_dir
            .join("classes")
            .join("*")
            .join("metadata.json");
        let mut ids = Vec::new();
        if let Ok(paths) = glob::glob(&pattern.to_string_lossy()) {
            for path in paths.flatten() {
                let id = path
                    .parent()
                    .and_then(|p| p.file_name())
                    .and_then(|n| n.to_str());
                if let Some(id) = id {
                    ids.push(id.to_string());
                }
            }
        }
        ids.sort();
        ids
    }

    /// Class metadata, degrading to a placeholder on any failure.
    pub fn load_metadata(&self, class_id: &str) -> ClassInfo {
        let path = self.class_dir(class_id).join("metadata.json");
        match read_json::<ClassInfo>(&path) {
            Ok(info) => info,
            Err(e) => {
                warn!(class = class_id, error = %e, "metadata unavailable, using placeholder");
                ClassInfo::placeholder(class_id)
            }
        }
    }

    /// Talent tree for a class, validated.
    pub fn load_talents(&self, class_id: &str) -> Result<TalentTree> {
        let tree: TalentTree = read_json(&self.class_dir(class_id).join("talents.json"))?;
        validate_tree(&tree)?;
        Ok(tree)
    }

    /// Spell list for a class, validated.
    pub fn load_spells(&self, class_id: &str) -> Result<SpellList> {
        let list: SpellList = read_json(&self.class_dir(class_id).join("spells.json"))?;
        validate_spells(&list)?;
        Ok(list)
    }

    /// Full definition bundle for one class. Talent or spell failures
    /// degrade to an empty placeholder rather than surfacing an error.
    pub fn load_class(&self, class_id: &str) -> ClassDefinition {
        let info = self.load_metadata(class_id);
        let talents = match self.load_talents(class_id) {
            Ok(tree) => tree,
            Err(e) => {
                warn!(class = class_id, error = %e, "talents unavailable, using empty tree");
                TalentTree::empty(class_id)
            }
        };
        let spells = match self.load_spells(class_id) {
            Ok(list) => list,
            Err(e) => {
                warn!(class = class_id, error = %e, "spells unavailable, using empty list");
                SpellList::empty(class_id)
            }
        };
        info!(
            class = class_id,
            talents = talents.nodes.len(),
            spells = spells.spells.len(),
            "class definition loaded"
        );
        ClassDefinition {
            info,
            talents,
            spells,
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Check the authoring invariants the talent engine relies on.
pub fn validate_tree(tree: &TalentTree) -> Result<()> {
    if tree.points_per_tier == 0 || tree.total_tiers == 0 {
        return Err(Error::InvalidTierConfig(tree.id.clone()));
    }
    let mut ids = HashSet::new();
    for node in &tree.nodes {
        if !ids.insert(node.id.as_str()) {
            return Err(Error::DuplicateId {
                kind: "talent",
                id: node.id.clone(),
            });
        }
    }
    for node in &tree.nodes {
        for prereq in &node.prereq_ids {
            if !ids.contains(prereq.as_str()) {
                return Err(Error::DanglingPrereq {
                    node: node.id.clone(),
                    prereq: prereq.clone(),
                });
            }
        }
    }
    check_acyclic(tree)
}

/// Check spell ids are unique.
pub fn validate_spells(list: &SpellList) -> Result<()> {
    let mut ids = HashSet::new();
    for spell in &list.spells {
        if !ids.insert(spell.id.as_str()) {
            return Err(Error::DuplicateId {
                kind: "spell",
                id: spell.id.clone(),
            });
        }
    }
    Ok(())
}

/// Kahn's algorithm over prereq → dependent edges. A node left with
/// unresolved prerequisites after the sweep sits on a cycle.
fn check_acyclic(tree: &TalentTree) -> Result<()> {
    let mut in_degree: HashMap<&str, usize> = tree
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.prereq_ids.len()))
        .collect();
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    for (prereq, dependent) in tree.prereq_edges() {
        dependents.entry(prereq).or_default().push(dependent);
    }

    let mut queue: Vec<&str> = in_degree
        .iter()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(&id, _)| id)
        .collect();
    let mut processed = 0;
    while let Some(id) = queue.pop() {
        processed += 1;
        for &dependent in dependents.get(id).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(dependent) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push(dependent);
                }
            }
        }
    }

    if processed < tree.nodes.len() {
        let stuck = in_degree
            .iter()
            .find(|&(_, &degree)| degree > 0)
            .map(|(&id, _)| id.to_string())
            .unwrap_or_default();
        return Err(Error::PrereqCycle(stuck));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::talent::TalentNode;

    fn node(id: &str, prereqs: &[&str]) -> TalentNode {
        TalentNode {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            tier: 1,
            column: 0,
            max_points: 1,
            prereq_ids: prereqs.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn tree_with(nodes: Vec<TalentNode>) -> TalentTree {
        TalentTree {
            id: "test".into(),
            name: "Test".into(),
            description: String::new(),
            nodes,
            max_points: 10,
            points_per_tier: 5,
            total_tiers: 2,
        }
    }

    #[test]
    fn test_validate_ok() {
        let tree = tree_with(vec![node("a", &[]), node("b", &["a"])]);
        assert!(validate_tree(&tree).is_ok());
    }

    #[test]
    fn test_validate_duplicate_id() {
        let tree = tree_with(vec![node("a", &[]), node("a", &[])]);
        assert!(matches!(
            validate_tree(&tree),
            Err(Error::DuplicateId { kind: "talent", .. })
        ));
    }

    #[test]
    fn test_validate_dangling_prereq() {
        let tree = tree_with(vec![node("a", &["ghost"])]);
        assert!(matches!(
            validate_tree(&tree),
            Err(Error::DanglingPrereq { .. })
        ));
    }

    #[test]
    fn test_validate_cycle() {
        let tree = tree_with(vec![node("a", &["b"]), node("b", &["a"])]);
        assert!(matches!(validate_tree(&tree), Err(Error::PrereqCycle(_))));
    }

    #[test]
    fn test_validate_self_cycle() {
        let tree = tree_with(vec![node("a", &["a"])]);
        assert!(matches!(validate_tree(&tree), Err(Error::PrereqCycle(_))));
    }

    #[test]
    fn test_validate_zero_tier_gate() {
        let mut tree = tree_with(vec![node("a", &[])]);
        tree.points_per_tier = 0;
        assert!(matches!(
            validate_tree(&tree),
            Err(Error::InvalidTierConfig(_))
        ));
    }
}
