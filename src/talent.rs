//! Immutable talent tree definitions.
//!
//! Trees deserialize from per-class `talents.json` files. Prerequisite edges
//! must form a DAG; the loader validates that before a tree reaches an
//! engine. [`DependentsIndex`] is the reverse adjacency over those edges,
//! built once per tree so cascading resets walk the graph directly instead
//! of re-scanning the node list.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One allocatable talent in a tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Row index, 1-based. Unlocked by cumulative points spent in the tree.
    pub tier: u32,
    /// Layout hint only; never consulted by allocation logic.
    #[serde(default)]
    pub column: u32,
    pub max_points: u32,
    /// Talents that must be fully invested before this one opens.
    #[serde(default)]
    pub prereq_ids: Vec<String>,
}

/// A class's full talent tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentTree {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub nodes: Vec<TalentNode>,
    /// Total point budget for the tree.
    pub max_points: u32,
    /// Cumulative points required per tier advance.
    pub points_per_tier: u32,
    pub total_tiers: u32,
}

impl TalentTree {
    /// Empty tree used as the placeholder definition.
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: String::new(),
            description: String::new(),
            nodes: Vec::new(),
            max_points: 0,
            points_per_tier: 1,
            total_tiers: 1,
        }
    }

    pub fn node(&self, id: &str) -> Option<&TalentNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// All (prereq, dependent) edges.
    pub fn prereq_edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .iter()
            .flat_map(|n| n.prereq_ids.iter().map(move |p| (p.as_str(), n.id.as_str())))
    }
}

/// Reverse adjacency over prerequisite edges: node id → ids of nodes that
/// directly list it as a prerequisite.
#[derive(Debug, Clone, Default)]
pub struct DependentsIndex {
    direct: HashMap<String, Vec<String>>,
}

impl DependentsIndex {
    pub fn build(tree: &TalentTree) -> Self {
        let mut direct: HashMap<String, Vec<String>> = HashMap::new();
        for (prereq, dependent) in tree.prereq_edges() {
            direct
                .entry(prereq.to_string())
                .or_default()
                .push(dependent.to_string());
        }
        Self { direct }
    }

    /// Nodes that directly require `id`.
    pub fn direct_dependents(&self, id: &str) -> &[String] {
        self.direct.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Transitive closure of dependents, excluding `id` itself. The visited
    /// set keeps traversal bounded even on malformed cyclic data.
    pub fn transitive_dependents(&self, id: &str) -> Vec<String> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = self
            .direct_dependents(id)
            .iter()
            .map(String::as_str)
            .collect();
        let mut out = Vec::new();
        while let Some(next) = stack.pop() {
            if !visited.insert(next) {
                continue;
            }
            out.push(next.to_string());
            stack.extend(self.direct_dependents(next).iter().map(String::as_str));
        }
        out
    }
}
