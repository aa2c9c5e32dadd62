//! Talent allocation engine.
//!
//! Pure state transitions over an immutable [`TalentTree`]: every operation
//! takes the current [`TalentState`] and returns the next one. Disallowed
//! commands return the state unchanged rather than an error, so callers that
//! need to distinguish "rejected" from "redundant" query
//! [`TalentEngine::is_available`] first.

use std::collections::HashMap;

use tracing::debug;

use crate::talent::{DependentsIndex, TalentTree};

/// Point allocation for one tree. Created fresh on every class switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalentState {
    /// Tree this state belongs to.
    pub tree_id: String,
    /// Points invested per node. A node with zero points has no entry.
    pub allocated: HashMap<String, u32>,
    /// Sum of all allocated values.
    pub total_points_spent: u32,
    /// Highest tier whose point gate is currently satisfied.
    pub tier_unlocked: u32,
}

impl TalentState {
    /// Empty allocation at tier 1.
    pub fn new(tree_id: &str) -> Self {
        Self {
            tree_id: tree_id.to_string(),
            allocated: HashMap::new(),
            total_points_spent: 0,
            tier_unlocked: 1,
        }
    }

    /// Points currently invested in `id` (0 when absent).
    pub fn points_in(&self, id: &str) -> u32 {
        self.allocated.get(id).copied().unwrap_or(0)
    }
}

/// Replayable command form of the engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TalentCommand {
    AddPoint(String),
    RemovePoint(String),
    Reset(String),
    ResetAll,
}

/// Allocation rules for one talent tree.
///
/// Owns the immutable tree definition plus the dependents index built from
/// it. Holds no allocation state of its own.
pub struct TalentEngine {
    tree: TalentTree,
    dependents: DependentsIndex,
}

impl TalentEngine {
    /// Install a tree definition. The dependents index is built once here.
    pub fn new(tree: TalentTree) -> Self {
        let dependents = DependentsIndex::build(&tree);
        Self { tree, dependents }
    }

    pub fn tree(&self) -> &TalentTree {
        &self.tree
    }

    /// Fresh state for this tree.
    pub fn fresh_state(&self) -> TalentState {
        TalentState::new(&self.tree.id)
    }

    /// A node is available when its tier is unlocked and every prerequisite
    /// is fully invested. Unknown ids are never available.
    pub fn is_available(&self, state: &TalentState, id: &str) -> bool {
        let Some(node) = self.tree.node(id) else {
            return false;
        };
        if node.tier > state.tier_unlocked {
            return false;
        }
        node.prereq_ids.iter().all(|prereq_id| {
            self.tree
                .node(prereq_id)
                .is_some_and(|prereq| state.points_in(prereq_id) >= prereq.max_points)
        })
    }

    /// Invest one point. No-op when the node is capped, unavailable, or the
    /// tree budget is exhausted.
    pub fn add_point(&self, state: &TalentState, id: &str) -> TalentState {
        let Some(node) = self.tree.node(id) else {
            return state.clone();
        };
        let current = state.points_in(id);
        if current >= node.max_points
            || !self.is_available(state, id)
            || state.total_points_spent >= self.tree.max_points
        {
            debug!(node = id, current, "add_point rejected");
            return state.clone();
        }
        let mut next = state.clone();
        next.allocated.insert(id.to_string(), current + 1);
        next.total_points_spent += 1;
        next.tier_unlocked = self.tier_for(next.total_points_spent);
        next
    }

    /// Withdraw one point. No-op at zero points, and refused while any
    /// directly dependent node holds points and the decrement would leave
    /// this node below full investment; [`Self::reset_talent`] is the only
    /// way out of that state.
    pub fn remove_point(&self, state: &TalentState, id: &str) -> TalentState {
        let Some(node) = self.tree.node(id) else {
            return state.clone();
        };
        let current = state.points_in(id);
        if current == 0 {
            return state.clone();
        }
        let active_dependent = self
            .dependents
            .direct_dependents(id)
            .iter()
            .any(|dep| state.points_in(dep) > 0);
        if active_dependent && current - 1 < node.max_points {
            debug!(node = id, "remove_point rejected: invested dependents");
            return state.clone();
        }
        let mut next = state.clone();
        if current == 1 {
            next.allocated.remove(id);
        } else {
            next.allocated.insert(id.to_string(), current - 1);
        }
        next.total_points_spent -= 1;
        next.tier_unlocked = self.tier_for(next.total_points_spent);
        next
    }

    /// Zero a node and every node transitively depending on it, in one
    /// atomic step.
    pub fn reset_talent(&self, state: &TalentState, id: &str) -> TalentState {
        let mut next = state.clone();
        let mut removed = 0;
        if let Some(points) = next.allocated.remove(id) {
            removed += points;
        }
        for dependent in self.dependents.transitive_dependents(id) {
            if let Some(points) = next.allocated.remove(&dependent) {
                removed += points;
            }
        }
        next.total_points_spent -= removed;
        next.tier_unlocked = self.tier_for(next.total_points_spent);
        next
    }

    /// Fresh state for the same tree, regardless of prior allocation.
    pub fn reset_all(&self, _state: &TalentState) -> TalentState {
        self.fresh_state()
    }

    /// Both endpoints of a prerequisite edge hold points. Used for arrow
    /// highlighting only, never for gating.
    pub fn is_connection_active(&self, state: &TalentState, from: &str, to: &str) -> bool {
        state.points_in(from) > 0 && state.points_in(to) > 0
    }

    /// Apply a command, returning the next state.
    pub fn apply(&self, state: &TalentState, command: &TalentCommand) -> TalentState {
        match command {
            TalentCommand::AddPoint(id) => self.add_point(state, id),
            TalentCommand::RemovePoint(id) => self.remove_point(state, id),
            TalentCommand::Reset(id) => self.reset_talent(state, id),
            TalentCommand::ResetAll => self.reset_all(state),
        }
    }

    /// Highest tier unlocked at a given point total:
    /// `total / points_per_tier + 1`, clamped to `1..=total_tiers`.
    /// Recomputed after every mutation, never cached independently.
    fn tier_for(&self, total_points_spent: u32) -> u32 {
        (total_points_spent / self.tree.points_per_tier + 1).clamp(1, self.tree.total_tiers)
    }
}
