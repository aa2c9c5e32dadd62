//! Spell allocation engine.
//!
//! Ranks unlock strictly in order, gated by the talent engine's points-spent
//! total. That total arrives as an explicit parameter on every call; the
//! spell engine never reads talent state itself, and talents never depend on
//! spells.

use std::collections::HashMap;

use tracing::debug;

use crate::spell::SpellList;

/// Rank allocation for one spell list. Created fresh on every class switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellState {
    /// Spell list this state belongs to.
    pub list_id: String,
    /// Current rank per spell. A spell at rank 0 has no entry.
    pub allocated: HashMap<String, u32>,
    /// Spell points spent; one point per purchased rank.
    pub total_points_spent: u32,
}

impl SpellState {
    /// Empty allocation.
    pub fn new(list_id: &str) -> Self {
        Self {
            list_id: list_id.to_string(),
            allocated: HashMap::new(),
            total_points_spent: 0,
        }
    }

    /// Current rank of `id` (0 when absent).
    pub fn rank_of(&self, id: &str) -> u32 {
        self.allocated.get(id).copied().unwrap_or(0)
    }
}

/// Replayable command form of the engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpellCommand {
    AddRank(String),
    Reset(String),
    ResetAll,
}

/// Allocation rules for one spell list. Holds no allocation state of its
/// own.
pub struct SpellEngine {
    list: SpellList,
}

impl SpellEngine {
    pub fn new(list: SpellList) -> Self {
        Self { list }
    }

    pub fn list(&self) -> &SpellList {
        &self.list
    }

    /// Fresh state for this list.
    pub fn fresh_state(&self) -> SpellState {
        SpellState::new(&self.list.id)
    }

    /// The spell's next rank can be purchased given the talent points the
    /// caller has spent. False for unknown spells and maxed-out ranks.
    pub fn is_rank_available(
        &self,
        state: &SpellState,
        id: &str,
        talent_points_spent: u32,
    ) -> bool {
        let Some(spell) = self.list.spell(id) else {
            return false;
        };
        let next_rank = state.rank_of(id) + 1;
        let Some(rank) = spell.ranks.get(next_rank as usize - 1) else {
            return false;
        };
        talent_points_spent >= rank.talent_points_required
            && state.total_points_spent < self.list.max_points
    }

    /// Purchase the next rank. Ranks are strictly sequential; there is no
    /// way to jump to a non-adjacent rank.
    pub fn add_rank(&self, state: &SpellState, id: &str, talent_points_spent: u32) -> SpellState {
        if !self.is_rank_available(state, id, talent_points_spent) {
            debug!(spell = id, "add_rank rejected");
            return state.clone();
        }
        let mut next = state.clone();
        next.allocated.insert(id.to_string(), state.rank_of(id) + 1);
        next.total_points_spent += 1;
        next
    }

    /// Clear a spell back to rank 0, refunding every point it held. No-op at
    /// rank 0.
    pub fn reset_spell(&self, state: &SpellState, id: &str) -> SpellState {
        let mut next = state.clone();
        if let Some(rank) = next.allocated.remove(id) {
            next.total_points_spent -= rank;
        }
        next
    }

    /// Fresh state for the same list, regardless of prior allocation.
    pub fn reset_all(&self, _state: &SpellState) -> SpellState {
        self.fresh_state()
    }

    /// Apply a command, returning the next state.
    pub fn apply(
        &self,
        state: &SpellState,
        command: &SpellCommand,
        talent_points_spent: u32,
    ) -> SpellState {
        match command {
            SpellCommand::AddRank(id) => self.add_rank(state, id, talent_points_spent),
            SpellCommand::Reset(id) => self.reset_spell(state, id),
            SpellCommand::ResetAll => self.reset_all(state),
        }
    }
}
