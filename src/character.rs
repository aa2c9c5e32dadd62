//! Session wiring for the active class.
//!
//! A [`CharacterBuild`] owns one class's two engines and both allocation
//! states, and forwards the talent engine's points-spent total into every
//! spell-engine call. Switching classes is a hard reset; nothing migrates.

use crate::class::{ClassDefinition, ClassInfo};
use crate::spell_state::{SpellCommand, SpellEngine, SpellState};
use crate::talent_state::{TalentCommand, TalentEngine, TalentState};

/// The active class's engines plus allocation state.
///
/// All mutation goes through `&mut self`, so commands against one build are
/// serialized by construction.
pub struct CharacterBuild {
    info: ClassInfo,
    talent_engine: TalentEngine,
    spell_engine: SpellEngine,
    talent_state: TalentState,
    spell_state: SpellState,
}

impl CharacterBuild {
    pub fn new(definition: ClassDefinition) -> Self {
        let talent_engine = TalentEngine::new(definition.talents);
        let spell_engine = SpellEngine::new(definition.spells);
        let talent_state = talent_engine.fresh_state();
        let spell_state = spell_engine.fresh_state();
        Self {
            info: definition.info,
            talent_engine,
            spell_engine,
            talent_state,
            spell_state,
        }
    }

    /// Hard reset onto a new class definition. Both allocation states are
    /// discarded and recreated.
    pub fn switch_class(&mut self, definition: ClassDefinition) {
        *self = Self::new(definition);
    }

    pub fn info(&self) -> &ClassInfo {
        &self.info
    }

    pub fn talent_engine(&self) -> &TalentEngine {
        &self.talent_engine
    }

    pub fn spell_engine(&self) -> &SpellEngine {
        &self.spell_engine
    }

    pub fn talent_state(&self) -> &TalentState {
        &self.talent_state
    }

    pub fn spell_state(&self) -> &SpellState {
        &self.spell_state
    }

    /// Talent points spent so far, the scalar every spell-engine call
    /// receives.
    pub fn talent_points_spent(&self) -> u32 {
        self.talent_state.total_points_spent
    }

    pub fn is_talent_available(&self, id: &str) -> bool {
        self.talent_engine.is_available(&self.talent_state, id)
    }

    /// Availability of a spell's next rank at the current talent total.
    pub fn is_spell_available(&self, id: &str) -> bool {
        self.spell_engine
            .is_rank_available(&self.spell_state, id, self.talent_points_spent())
    }

    pub fn talent_command(&mut self, command: &TalentCommand) {
        self.talent_state = self.talent_engine.apply(&self.talent_state, command);
    }

    /// Spell commands receive the current talent total automatically.
    pub fn spell_command(&mut self, command: &SpellCommand) {
        let talent_points = self.talent_points_spent();
        self.spell_state = self
            .spell_engine
            .apply(&self.spell_state, command, talent_points);
    }
}
