//! Session-level behavior: talent totals feeding spell gating, and the
//! hard reset on class switch.

use talent_calc::character::CharacterBuild;
use talent_calc::class::{ClassDefinition, ClassInfo};
use talent_calc::spell::{Spell, SpellList, SpellRank};
use talent_calc::spell_state::SpellCommand;
use talent_calc::talent::{TalentNode, TalentTree};
use talent_calc::talent_state::TalentCommand;

fn definition(class_id: &str) -> ClassDefinition {
    ClassDefinition {
        info: ClassInfo::placeholder(class_id),
        talents: TalentTree {
            id: format!("{class_id}-tree"),
            name: "Tree".into(),
            description: String::new(),
            nodes: vec![TalentNode {
                id: "opener".into(),
                name: "Opener".into(),
                description: String::new(),
                tier: 1,
                column: 0,
                max_points: 5,
                prereq_ids: vec![],
            }],
            max_points: 5,
            points_per_tier: 5,
            total_tiers: 1,
        },
        spells: SpellList {
            id: format!("{class_id}-spells"),
            name: "Spells".into(),
            description: String::new(),
            spells: vec![Spell {
                id: "finisher".into(),
                name: "Finisher".into(),
                ranks: vec![
                    SpellRank {
                        rank: 1,
                        description: String::new(),
                        talent_points_required: 0,
                    },
                    SpellRank {
                        rank: 2,
                        description: String::new(),
                        talent_points_required: 2,
                    },
                ],
            }],
            max_points: 3,
        },
    }
}

#[test]
fn test_talent_total_gates_spell_ranks() {
    let mut build = CharacterBuild::new(definition("mage"));

    build.spell_command(&SpellCommand::AddRank("finisher".into()));
    assert_eq!(build.spell_state().rank_of("finisher"), 1);

    // rank 2 needs 2 talent points spent; none are
    assert!(!build.is_spell_available("finisher"));
    build.spell_command(&SpellCommand::AddRank("finisher".into()));
    assert_eq!(build.spell_state().rank_of("finisher"), 1);

    build.talent_command(&TalentCommand::AddPoint("opener".into()));
    build.talent_command(&TalentCommand::AddPoint("opener".into()));
    assert_eq!(build.talent_points_spent(), 2);

    assert!(build.is_spell_available("finisher"));
    build.spell_command(&SpellCommand::AddRank("finisher".into()));
    assert_eq!(build.spell_state().rank_of("finisher"), 2);
}

#[test]
fn test_spell_gate_reacts_to_talent_refund() {
    let mut build = CharacterBuild::new(definition("mage"));
    build.talent_command(&TalentCommand::AddPoint("opener".into()));
    build.talent_command(&TalentCommand::AddPoint("opener".into()));
    build.spell_command(&SpellCommand::AddRank("finisher".into()));
    assert!(build.is_spell_available("finisher"));

    build.talent_command(&TalentCommand::RemovePoint("opener".into()));
    // already-purchased ranks persist, but the next rank is gated again
    assert_eq!(build.spell_state().rank_of("finisher"), 1);
    assert!(!build.is_spell_available("finisher"));
}

#[test]
fn test_switch_class_is_a_hard_reset() {
    let mut build = CharacterBuild::new(definition("mage"));
    build.talent_command(&TalentCommand::AddPoint("opener".into()));
    build.spell_command(&SpellCommand::AddRank("finisher".into()));
    assert_eq!(build.talent_points_spent(), 1);

    build.switch_class(definition("warrior"));
    assert_eq!(build.info().id, "warrior");
    assert_eq!(build.talent_points_spent(), 0);
    assert!(build.talent_state().allocated.is_empty());
    assert!(build.spell_state().allocated.is_empty());
    assert_eq!(build.talent_state().tier_unlocked, 1);
    assert_eq!(build.talent_state().tree_id, "warrior-tree");
    assert_eq!(build.spell_state().list_id, "warrior-spells");
}

#[test]
fn test_placeholder_definition_is_inert_but_safe() {
    // A class whose data failed to load: every command is a no-op.
    let mut build = CharacterBuild::new(ClassDefinition::placeholder("shaman"));
    build.talent_command(&TalentCommand::AddPoint("anything".into()));
    build.spell_command(&SpellCommand::AddRank("anything".into()));
    build.talent_command(&TalentCommand::ResetAll);
    assert_eq!(build.talent_points_spent(), 0);
    assert_eq!(build.spell_state().total_points_spent, 0);
    assert_eq!(build.talent_state().tier_unlocked, 1);
}
