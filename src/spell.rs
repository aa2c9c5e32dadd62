//! Immutable spell list definitions.
//!
//! Spells carry ordered ranks; each rank names the talent-point total that
//! unlocks it. Grouping by first-rank threshold drives display ordering.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One purchasable rank of a spell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellRank {
    pub rank: u32,
    #[serde(default)]
    pub description: String,
    /// Talent points (not spell points) that must be spent before this rank
    /// can be purchased.
    pub talent_points_required: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    pub id: String,
    pub name: String,
    pub ranks: Vec<SpellRank>,
}

impl Spell {
    /// Threshold of the spell's first rank.
    pub fn base_threshold(&self) -> u32 {
        self.ranks
            .first()
            .map(|r| r.talent_points_required)
            .unwrap_or(0)
    }
}

/// A class's full spell list, with its own point budget independent of the
/// talent tree's.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub spells: Vec<Spell>,
    pub max_points: u32,
}

/// Spells sharing a first-rank unlock threshold.
#[derive(Debug)]
pub struct SpellGroup<'a> {
    pub points_required: u32,
    pub spells: Vec<&'a Spell>,
}

impl SpellList {
    /// Empty list used as the placeholder definition.
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: String::new(),
            description: String::new(),
            spells: Vec::new(),
            max_points: 0,
        }
    }

    pub fn spell(&self, id: &str) -> Option<&Spell> {
        self.spells.iter().find(|s| s.id == id)
    }

    /// Group spells by first-rank threshold, ascending. Definition order is
    /// preserved within a group.
    pub fn grouped(&self) -> Vec<SpellGroup<'_>> {
        let mut groups: BTreeMap<u32, Vec<&Spell>> = BTreeMap::new();
        for spell in &self.spells {
            groups.entry(spell.base_threshold()).or_default().push(spell);
        }
        groups
            .into_iter()
            .map(|(points_required, spells)| SpellGroup {
                points_required,
                spells,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(id: &str, thresholds: &[u32]) -> Spell {
        Spell {
            id: id.into(),
            name: id.into(),
            ranks: thresholds
                .iter()
                .enumerate()
                .map(|(i, &t)| SpellRank {
                    rank: i as u32 + 1,
                    description: String::new(),
                    talent_points_required: t,
                })
                .collect(),
        }
    }

    #[test]
    fn test_grouped_ascending_stable() {
        let list = SpellList {
            id: "arcane".into(),
            name: "Arcane".into(),
            description: String::new(),
            spells: vec![
                spell("blink", &[10]),
                spell("bolt", &[0, 5]),
                spell("barrier", &[10, 20]),
                spell("spark", &[0]),
            ],
            max_points: 10,
        };

        let groups = list.grouped();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].points_required, 0);
        assert_eq!(groups[1].points_required, 10);
        // definition order within each group
        let ids: Vec<_> = groups[0].spells.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["bolt", "spark"]);
        let ids: Vec<_> = groups[1].spells.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["blink", "barrier"]);
    }
}
