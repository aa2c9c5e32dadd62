//! Class metadata and the per-class definition bundle.

use serde::{Deserialize, Serialize};

use crate::spell::SpellList;
use crate::talent::TalentTree;

/// Class metadata shown in the class picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_icon_color")]
    pub icon_color: String,
}

fn default_icon_color() -> String {
    "#999999".into()
}

impl ClassInfo {
    /// Minimal metadata for a class whose metadata file cannot be read.
    pub fn placeholder(class_id: &str) -> Self {
        let mut name = class_id.to_string();
        if let Some(first) = name.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        Self {
            id: class_id.to_string(),
            name,
            description: "Class description unavailable".into(),
            icon_color: default_icon_color(),
        }
    }
}

/// Everything one class contributes to a build session.
#[derive(Debug, Clone)]
pub struct ClassDefinition {
    pub info: ClassInfo,
    pub talents: TalentTree,
    pub spells: SpellList,
}

impl ClassDefinition {
    /// Empty definition for a class whose data failed to load. The engines
    /// have no representation for "nothing loaded", so the loading boundary
    /// hands them an empty tree and list instead.
    pub fn placeholder(class_id: &str) -> Self {
        Self {
            info: ClassInfo::placeholder(class_id),
            talents: TalentTree::empty(class_id),
            spells: SpellList::empty(class_id),
        }
    }
}
