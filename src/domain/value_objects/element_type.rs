//! Element type tags and the preset state catalog

use serde::{Deserialize, Serialize};

/// The type of a physical element
///
/// Common escape-room object kinds get their own tag; anything else is
/// `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Room,
    Door,
    Key,
    Lock,
    Player,
    Staff,
    Custom,
}

impl ElementType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Room => "Room",
            Self::Door => "Door",
            Self::Key => "Key",
            Self::Lock => "Lock",
            Self::Player => "Player",
            Self::Staff => "Staff",
            Self::Custom => "Custom",
        }
    }

    /// Preset states commonly given to elements of this type.
    ///
    /// Editing surfaces use these to pre-populate the state list of a newly
    /// created element; the catalog itself carries no identifiers and no
    /// game-specific data.
    pub fn preset_states(&self) -> &'static [StatePreset] {
        match self {
            Self::Door => DOOR_PRESETS,
            Self::Lock => LOCK_PRESETS,
            _ => &[],
        }
    }
}

/// A template for a state an element of a given type usually has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatePreset {
    pub name: &'static str,
    pub description: &'static str,
}

const DOOR_PRESETS: &[StatePreset] = &[
    StatePreset {
        name: "Locked",
        description: "The door is locked and cannot be opened.",
    },
    StatePreset {
        name: "Unlocked",
        description: "The door is unlocked and can be opened.",
    },
];

const LOCK_PRESETS: &[StatePreset] = &[
    StatePreset {
        name: "Locked",
        description: "The lock is engaged.",
    },
    StatePreset {
        name: "Unlocked",
        description: "The lock is released.",
    },
];
