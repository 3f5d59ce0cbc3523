// Import necessary modules from external crates.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

// Define an enumeration for the five abilities every character is rated on.
// The lowercase string forms are the canonical identifiers used on the wire
// and in generator responses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Ability {
    Strength,
    Agility,
    Intelligence,
    Senses,
    Willpower,
}

impl Ability {
    // Localized display name, shown to the player alongside roll requests.
    pub fn korean_name(&self) -> &'static str {
        match self {
            Ability::Strength => "근력",
            Ability::Agility => "민첩",
            Ability::Intelligence => "지능",
            Ability::Senses => "감각",
            Ability::Willpower => "정신력",
        }
    }
}

fn default_stat() -> u8 {
    1
}

// Ability scores. A missing key deserializes to 1 rather than failing, so a
// partial stat block from the client is always usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default = "default_stat")]
    pub strength: u8,
    #[serde(default = "default_stat")]
    pub agility: u8,
    #[serde(default = "default_stat")]
    pub intelligence: u8,
    #[serde(default = "default_stat")]
    pub senses: u8,
    #[serde(default = "default_stat")]
    pub willpower: u8,
}

impl Default for Stats {
    fn default() -> Self {
        Stats {
            strength: 1,
            agility: 1,
            intelligence: 1,
            senses: 1,
            willpower: 1,
        }
    }
}

impl Stats {
    pub fn get(&self, ability: Ability) -> u8 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Agility => self.agility,
            Ability::Intelligence => self.intelligence,
            Ability::Senses => self.senses,
            Ability::Willpower => self.willpower,
        }
    }
}

// Maximum resources derived from the ability scores. Computed once at
// character creation and never recomputed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resources {
    pub max_hp: i32,
    pub max_sp: i32,
}

// Calculate maximum HP and SP from the ability scores.
pub fn calculate_resources(stats: &Stats) -> Resources {
    Resources {
        max_hp: 8 + 2 * i32::from(stats.strength),
        max_sp: 3 + 2 * i32::from(stats.willpower),
    }
}

// Modifier added to a two-die sum when checking against the given ability score.
pub fn get_modifier(stat_value: u8) -> i32 {
    if stat_value >= 3 {
        1
    } else if stat_value == 2 {
        0
    } else {
        -1
    }
}

// The bounded set of mutations a single turn may apply to a character.
// All fields default so a payload that omits them leaves the character alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateChanges {
    #[serde(default)]
    pub hp_change: i32,
    #[serde(default)]
    pub sp_change: i32,
    #[serde(default)]
    pub add_inventory: Vec<String>,
    #[serde(default)]
    pub remove_inventory: Vec<String>,
}

// Define a structure representing the player character record for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub stats: Stats,
    pub inventory: Vec<String>,
    pub hp: i32,
    #[serde(rename = "maxHp")]
    pub max_hp: i32,
    pub sp: i32,
    #[serde(rename = "maxSp")]
    pub max_sp: i32,
    pub location: String,
    pub current_scenario_state: String,
    pub description: String,
    pub scene_id: String, // Scene lock token; only changes when the narrative does.
}

impl Character {
    // Constructor for creating a new character. Resources start at their maximum.
    pub fn new(
        name: String,
        stats: Stats,
        inventory: Vec<String>,
        description: String,
        location: String,
        current_scenario_state: String,
        scene_id: String,
    ) -> Self {
        let resources = calculate_resources(&stats);
        // Duplicates in the caller-supplied inventory collapse immediately.
        let mut inventory = inventory;
        inventory.sort();
        inventory.dedup();
        Character {
            name,
            stats,
            inventory,
            hp: resources.max_hp,
            max_hp: resources.max_hp,
            sp: resources.max_sp,
            max_sp: resources.max_sp,
            location,
            current_scenario_state,
            description,
            scene_id,
        }
    }

    // Apply a turn's state delta. HP/SP are clamped into their valid range
    // whatever the delta magnitude; inventory adds are de-duplicated and kept
    // in a canonical sorted order; removes drop at most one matching entry and
    // silently ignore absent items. Absent or zero changes touch nothing.
    pub fn apply_changes(&mut self, changes: &StateChanges) {
        if changes.hp_change != 0 {
            self.hp = self.hp.saturating_add(changes.hp_change).clamp(0, self.max_hp);
        }
        if changes.sp_change != 0 {
            self.sp = self.sp.saturating_add(changes.sp_change).clamp(0, self.max_sp);
        }
        if !changes.add_inventory.is_empty() {
            self.inventory.extend(changes.add_inventory.iter().cloned());
            self.inventory.sort();
            self.inventory.dedup();
        }
        for item in &changes.remove_inventory {
            if let Some(position) = self.inventory.iter().position(|held| held == item) {
                self.inventory.remove(position);
            }
        }
        log::debug!("character state after changes: {self:?}");
    }
}

impl Default for Character {
    // The explorer served to a session that never created a character.
    fn default() -> Self {
        Character::new(
            "탐험가".to_string(),
            Stats::default(),
            Vec::new(),
            String::new(),
            "알 수 없는 장소".to_string(),
            String::new(),
            "UNKNOWN_SCENE".to_string(),
        )
    }
}
