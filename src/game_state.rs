use crate::character::Character;
use crate::dice::SkillRoll;
use serde::{Deserialize, Serialize};

// Presentation prefix on GM-authored log lines; the client renders it as-is.
pub const GM_TAG: &str = "<strong>GM:</strong>";
// Prefix on player-authored log lines.
pub const PLAYER_TAG: &str = "플레이어:";

// Per-session mutable game state: the character record, the append-only
// narration log, and the single outstanding roll if one is pending. The log
// grows unbounded within a session; only its most recent slice feeds the
// generator context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub character: Character,
    #[serde(default)]
    pub game_log: Vec<String>,
    #[serde(default)]
    pub pending_roll: Option<String>,
}

impl SessionState {
    pub fn log_player_action(&mut self, action: &str) {
        self.game_log.push(format!("{PLAYER_TAG} {action}"));
    }

    pub fn log_gm_story(&mut self, story: &str) {
        self.game_log.push(format!("{GM_TAG} {story}"));
    }

    pub fn log_roll_summary(&mut self, summary: &str) {
        self.game_log.push(summary.to_string());
    }
}

// Log line recording a resolved skill check with its full dice breakdown.
pub fn format_roll_summary(stat_name_ko: &str, roll: &SkillRoll) -> String {
    format!(
        "GM (판정): {stat_name_ko} 판정 (주사위: {}+{}, 수정치: {}, 총합: {}) 결과 - {}",
        roll.dice1, roll.dice2, roll.modifier, roll.total, roll.outcome
    )
}
