use crate::character::Character;
use crate::game_state::GM_TAG;
use serde::Serialize;

// Sentinel for the first turn, before any GM narration exists.
pub const GAME_START_EVENT: &str = "게임 시작.";
// Sentinel reported when no threat keyword matches the scenario state.
pub const NO_THREATS: &str = "특별한 위협 없음.";
// Sentinel goal used while the scenario state is still empty.
pub const AWAITING_PLAYER_ACTION: &str = "플레이어의 다음 행동을 기다리는 중";

// Keywords in the scenario state that flag an unresolved threat.
const THREAT_KEYWORDS: [&str; 4] = ["추적", "위협", "전투", "다가오는"];

// Compact situational digest injected into every generator prompt. Recomputed
// fresh each turn from the character and the game log, never stored. It gives
// the generator a structured ground truth instead of raw log replay, which
// keeps the narration anchored to what actually happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorySummary {
    pub current_goal: String,
    pub last_key_event: String,
    pub unresolved_threats: Vec<String>,
    pub open_questions: Vec<String>,
}

// Derive the summary from the character record and the rolling game log.
pub fn build_summary(character: &Character, game_log: &[String]) -> StorySummary {
    // Most recent GM narration, with the presentation markup stripped.
    let last_key_event = game_log
        .iter()
        .rev()
        .find(|line| line.trim().starts_with("<strong>GM:"))
        .map(|line| line.replace(GM_TAG, "").trim().to_string())
        .unwrap_or_else(|| GAME_START_EVENT.to_string());

    // Keyword scan of the scenario state; a match reports the whole state
    // string as the threat.
    let scenario_state = character.current_scenario_state.to_lowercase();
    let unresolved_threats = if THREAT_KEYWORDS
        .iter()
        .any(|keyword| scenario_state.contains(keyword))
    {
        vec![character.current_scenario_state.clone()]
    } else {
        vec![NO_THREATS.to_string()]
    };

    let current_goal = if character.current_scenario_state.is_empty() {
        AWAITING_PLAYER_ACTION.to_string()
    } else {
        character.current_scenario_state.clone()
    };

    StorySummary {
        current_goal,
        last_key_event,
        unresolved_threats,
        // TODO: derive these from the scenario state instead of serving a
        // static illustrative pair.
        open_questions: vec![
            "다가오는 위협의 정체는 무엇인가?".to_string(),
            "이 통로는 어디로 이어지는가?".to_string(),
        ],
    }
}
