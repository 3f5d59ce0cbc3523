use crate::character::{Ability, StateChanges};
use serde::{Deserialize, Serialize};

// Fence markers the generator is instructed to wrap its payload in. The
// payload is the substring between the first opening marker and the last
// closing fence in the reply.
pub const JSON_BLOCK_START: &str = "```json";
pub const JSON_BLOCK_END: &str = "```";

// Structured payload the generator emits for every turn. Everything except
// the narration text is optional and defaults to "no change".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResponse {
    pub story: String,
    #[serde(default)]
    pub require_roll: bool,
    #[serde(default)]
    pub roll_stat: Option<Ability>,
    #[serde(flatten)]
    pub changes: StateChanges,
    #[serde(default)]
    pub new_location: Option<String>,
    #[serde(default)]
    pub new_scenario_state: Option<String>,
    #[serde(default)]
    pub new_scene_id: Option<String>, // Honored on action turns only.
}

impl TurnResponse {
    // Displayable payload standing in for generator output that could not be
    // decoded. No roll, no state changes; the raw text is echoed for the player.
    pub fn fallback(raw: &str) -> Self {
        TurnResponse {
            story: format!("GM: AI 응답 파싱 오류. 응답 내용: {raw}"),
            require_roll: false,
            roll_stat: None,
            changes: StateChanges::default(),
            new_location: None,
            new_scenario_state: None,
            new_scene_id: None,
        }
    }
}

// Outcome of decoding generator output. Decoding never fails upward: garbled
// output degrades to a fallback payload the caller can still display.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedTurn {
    Structured(TurnResponse),
    Fallback(TurnResponse),
}

impl ParsedTurn {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ParsedTurn::Fallback(_))
    }

    pub fn response(&self) -> &TurnResponse {
        match self {
            ParsedTurn::Structured(response) | ParsedTurn::Fallback(response) => response,
        }
    }

    pub fn into_response(self) -> TurnResponse {
        match self {
            ParsedTurn::Structured(response) | ParsedTurn::Fallback(response) => response,
        }
    }
}

// Locate and decode the fenced JSON payload in raw generator output.
pub fn parse_generator_output(raw: &str) -> ParsedTurn {
    match extract_payload(raw).and_then(|payload| serde_json::from_str::<TurnResponse>(payload).ok()) {
        Some(response) => ParsedTurn::Structured(response),
        None => {
            log::error!("failed to parse generator output: {raw}");
            ParsedTurn::Fallback(TurnResponse::fallback(raw))
        }
    }
}

fn extract_payload(raw: &str) -> Option<&str> {
    let start = raw.find(JSON_BLOCK_START)? + JSON_BLOCK_START.len();
    let end = raw.rfind(JSON_BLOCK_END)?;
    if end <= start {
        return None;
    }
    Some(raw[start..end].trim())
}
