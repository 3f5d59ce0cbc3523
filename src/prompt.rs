use crate::character::{Ability, Character};
use crate::dice::SkillRoll;
use crate::summary::StorySummary;
use strum::IntoEnumIterator;

// Everything the roll prompt needs about the check being resolved.
pub struct RollContext<'a> {
    pub pending_action: &'a str,
    pub roll: &'a SkillRoll,
    pub stat_name_ko: &'a str,
}

// The exact response shape the generator must emit, fenced the same way the
// response parser expects to find it.
const RESPONSE_TEMPLATE: &str = r#"```json
{
    "story": "[ 여기에 다음 상황 묘사나 판정 요구를 작성합니다. ]",
    "require_roll": false,
    "roll_stat": null,
    "hp_change": 0,
    "sp_change": 0,
    "add_inventory": [],
    "remove_inventory": [],
    "new_location": null,
    "new_scenario_state": "[ 여기에 새로운 상황 요약을 작성합니다. ]",
    "new_scene_id": null
}
```"#;

const ROLL_RESPONSE_TEMPLATE: &str = r#"```json
{
    "story": "[ 여기에 주사위 굴림 결과에 따른 상세한 상황 묘사와 다음 질문을 작성합니다. ]",
    "require_roll": false,
    "roll_stat": null,
    "hp_change": 0,
    "sp_change": 0,
    "add_inventory": [],
    "remove_inventory": [],
    "new_location": null,
    "new_scenario_state": "[ 여기에 새로운 상황 요약을 작성합니다. ]",
    "new_scene_id": null
}
```"#;

// Closed enumeration of the valid roll_stat identifiers, quoted for the prompt.
fn roll_stat_enumeration() -> String {
    Ability::iter()
        .map(|ability| format!("\"{ability}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

fn summary_json(summary: &StorySummary) -> String {
    serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
}

// Instruction document for an action turn. The summary is declared the primary
// source of truth and the scene is locked to its current identifier.
pub fn build_action_prompt(
    character: &Character,
    summary: &StorySummary,
    player_action: &str,
) -> String {
    format!(
        r#"
# [CONTEXT SUMMARY - PRIMARY DIRECTIVE]
# You must base your response on the following structured summary of the current situation. This is your primary source of truth.
{summary_json}

# [SCENE LOCK - CRITICAL RULE]
# You are currently in Scene ID: "{scene_id}". Do not change the scene unless the player's action directly causes it.

# [NARRATIVE ANCHOR - ABSOLUTE PRIORITY]
# Your immediate task is to respond to the player's very last action based on the context above.
# 1. Player's Last Action: "{player_action}"
# 2. Based on the "current_goal" from the summary, decide if this action requires a dice roll.
# All your narrative output for the 'story' field in the JSON response MUST be in Korean.

# --- GM's Judgment Rules ---
# 1. **CRITICAL:** If you set "require_roll" to `true`, your "story" text MUST end with a clear call for a roll. (e.g., "...감각 판정이 필요합니다.")
# 2. The 'roll_stat' must be one of: {roll_stats}.
# 3. If the "current_goal" from the summary is resolved or significantly changed by the action, reflect this in the "new_scenario_state".

{response_template}
"#,
        summary_json = summary_json(summary),
        scene_id = character.scene_id,
        player_action = player_action,
        roll_stats = roll_stat_enumeration(),
        response_template = RESPONSE_TEMPLATE,
    )
}

// Instruction document for a roll turn. The roll already happened: the
// generator must resolve the single named pending action against the given
// outcome and never re-decide whether a roll was needed.
pub fn build_roll_prompt(summary: &StorySummary, context: &RollContext<'_>) -> String {
    let outcome = context.roll.outcome.korean_label();
    format!(
        r#"
# [CONTEXT SUMMARY - PRIMARY DIRECTIVE]
# You must base your response on the following structured summary of the current situation.
{summary_json}

# [ROLL CONTINUITY RULE - ABSOLUTE PRIORITY]
# Your response must be a direct description of the result of the following **specific action**.
# **Action Being Resolved:** "{pending_action}"
# **Dice Roll Result:** "{outcome}"
#
# ❌ Do NOT reference past events from the log. ONLY resolve the action above.
# ❌ The roll has already happened. Do NOT decide whether a roll is needed.
# Only describe "how this action ended".
# All your narrative output for the 'story' field in the JSON response MUST be in Korean.

# --- GM's Story Generation Rules ---
# 1. Describe the story in a way that fits the "{outcome}".
# 2. Clearly state how the **Action Being Resolved** led to the "{outcome}".
# 3. After describing the story, ask a question to guide the player's next action.

# --- Detailed Dice Roll Breakdown (for reference only) ---
# Total {total} (Dice 1: {dice1}, Dice 2: {dice2}, Stat: {stat_name_ko}, Modifier: {modifier})

{response_template}
"#,
        summary_json = summary_json(summary),
        pending_action = context.pending_action,
        outcome = outcome,
        total = context.roll.total,
        dice1 = context.roll.dice1,
        dice2 = context.roll.dice2,
        stat_name_ko = context.stat_name_ko,
        modifier = context.roll.modifier,
        response_template = ROLL_RESPONSE_TEMPLATE,
    )
}
