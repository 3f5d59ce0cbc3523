use crate::ai::Narrator;
use crate::ai_response::{TurnResponse, parse_generator_output};
use crate::character::{Ability, Character, Stats, get_modifier};
use crate::dice::skill_check;
use crate::error::AppError;
use crate::game_state::{GM_TAG, SessionState, format_roll_summary};
use crate::lorebook::{Lorebook, START_LOCATION_KEY, START_MESSAGE_KEY, START_SITUATION_KEY};
use crate::prompt::{RollContext, build_action_prompt, build_roll_prompt};
use crate::summary::build_summary;
use serde::{Deserialize, Serialize};

// Fallbacks when the lorebook carries no start settings.
const DEFAULT_NAME: &str = "탐험가";
const FALLBACK_LOCATION: &str = "알 수 없는 장소";
const FALLBACK_SITUATION: &str = "알 수 없는 상황";
const FALLBACK_SCENE_ID: &str = "UNKNOWN_SCENE";
// Substituted when an action turn arrives with no action text.
const DEFAULT_ACTION: &str = "아무것도 하지 않는다.";
// Substituted when a roll turn arrives with no pending action on record.
const UNKNOWN_PENDING_ACTION: &str = "알 수 없는 행동";

// Input for the character-creation operation. Absent fields take defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCharacterRequest {
    pub name: Option<String>,
    pub stats: Option<Stats>,
    pub inventory: Option<Vec<String>>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCharacterResponse {
    pub character: Character,
    pub initial_message: String,
}

// One turn request: free action text, or the resolution of a pending roll.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TurnRequest {
    Action { player_action: Option<String> },
    Roll { modifier_stat: Ability },
}

// Dice detail attached to roll-turn reports.
#[derive(Debug, Clone, Serialize)]
pub struct RollBreakdown {
    pub dice1: u8,
    pub dice2: u8,
    pub total: i32,
    pub modifier: i32,
    pub roll_outcome: String,
}

// Client-facing result of one turn: the parsed generator payload, the updated
// character, the localized name of a requested roll stat, and (on roll turns)
// the dice breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    #[serde(flatten)]
    pub response: TurnResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_stat_ko: Option<String>,
    pub character: Character,
    #[serde(flatten)]
    pub roll: Option<RollBreakdown>,
}

// The turn orchestrator. Owns the read-only lorebook and the generator
// client; all mutable state comes in through the session argument.
pub struct GameEngine<N: Narrator> {
    lorebook: Lorebook,
    narrator: N,
}

impl<N: Narrator> GameEngine<N> {
    pub fn new(lorebook: Lorebook, narrator: N) -> Self {
        Self { lorebook, narrator }
    }

    // Create the session's character: derive resources from the stats, seed
    // location and scenario from the lorebook start settings, reset the log
    // to the opening GM line and clear any pending roll.
    pub fn create_character(
        &self,
        session: &mut SessionState,
        request: CreateCharacterRequest,
    ) -> CreateCharacterResponse {
        let name = request.name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        let stats = request.stats.unwrap_or_default();
        let inventory = request.inventory.unwrap_or_default();

        let start_location = self
            .lorebook
            .start_setting(START_LOCATION_KEY)
            .unwrap_or(FALLBACK_LOCATION)
            .to_string();
        let start_situation = self
            .lorebook
            .start_setting(START_SITUATION_KEY)
            .unwrap_or(FALLBACK_SITUATION)
            .to_string();
        let start_message = self
            .lorebook
            .start_setting(START_MESSAGE_KEY)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{name}님, 새로운 여정을 시작합니다."));
        let scene_id = scene_id_from(&start_location);

        let character = Character::new(
            name,
            stats,
            inventory,
            request.description,
            start_location,
            start_situation,
            scene_id,
        );

        session.character = character.clone();
        session.game_log = vec![format!("{GM_TAG} {start_message}")];
        session.pending_roll = None;

        log::info!(
            "character created: {} (stats {:?}, hp {}/{}, sp {}/{})",
            character.name,
            character.stats,
            character.hp,
            character.max_hp,
            character.sp,
            character.max_sp
        );

        CreateCharacterResponse {
            initial_message: format!("{GM_TAG} {start_message}"),
            character,
        }
    }

    // Advance the game by one turn. Session mutations happen only after the
    // generator round trip succeeds, so a failed call leaves the session as
    // it was.
    pub async fn advance_turn(
        &self,
        session: &mut SessionState,
        request: TurnRequest,
    ) -> Result<TurnReport, AppError> {
        match request {
            TurnRequest::Action { player_action } => {
                let action = player_action.unwrap_or_else(|| DEFAULT_ACTION.to_string());
                self.handle_action_turn(session, action).await
            }
            TurnRequest::Roll { modifier_stat } => {
                self.handle_roll_turn(session, modifier_stat).await
            }
        }
    }

    async fn handle_action_turn(
        &self,
        session: &mut SessionState,
        player_action: String,
    ) -> Result<TurnReport, AppError> {
        log::debug!("action turn: {player_action}");

        let summary = build_summary(&session.character, &session.game_log);
        let prompt = build_action_prompt(&session.character, &summary, &player_action);
        let raw = self.narrator.narrate(&prompt).await?;
        let parsed = parse_generator_output(&raw);
        if parsed.is_fallback() {
            log::warn!("action turn degraded to fallback payload");
        }
        let response = parsed.into_response();

        let character = &mut session.character;
        if let Some(location) = &response.new_location {
            character.location = location.clone();
        }
        if let Some(state) = &response.new_scenario_state {
            character.current_scenario_state = state.clone();
        }
        if let Some(scene_id) = &response.new_scene_id {
            character.scene_id = scene_id.clone();
        }
        character.apply_changes(&response.changes);

        session.log_player_action(&player_action);
        session.log_gm_story(&response.story);
        // The turn either opens a new pending roll or ends with none; an
        // older pending roll does not survive a fresh action.
        session.pending_roll = response.require_roll.then(|| player_action.clone());

        let roll_stat_ko = roll_stat_korean(&response);
        Ok(TurnReport {
            roll_stat_ko,
            character: session.character.clone(),
            roll: None,
            response,
        })
    }

    async fn handle_roll_turn(
        &self,
        session: &mut SessionState,
        modifier_stat: Ability,
    ) -> Result<TurnReport, AppError> {
        let pending_action = session
            .pending_roll
            .clone()
            .unwrap_or_else(|| UNKNOWN_PENDING_ACTION.to_string());

        let stat_value = session.character.stats.get(modifier_stat);
        let modifier = get_modifier(stat_value);
        let roll = skill_check(&mut rand::rng(), modifier);
        let stat_name_ko = modifier_stat.korean_name();
        log::debug!(
            "roll turn: action {pending_action:?}, {stat_name_ko} {}+{}{modifier:+} = {} ({})",
            roll.dice1,
            roll.dice2,
            roll.total,
            roll.outcome
        );

        let summary = build_summary(&session.character, &session.game_log);
        let context = RollContext {
            pending_action: &pending_action,
            roll: &roll,
            stat_name_ko,
        };
        let prompt = build_roll_prompt(&summary, &context);
        let raw = self.narrator.narrate(&prompt).await?;
        let parsed = parse_generator_output(&raw);
        if parsed.is_fallback() {
            log::warn!("roll turn degraded to fallback payload");
        }
        let mut response = parsed.into_response();

        let character = &mut session.character;
        if let Some(location) = &response.new_location {
            character.location = location.clone();
        }
        if let Some(state) = &response.new_scenario_state {
            character.current_scenario_state = state.clone();
        }
        // new_scene_id is deliberately ignored here: a roll resolves inside
        // the scene the action was declared in.
        character.apply_changes(&response.changes);

        let roll_summary = format_roll_summary(stat_name_ko, &roll);
        session.log_roll_summary(&roll_summary);
        session.log_gm_story(&response.story);
        // Cleared unconditionally, whatever the new payload asked for. A
        // follow-up roll only becomes pending through the next action turn.
        session.pending_roll = None;

        response.story = format!("{roll_summary}\n{}", response.story);

        let roll_stat_ko = roll_stat_korean(&response);
        Ok(TurnReport {
            roll_stat_ko,
            character: session.character.clone(),
            roll: Some(RollBreakdown {
                dice1: roll.dice1,
                dice2: roll.dice2,
                total: roll.total,
                modifier: roll.modifier,
                roll_outcome: roll.outcome.to_string(),
            }),
            response,
        })
    }
}

fn roll_stat_korean(response: &TurnResponse) -> Option<String> {
    if response.require_roll {
        response
            .roll_stat
            .map(|stat| stat.korean_name().to_string())
    } else {
        None
    }
}

// Scene identifier derived from a location string: alphanumeric characters
// only, uppercased, with a fixed fallback when nothing survives.
pub fn scene_id_from(location: &str) -> String {
    let id: String = location
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_uppercase();
    if id.is_empty() {
        FALLBACK_SCENE_ID.to_string()
    } else {
        id
    }
}

// Client-facing narration for a turn that failed outright. The session was
// not saved, so no game-meaningful state is lost.
pub fn gm_error_story(error: &AppError) -> String {
    format!("GM: 게임 진행 중 심각한 오류가 발생했습니다: {error}")
}
