// ../tests/tests.rs
use darkrail::character::{StateChanges, calculate_resources, get_modifier};
use darkrail::dice::{RollOutcome, outcome_for, skill_check};
use darkrail::engine::{CreateCharacterRequest, GameEngine, TurnRequest, scene_id_from};
use darkrail::game_state::{GM_TAG, SessionState};
use darkrail::lorebook::{START_LOCATION_KEY, START_MESSAGE_KEY, START_SITUATION_KEY};
use darkrail::prompt::{RollContext, build_action_prompt, build_roll_prompt};
use darkrail::summary::{AWAITING_PLAYER_ACTION, GAME_START_EVENT, NO_THREATS, build_summary};
use darkrail::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::fs;
use std::sync::Mutex;

// --- stat/resource calculator ---

#[test]
fn test_modifier_table() {
    assert_eq!(get_modifier(0), -1);
    assert_eq!(get_modifier(1), -1);
    assert_eq!(get_modifier(2), 0);
    assert_eq!(get_modifier(3), 1);
    assert_eq!(get_modifier(5), 1);
}

#[test]
fn test_resource_formulas() {
    let stats = Stats {
        strength: 3,
        willpower: 2,
        ..Stats::default()
    };
    let resources = calculate_resources(&stats);
    assert_eq!(resources.max_hp, 14);
    assert_eq!(resources.max_sp, 7);

    // A newly created character starts at full resources.
    let character = Character::new(
        "테스터".to_string(),
        stats,
        vec![],
        String::new(),
        "신림역".to_string(),
        String::new(),
        "SCENE".to_string(),
    );
    assert_eq!(character.hp, character.max_hp);
    assert_eq!(character.sp, character.max_sp);
}

#[test]
fn test_stats_missing_keys_default_to_one() {
    let stats: Stats = serde_json::from_str(r#"{"strength": 4}"#).expect("Failed to parse stats");
    assert_eq!(stats.strength, 4);
    assert_eq!(stats.agility, 1);
    assert_eq!(stats.willpower, 1);
}

// --- state mutator ---

#[test]
fn test_apply_changes_zero_delta_is_identity() {
    let mut character = Character::default();
    let before = character.clone();
    character.apply_changes(&StateChanges::default());
    assert_eq!(character, before);
}

#[test]
fn test_hp_sp_clamping_survives_extreme_deltas() {
    let mut character = Character::default();
    character.apply_changes(&StateChanges {
        hp_change: i32::MAX,
        sp_change: i32::MIN,
        ..StateChanges::default()
    });
    assert_eq!(character.hp, character.max_hp);
    assert_eq!(character.sp, 0);

    character.apply_changes(&StateChanges {
        hp_change: -9999,
        sp_change: 9999,
        ..StateChanges::default()
    });
    assert_eq!(character.hp, 0);
    assert_eq!(character.sp, character.max_sp);
}

#[test]
fn test_inventory_add_suppresses_duplicates() {
    let mut character = Character::default();
    character.apply_changes(&StateChanges {
        add_inventory: vec!["손전등".to_string(), "손전등".to_string()],
        ..StateChanges::default()
    });
    assert_eq!(character.inventory, vec!["손전등".to_string()]);

    // Adding an already-held item does not grow the inventory.
    character.apply_changes(&StateChanges {
        add_inventory: vec!["손전등".to_string()],
        ..StateChanges::default()
    });
    assert_eq!(character.inventory.len(), 1);
}

#[test]
fn test_inventory_remove_absent_item_is_noop() {
    let mut character = Character::default();
    character.apply_changes(&StateChanges {
        add_inventory: vec!["배낭".to_string()],
        ..StateChanges::default()
    });
    let before = character.clone();
    character.apply_changes(&StateChanges {
        remove_inventory: vec!["없는 물건".to_string()],
        ..StateChanges::default()
    });
    assert_eq!(character, before);
}

// --- response parser ---

#[test]
fn test_parse_well_formed_fenced_payload() {
    let raw = fs::read_to_string("tests/dummy_turn_response.txt")
        .expect("Failed to read dummy turn response file");
    let parsed = parse_generator_output(&raw);
    assert!(!parsed.is_fallback());

    let response = parsed.into_response();
    assert_eq!(
        response.story,
        "당신은 녹슨 철문 앞에 섰습니다. 문을 열려면 근력 판정이 필요합니다."
    );
    assert!(response.require_roll);
    assert_eq!(response.roll_stat, Some(Ability::Strength));
    assert_eq!(response.changes, StateChanges::default());
    assert_eq!(response.new_location, None);
    assert_eq!(
        response.new_scenario_state.as_deref(),
        Some("녹슨 철문이 길을 막고 있다.")
    );
}

#[test]
fn test_parse_without_fence_markers_falls_back() {
    let parsed = parse_generator_output("그냥 평범한 서술 텍스트입니다.");
    assert!(parsed.is_fallback());
    let response = parsed.into_response();
    assert!(!response.require_roll);
    assert_eq!(response.roll_stat, None);
    assert!(response.story.starts_with("GM: AI 응답 파싱 오류."));
    assert!(response.story.contains("그냥 평범한 서술 텍스트입니다."));
}

#[test]
fn test_parse_malformed_json_falls_back() {
    let parsed = parse_generator_output("```json\n{ not json at all\n```");
    assert!(parsed.is_fallback());
    assert_eq!(parsed.response().changes, StateChanges::default());
}

#[test]
fn test_parse_rejects_unknown_roll_stat() {
    let parsed = parse_generator_output("```json\n{\"story\": \"x\", \"roll_stat\": \"luck\"}\n```");
    assert!(parsed.is_fallback());
}

#[test]
fn test_parse_missing_optionals_take_defaults() {
    let parsed = parse_generator_output("```json\n{\"story\": \"조용하다.\"}\n```");
    assert!(!parsed.is_fallback());
    let response = parsed.into_response();
    assert_eq!(response.story, "조용하다.");
    assert!(!response.require_roll);
    assert_eq!(response.changes.hp_change, 0);
    assert!(response.changes.add_inventory.is_empty());
}

// --- story summary builder ---

#[test]
fn test_summary_uses_latest_gm_line_without_markup() {
    let mut character = Character::default();
    character.current_scenario_state = "승강장은 고요하다.".to_string();
    let log = vec![
        format!("{GM_TAG} 첫 번째 서술."),
        "플레이어: 앞으로 간다.".to_string(),
        format!("{GM_TAG} 두 번째 서술."),
        "GM (판정): 근력 판정 (주사위: 3+4, 수정치: 1, 총합: 8) 결과 - 대가를 치르는 성공"
            .to_string(),
    ];
    let summary = build_summary(&character, &log);
    assert_eq!(summary.last_key_event, "두 번째 서술.");
    assert_eq!(summary.current_goal, "승강장은 고요하다.");
    assert_eq!(summary.unresolved_threats, vec![NO_THREATS.to_string()]);
}

#[test]
fn test_summary_sentinels_on_fresh_session() {
    let character = Character::default();
    let summary = build_summary(&character, &[]);
    assert_eq!(summary.last_key_event, GAME_START_EVENT);
    assert_eq!(summary.current_goal, AWAITING_PLAYER_ACTION);
    assert_eq!(summary.unresolved_threats, vec![NO_THREATS.to_string()]);
    assert_eq!(summary.open_questions.len(), 2);
}

#[test]
fn test_summary_reports_scenario_as_threat_on_keyword() {
    let mut character = Character::default();
    character.current_scenario_state = "무언가 다가오는 소리가 들린다.".to_string();
    let summary = build_summary(&character, &[]);
    assert_eq!(
        summary.unresolved_threats,
        vec!["무언가 다가오는 소리가 들린다.".to_string()]
    );
}

// --- lorebook loader ---

const LOREBOOK_FIXTURE: &str = "# 세계관\n어두운 지하 세계.\n\n## 시작 설정\n- **시작 위치**: 신림역 지하 승강장\n- 시작 상황: 어둠 속에서 깨어났다.\n- **시작 메시지**: 차가운 바닥에서 눈을 뜹니다.\n이 줄은 불릿이 아니라서 무시됩니다.\n\n## 규칙\n판정은 2d6으로 한다.\n";

#[test]
fn test_lorebook_sections_and_start_settings() {
    let lorebook = Lorebook::parse(LOREBOOK_FIXTURE);
    assert_eq!(
        lorebook.start_setting(START_LOCATION_KEY),
        Some("신림역 지하 승강장")
    );
    assert_eq!(
        lorebook.start_setting(START_SITUATION_KEY),
        Some("어둠 속에서 깨어났다.")
    );
    assert!(
        lorebook
            .start_setting(START_MESSAGE_KEY)
            .expect("Expected start message")
            .starts_with("차가운 바닥에서")
    );
    assert_eq!(lorebook.section_text("규칙"), Some("판정은 2d6으로 한다."));
    assert_eq!(lorebook.section_text("세계관"), Some("어두운 지하 세계."));
}

#[test]
fn test_lorebook_malformed_bullet_is_absent() {
    let lorebook = Lorebook::parse("## 시작 설정\n- 키 없는 불릿만 있음\n- 시작 위치: 터널\n");
    assert_eq!(lorebook.start_setting(START_LOCATION_KEY), Some("터널"));
    assert_eq!(lorebook.start_setting("키 없는 불릿만 있음"), None);
}

#[test]
fn test_lorebook_missing_file_yields_empty() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let lorebook = Lorebook::load(&dir.path().join("no_such_lorebook.md"));
    assert!(lorebook.sections().is_empty());
    assert_eq!(lorebook.start_setting(START_LOCATION_KEY), None);
}

// --- dice ---

#[test]
fn test_outcome_thresholds() {
    assert_eq!(outcome_for(12), RollOutcome::FullSuccess);
    assert_eq!(outcome_for(10), RollOutcome::FullSuccess);
    assert_eq!(outcome_for(9), RollOutcome::SuccessAtCost);
    assert_eq!(outcome_for(7), RollOutcome::SuccessAtCost);
    assert_eq!(outcome_for(6), RollOutcome::Failure);
    assert_eq!(RollOutcome::FullSuccess.korean_label(), "완전한 성공");
    assert_eq!(RollOutcome::SuccessAtCost.korean_label(), "대가를 치르는 성공");
    assert_eq!(RollOutcome::Failure.korean_label(), "실패");
}

#[test]
fn test_skill_check_breakdown_is_consistent() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let roll = skill_check(&mut rng, 1);
        assert!((1..=6).contains(&roll.dice1));
        assert!((1..=6).contains(&roll.dice2));
        assert_eq!(
            roll.total,
            i32::from(roll.dice1) + i32::from(roll.dice2) + roll.modifier
        );
        assert_eq!(roll.outcome, outcome_for(roll.total));
    }
}

// --- scene ids ---

#[test]
fn test_scene_id_derivation() {
    assert_eq!(scene_id_from("신림역 지하"), "신림역지하");
    assert_eq!(scene_id_from("platform 7"), "PLATFORM7");
    assert_eq!(scene_id_from("---"), "UNKNOWN_SCENE");
    assert_eq!(scene_id_from(""), "UNKNOWN_SCENE");
}

// --- turn orchestrator ---

// Narrator returning a scripted sequence of replies, oldest first.
struct ScriptedNarrator {
    replies: Mutex<VecDeque<Result<String, ()>>>,
}

impl ScriptedNarrator {
    fn new(replies: Vec<Result<String, ()>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
        }
    }

    fn replying(texts: Vec<String>) -> Self {
        Self::new(texts.into_iter().map(Ok).collect())
    }
}

impl Narrator for ScriptedNarrator {
    async fn narrate(&self, _prompt: &str) -> Result<String, AIError> {
        let reply = self
            .replies
            .lock()
            .expect("narrator mutex poisoned")
            .pop_front()
            .expect("narrator script exhausted");
        reply.map_err(|()| AIError::Network("scripted failure".to_string()))
    }
}

fn fenced(json: &str) -> String {
    format!("```json\n{json}\n```")
}

fn test_lorebook() -> Lorebook {
    Lorebook::parse(LOREBOOK_FIXTURE)
}

#[test]
fn test_create_character_seeds_from_lorebook() {
    let engine = GameEngine::new(test_lorebook(), MockNarrator);
    let mut session = SessionState::default();
    let created = engine.create_character(
        &mut session,
        CreateCharacterRequest {
            name: Some("지하 탐험가".to_string()),
            ..CreateCharacterRequest::default()
        },
    );

    assert_eq!(created.character.location, "신림역 지하 승강장");
    assert_eq!(created.character.current_scenario_state, "어둠 속에서 깨어났다.");
    assert_eq!(created.character.scene_id, "신림역지하승강장");
    assert!(created.initial_message.contains("차가운 바닥에서 눈을 뜹니다."));
    assert_eq!(session.game_log.len(), 1);
    assert_eq!(session.pending_roll, None);
}

#[test]
fn test_create_character_fallbacks_without_lorebook() {
    let engine = GameEngine::new(Lorebook::empty(), MockNarrator);
    let mut session = SessionState::default();
    let created = engine.create_character(&mut session, CreateCharacterRequest::default());

    assert_eq!(created.character.name, "탐험가");
    assert_eq!(created.character.location, "알 수 없는 장소");
    assert_eq!(created.character.current_scenario_state, "알 수 없는 상황");
    assert_eq!(created.character.scene_id, "알수없는장소");
    assert!(created.initial_message.contains("새로운 여정을 시작합니다."));
}

#[tokio::test]
async fn test_action_turn_with_roll_request_sets_pending() {
    let narrator = ScriptedNarrator::replying(vec![fenced(
        r#"{"story": "감각 판정이 필요합니다.", "require_roll": true, "roll_stat": "senses"}"#,
    )]);
    let engine = GameEngine::new(Lorebook::empty(), narrator);
    let mut session = SessionState::default();

    let report = engine
        .advance_turn(
            &mut session,
            TurnRequest::Action {
                player_action: Some("주위를 살핀다".to_string()),
            },
        )
        .await
        .expect("action turn failed");

    assert!(report.response.require_roll);
    assert_eq!(report.roll_stat_ko.as_deref(), Some("감각"));
    assert_eq!(session.pending_roll.as_deref(), Some("주위를 살핀다"));
    assert_eq!(
        session.game_log,
        vec![
            "플레이어: 주위를 살핀다".to_string(),
            format!("{GM_TAG} 감각 판정이 필요합니다."),
        ]
    );
}

#[tokio::test]
async fn test_action_turn_applies_generator_updates() {
    let narrator = ScriptedNarrator::replying(vec![fenced(
        r#"{
            "story": "통로 끝의 방에 들어섰습니다.",
            "hp_change": -3,
            "sp_change": 1,
            "add_inventory": ["낡은 지도"],
            "new_location": "기관실",
            "new_scenario_state": "기관실은 기름 냄새로 가득하다.",
            "new_scene_id": "ENGINE_ROOM"
        }"#,
    )]);
    let engine = GameEngine::new(Lorebook::empty(), narrator);
    let mut session = SessionState::default();
    let initial_sp = session.character.sp;

    let report = engine
        .advance_turn(
            &mut session,
            TurnRequest::Action {
                player_action: Some("방으로 들어간다".to_string()),
            },
        )
        .await
        .expect("action turn failed");

    assert_eq!(session.character.location, "기관실");
    assert_eq!(session.character.scene_id, "ENGINE_ROOM");
    assert_eq!(
        session.character.current_scenario_state,
        "기관실은 기름 냄새로 가득하다."
    );
    assert_eq!(session.character.hp, session.character.max_hp - 3);
    // SP was already at its maximum, so the gain clamps away.
    assert_eq!(session.character.sp, initial_sp);
    assert_eq!(session.character.inventory, vec!["낡은 지도".to_string()]);
    assert_eq!(report.character, session.character);
    assert_eq!(session.pending_roll, None);
}

#[tokio::test]
async fn test_roll_turn_always_clears_pending() {
    // The roll reply itself asks for another roll; the pending slot must
    // still come back empty.
    let narrator = ScriptedNarrator::replying(vec![fenced(
        r#"{"story": "성공했지만 새 위협이 나타났다.", "require_roll": true, "roll_stat": "agility"}"#,
    )]);
    let engine = GameEngine::new(Lorebook::empty(), narrator);
    let mut session = SessionState::default();
    session.pending_roll = Some("문을 연다".to_string());

    let report = engine
        .advance_turn(
            &mut session,
            TurnRequest::Roll {
                modifier_stat: Ability::Strength,
            },
        )
        .await
        .expect("roll turn failed");

    assert_eq!(session.pending_roll, None);
    assert!(report.response.require_roll);

    let breakdown = report.roll.expect("Expected a dice breakdown");
    assert!((1..=6).contains(&breakdown.dice1));
    assert!((1..=6).contains(&breakdown.dice2));
    // All stats are 1 on the default character, so the modifier is -1.
    assert_eq!(breakdown.modifier, -1);
    assert_eq!(
        breakdown.total,
        i32::from(breakdown.dice1) + i32::from(breakdown.dice2) + breakdown.modifier
    );

    // The report narration leads with the roll summary line.
    assert!(report.response.story.starts_with("GM (판정): 근력 판정"));
    assert!(report.response.story.ends_with("성공했지만 새 위협이 나타났다."));
    // The log gained the roll summary and the GM narration.
    assert_eq!(session.game_log.len(), 2);
    assert!(session.game_log[0].starts_with("GM (판정):"));
}

#[tokio::test]
async fn test_action_turn_while_roll_pending_overrides_it() {
    let narrator = ScriptedNarrator::replying(vec![fenced(
        r#"{"story": "다른 길로 갑니다.", "require_roll": false}"#,
    )]);
    let engine = GameEngine::new(Lorebook::empty(), narrator);
    let mut session = SessionState::default();
    session.pending_roll = Some("문을 연다".to_string());

    engine
        .advance_turn(
            &mut session,
            TurnRequest::Action {
                player_action: Some("뒤로 물러난다".to_string()),
            },
        )
        .await
        .expect("action turn failed");

    // The stale pending roll does not survive a fresh action.
    assert_eq!(session.pending_roll, None);
}

#[tokio::test]
async fn test_generator_failure_leaves_session_untouched() {
    let narrator = ScriptedNarrator::new(vec![Err(())]);
    let engine = GameEngine::new(Lorebook::empty(), narrator);
    let mut session = SessionState::default();
    session.pending_roll = Some("문을 연다".to_string());
    let before_character = session.character.clone();

    let result = engine
        .advance_turn(
            &mut session,
            TurnRequest::Action {
                player_action: Some("소리친다".to_string()),
            },
        )
        .await;

    assert!(result.is_err());
    assert_eq!(session.character, before_character);
    assert!(session.game_log.is_empty());
    assert_eq!(session.pending_roll.as_deref(), Some("문을 연다"));
}

#[tokio::test]
async fn test_garbled_generator_output_degrades_without_state_change() {
    let narrator = ScriptedNarrator::replying(vec!["판정 결과를 말씀드리죠. 성공입니다!".to_string()]);
    let engine = GameEngine::new(Lorebook::empty(), narrator);
    let mut session = SessionState::default();
    let before_character = session.character.clone();

    let report = engine
        .advance_turn(
            &mut session,
            TurnRequest::Action {
                player_action: Some("귀를 기울인다".to_string()),
            },
        )
        .await
        .expect("fallback must not surface as an error");

    assert!(report.response.story.starts_with("GM: AI 응답 파싱 오류."));
    assert!(!report.response.require_roll);
    assert_eq!(session.character, before_character);
    // The raw text still lands in the log as GM narration.
    assert_eq!(session.game_log.len(), 2);
}

// --- request decoding ---

#[test]
fn test_turn_request_wire_shapes() {
    let action: TurnRequest =
        serde_json::from_str(r#"{"type": "action", "player_action": "달린다"}"#)
            .expect("Failed to parse action request");
    assert!(matches!(
        action,
        TurnRequest::Action { player_action: Some(ref text) } if text == "달린다"
    ));

    let roll: TurnRequest = serde_json::from_str(r#"{"type": "roll", "modifier_stat": "senses"}"#)
        .expect("Failed to parse roll request");
    assert!(matches!(
        roll,
        TurnRequest::Roll {
            modifier_stat: Ability::Senses
        }
    ));

    assert!(serde_json::from_str::<TurnRequest>(r#"{"type": "roll", "modifier_stat": "luck"}"#).is_err());
}

// --- prompts ---

#[test]
fn test_action_prompt_carries_scene_lock_and_schema() {
    let mut character = Character::default();
    character.scene_id = "PLATFORM".to_string();
    let summary = build_summary(&character, &[]);
    let prompt = build_action_prompt(&character, &summary, "문을 두드린다");

    assert!(prompt.contains("Scene ID: \"PLATFORM\""));
    assert!(prompt.contains("Player's Last Action: \"문을 두드린다\""));
    assert!(prompt.contains(r#""strength", "agility", "intelligence", "senses", "willpower"#));
    assert!(prompt.contains("```json"));
    assert!(prompt.contains(&summary.last_key_event));
}

#[test]
fn test_roll_prompt_embeds_pending_action_and_outcome() {
    let character = Character::default();
    let summary = build_summary(&character, &[]);
    let mut rng = StdRng::seed_from_u64(11);
    let roll = skill_check(&mut rng, 1);
    let context = RollContext {
        pending_action: "문을 연다",
        roll: &roll,
        stat_name_ko: "근력",
    };
    let prompt = build_roll_prompt(&summary, &context);

    assert!(prompt.contains("Action Being Resolved:** \"문을 연다\""));
    assert!(prompt.contains(roll.outcome.korean_label()));
    assert!(prompt.contains(&format!("Dice 1: {}", roll.dice1)));
    assert!(prompt.contains("Do NOT decide whether a roll is needed"));
    assert!(prompt.contains("```json"));
}

// --- settings ---

#[test]
fn test_settings_round_trip() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("settings.json");
    let path = path.to_str().expect("Expected a UTF-8 temp path");

    let mut settings = Settings::new();
    settings.model = "models/gemini-test".to_string();
    settings.test_mode = true;
    settings.save_to_file(path).expect("Failed to save settings");

    let loaded = Settings::load_settings_from_file(path).expect("Failed to load settings");
    assert_eq!(loaded.model, "models/gemini-test");
    assert!(loaded.test_mode);
    assert_eq!(loaded.gemini_api_key, None);
}

// --- session store ---

#[test]
fn test_session_store_isolates_sessions() {
    let mut store = InMemorySessionStore::new();
    let first = SessionId::new();
    let second = SessionId::new();

    let mut state = store.load(first);
    state.pending_roll = Some("문을 연다".to_string());
    store.save(first, state);

    assert_eq!(store.load(first).pending_roll.as_deref(), Some("문을 연다"));
    // An unseen session comes back fresh.
    assert_eq!(store.load(second).pending_roll, None);
    assert_eq!(store.load(second).character.name, "탐험가");
    assert_eq!(store.len(), 1);
}

// --- end-to-end scenario ---

#[tokio::test]
async fn test_full_scenario_with_mock_narrator() {
    let engine = GameEngine::new(test_lorebook(), MockNarrator);
    let mut session = SessionState::default();

    // Create: strength 3 / willpower 2 give 14 HP and 7 SP.
    let created = engine.create_character(
        &mut session,
        CreateCharacterRequest {
            name: Some("무영".to_string()),
            stats: Some(Stats {
                strength: 3,
                agility: 2,
                intelligence: 2,
                senses: 3,
                willpower: 2,
            }),
            ..CreateCharacterRequest::default()
        },
    );
    assert_eq!(created.character.max_hp, 14);
    assert_eq!(created.character.max_sp, 7);

    // Action: the mock narrator answers a "살펴본다" action with a senses check.
    let report = engine
        .advance_turn(
            &mut session,
            TurnRequest::Action {
                player_action: Some("살펴본다".to_string()),
            },
        )
        .await
        .expect("action turn failed");
    assert!(report.response.require_roll);
    assert_eq!(report.response.roll_stat, Some(Ability::Senses));
    assert_eq!(report.roll_stat_ko.as_deref(), Some("감각"));
    assert_eq!(session.pending_roll.as_deref(), Some("살펴본다"));

    // Roll: senses 3 gives a +1 modifier, and the pending slot empties.
    let report = engine
        .advance_turn(
            &mut session,
            TurnRequest::Roll {
                modifier_stat: Ability::Senses,
            },
        )
        .await
        .expect("roll turn failed");
    let breakdown = report.roll.expect("Expected a dice breakdown");
    assert_eq!(breakdown.modifier, 1);
    assert_eq!(
        breakdown.roll_outcome,
        outcome_for(breakdown.total).korean_label()
    );
    assert_eq!(session.pending_roll, None);

    // The mock roll reply costs 2 HP and grants an item.
    assert_eq!(session.character.hp, 12);
    assert_eq!(session.character.inventory, vec!["녹슨 기어".to_string()]);
}
