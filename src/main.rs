use darkrail::engine::gm_error_story;
use darkrail::game_state::GM_TAG;
use darkrail::{
    Ability, AppError, Character, CreateCharacterRequest, GameEngine, GeminiClient,
    InMemorySessionStore, Lorebook, MockNarrator, Narrator, SessionId, SessionStore, Settings,
    TurnRequest, logging,
};
use std::io::{self, BufRead, Write};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment files are optional; deployments may inject variables directly.
    dotenvy::from_filename("api_key.env").ok();
    dotenvy::dotenv().ok();

    let mut settings = Settings::load().unwrap_or_default();
    settings.apply_env();
    logging::init(settings.debug_mode)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let lorebook = Lorebook::load(Path::new(&settings.lorebook_path));

    if settings.test_mode {
        run_game(GameEngine::new(lorebook, MockNarrator)).await
    } else {
        let api_key = settings
            .gemini_api_key
            .clone()
            .ok_or(AppError::MissingApiKey)?;
        let narrator = GeminiClient::new(api_key, settings.model.clone())?;
        run_game(GameEngine::new(lorebook, narrator)).await
    }
}

// Drive the engine from the terminal with a single local session: create a
// character, then alternate action turns and `/roll <stat>` turns.
async fn run_game<N: Narrator>(engine: GameEngine<N>) -> anyhow::Result<()> {
    let mut store = InMemorySessionStore::new();
    let session_id = SessionId::new();
    let stdin = io::stdin();

    print!("캐릭터 이름: ");
    io::stdout().flush()?;
    let mut name = String::new();
    stdin.lock().read_line(&mut name)?;
    let name = name.trim().to_string();

    let mut state = store.load(session_id);
    let created = engine.create_character(
        &mut state,
        CreateCharacterRequest {
            name: (!name.is_empty()).then_some(name),
            ..Default::default()
        },
    );
    println!("{}", display_line(&created.initial_message));
    print_status(&created.character);
    store.save(session_id, state);

    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "종료" {
            break;
        }

        let request = match line.strip_prefix("/roll ") {
            Some(stat) => match stat.trim().parse::<Ability>() {
                Ok(ability) => TurnRequest::Roll {
                    modifier_stat: ability,
                },
                Err(_) => {
                    println!("알 수 없는 능력치: {stat}");
                    continue;
                }
            },
            None => TurnRequest::Action {
                player_action: Some(line.to_string()),
            },
        };

        let mut state = store.load(session_id);
        match engine.advance_turn(&mut state, request).await {
            Ok(report) => {
                println!("{}", display_line(&report.response.story));
                print_status(&report.character);
                if report.response.require_roll {
                    if let (Some(stat), Some(stat_ko)) =
                        (report.response.roll_stat, report.roll_stat_ko.as_deref())
                    {
                        println!("{stat_ko} 판정이 필요합니다. `/roll {stat}` 으로 굴리세요.");
                    }
                }
                store.save(session_id, state);
            }
            Err(e) => {
                // The session is not saved, so the failed turn leaves no trace.
                log::error!("turn failed: {e}");
                println!("{}", gm_error_story(&e));
            }
        }
    }
    Ok(())
}

// Terminal rendering of a log line; the markup is meant for the web client.
fn display_line(line: &str) -> String {
    line.replace(GM_TAG, "GM:")
}

fn print_status(character: &Character) {
    println!(
        "[{}] HP {}/{} | SP {}/{} | 위치: {}",
        character.name,
        character.hp,
        character.max_hp,
        character.sp,
        character.max_sp,
        character.location
    );
}
