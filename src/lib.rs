pub mod ai;
pub mod ai_response;
pub mod character;
pub mod dice;
pub mod engine;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod lorebook;
pub mod prompt;
pub mod session;
pub mod settings;
pub mod summary;

// Re-export commonly used items for easier access
pub use ai::{GeminiClient, MockNarrator, Narrator};
pub use ai_response::{ParsedTurn, TurnResponse, parse_generator_output};
pub use character::{Ability, Character, StateChanges, Stats};
pub use engine::{CreateCharacterRequest, GameEngine, TurnReport, TurnRequest};
pub use error::{AIError, AppError};
pub use game_state::SessionState;
pub use lorebook::Lorebook;
pub use session::{InMemorySessionStore, SessionId, SessionStore};
pub use settings::Settings;
