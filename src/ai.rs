use crate::error::AIError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "models/gemini-2.5-pro";

// The generator call blocks the whole turn, so it gets a hard deadline.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

// Safety filtering is disabled wholesale; the GM decides what the story needs.
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

// The narrative generator seam. The turn orchestrator only ever talks to this
// trait, so tests and test mode can substitute a canned narrator.
pub trait Narrator {
    fn narrate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, AIError>> + Send;
}

// --- request/response shapes of the generateContent endpoint ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

// Minimal client for the Gemini generateContent REST endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, AIError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| AIError::Config(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn request_body<'a>(prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: "BLOCK_NONE",
                })
                .collect(),
        }
    }
}

// TODO: Add bounded retry with backoff around the generateContent call.
impl Narrator for GeminiClient {
    async fn narrate(&self, prompt: &str) -> Result<String, AIError> {
        let url = format!(
            "{API_BASE}/{model}:generateContent?key={key}",
            model = self.model,
            key = self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&Self::request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout
                } else {
                    AIError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(AIError::Api { status, message });
        }

        let decoded: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AIError::Decode(e.to_string()))?;

        let text: String = decoded
            .candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .map(|part| part.text)
            .collect();

        if text.is_empty() {
            return Err(AIError::NoMessageFound);
        }
        Ok(text)
    }
}

// Canned narrator used in test mode: no network, keyword-driven answers in the
// same fenced shape the live generator is instructed to produce.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockNarrator;

impl MockNarrator {
    fn fenced(payload: serde_json::Value) -> String {
        format!(
            "```json\n{}\n```",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        )
    }

    fn action_reply(prompt: &str) -> String {
        if prompt.contains("살펴") || prompt.contains("조사") {
            Self::fenced(json!({
                "story": "[테스트 모드] 어두운 승강장을 주의 깊게 살펴보려 합니다. 어둠 속에서 무언가를 찾아내려면 '감각' 판정이 필요합니다.",
                "require_roll": true,
                "roll_stat": "senses",
            }))
        } else if prompt.contains('문') && (prompt.contains('열') || prompt.contains("부순다")) {
            Self::fenced(json!({
                "story": "[테스트 모드] 육중한 문을 열려 합니다. 상당한 힘이 필요해 보입니다. '근력' 판정이 필요합니다.",
                "require_roll": true,
                "roll_stat": "strength",
            }))
        } else {
            Self::fenced(json!({
                "story": "[테스트 모드] 행동을 합니다. 별다른 일은 일어나지 않았습니다.",
                "require_roll": false,
                "roll_stat": null,
            }))
        }
    }

    fn roll_reply() -> String {
        Self::fenced(json!({
            "story": "[테스트 모드] 판정 결과, 당신은 멋지게 성공했습니다! 문이 열립니다.",
            "require_roll": false,
            "roll_stat": null,
            "hp_change": -2,
            "add_inventory": ["녹슨 기어"],
        }))
    }
}

impl Narrator for MockNarrator {
    async fn narrate(&self, prompt: &str) -> Result<String, AIError> {
        // Roll prompts carry the continuity rule header; everything else is an
        // action prompt.
        if prompt.contains("[ROLL CONTINUITY RULE") {
            Ok(Self::roll_reply())
        } else {
            Ok(Self::action_reply(prompt))
        }
    }
}
