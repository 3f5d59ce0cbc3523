use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// Section title whose bullets are parsed into a key/value map instead of text.
pub const START_SETTINGS_SECTION: &str = "시작 설정";

// Keys recognized inside the start settings section.
pub const START_LOCATION_KEY: &str = "시작 위치";
pub const START_SITUATION_KEY: &str = "시작 상황";
pub const START_MESSAGE_KEY: &str = "시작 메시지";

// A bullet starts a `- key: value` entry; its value runs until the next bullet
// or the end of the section.
static BULLET_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*-\s*").expect("invalid bullet pattern"));

// Splits one bullet into key and value. Bold markup around the key is optional,
// and the value may span multiple lines.
static BULLET_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?:\*\*)?(.*?)(?:\*\*)?\s*:\s*(.*)$").expect("invalid bullet entry pattern")
});

// A lorebook section is either free text or, for the start settings section,
// a flat key/value map.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Text(String),
    Settings(HashMap<String, String>),
}

// Static narrative configuration, parsed once at startup and read-only after.
#[derive(Debug, Clone, Default)]
pub struct Lorebook {
    sections: HashMap<String, Section>,
}

impl Lorebook {
    pub fn empty() -> Self {
        Self::default()
    }

    // Load and parse a lorebook file. A missing or unreadable file is not an
    // error: the game runs without lorebook context, with a warning logged.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => {
                let lorebook = Self::parse(&content);
                log::info!(
                    "lorebook loaded, sections: {:?}",
                    lorebook.sections.keys().collect::<Vec<_>>()
                );
                lorebook
            }
            Err(e) => {
                log::warn!(
                    "{} not found ({e}); the GM will operate without lorebook context",
                    path.display()
                );
                Self::empty()
            }
        }
    }

    // Parse markdown content into named sections, split on second-level headers.
    pub fn parse(content: &str) -> Self {
        let mut sections = HashMap::new();
        for part in content.split("\n## ") {
            if part.trim().is_empty() {
                continue;
            }
            let mut lines = part.trim().lines();
            let Some(first_line) = lines.next() else {
                continue;
            };
            let title = first_line.trim().trim_start_matches('#').trim().to_string();
            if title.is_empty() {
                continue;
            }
            let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();

            if title == START_SETTINGS_SECTION {
                sections.insert(title, Section::Settings(parse_settings(&body)));
            } else {
                sections.insert(title, Section::Text(body));
            }
        }
        Lorebook { sections }
    }

    pub fn section_text(&self, title: &str) -> Option<&str> {
        match self.sections.get(title) {
            Some(Section::Text(text)) => Some(text),
            _ => None,
        }
    }

    // One value from the start settings section, if present.
    pub fn start_setting(&self, key: &str) -> Option<&str> {
        match self.sections.get(START_SETTINGS_SECTION) {
            Some(Section::Settings(settings)) => settings.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn sections(&self) -> &HashMap<String, Section> {
        &self.sections
    }
}

// Parse `- key: value` bullets into a map. Bullets that do not match the
// expected shape are simply absent from the result.
fn parse_settings(body: &str) -> HashMap<String, String> {
    let mut settings = HashMap::new();
    let starts: Vec<_> = BULLET_START.find_iter(body).collect();
    for (index, start) in starts.iter().enumerate() {
        let chunk_end = starts
            .get(index + 1)
            .map(|next| next.start())
            .unwrap_or(body.len());
        let chunk = &body[start.end()..chunk_end];
        if let Some(captures) = BULLET_ENTRY.captures(chunk) {
            let key = captures[1].trim().to_string();
            let value = captures[2].trim().to_string();
            if !key.is_empty() {
                settings.insert(key, value);
            }
        }
    }
    settings
}
