// Import necessary libraries and modules for file I/O and serialization.
use crate::ai::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};

// Define a structure to hold application settings with serialization and
// deserialization capabilities.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Settings {
    pub gemini_api_key: Option<String>, // Required unless test mode is on.
    pub model: String,
    pub lorebook_path: String,
    pub test_mode: bool,  // Serve canned narration instead of calling the generator.
    pub debug_mode: bool, // Flag to enable or disable debug logging.
}

// Implement the Default trait for Settings to provide a method to create
// default settings.
impl Default for Settings {
    fn default() -> Self {
        Settings {
            gemini_api_key: None, // No API key by default.
            model: DEFAULT_MODEL.to_string(),
            lorebook_path: "./data/lorebook.md".to_string(),
            test_mode: false,
            debug_mode: false, // Debug mode disabled by default.
        }
    }
}

// Additional implementation block for Settings.
impl Settings {
    // Constructor function to create new settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    // Load settings from a default file path.
    pub fn load() -> io::Result<Self> {
        Self::load_settings_from_file("./data/settings.json")
    }

    // Save current settings to a default file path.
    pub fn save(&self) -> io::Result<()> {
        std::fs::create_dir_all("./data")?; // Ensure the data directory exists.
        self.save_to_file("./data/settings.json")
    }

    // Load settings from a specified file path.
    pub fn load_settings_from_file(path: &str) -> io::Result<Self> {
        let data = fs::read_to_string(path)?; // Read settings from file.
        let settings = serde_json::from_str(&data)?; // Deserialize JSON data into settings.
        Ok(settings)
    }

    // Save current settings to a specified file path.
    pub fn save_to_file(&self, path: &str) -> io::Result<()> {
        let data = serde_json::to_string_pretty(self)?; // Serialize settings into pretty JSON format.
        if let Some(parent) = std::path::Path::new(path).parent() {
            fs::create_dir_all(parent)?; // Create the directory if it doesn't exist.
        }
        let mut file = fs::File::create(path)?; // Create or overwrite the file.
        file.write_all(data.as_bytes())?; // Write the serialized data to the file.
        Ok(())
    }

    // The environment wins over the settings file for secrets and the model
    // choice, so deployments never have to write keys to disk.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            self.model = model;
        }
    }
}
