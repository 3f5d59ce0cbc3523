use thiserror::Error;

// Enum for handling various application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("AI error: {0}")]
    AI(#[from] AIError), // Errors related to the narrative generator.

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error), // Errors related to data serialization.

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error), // Input/output errors.

    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey, // Fatal at startup: the process refuses to serve without credentials.
}

// Errors related to the generator call are separated into their own enum so the
// turn pipeline can report them distinctly from local failures.
#[derive(Debug, Error)]
pub enum AIError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Generator API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Timeout occurred")]
    Timeout, // Error when the generator call exceeds its time limit.

    #[error("No message found")]
    NoMessageFound, // Error when the generator returns no usable candidate text.

    #[error("Failed to decode generator response: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}
