use thiserror::Error;

/// Errors from the copy assistant
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("No API key configured. Run `instapage assist configure` or set GEMINI_API_KEY")]
    MissingApiKey,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Editor(#[from] instapage_core::Error),
}

impl AssistError {
    /// True when the editor refused the request because another is running
    pub fn is_busy(&self) -> bool {
        matches!(self, AssistError::Editor(instapage_core::Error::AssistantBusy))
    }
}

/// Error body returned by the Generative Language API
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

pub type Result<T> = std::result::Result<T, AssistError>;
