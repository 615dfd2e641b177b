use thiserror::Error;

/// Errors raised by the recognizer, the template builder and the session.
#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("Recognizer is not ready: {0}")]
    NotReady(String),

    #[error("Rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("Font has no glyph for {0:?}")]
    MissingGlyph(char),

    #[error("Font error: {0}")]
    Font(String),

    #[error("No glyphs available for mode {0}")]
    EmptyPool(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template data error: {0}")]
    Bincode(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, RecognizerError>;
