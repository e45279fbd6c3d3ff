use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiceError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Protein not found: {0}")]
    ProteinNotFound(String),

    #[error("Cuisine already exists: {0}")]
    DuplicateCuisine(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, DiceError>;
