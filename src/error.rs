use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoclensError>;

#[derive(Error, Debug)]
pub enum LoclensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
