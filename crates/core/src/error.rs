use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpanlensError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid span: {0}")]
    InvalidSpan(String),
}

pub type Result<T> = std::result::Result<T, SpanlensError>;
