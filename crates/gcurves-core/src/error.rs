use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurveError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CurveError>;
