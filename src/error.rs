use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("signals file not found: {0}")]
    SignalsNotFound(String),

    #[error("signals parse error: {0}")]
    SignalsParse(String),

    #[error("baseline aggregate parse error: {0}")]
    BaselineParse(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, AuditError>;
