use thiserror::Error;

pub type RollupResult<T> = Result<T, RollupError>;

#[derive(Error, Debug)]
pub enum RollupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unreadable input: {0}")]
    UnreadableFile(String),

    #[error("required columns missing: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("export error: {0}")]
    Export(String),

    #[error("processing error: {0}")]
    Process(String),
}
