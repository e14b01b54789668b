use thiserror::Error;

#[derive(Debug, Error)]
pub enum BacklogError {
    #[error("no ledger found: run 'backlog build <PRD>' first")]
    NoLedger,

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("duplicate task id '{0}': two tasks would share one ledger entry")]
    IdCollision(String),

    #[error("invalid split threshold {0}: must be at least 1")]
    InvalidThreshold(usize),

    #[error("failed to write task document {path}: {source}")]
    TaskDocument {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BacklogError>;
