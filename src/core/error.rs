use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("required option '{group}' is not selected for '{item}'")]
    MissingRequiredOption { item: String, group: String },

    #[error("'{name}' is not on the menu")]
    UnknownItem { name: String },

    #[error("session store I/O error: {0}")]
    Store(#[from] std::io::Error),

    #[error("session store encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("lock error: {0}")]
    LockError(String),
}

pub type Result<T> = std::result::Result<T, OrderError>;

impl<T> From<std::sync::PoisonError<T>> for OrderError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}
