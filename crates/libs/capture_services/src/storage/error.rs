use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("remote returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("object not found: {0}")]
    NotFound(String),

    #[error("store unavailable")]
    Unavailable,
}
