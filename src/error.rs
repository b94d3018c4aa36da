use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad frame: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("server refused the request: {0}")]
    Remote(String),

    #[error("unexpected response to `{0}`")]
    UnexpectedResponse(&'static str),

    #[error("not logged in, or the admin session has expired")]
    NotAuthenticated,
}
