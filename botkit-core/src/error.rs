use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotkitError {
    /// Transport-level failure (connection, timeout, I/O). The only retryable class.
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl BotkitError {
    /// True for errors worth re-invoking the same request for.
    pub fn is_transient(&self) -> bool {
        matches!(self, BotkitError::Network(_))
    }
}

#[derive(Error, Debug)]
pub enum HandlerError {
    /// Bad arguments; the payload is the usage line shown to the user.
    #[error("Usage: {0}")]
    Usage(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("State error: {0}")]
    State(String),

    #[error("Handler failed: {0}")]
    Failed(String),
}

pub type Result<T> = std::result::Result<T, BotkitError>;
