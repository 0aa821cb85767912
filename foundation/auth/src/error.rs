#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("client secrets file contains neither an 'installed' nor a 'web' client")]
    UnsupportedClientType,

    #[error("refresh token is required for user account credentials")]
    RefreshTokenIsRequired,

    #[error("client secrets file {0} could not be read: {1}")]
    ClientSecretsIOError(String, std::io::Error),

    #[error("token store {0} could not be accessed: {1}")]
    TokenStoreIOError(String, std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    HttpError(#[from] reqwest::Error),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    UrlError(#[from] url::ParseError),

    #[error("user home directory not found")]
    NoHomeDirectoryFound,

    #[error("token endpoint responded with status {0}: {1}")]
    TokenResponseError(u16, String),

    #[error("authorization was denied: {0}")]
    AuthorizationDenied(String),

    #[error("authorization redirect is invalid: {0}")]
    InvalidRedirect(String),

    #[error("authorization state mismatch")]
    StateMismatch,

    #[error("invalid token")]
    InvalidToken,

    #[error("poisoned token lock")]
    PoisonedLock,
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Error::PoisonedLock
    }
}
