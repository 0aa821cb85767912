use crate::http::error::Error as HttpError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[cfg(feature = "auth")]
    #[error(transparent)]
    Auth(#[from] aether_auth::error::Error),

    #[error("failed to create {0}")]
    Create(String, #[source] HttpError),

    #[error("failed to wait for {0}")]
    Wait(String, #[source] HttpError),

    #[error("failed to get iam policy of {0}")]
    GetPolicy(String, #[source] HttpError),

    #[error("failed to set iam policy of {0}")]
    SetPolicy(String, #[source] HttpError),
}

impl Error {
    /// The transport error below a provisioning failure, if any.
    pub fn http(&self) -> Option<&HttpError> {
        match self {
            Error::Create(_, e) | Error::Wait(_, e) | Error::GetPolicy(_, e) | Error::SetPolicy(_, e) => Some(e),
            #[cfg(feature = "auth")]
            Error::Auth(_) => None,
        }
    }
}
