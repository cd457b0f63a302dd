use interview_client::TransportError;

/// Every failure a session operation can report. None of them end the
/// process; the caller shows the message and may retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// Local input was rejected before any network call.
    #[error("{0}")]
    Validation(String),
    /// The credential could not be obtained or was refused.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// The service answered with an error, or could not be reached.
    #[error("{message}")]
    Remote {
        status: Option<u16>,
        message: String,
    },
    /// The operation is not valid in the current session state.
    #[error("{0}")]
    State(String),
}

impl SessionError {
    pub(crate) fn remote(message: impl Into<String>) -> Self {
        SessionError::Remote {
            status: None,
            message: message.into(),
        }
    }
}

impl From<TransportError> for SessionError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Auth(message) => SessionError::Auth(message),
            TransportError::Remote { status, message } => SessionError::Remote { status, message },
            TransportError::Decode(message) => {
                SessionError::remote(format!("unexpected response from service: {message}"))
            }
        }
    }
}
