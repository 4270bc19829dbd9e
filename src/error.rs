use thiserror::Error;

/// Failure while walking a property reply.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StreamError(pub String);

impl StreamError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{object}: malformed property reply: {source}")]
    Protocol {
        object: String,
        #[source]
        source: StreamError,
    },

    /// The `Value` property has a wire type other than `d` or `x`. Usually
    /// means the backend and this client disagree on the interface version.
    #[error("{object}: invalid type '{signature}', expected 'd/x'")]
    TypeMismatch { object: String, signature: String },

    #[error("{object}: no Value property")]
    MissingValue { object: String },
}

/// Per-object query failure. None of these stop processing of other objects.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("{object}: invalid sensor descriptor: {reason}")]
    InvalidDescriptor { object: String, reason: String },

    #[error("{object}: GetAll call failed: {source}")]
    Call {
        object: String,
        #[source]
        source: dbus::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// The bus itself is unreachable. Fatal for the whole run.
#[derive(Debug, Error)]
#[error("can't connect to dbus: {0}")]
pub struct ConnectionError(pub String);

impl From<dbus::Error> for ConnectionError {
    fn from(e: dbus::Error) -> Self {
        Self(e.to_string())
    }
}
