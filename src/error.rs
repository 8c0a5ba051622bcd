use thiserror::Error;

/// Unified error type for the annotation client.
///
/// Every failure surfaces per batch: a batch either produces its full
/// correlated result list or exactly one of these variants. Nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Input conversion received a shape that cannot become documents
    /// (e.g. a bare number or boolean at the dynamic JSON boundary).
    #[error("unsupported input type: {type_name}")]
    UnsupportedInput { type_name: String },

    /// Capability name not present in the endpoint table.
    #[error("unknown endpoint capability: {capability}")]
    UnknownEndpoint { capability: String },

    /// Connection or I/O failure before a response could be read.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("service error: HTTP {status}: {body}")]
    Service { status: u16, body: String },

    /// Response body did not match the expected envelope, or a response
    /// record carried an id that cannot be attributed.
    #[error("malformed response: {detail}")]
    MalformedResponse { detail: String },

    /// An entity lacks the text-bearing property named by the caller.
    #[error("entity {id} has no property '{property}'")]
    MissingProperty { id: i64, property: String },

    /// Builder misuse: missing key, unparseable base URL, and the like.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Error::MalformedResponse {
            detail: detail.into(),
        }
    }

    /// True when the failure came from the wire rather than from input
    /// handling, i.e. the batch itself may be worth resubmitting.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Service { .. } | Error::MalformedResponse { .. }
        )
    }
}
