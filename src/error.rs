use derive_more::{Display, From, Into};
use reqwest::StatusCode;
use serde::Deserialize;

/// Errors that might occur when fetching a quote.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The request never produced a complete response (DNS, TLS, timeout, connection reset, or a
    /// body that could not be read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status and a structured error body.
    #[error("server error {code} (HTTP {status}): {message}")]
    Server {
        /// HTTP status of the response.
        status: StatusCode,
        /// Error code reported in the body.
        code: ErrorCode,
        /// Error message reported in the body, verbatim.
        message: String,
    },

    /// A response was received but its body did not match the expected schema.
    #[error("decode error (HTTP {status}): {kind}")]
    Decode {
        /// HTTP status of the response.
        status: StatusCode,
        /// What was wrong with the body.
        kind: DecodeError,
    },
}

/// Ways a response body can fail to describe a quote or an error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The body was not JSON of the expected shape.
    #[error("malformed body: {0}")]
    Json(#[from] serde_json::Error),

    /// The body has no `contents.quotes` array.
    #[error("no quotes in response")]
    MissingQuotes,

    /// The `contents.quotes` array is empty.
    #[error("quote list is empty")]
    EmptyQuotes,

    /// A required quote field was present but empty.
    #[error("quote field `{0}` is empty")]
    EmptyField(&'static str),
}

/// Numeric error code carried by a [`FetchError`].
///
/// This is the code from the server's error body when there is one, the HTTP status for decode
/// failures, and [`ErrorCode::NONE`] for network failures.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, From, Hash, Into, PartialEq)]
#[serde(transparent)]
pub struct ErrorCode(pub i64);

impl ErrorCode {
    /// Sentinel for failures that carry no server-provided code.
    pub const NONE: ErrorCode = ErrorCode(0);
}

/// Coarse classification of an [`Error`], kept on [`FetchError`] for diagnostics.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// See [`Error::Network`].
    #[display(fmt = "network")]
    Network,
    /// See [`Error::Server`].
    #[display(fmt = "server")]
    Server,
    /// See [`Error::Decode`].
    #[display(fmt = "decode")]
    Decode,
    /// The quote source panicked instead of returning a result.
    #[display(fmt = "fault")]
    Fault,
}

/// A displayable failure record, as held by
/// [`PresentationState::Failed`][`crate::PresentationState::Failed`].
///
/// Unlike [`Error`] this is cheap to clone, so it can live in shared UI state.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display(fmt = "{}", message)]
pub struct FetchError {
    kind: ErrorKind,
    code: ErrorCode,
    message: String,
}

const NETWORK_MESSAGE: &str = "Unable to reach the quote service";
const DECODE_MESSAGE: &str = "The quote service sent an unexpected response";
const SERVER_MESSAGE: &str = "The quote service reported an error";
const FAULT_MESSAGE: &str = "Something went wrong while fetching the quote";

impl FetchError {
    /// The record for a quote source that panicked.
    pub(crate) fn fault() -> FetchError {
        FetchError {
            kind: ErrorKind::Fault,
            code: ErrorCode::NONE,
            message: FAULT_MESSAGE.into(),
        }
    }

    /// Which part of the taxonomy this failure came from.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The error code; see [`ErrorCode`].
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The message to show the user. Never empty.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<Error> for FetchError {
    fn from(error: Error) -> FetchError {
        match error {
            Error::Network(_) => FetchError {
                kind: ErrorKind::Network,
                code: ErrorCode::NONE,
                message: NETWORK_MESSAGE.into(),
            },
            Error::Server { code, message, .. } => FetchError {
                kind: ErrorKind::Server,
                code,
                message: if message.is_empty() {
                    SERVER_MESSAGE.into()
                } else {
                    message
                },
            },
            Error::Decode { status, kind } => FetchError {
                kind: ErrorKind::Decode,
                code: ErrorCode(status.as_u16().into()),
                message: format!("{}: {}", DECODE_MESSAGE, kind),
            },
        }
    }
}

impl From<&Error> for ErrorKind {
    fn from(error: &Error) -> ErrorKind {
        match error {
            Error::Network(_) => ErrorKind::Network,
            Error::Server { .. } => ErrorKind::Server,
            Error::Decode { .. } => ErrorKind::Decode,
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: ErrorCode,
    message: String,
}

/// Decodes the body of a non-success response into [`Error::Server`], or [`Error::Decode`] if
/// the body isn't a structured error.
pub(crate) fn decode_error_body(status: StatusCode, body: &[u8]) -> Error {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            error: ErrorBody { code, message },
        }) => Error::Server {
            status,
            code,
            message,
        },
        Err(err) => Error::Decode {
            status,
            kind: err.into(),
        },
    }
}
