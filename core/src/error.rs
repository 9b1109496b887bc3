//! Error types for the note API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the message does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging. `MissingInput` is raised by the
//! `build_*` methods before any request exists.

use thiserror::Error;

/// Errors returned by `NoteClient` build/parse methods and by `NoteApi`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required input was empty (or zero, for message ids).
    #[error("{field} is required")]
    MissingInput { field: &'static str },

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The host transport failed before a response was received.
    #[error("transport failed: {0}")]
    Transport(String),
}
