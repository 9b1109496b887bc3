//! Synchronous API client core for the note message board.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `NoteClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (validates inputs, produces the
//!   request) and `parse_*` (consumes the response), so the I/O boundary is
//!   explicit.
//! - `NoteApi` glues both halves to a host `Transport` for callers that want
//!   one call per operation.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod multipart;
pub mod types;

pub use api::{NoteApi, Transport};
pub use client::{NoteClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use multipart::MultipartForm;
pub use types::{
    ApiResponse, ImageUpload, Message, MessageDetailResponse, MessageListResponse,
    NicknameCheckResponse, SendMessageResponse, SignInResponse, SignUpResponse,
};
