//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use note_core::error::ApiError;
use note_core::http::HttpMethod;
use note_core::types::{ApiResponse, Message};

/// Opaque handle to a `NoteClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiNoteClient {
    pub(crate) inner: note_core::NoteClient,
}

/// Copy a Rust string into a heap C string. Interior NULs are dropped.
pub(crate) fn c_string(s: &str) -> *mut c_char {
    CString::new(s.replace('\0', "")).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// `body` is binary (multipart uploads may contain image bytes) and is null
/// when the request has no body.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut u8,
    pub body_len: usize,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: note_core::HttpRequest) -> *mut Self {
        let path = c_string(&req.path);
        let (body, body_len) = match req.body {
            Some(b) => {
                let boxed = b.into_boxed_slice();
                let len = boxed.len();
                (Box::into_raw(boxed) as *mut u8, len)
            }
            None => (std::ptr::null_mut(), 0),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path,
            headers,
            headers_len,
            body,
            body_len,
        }))
    }
}

/// Optional image attachment for `note_build_send_message`.
///
/// Borrowed for the duration of the call; the FFI layer copies what it needs.
/// A null `content_type` defaults to `application/octet-stream`.
#[repr(C)]
pub struct FfiImageUpload {
    pub file_name: *const c_char,
    pub content_type: *const c_char,
    pub bytes: *const u8,
    pub bytes_len: usize,
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `note_parse_*` function. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiNoteResult` and by `note_last_error_code`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Deserialization = 3,
    Panic = 4,
    NullArg = 5,
    /// A builder rejected an empty nickname or content, or a zero id.
    MissingInput = 6,
    /// A string argument or response body was not UTF-8.
    InvalidUtf8 = 7,
}

impl From<&ApiError> for FfiErrorCode {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::MissingInput { .. } => FfiErrorCode::MissingInput,
            ApiError::NotFound => FfiErrorCode::NotFound,
            // The C host performs its own IO, so no FFI call raises
            // `Transport`; if one ever did it would be an HTTP failure.
            ApiError::HttpError { .. } | ApiError::Transport(_) => FfiErrorCode::Http,
            ApiError::DeserializationError(_) => FfiErrorCode::Deserialization,
        }
    }
}

/// Tag that tells `note_free_result` what `FfiNoteResult::data` points to.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    /// `data` points to a `bool`.
    Bool = 1,
    /// `data` is a NUL-terminated C string.
    Text = 2,
    Message = 3,
    MessageList = 4,
}

/// A single note exposed to C. `image_url` is null when there is no image.
#[repr(C)]
pub struct FfiMessage {
    pub id: u64,
    pub content: *mut c_char,
    pub image_url: *mut c_char,
}

impl FfiMessage {
    fn from_core(message: Message) -> Self {
        FfiMessage {
            id: message.id,
            content: c_string(&message.content),
            image_url: message
                .image_url
                .as_deref()
                .map_or(std::ptr::null_mut(), c_string),
        }
    }
}

/// A list of notes exposed to C.
#[repr(C)]
pub struct FfiMessageList {
    pub items: *mut FfiMessage,
    pub len: u32,
}

/// Envelope payloads that can cross the boundary.
pub(crate) trait FfiPayload {
    fn tag() -> FfiDataTag;
    fn into_raw(self) -> *mut c_void;
}

impl FfiPayload for bool {
    fn tag() -> FfiDataTag {
        FfiDataTag::Bool
    }

    fn into_raw(self) -> *mut c_void {
        Box::into_raw(Box::new(self)) as *mut c_void
    }
}

impl FfiPayload for String {
    fn tag() -> FfiDataTag {
        FfiDataTag::Text
    }

    fn into_raw(self) -> *mut c_void {
        c_string(&self) as *mut c_void
    }
}

impl FfiPayload for Message {
    fn tag() -> FfiDataTag {
        FfiDataTag::Message
    }

    fn into_raw(self) -> *mut c_void {
        Box::into_raw(Box::new(FfiMessage::from_core(self))) as *mut c_void
    }
}

impl FfiPayload for Vec<Message> {
    fn tag() -> FfiDataTag {
        FfiDataTag::MessageList
    }

    fn into_raw(self) -> *mut c_void {
        let len = self.len() as u32;
        let items = if self.is_empty() {
            std::ptr::null_mut()
        } else {
            let boxed: Box<[FfiMessage]> = self.into_iter().map(FfiMessage::from_core).collect();
            Box::into_raw(boxed) as *mut FfiMessage
        };
        Box::into_raw(Box::new(FfiMessageList { items, len })) as *mut c_void
    }
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, `http_status` is
/// the status the host received, `api_code` and `api_message` carry the server
/// envelope, and `data` points to the payload (tagged by `data_tag`). On failure `error_code` describes the category,
/// `error_message` is a human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiNoteResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub api_code: i32,
    pub api_message: *mut c_char,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiNoteResult {
    /// Build a success result from a parsed envelope.
    pub(crate) fn ok<T: FfiPayload>(http_status: u16, envelope: ApiResponse<T>) -> *mut Self {
        Box::into_raw(Box::new(FfiNoteResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status,
            api_code: envelope.code,
            api_message: c_string(&envelope.message),
            data_tag: T::tag(),
            data: envelope.data.into_raw(),
        }))
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(http_status: u16, err: ApiError) -> *mut Self {
        Self::failure(FfiErrorCode::from(&err), http_status, &err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, 0, &format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, 0, msg)
    }

    pub(crate) fn failure(error_code: FfiErrorCode, http_status: u16, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiNoteResult {
            error_code,
            error_message: c_string(msg),
            http_status,
            api_code: 0,
            api_message: std::ptr::null_mut(),
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }
}
