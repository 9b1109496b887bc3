//! C-ABI wrapper around `note-core`.
//!
//! # Overview
//! Exposes every note API operation through `extern "C"` functions so any
//! language with a C FFI can build and parse HTTP requests/responses without
//! linking to Rust's async runtime or serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1. Builders
//!   return null when an argument is null, not UTF-8, or fails validation;
//!   `note_last_error_code` and `note_last_error_message` report why.
//! - A single `FfiNoteResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `note_free_*` function to release them.

pub mod types;

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe, UnwindSafe};
use std::str::Utf8Error;

use note_core::error::ApiError;
use note_core::http::{HttpRequest, HttpResponse};
use note_core::types::{ApiResponse, ImageUpload};
use note_core::NoteClient;

use types::*;

/// Why a builder returned null.
type BuildFailure = (FfiErrorCode, String);

thread_local! {
    static LAST_ERROR: RefCell<Option<BuildFailure>> = const { RefCell::new(None) };
}

fn set_last_error(failure: Option<BuildFailure>) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = failure);
}

/// Borrow a C string as `&str`.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string that outlives
/// the returned reference.
unsafe fn read_str<'a>(ptr: *const c_char) -> Result<&'a str, Utf8Error> {
    CStr::from_ptr(ptr).to_str()
}

/// Borrow a required string argument of a builder.
fn text_arg<'a>(ptr: *const c_char, name: &str) -> Result<&'a str, BuildFailure> {
    if ptr.is_null() {
        return Err((FfiErrorCode::NullArg, format!("null argument: {name}")));
    }
    unsafe { read_str(ptr) }.map_err(|e| (FfiErrorCode::InvalidUtf8, format!("{name} is not valid UTF-8: {e}")))
}

/// Borrow an optional string argument, falling back to `default` when null.
fn text_or<'a>(ptr: *const c_char, name: &str, default: &'a str) -> Result<&'a str, BuildFailure> {
    if ptr.is_null() {
        Ok(default)
    } else {
        text_arg(ptr, name)
    }
}

fn rejected(err: ApiError) -> BuildFailure {
    (FfiErrorCode::from(&err), err.to_string())
}

/// Shared body of every `note_build_*` function: run `build`, record the
/// outcome in the last-error slot, and hand the request to C.
fn build_request<F>(op: &str, build: F) -> *mut FfiHttpRequest
where
    F: FnOnce() -> Result<HttpRequest, BuildFailure> + UnwindSafe,
{
    match catch_unwind(build) {
        Ok(Ok(req)) => {
            set_last_error(None);
            FfiHttpRequest::from_core(req)
        }
        Ok(Err(failure)) => {
            set_last_error(Some(failure));
            std::ptr::null_mut()
        }
        Err(_) => {
            set_last_error(Some((FfiErrorCode::Panic, format!("panic in {op}"))));
            std::ptr::null_mut()
        }
    }
}

/// Shared body of the nickname-only builders.
fn build_with_nickname(
    op: &str,
    client: *const FfiNoteClient,
    nickname: *const c_char,
    build: fn(&NoteClient, &str) -> Result<HttpRequest, ApiError>,
) -> *mut FfiHttpRequest {
    build_request(op, || {
        if client.is_null() {
            return Err((FfiErrorCode::NullArg, "null argument: client".to_string()));
        }
        let client = unsafe { &*client };
        let nickname = text_arg(nickname, "nickname")?;
        build(&client.inner, nickname).map_err(rejected)
    })
}

/// Shared body of every `note_parse_*` function.
fn parse_with<T: FfiPayload>(
    client: *const FfiNoteClient,
    response: *const FfiHttpResponse,
    op: &str,
    parse: fn(&NoteClient, HttpResponse) -> Result<ApiResponse<T>, ApiError>,
) -> *mut FfiNoteResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiNoteResult::null_arg("client");
        }
        if response.is_null() {
            return FfiNoteResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let status = resp.status;
        let resp = match ffi_response_to_core(resp) {
            Ok(resp) => resp,
            Err(e) => {
                let msg = format!("response body is not valid UTF-8: {e}");
                return FfiNoteResult::failure(FfiErrorCode::InvalidUtf8, status, &msg);
            }
        };
        match parse(&client.inner, resp) {
            Ok(envelope) => FfiNoteResult::ok(status, envelope),
            Err(e) => FfiNoteResult::from_error(status, e),
        }
    }))
    .unwrap_or_else(|_| FfiNoteResult::panic(&format!("panic in {op}")))
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// treated as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, Utf8Error> {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { read_str(resp.body) }?.to_string()
    };
    Ok(HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    })
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `NoteClient` bound to `base_url`.
///
/// Returns null if `base_url` is null or not UTF-8, or if an internal panic
/// occurs. The caller must free the returned pointer with `note_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn note_client_new(base_url: *const c_char) -> *mut FfiNoteClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let Ok(url) = (unsafe { read_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        let client = NoteClient::new(url);
        Box::into_raw(Box::new(FfiNoteClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a `NoteClient` created by `note_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn note_client_free(client: *mut FfiNoteClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Last builder error
// ---------------------------------------------------------------------------

/// Error code of the most recent `note_build_*` call on this thread, or `Ok`
/// if it returned a request.
#[unsafe(no_mangle)]
pub extern "C" fn note_last_error_code() -> FfiErrorCode {
    catch_unwind(|| LAST_ERROR.with(|slot| slot.borrow().as_ref().map_or(FfiErrorCode::Ok, |(code, _)| *code)))
        .unwrap_or(FfiErrorCode::Panic)
}

/// Message for `note_last_error_code`, or null when the last build succeeded.
/// Free the returned string with `note_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn note_last_error_message() -> *mut c_char {
    catch_unwind(|| {
        LAST_ERROR.with(|slot| {
            slot.borrow()
                .as_ref()
                .map_or(std::ptr::null_mut(), |(_, message)| c_string(message))
        })
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build a nickname availability check.
///
/// Returns null if an argument is null or the nickname is blank.
/// The caller must free the returned pointer with `note_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn note_build_check_nickname(
    client: *const FfiNoteClient,
    nickname: *const c_char,
) -> *mut FfiHttpRequest {
    build_with_nickname("note_build_check_nickname", client, nickname, NoteClient::build_check_nickname)
}

/// Build a sign-up request. Returns null if an argument is null or the
/// nickname is blank.
#[unsafe(no_mangle)]
pub extern "C" fn note_build_sign_up(
    client: *const FfiNoteClient,
    nickname: *const c_char,
) -> *mut FfiHttpRequest {
    build_with_nickname("note_build_sign_up", client, nickname, NoteClient::build_sign_up)
}

/// Build a sign-in request. Returns null if an argument is null or the
/// nickname is blank.
#[unsafe(no_mangle)]
pub extern "C" fn note_build_sign_in(
    client: *const FfiNoteClient,
    nickname: *const c_char,
) -> *mut FfiHttpRequest {
    build_with_nickname("note_build_sign_in", client, nickname, NoteClient::build_sign_in)
}

/// Build a multipart send-message request.
///
/// `image` may be null. Returns null if `client`, `content` or `nickname` is
/// null, if `content` is empty or `nickname` blank, or if the image has a null
/// `bytes` pointer with a non-zero length.
#[unsafe(no_mangle)]
pub extern "C" fn note_build_send_message(
    client: *const FfiNoteClient,
    content: *const c_char,
    nickname: *const c_char,
    image: *const FfiImageUpload,
) -> *mut FfiHttpRequest {
    build_request("note_build_send_message", || {
        if client.is_null() {
            return Err((FfiErrorCode::NullArg, "null argument: client".to_string()));
        }
        let client = unsafe { &*client };
        let content = text_arg(content, "content")?;
        let nickname = text_arg(nickname, "nickname")?;

        let image = if image.is_null() {
            None
        } else {
            let image = unsafe { &*image };
            if image.bytes.is_null() && image.bytes_len > 0 {
                return Err((FfiErrorCode::NullArg, "null argument: image.bytes".to_string()));
            }
            let bytes = if image.bytes_len == 0 {
                Vec::new()
            } else {
                unsafe { std::slice::from_raw_parts(image.bytes, image.bytes_len) }.to_vec()
            };
            let file_name = text_or(image.file_name, "image.file_name", "image")?;
            let content_type = text_or(image.content_type, "image.content_type", "application/octet-stream")?;
            Some(ImageUpload::new(file_name, content_type, bytes))
        };

        client
            .inner
            .build_send_message(content, nickname, image.as_ref())
            .map_err(rejected)
    })
}

/// Build an HTTP request for listing all messages.
///
/// Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn note_build_list_messages(client: *const FfiNoteClient) -> *mut FfiHttpRequest {
    build_request("note_build_list_messages", || {
        if client.is_null() {
            return Err((FfiErrorCode::NullArg, "null argument: client".to_string()));
        }
        let client = unsafe { &*client };
        Ok(client.inner.build_list_messages())
    })
}

/// Build an HTTP request for a single message. Returns null if `client` is
/// null or `id` is zero.
#[unsafe(no_mangle)]
pub extern "C" fn note_build_get_message(client: *const FfiNoteClient, id: u64) -> *mut FfiHttpRequest {
    build_request("note_build_get_message", || {
        if client.is_null() {
            return Err((FfiErrorCode::NullArg, "null argument: client".to_string()));
        }
        let client = unsafe { &*client };
        client.inner.build_get_message(id).map_err(rejected)
    })
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Parse a nickname check response. `data_tag = Bool`; `true` means free.
#[unsafe(no_mangle)]
pub extern "C" fn note_parse_check_nickname(
    client: *const FfiNoteClient,
    response: *const FfiHttpResponse,
) -> *mut FfiNoteResult {
    parse_with(client, response, "note_parse_check_nickname", NoteClient::parse_check_nickname)
}

/// Parse a sign-up response. `data_tag = Text`.
#[unsafe(no_mangle)]
pub extern "C" fn note_parse_sign_up(
    client: *const FfiNoteClient,
    response: *const FfiHttpResponse,
) -> *mut FfiNoteResult {
    parse_with(client, response, "note_parse_sign_up", NoteClient::parse_sign_up)
}

/// Parse a sign-in response. `data_tag = Text`.
#[unsafe(no_mangle)]
pub extern "C" fn note_parse_sign_in(
    client: *const FfiNoteClient,
    response: *const FfiHttpResponse,
) -> *mut FfiNoteResult {
    parse_with(client, response, "note_parse_sign_in", NoteClient::parse_sign_in)
}

/// Parse a send-message response. `data_tag = Message`.
#[unsafe(no_mangle)]
pub extern "C" fn note_parse_send_message(
    client: *const FfiNoteClient,
    response: *const FfiHttpResponse,
) -> *mut FfiNoteResult {
    parse_with(client, response, "note_parse_send_message", NoteClient::parse_send_message)
}

/// Parse a list-messages response. `data_tag = MessageList`.
#[unsafe(no_mangle)]
pub extern "C" fn note_parse_list_messages(
    client: *const FfiNoteClient,
    response: *const FfiHttpResponse,
) -> *mut FfiNoteResult {
    parse_with(client, response, "note_parse_list_messages", NoteClient::parse_list_messages)
}

/// Parse a message-detail response. `data_tag = Message`.
#[unsafe(no_mangle)]
pub extern "C" fn note_parse_get_message(
    client: *const FfiNoteClient,
    response: *const FfiHttpResponse,
) -> *mut FfiNoteResult {
    parse_with(client, response, "note_parse_get_message", NoteClient::parse_get_message)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `note_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn note_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.body.is_null() {
            drop(unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(req.body, req.body_len)) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiNoteResult` returned by any `note_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn note_free_result(result: *mut FfiNoteResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        free_c_string(result.api_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Bool => drop(unsafe { Box::from_raw(result.data as *mut bool) }),
            FfiDataTag::Text => free_c_string(result.data as *mut c_char),
            FfiDataTag::Message => {
                let message = unsafe { Box::from_raw(result.data as *mut FfiMessage) };
                free_ffi_message_fields(&message);
            }
            FfiDataTag::MessageList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiMessageList) };
                if !list.items.is_null() && list.len > 0 {
                    let items = unsafe {
                        Box::from_raw(std::ptr::slice_from_raw_parts_mut(list.items, list.len as usize))
                    };
                    for item in items.iter() {
                        free_ffi_message_fields(item);
                    }
                }
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free the C-string fields of an `FfiMessage` (but not the struct itself).
fn free_ffi_message_fields(message: &FfiMessage) {
    free_c_string(message.content);
    free_c_string(message.image_url);
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn note_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn new_client() -> *mut FfiNoteClient {
        let url = CString::new("http://localhost:3000").unwrap();
        note_client_new(url.as_ptr())
    }

    fn c_str<'a>(ptr: *const c_char) -> &'a str {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
    }

    fn response(status: u16, body: &CString) -> FfiHttpResponse {
        FfiHttpResponse {
            status,
            body: body.as_ptr(),
        }
    }

    #[test]
    fn client_new_and_free() {
        let client = new_client();
        assert!(!client.is_null());
        note_client_free(client);
    }

    #[test]
    fn client_new_null_returns_null() {
        assert!(note_client_new(std::ptr::null()).is_null());
    }

    #[test]
    fn client_new_invalid_utf8_returns_null() {
        let url = CString::new(vec![b'h', 0xff, 0xfe]).unwrap();
        assert!(note_client_new(url.as_ptr()).is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        note_client_free(std::ptr::null_mut());
    }

    #[test]
    fn build_check_nickname_returns_get_with_query() {
        let client = new_client();
        let nickname = CString::new("alice").unwrap();
        let req = note_build_check_nickname(client, nickname.as_ptr());
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Get));
        assert_eq!(c_str(req_ref.path), "http://localhost:3000/signUp/check?nickname=alice");
        assert!(req_ref.body.is_null());
        assert_eq!(req_ref.body_len, 0);
        assert_eq!(req_ref.headers_len, 1);

        let header = unsafe { &*req_ref.headers };
        assert_eq!(c_str(header.key), "content-type");
        assert_eq!(c_str(header.value), "application/json; charset=UTF-8");

        note_free_request(req);
        note_client_free(client);
    }

    #[test]
    fn build_sign_up_and_sign_in_are_posts() {
        let client = new_client();
        let nickname = CString::new("bob").unwrap();
        for req in [
            note_build_sign_up(client, nickname.as_ptr()),
            note_build_sign_in(client, nickname.as_ptr()),
        ] {
            assert!(!req.is_null());
            assert!(matches!(unsafe { &*req }.method, FfiHttpMethod::Post));
            note_free_request(req);
        }
        note_client_free(client);
    }

    #[test]
    fn blank_nickname_returns_null() {
        let client = new_client();
        let blank = CString::new("   ").unwrap();
        assert!(note_build_check_nickname(client, blank.as_ptr()).is_null());
        assert_eq!(note_last_error_code(), FfiErrorCode::MissingInput);
        let message = note_last_error_message();
        assert_eq!(c_str(message), "nickname is required");
        note_free_string(message);

        assert!(note_build_sign_up(client, std::ptr::null()).is_null());
        assert_eq!(note_last_error_code(), FfiErrorCode::NullArg);

        assert!(note_build_sign_in(std::ptr::null(), blank.as_ptr()).is_null());
        assert_eq!(note_last_error_code(), FfiErrorCode::NullArg);
        note_client_free(client);
    }

    #[test]
    fn successful_build_clears_last_error() {
        let client = new_client();
        assert!(note_build_get_message(client, 0).is_null());
        assert_eq!(note_last_error_code(), FfiErrorCode::MissingInput);

        let req = note_build_list_messages(client);
        assert!(!req.is_null());
        assert_eq!(note_last_error_code(), FfiErrorCode::Ok);
        assert!(note_last_error_message().is_null());

        note_free_request(req);
        note_client_free(client);
    }

    #[test]
    fn invalid_utf8_nickname_is_reported() {
        let client = new_client();
        let nickname = CString::new(vec![0xc3, 0x28]).unwrap();
        assert!(note_build_sign_up(client, nickname.as_ptr()).is_null());
        assert_eq!(note_last_error_code(), FfiErrorCode::InvalidUtf8);
        note_client_free(client);
    }

    #[test]
    fn whitespace_content_builds_a_request() {
        let client = new_client();
        let content = CString::new("   ").unwrap();
        let empty = CString::new("").unwrap();
        let nickname = CString::new("alice").unwrap();

        let req = note_build_send_message(client, content.as_ptr(), nickname.as_ptr(), std::ptr::null());
        assert!(!req.is_null());
        note_free_request(req);

        let req = note_build_send_message(client, empty.as_ptr(), nickname.as_ptr(), std::ptr::null());
        assert!(req.is_null());
        assert_eq!(note_last_error_code(), FfiErrorCode::MissingInput);
        note_client_free(client);
    }

    #[test]
    fn build_send_message_with_image_has_binary_body() {
        let client = new_client();
        let content = CString::new("hello").unwrap();
        let nickname = CString::new("alice").unwrap();
        let file_name = CString::new("a.png").unwrap();
        let content_type = CString::new("image/png").unwrap();
        let bytes = [0u8, 159, 146, 150];
        let image = FfiImageUpload {
            file_name: file_name.as_ptr(),
            content_type: content_type.as_ptr(),
            bytes: bytes.as_ptr(),
            bytes_len: bytes.len(),
        };

        let req = note_build_send_message(client, content.as_ptr(), nickname.as_ptr(), &image);
        assert!(!req.is_null());
        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Post));
        assert_eq!(c_str(req_ref.path), "http://localhost:3000/messages");

        let header = unsafe { &*req_ref.headers };
        assert!(c_str(header.value).starts_with("multipart/form-data; boundary="));

        let body = unsafe { std::slice::from_raw_parts(req_ref.body, req_ref.body_len) };
        assert!(body.windows(bytes.len()).any(|w| w == bytes));

        note_free_request(req);
        note_client_free(client);
    }

    #[test]
    fn build_send_message_rejects_null_image_bytes() {
        let client = new_client();
        let content = CString::new("hello").unwrap();
        let nickname = CString::new("alice").unwrap();
        let image = FfiImageUpload {
            file_name: std::ptr::null(),
            content_type: std::ptr::null(),
            bytes: std::ptr::null(),
            bytes_len: 4,
        };
        let req = note_build_send_message(client, content.as_ptr(), nickname.as_ptr(), &image);
        assert!(req.is_null());
        assert_eq!(note_last_error_code(), FfiErrorCode::NullArg);

        let req = note_build_send_message(client, content.as_ptr(), nickname.as_ptr(), std::ptr::null());
        assert!(!req.is_null());
        note_free_request(req);
        note_client_free(client);
    }

    #[test]
    fn build_get_message_zero_id_returns_null() {
        let client = new_client();
        assert!(note_build_get_message(client, 0).is_null());

        let req = note_build_get_message(client, 5);
        assert_eq!(c_str(unsafe { &*req }.path), "http://localhost:3000/messages/5");
        note_free_request(req);
        note_client_free(client);
    }

    #[test]
    fn build_list_messages_null_client_returns_null() {
        assert!(note_build_list_messages(std::ptr::null()).is_null());
    }

    #[test]
    fn parse_check_nickname_bool_payload() {
        let client = new_client();
        let body = CString::new(r#"{"code":200,"message":"nickname checked","data":true}"#).unwrap();
        let result = note_parse_check_nickname(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::Bool);
        assert_eq!(r.http_status, 200);
        assert_eq!(r.api_code, 200);
        assert_eq!(c_str(r.api_message), "nickname checked");
        assert!(unsafe { *(r.data as *const bool) });

        note_free_result(result);
        note_client_free(client);
    }

    #[test]
    fn parse_sign_up_text_payload() {
        let client = new_client();
        let body = CString::new(r#"{"code":200,"message":"signed up","data":"bob"}"#).unwrap();
        let result = note_parse_sign_up(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.data_tag, FfiDataTag::Text);
        assert_eq!(c_str(r.data as *const c_char), "bob");

        note_free_result(result);
        note_client_free(client);
    }

    #[test]
    fn parse_sign_in_server_error_reports_http_status() {
        let client = new_client();
        let body = CString::new(r#"{"code":500,"message":"boom","data":null}"#).unwrap();
        let result = note_parse_sign_in(client, &response(500, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Http);
        assert_eq!(r.http_status, 500);
        assert!(r.data.is_null());
        assert!(r.api_message.is_null());

        note_free_result(result);
        note_client_free(client);
    }

    #[test]
    fn parse_list_messages_two_items() {
        let client = new_client();
        let body = CString::new(
            r#"{"code":200,"message":"messages","data":[
                {"id":1,"content":"First","imageUrl":null},
                {"id":2,"content":"Second","imageUrl":"/images/2"}
            ]}"#,
        )
        .unwrap();
        let result = note_parse_list_messages(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::MessageList);

        let list = unsafe { &*(r.data as *const FfiMessageList) };
        assert_eq!(list.len, 2);
        let items = unsafe { std::slice::from_raw_parts(list.items, list.len as usize) };
        assert_eq!(items[0].id, 1);
        assert_eq!(c_str(items[0].content), "First");
        assert!(items[0].image_url.is_null());
        assert_eq!(c_str(items[1].image_url), "/images/2");

        note_free_result(result);
        note_client_free(client);
    }

    #[test]
    fn parse_list_messages_empty() {
        let client = new_client();
        let body = CString::new(r#"{"code":200,"message":"messages","data":[]}"#).unwrap();
        let result = note_parse_list_messages(client, &response(200, &body));
        let r = unsafe { &*result };
        let list = unsafe { &*(r.data as *const FfiMessageList) };
        assert_eq!(list.len, 0);
        assert!(list.items.is_null());

        note_free_result(result);
        note_client_free(client);
    }

    #[test]
    fn parse_send_message_created() {
        let client = new_client();
        let body =
            CString::new(r#"{"code":201,"message":"message sent","data":{"id":4,"content":"hi"}}"#).unwrap();
        let result = note_parse_send_message(client, &response(201, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.http_status, 201);
        assert_eq!(r.api_code, 201);
        assert_eq!(r.data_tag, FfiDataTag::Message);
        let message = unsafe { &*(r.data as *const FfiMessage) };
        assert_eq!(message.id, 4);
        assert!(message.image_url.is_null());

        note_free_result(result);
        note_client_free(client);
    }

    #[test]
    fn parse_get_message_not_found() {
        let client = new_client();
        let body = CString::new("").unwrap();
        let result = note_parse_get_message(client, &response(404, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NotFound);
        assert_eq!(r.http_status, 404);
        assert!(!r.error_message.is_null());

        note_free_result(result);
        note_client_free(client);
    }

    #[test]
    fn parse_bad_json_is_deserialization_error() {
        let client = new_client();
        let body = CString::new("not json").unwrap();
        let result = note_parse_get_message(client, &response(200, &body));
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::Deserialization);
        note_free_result(result);
        note_client_free(client);
    }

    #[test]
    fn parse_invalid_utf8_body_is_reported() {
        let client = new_client();
        let body = CString::new(vec![b'{', 0xff, b'}']).unwrap();
        let result = note_parse_list_messages(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::InvalidUtf8);
        assert_eq!(r.http_status, 200);
        assert!(r.data.is_null());
        note_free_result(result);
        note_client_free(client);
    }

    #[test]
    fn parse_null_client_returns_null_arg() {
        let body = CString::new("{}").unwrap();
        let result = note_parse_list_messages(std::ptr::null(), &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);
        assert_eq!(c_str(r.error_message), "null argument: client");
        note_free_result(result);
    }

    #[test]
    fn parse_null_response_returns_null_arg() {
        let client = new_client();
        let result = note_parse_list_messages(client, std::ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        note_free_result(result);
        note_client_free(client);
    }

    #[test]
    fn free_functions_accept_null() {
        note_free_request(std::ptr::null_mut());
        note_free_result(std::ptr::null_mut());
        note_free_string(std::ptr::null_mut());
    }
}
