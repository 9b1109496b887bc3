//! Stateless HTTP request builder and response parser for the note API.
//!
//! # Design
//! `NoteClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that validates its
//! inputs and produces an `HttpRequest`, and a `parse_*` method that consumes
//! an `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::multipart::MultipartForm;
use crate::types::{
    ApiResponse, ImageUpload, MessageDetailResponse, MessageListResponse, NicknameCheckResponse,
    SendMessageResponse, SignInResponse, SignUpResponse,
};

/// Production endpoint of the note service.
pub const DEFAULT_BASE_URL: &str = "https://ssgg.store:443";

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Synchronous, stateless client for the note API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct NoteClient {
    base_url: String,
}

impl Default for NoteClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl NoteClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_check_nickname(&self, nickname: &str) -> Result<HttpRequest, ApiError> {
        let nickname = require_nickname(nickname)?;
        Ok(self.json_request(HttpMethod::Get, &self.with_nickname("/signUp/check", nickname)))
    }

    pub fn build_sign_up(&self, nickname: &str) -> Result<HttpRequest, ApiError> {
        let nickname = require_nickname(nickname)?;
        Ok(self.json_request(HttpMethod::Post, &self.with_nickname("/signUp", nickname)))
    }

    pub fn build_sign_in(&self, nickname: &str) -> Result<HttpRequest, ApiError> {
        let nickname = require_nickname(nickname)?;
        Ok(self.json_request(HttpMethod::Post, &self.with_nickname("/login", nickname)))
    }

    /// Build the multipart upload for a new message. `image` is optional.
    pub fn build_send_message(
        &self,
        content: &str,
        nickname: &str,
        image: Option<&ImageUpload>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_send_message_with_form(content, nickname, image, MultipartForm::new())
    }

    /// Same as `build_send_message` but with a caller-chosen form, so the
    /// boundary can be fixed.
    pub fn build_send_message_with_form(
        &self,
        content: &str,
        nickname: &str,
        image: Option<&ImageUpload>,
        form: MultipartForm,
    ) -> Result<HttpRequest, ApiError> {
        if content.is_empty() {
            return Err(ApiError::MissingInput { field: "content" });
        }
        let nickname = require_nickname(nickname)?;

        let content_type = form.content_type();
        let mut form = form.text("content", content).text("nickname", nickname);
        if let Some(image) = image {
            form = form.file("image", &image.file_name, &image.content_type, &image.bytes);
        }

        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/messages", self.base_url),
            headers: vec![("content-type".to_string(), content_type)],
            body: Some(form.finish()),
        })
    }

    pub fn build_list_messages(&self) -> HttpRequest {
        self.json_request(HttpMethod::Get, &format!("{}/messages", self.base_url))
    }

    pub fn build_get_message(&self, id: u64) -> Result<HttpRequest, ApiError> {
        if id == 0 {
            return Err(ApiError::MissingInput { field: "id" });
        }
        Ok(self.json_request(HttpMethod::Get, &format!("{}/messages/{id}", self.base_url)))
    }

    pub fn parse_check_nickname(&self, response: HttpResponse) -> Result<NicknameCheckResponse, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_sign_up(&self, response: HttpResponse) -> Result<SignUpResponse, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_sign_in(&self, response: HttpResponse) -> Result<SignInResponse, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_send_message(&self, response: HttpResponse) -> Result<SendMessageResponse, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_list_messages(&self, response: HttpResponse) -> Result<MessageListResponse, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_get_message(&self, response: HttpResponse) -> Result<MessageDetailResponse, ApiError> {
        parse_envelope(response)
    }

    fn json_request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: path.to_string(),
            headers: vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())],
            body: None,
        }
    }

    fn with_nickname(&self, endpoint: &str, nickname: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("nickname", nickname)
            .finish();
        format!("{}{endpoint}?{query}", self.base_url)
    }
}

/// Trim surrounding whitespace and reject an empty nickname.
fn require_nickname(nickname: &str) -> Result<&str, ApiError> {
    let trimmed = nickname.trim();
    if trimmed.is_empty() {
        return Err(ApiError::MissingInput { field: "nickname" });
    }
    Ok(trimmed)
}

fn parse_envelope<T: DeserializeOwned>(response: HttpResponse) -> Result<ApiResponse<T>, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
