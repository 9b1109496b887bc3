//! Domain DTOs for the note API.
//!
//! # Design
//! Every endpoint wraps its payload in the same `{code, message, data}`
//! envelope, so a single generic `ApiResponse<T>` covers all of them. The
//! list, detail and send endpoints share one `Message` shape; a missing or
//! `null` `imageUrl` both decode to `None`.
//!
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// Response envelope shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// True when the envelope `code` is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

/// A single note on the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// An image attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// `data` is `true` when the nickname is still free.
pub type NicknameCheckResponse = ApiResponse<bool>;
/// `data` is the registered nickname.
pub type SignUpResponse = ApiResponse<String>;
pub type SignInResponse = ApiResponse<String>;
pub type SendMessageResponse = ApiResponse<Message>;
pub type MessageListResponse = ApiResponse<Vec<Message>>;
pub type MessageDetailResponse = ApiResponse<Message>;
