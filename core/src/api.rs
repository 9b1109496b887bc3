//! One-shot helpers that validate, execute and parse in a single call.
//!
//! `NoteApi` pairs a `NoteClient` with a host-supplied `Transport`. The core
//! still performs no I/O itself; the transport is the only place a network
//! call happens.

use tracing::debug;

use crate::client::NoteClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{
    ImageUpload, MessageDetailResponse, MessageListResponse, NicknameCheckResponse,
    SendMessageResponse, SignInResponse, SignUpResponse,
};

/// Executes a single HTTP round-trip on behalf of the core.
///
/// Implementations must return non-2xx responses as `Ok`; status
/// interpretation belongs to `NoteClient::parse_*`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[derive(Debug, Clone)]
pub struct NoteApi<T> {
    client: NoteClient,
    transport: T,
}

impl<T: Transport> NoteApi<T> {
    pub fn new(client: NoteClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &NoteClient {
        &self.client
    }

    pub fn check_nickname(&self, nickname: &str) -> Result<NicknameCheckResponse, ApiError> {
        let response = self.send(self.client.build_check_nickname(nickname)?)?;
        self.client.parse_check_nickname(response)
    }

    pub fn sign_up(&self, nickname: &str) -> Result<SignUpResponse, ApiError> {
        let response = self.send(self.client.build_sign_up(nickname)?)?;
        self.client.parse_sign_up(response)
    }

    pub fn sign_in(&self, nickname: &str) -> Result<SignInResponse, ApiError> {
        let response = self.send(self.client.build_sign_in(nickname)?)?;
        self.client.parse_sign_in(response)
    }

    pub fn send_message(
        &self,
        content: &str,
        nickname: &str,
        image: Option<&ImageUpload>,
    ) -> Result<SendMessageResponse, ApiError> {
        let response = self.send(self.client.build_send_message(content, nickname, image)?)?;
        self.client.parse_send_message(response)
    }

    pub fn list_messages(&self) -> Result<MessageListResponse, ApiError> {
        let response = self.send(self.client.build_list_messages())?;
        self.client.parse_list_messages(response)
    }

    pub fn get_message(&self, id: u64) -> Result<MessageDetailResponse, ApiError> {
        let response = self.send(self.client.build_get_message(id)?)?;
        self.client.parse_get_message(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }
}
