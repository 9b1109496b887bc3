//! One function per subcommand. Each prints the server envelope as JSON.

use std::path::Path;

use anyhow::{bail, Context, Result};
use note_core::{ApiResponse, ImageUpload, NoteApi, Transport};
use serde::Serialize;
use tracing::info;

pub fn check_nickname<T: Transport>(api: &NoteApi<T>, nickname: &str) -> Result<()> {
    let envelope = api.check_nickname(nickname)?;
    info!(available = envelope.data, "nickname checked");
    print_envelope(&envelope)
}

pub fn sign_up<T: Transport>(api: &NoteApi<T>, nickname: &str) -> Result<()> {
    print_envelope(&api.sign_up(nickname)?)
}

pub fn sign_in<T: Transport>(api: &NoteApi<T>, nickname: &str) -> Result<()> {
    print_envelope(&api.sign_in(nickname)?)
}

pub fn send<T: Transport>(
    api: &NoteApi<T>,
    content: &str,
    nickname: &str,
    image: Option<&Path>,
) -> Result<()> {
    let image = image.map(load_image).transpose()?;
    let envelope = api.send_message(content, nickname, image.as_ref())?;
    info!(id = envelope.data.id, "message sent");
    print_envelope(&envelope)
}

pub fn list<T: Transport>(api: &NoteApi<T>) -> Result<()> {
    let envelope = api.list_messages()?;
    info!(count = envelope.data.len(), "messages listed");
    print_envelope(&envelope)
}

pub fn show<T: Transport>(api: &NoteApi<T>, id: u64) -> Result<()> {
    let envelope = api
        .get_message(id)
        .with_context(|| format!("failed to fetch message {id}"))?;
    print_envelope(&envelope)
}

fn print_envelope<D: Serialize>(envelope: &ApiResponse<D>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    if !envelope.is_success() {
        bail!("server answered {}: {}", envelope.code, envelope.message);
    }
    Ok(())
}

fn load_image(path: &Path) -> Result<ImageUpload> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    Ok(ImageUpload::new(file_name, guess_content_type(path), bytes))
}

fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
