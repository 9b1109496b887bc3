use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{PathRejection, QueryRejection},
        Multipart, Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    pub content: String,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct NicknameQuery {
    #[serde(default)]
    pub nickname: String,
}

struct StoredImage {
    content_type: String,
    bytes: Vec<u8>,
}

/// Everything the server remembers between requests.
#[derive(Default)]
pub struct Board {
    users: HashSet<String>,
    messages: BTreeMap<u64, Message>,
    images: HashMap<u64, StoredImage>,
    next_id: u64,
}

pub type Db = Arc<RwLock<Board>>;

/// Error reply carrying the usual envelope with `data: null`.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = ApiResponse {
            code: i32::from(self.status.as_u16()),
            message: self.message,
            data: (),
        };
        (self.status, Json(body)).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Board::default()));
    Router::new()
        .route("/signUp/check", get(check_nickname))
        .route("/signUp", post(sign_up))
        .route("/login", post(login))
        .route("/messages", get(list_messages).post(send_message))
        .route("/messages/{id}", get(get_message))
        .route("/images/{id}", get(get_image))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock note server listening");
    }
    axum::serve(listener, app()).await
}

fn ok<T>(message: &str, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code: 200,
        message: message.to_string(),
        data,
    })
}

fn missing(field: &str) -> ApiFailure {
    ApiFailure::new(StatusCode::BAD_REQUEST, format!("{field} is required"))
}

/// Trimmed nickname, rejected when nothing is left.
fn required_nickname(value: &str) -> Result<&str, ApiFailure> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(missing("nickname"));
    }
    Ok(trimmed)
}

fn bad_multipart(err: MultipartError) -> ApiFailure {
    ApiFailure::new(StatusCode::BAD_REQUEST, err.body_text())
}

impl From<PathRejection> for ApiFailure {
    fn from(rejection: PathRejection) -> Self {
        ApiFailure::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiFailure {
    fn from(rejection: QueryRejection) -> Self {
        ApiFailure::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiFailure {
    fn from(rejection: MultipartRejection) -> Self {
        ApiFailure::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

async fn check_nickname(
    State(db): State<Db>,
    query: Result<Query<NicknameQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<bool>>, ApiFailure> {
    let Query(query) = query?;
    let nickname = required_nickname(&query.nickname)?;
    let available = !db.read().await.users.contains(nickname);
    debug!(nickname, available, "nickname checked");
    Ok(ok("nickname checked", available))
}

async fn sign_up(
    State(db): State<Db>,
    query: Result<Query<NicknameQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<String>>, ApiFailure> {
    let Query(query) = query?;
    let nickname = required_nickname(&query.nickname)?;
    if !db.write().await.users.insert(nickname.to_string()) {
        return Err(ApiFailure::new(StatusCode::CONFLICT, "nickname already taken"));
    }
    debug!(nickname, "signed up");
    Ok(ok("signed up", nickname.to_string()))
}

async fn login(
    State(db): State<Db>,
    query: Result<Query<NicknameQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<String>>, ApiFailure> {
    let Query(query) = query?;
    let nickname = required_nickname(&query.nickname)?;
    if !db.read().await.users.contains(nickname) {
        return Err(ApiFailure::new(StatusCode::NOT_FOUND, "unknown nickname"));
    }
    Ok(ok("signed in", nickname.to_string()))
}

async fn send_message(
    State(db): State<Db>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Message>>), ApiFailure> {
    let mut multipart = multipart?;
    let mut content = String::new();
    let mut nickname = String::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "content" => content = field.text().await.map_err(bad_multipart)?,
            "nickname" => nickname = field.text().await.map_err(bad_multipart)?,
            "image" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                image = Some(StoredImage {
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    if content.is_empty() {
        return Err(missing("content"));
    }
    let nickname = required_nickname(&nickname)?;

    let mut board = db.write().await;
    board.next_id += 1;
    let id = board.next_id;
    let message = Message {
        id,
        content,
        image_url: image.as_ref().map(|_| format!("/images/{id}")),
    };
    if let Some(image) = image {
        board.images.insert(id, image);
    }
    board.messages.insert(id, message.clone());
    debug!(id, nickname, "message stored");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            code: 201,
            message: "message sent".to_string(),
            data: message,
        }),
    ))
}

async fn list_messages(State(db): State<Db>) -> Json<ApiResponse<Vec<Message>>> {
    let board = db.read().await;
    ok("messages", board.messages.values().cloned().collect())
}

async fn get_message(
    State(db): State<Db>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<ApiResponse<Message>>, ApiFailure> {
    let Path(id) = id?;
    let board = db.read().await;
    board
        .messages
        .get(&id)
        .cloned()
        .map(|message| ok("message", message))
        .ok_or_else(|| ApiFailure::new(StatusCode::NOT_FOUND, "message not found"))
}

async fn get_image(
    State(db): State<Db>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Response, ApiFailure> {
    let Path(id) = id?;
    let board = db.read().await;
    let image = board
        .images
        .get(&id)
        .ok_or_else(|| ApiFailure::new(StatusCode::NOT_FOUND, "image not found"))?;
    Ok((
        [(header::CONTENT_TYPE, image.content_type.clone())],
        image.bytes.clone(),
    )
        .into_response())
}
