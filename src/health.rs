use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageResponse {
    message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

/// GET /
pub async fn root() -> Json<MessageResponse> {
    MessageResponse::new("Northmann Group backend running")
}

/// GET /api/hello
pub async fn hello() -> Json<MessageResponse> {
    MessageResponse::new("Hello from the backend API!")
}
