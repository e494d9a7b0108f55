use axum::response::Json;
use serde_json::{json, Value};

pub const ROOT_MESSAGE: &str =
    "APIs to extract operational data of Awesome Inc. Check /docs for more details.";

/// GET / - fixed informational message
pub async fn root() -> Json<Value> {
    Json(json!({ "message": ROOT_MESSAGE }))
}
