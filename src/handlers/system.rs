use axum::response::Json;
use serde_json::{json, Value};

use crate::identity::{IDENTITY_COOKIE, IDENTITY_HEADERS};
use crate::middleware::{ApiResponse, ApiResult};

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Factory API",
            "version": version,
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "identity": "/api/identity (public - reports caller identity if any)",
                "whoami": "/api/whoami (protected - requires caller identity)",
            },
            "identity": {
                "precedence": ["session", "header", "cookie"],
                "headers": IDENTITY_HEADERS,
                "cookie": IDENTITY_COOKIE,
            }
        }
    }))
}

pub async fn health() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    })))
}
