use axum::{Router, response::Json as ResponseJson, routing::get};
use utils::response::ApiResponse;

use crate::AppState;

pub async fn health_check() -> ResponseJson<ApiResponse<String>> {
    ResponseJson(ApiResponse::success("OK".to_string()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_support::{app, body_json, get, send};

    #[tokio::test]
    async fn test_health_check() {
        let (app, _db) = app().await;
        let response = send(&app, get("/api/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], "OK");
    }
}
