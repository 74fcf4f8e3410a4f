use axum::{Router, extract::Query, response::Json as ResponseJson, routing::get};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use services::services::content::{self, Activity, GalleryImage};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
}

/// GET /api/gallery
pub async fn get_gallery(
    WithRejection(Query(query), _): WithRejection<Query<GalleryQuery>, ApiError>,
) -> ResponseJson<ApiResponse<Vec<GalleryImage>>> {
    ResponseJson(ApiResponse::success(content::gallery(
        query.category.as_deref(),
    )))
}

/// GET /api/gallery/categories
pub async fn get_gallery_categories() -> ResponseJson<ApiResponse<Vec<String>>> {
    ResponseJson(ApiResponse::success(content::gallery_categories()))
}

/// GET /api/things-to-do
pub async fn get_things_to_do() -> ResponseJson<ApiResponse<Vec<Activity>>> {
    ResponseJson(ApiResponse::success(content::things_to_do()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/gallery", get(get_gallery))
        .route("/gallery/categories", get(get_gallery_categories))
        .route("/things-to-do", get(get_things_to_do))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_support::{app, body_json, get, send};

    #[tokio::test]
    async fn test_gallery_filters_by_category() {
        let (app, _db) = app().await;

        let all = body_json(send(&app, get("/api/gallery", None)).await).await;
        assert_eq!(all["data"].as_array().unwrap().len(), 15);

        let food = body_json(send(&app, get("/api/gallery?category=Food", None)).await).await;
        let food = food["data"].as_array().unwrap();
        assert_eq!(food.len(), 2);
        assert!(food.iter().all(|image| image["category"] == "Food"));

        let unknown = body_json(send(&app, get("/api/gallery?category=Spa", None)).await).await;
        assert!(unknown["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_categories_and_activities() {
        let (app, _db) = app().await;

        let response = send(&app, get("/api/gallery/categories", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["data"],
            serde_json::json!(["All", "Room", "Nature", "Activities", "Food", "Resort"])
        );

        let activities = body_json(send(&app, get("/api/things-to-do", None)).await).await;
        let activities = activities["data"].as_array().unwrap();
        assert_eq!(activities.len(), 6);
        assert!(activities[0]["highlights"].as_array().is_some());
    }
}
