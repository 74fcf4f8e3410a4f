use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::get,
};
use axum_extra::extract::WithRejection;
use db::models::room::{Room, RoomFilter, RoomPayload};
use services::services::rooms::RoomService;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::AuthenticatedAdmin};

/// GET /api/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    WithRejection(Query(filter), _): WithRejection<Query<RoomFilter>, ApiError>,
) -> Result<ResponseJson<ApiResponse<Vec<Room>>>, ApiError> {
    let rooms = RoomService::list_active(&state.db().pool, &filter).await?;
    Ok(ResponseJson(ApiResponse::success(rooms)))
}

/// GET /api/rooms/featured
pub async fn featured_rooms(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Room>>>, ApiError> {
    let rooms = RoomService::featured(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(rooms)))
}

/// GET /api/rooms/{id}
pub async fn get_room(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<ResponseJson<ApiResponse<Room>>, ApiError> {
    let room = RoomService::get_active(&state.db().pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(room)))
}

/// GET /api/admin/rooms
pub async fn list_all_rooms(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Room>>>, ApiError> {
    let rooms = RoomService::list_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(rooms)))
}

/// POST /api/rooms
pub async fn create_room(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RoomPayload>, ApiError>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<Room>>), ApiError> {
    let room = RoomService::create(&state.db().pool, payload).await?;
    Ok((StatusCode::CREATED, ResponseJson(ApiResponse::success(room))))
}

/// PUT /api/rooms/{id}
pub async fn update_room(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<RoomPayload>, ApiError>,
) -> Result<ResponseJson<ApiResponse<Room>>, ApiError> {
    let room = RoomService::update(&state.db().pool, id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(room)))
}

/// DELETE /api/rooms/{id}
pub async fn delete_room(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    RoomService::delete(&state.db().pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/featured", get(featured_rooms))
        .route(
            "/rooms/{id}",
            get(get_room).put(update_room).delete(delete_room),
        )
        .route("/admin/rooms", get(list_all_rooms))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::test_support::{admin_cookie, app, body_json, get, json_request, send};

    fn room_body(name: &str, price: f64, capacity: i32) -> Value {
        json!({
            "name": name,
            "description": "Bright room facing the pine forest",
            "pricePerNight": price,
            "capacity": capacity,
            "amenities": "[\"Free Wi-Fi\",\"Balcony\"]",
            "images": ["https://img.example/pine.jpg"],
        })
    }

    #[tokio::test]
    async fn test_admin_creates_and_public_lists_rooms() {
        let (app, _db) = app().await;
        let cookie = admin_cookie(&app).await;

        let response = send(
            &app,
            json_request("POST", "/api/rooms", &room_body("Pine Suite", 4000.0, 4), Some(&cookie)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["data"]["amenities"], json!(["Free Wi-Fi", "Balcony"]));
        assert_eq!(created["data"]["isActive"], true);
        let id = created["data"]["id"].as_str().unwrap().to_string();

        send(
            &app,
            json_request("POST", "/api/rooms", &room_body("Meadow Room", 2000.0, 2), Some(&cookie)),
        )
        .await;

        let all = body_json(send(&app, get("/api/rooms", None)).await).await;
        assert_eq!(all["data"].as_array().unwrap().len(), 2);

        let roomy = body_json(send(&app, get("/api/rooms?capacity=3", None)).await).await;
        let names: Vec<&str> = roomy["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Pine Suite"]);

        let cheap = body_json(send(&app, get("/api/rooms?maxPrice=2500&minPrice=0", None)).await).await;
        assert_eq!(cheap["data"][0]["name"], "Meadow Room");

        let one = send(&app, get(&format!("/api/rooms/{id}"), None)).await;
        assert_eq!(one.status(), StatusCode::OK);
        assert_eq!(body_json(one).await["data"]["name"], "Pine Suite");
    }

    #[tokio::test]
    async fn test_room_writes_require_admin() {
        let (app, _db) = app().await;

        let response = send(
            &app,
            json_request("POST", "/api/rooms", &room_body("Pine Suite", 4000.0, 4), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send(&app, get("/api/admin/rooms", None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_room_validation_and_conflicts() {
        let (app, _db) = app().await;
        let cookie = admin_cookie(&app).await;

        let invalid = send(
            &app,
            json_request("POST", "/api/rooms", &room_body("Crowded", 1000.0, 12), Some(&cookie)),
        )
        .await;
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(invalid).await["message"],
            "Capacity must be between 1 and 10"
        );

        let first = send(
            &app,
            json_request("POST", "/api/rooms", &room_body("Pine Suite", 4000.0, 4), Some(&cookie)),
        )
        .await;
        assert_eq!(first.status(), StatusCode::CREATED);
        let duplicate = send(
            &app,
            json_request("POST", "/api/rooms", &room_body("Pine Suite", 4500.0, 4), Some(&cookie)),
        )
        .await;
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_inactive_room_is_hidden_from_public() {
        let (app, _db) = app().await;
        let cookie = admin_cookie(&app).await;

        let created = body_json(
            send(
                &app,
                json_request("POST", "/api/rooms", &room_body("Pine Suite", 4000.0, 4), Some(&cookie)),
            )
            .await,
        )
        .await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let mut body = room_body("Pine Suite", 4200.0, 4);
        body["isActive"] = json!(false);
        let updated = send(
            &app,
            json_request("PUT", &format!("/api/rooms/{id}"), &body, Some(&cookie)),
        )
        .await;
        assert_eq!(updated.status(), StatusCode::OK);
        assert_eq!(body_json(updated).await["data"]["pricePerNight"], 4200.0);

        let public = send(&app, get(&format!("/api/rooms/{id}"), None)).await;
        assert_eq!(public.status(), StatusCode::NOT_FOUND);

        let admin = body_json(send(&app, get("/api/admin/rooms", Some(&cookie))).await).await;
        assert_eq!(admin["data"].as_array().unwrap().len(), 1);

        let deleted = send(
            &app,
            json_request("DELETE", &format!("/api/rooms/{id}"), &json!({}), Some(&cookie)),
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::OK);
        let again = send(
            &app,
            json_request("DELETE", &format!("/api/rooms/{id}"), &json!({}), Some(&cookie)),
        )
        .await;
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_room_id_is_bad_request() {
        let (app, _db) = app().await;
        let response = send(&app, get("/api/rooms/not-a-uuid", None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
