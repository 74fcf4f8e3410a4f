use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use chrono::Utc;
use services::services::dashboard::{DashboardService, DashboardStats};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, middleware::AuthenticatedAdmin};

/// GET /api/admin/dashboard
pub async fn get_dashboard(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<DashboardStats>>, ApiError> {
    // Booking timestamps are stored in UTC.
    let today = Utc::now().date_naive();
    let stats = DashboardService::stats(&state.db().pool, today).await?;
    Ok(ResponseJson(ApiResponse::success(stats)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/admin/dashboard", get(get_dashboard))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_support::{admin_cookie, app, body_json, get, send};

    #[tokio::test]
    async fn test_dashboard_on_empty_database() {
        let (app, _db) = app().await;

        let anonymous = send(&app, get("/api/admin/dashboard", None)).await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let cookie = admin_cookie(&app).await;
        let response = send(&app, get("/api/admin/dashboard", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let stats = body_json(response).await["data"].clone();
        assert_eq!(stats["totalBookings"], 0);
        assert_eq!(stats["totalRevenue"], 0.0);
        assert_eq!(stats["bookingsPerMonth"].as_array().unwrap().len(), 12);
        assert_eq!(stats["revenuePerMonth"].as_array().unwrap().len(), 12);
        assert!(stats["recentBookings"].as_array().unwrap().is_empty());
    }
}
