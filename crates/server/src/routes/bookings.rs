use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use db::models::booking::{Booking, BookingWithDetails, CreateBooking, UpdateBooking};
use services::services::booking::{
    Availability, AvailabilityCheck, AvailabilityRequest, BookingService,
};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::AuthenticatedAdmin};

/// POST /api/bookings/check-availability
pub async fn check_availability(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<AvailabilityRequest>, ApiError>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<Availability>>), ApiError> {
    let response = match BookingService::check_availability(&state.db().pool, &payload).await? {
        AvailabilityCheck::Answered(availability) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(availability)))
        }
        AvailabilityCheck::Rejected(availability) => {
            let message = availability.message.clone().unwrap_or_default();
            (
                StatusCode::BAD_REQUEST,
                ResponseJson(ApiResponse::error_with_data(availability, &message)),
            )
        }
    };
    Ok(response)
}

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateBooking>, ApiError>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<BookingWithDetails>>), ApiError> {
    let booking = BookingService::create(&state.db().pool, &payload).await?;
    Ok((StatusCode::CREATED, ResponseJson(ApiResponse::success(booking))))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<ResponseJson<ApiResponse<BookingWithDetails>>, ApiError> {
    let booking = BookingService::find_with_details(&state.db().pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(booking)))
}

/// GET /api/admin/bookings
pub async fn list_bookings(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<BookingWithDetails>>>, ApiError> {
    let bookings = Booking::find_all_with_details(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(bookings)))
}

/// PUT /api/bookings/{id}
pub async fn update_booking(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateBooking>, ApiError>,
) -> Result<ResponseJson<ApiResponse<Booking>>, ApiError> {
    let booking = BookingService::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(booking)))
}

/// DELETE /api/bookings/{id}
pub async fn delete_booking(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    BookingService::delete(&state.db().pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/check-availability", post(check_availability))
        .route(
            "/bookings/{id}",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route("/admin/bookings", get(list_bookings))
}
