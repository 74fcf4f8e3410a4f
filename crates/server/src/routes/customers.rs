use axum::{
    Json, Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use axum_extra::extract::WithRejection;
use db::models::customer::{Customer, CustomerWithBookingCount, UpdateCustomer};
use services::services::customers::CustomerService;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::AuthenticatedAdmin};

/// GET /api/admin/customers
pub async fn list_customers(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<CustomerWithBookingCount>>>, ApiError> {
    let customers = CustomerService::list(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(customers)))
}

/// GET /api/admin/customers/{id}
pub async fn get_customer(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<ResponseJson<ApiResponse<Customer>>, ApiError> {
    let customer = CustomerService::get(&state.db().pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(customer)))
}

/// PUT /api/customers/{id}
pub async fn update_customer(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateCustomer>, ApiError>,
) -> Result<ResponseJson<ApiResponse<Customer>>, ApiError> {
    let customer = CustomerService::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(customer)))
}

/// DELETE /api/customers/{id}
pub async fn delete_customer(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    CustomerService::delete(&state.db().pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/customers", get(list_customers))
        .route("/admin/customers/{id}", get(get_customer))
        .route("/customers/{id}", put(update_customer).delete(delete_customer))
}
