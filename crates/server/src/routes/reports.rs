use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json as ResponseJson},
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use services::services::{
    pdf::render_monthly_report,
    report::{MonthlyReport, ReportService},
};
use tracing::info;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, middleware::AuthenticatedAdmin};

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PdfRequest {
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
}

/// GET /api/reports/data
pub async fn get_report_data(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ReportQuery>, ApiError>,
) -> Result<ResponseJson<ApiResponse<MonthlyReport>>, ApiError> {
    let month = query.month.unwrap_or(1);
    let year = query.year.unwrap_or_else(|| Utc::now().year());

    let report = ReportService::monthly(&state.db().pool, year, month).await?;
    Ok(ResponseJson(ApiResponse::success(report)))
}

/// POST /api/reports/pdf
pub async fn download_report_pdf(
    _admin: AuthenticatedAdmin,
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<PdfRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(month), Some(year)) = (payload.month, payload.year) else {
        return Err(ApiError::BadRequest("Month and year are required".to_string()));
    };

    let report = ReportService::monthly(&state.db().pool, year, month).await?;
    let bytes = render_monthly_report(&report)?;
    info!(month, year, size = bytes.len(), "Monthly report rendered");

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"report-{month}-{year}.pdf\""),
        ),
    ];
    Ok((headers, bytes))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports/data", get(get_report_data))
        .route("/reports/pdf", post(download_report_pdf))
}
