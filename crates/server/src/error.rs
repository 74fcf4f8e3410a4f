use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::services::{
    auth::AuthError, booking::BookingError, customers::CustomerError,
    dashboard::DashboardError, pdf::PdfError,
    report::ReportError, rooms::RoomError,
};
use thiserror::Error;
use utils::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Room(#[from] RoomError),
    #[error(transparent)]
    Customer(#[from] CustomerError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Pdf(#[from] PdfError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    Query(#[from] QueryRejection),
    #[error(transparent)]
    Path(#[from] PathRejection),
    #[error("{0}")]
    BadRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Booking(err) => match err {
                BookingError::Validation(_)
                | BookingError::InvalidDateRange
                | BookingError::RoomInactive
                | BookingError::CapacityExceeded { .. }
                | BookingError::Unavailable => StatusCode::BAD_REQUEST,
                BookingError::RoomNotFound | BookingError::NotFound => StatusCode::NOT_FOUND,
                BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Room(err) => match err {
                RoomError::Validation(_) | RoomError::InvalidList { .. } => {
                    StatusCode::BAD_REQUEST
                }
                RoomError::NotFound => StatusCode::NOT_FOUND,
                RoomError::DuplicateName(_) | RoomError::InUse => StatusCode::CONFLICT,
                RoomError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Customer(err) => match err {
                CustomerError::Validation(_) => StatusCode::BAD_REQUEST,
                CustomerError::NotFound => StatusCode::NOT_FOUND,
                CustomerError::DuplicateEmail(_) | CustomerError::HasBookings => {
                    StatusCode::CONFLICT
                }
                CustomerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Auth(err) => match err {
                AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::Database(_) | AuthError::Hash(_) | AuthError::Session(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Report(ReportError::InvalidMonth(_) | ReportError::InvalidYear(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Json(_) | ApiError::Query(_) | ApiError::Path(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Report(ReportError::Database(_))
            | ApiError::Dashboard(_)
            | ApiError::Pdf(_)
            | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let message = if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
            "An internal error occurred".to_string()
        } else {
            tracing::debug!(status = %status_code, error = %self, "Request rejected");
            match &self {
                // Collapse the field map into one readable line.
                ApiError::Booking(BookingError::Validation(errors))
                | ApiError::Room(RoomError::Validation(errors))
                | ApiError::Customer(CustomerError::Validation(errors)) => {
                    validation_message(errors)
                }
                ApiError::Json(rejection) => rejection.body_text(),
                ApiError::Query(rejection) => rejection.body_text(),
                ApiError::Path(rejection) => rejection.body_text(),
                _ => self.to_string(),
            }
        };

        (status_code, Json(ApiResponse::<()>::error(&message))).into_response()
    }
}

fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
