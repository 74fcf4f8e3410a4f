//! Booking flow: availability, pricing, guest upsert and admin edits.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use db::models::{
    booking::{
        Booking, BookingChanges, BookingStatus, BookingWithDetails, CreateBooking, NewBooking,
        UpdateBooking,
    },
    customer::Customer,
    room::Room,
};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};
use ts_rs::TS;
use utils::dates::{calculate_nights, calculate_total, check_date_overlap};
use uuid::Uuid;
use validator::Validate;

pub const UNAVAILABLE_MESSAGE: &str = "Room is not available for the selected dates";

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,
    #[error("Room not found")]
    RoomNotFound,
    #[error("Room is not open for booking")]
    RoomInactive,
    #[error("Room sleeps at most {capacity} guests, {requested} requested")]
    CapacityExceeded { capacity: i32, requested: i32 },
    #[error("{UNAVAILABLE_MESSAGE}")]
    Unavailable,
    #[error("Booking not found")]
    NotFound,
}

/// Availability query from the booking widget. Every field is optional so a
/// half-filled form gets a readable answer instead of a parse failure. Empty
/// strings count as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub room_id: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub check_in: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub check_out: Option<NaiveDate>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Availability {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Availability {
    fn available() -> Self {
        Self {
            available: true,
            message: None,
        }
    }

    fn unavailable(message: &str) -> Self {
        Self {
            available: false,
            message: Some(message.to_string()),
        }
    }
}

/// Outcome of an availability query. `Rejected` means the request itself was
/// unusable.
#[derive(Debug, Clone, PartialEq)]
pub enum AvailabilityCheck {
    Answered(Availability),
    Rejected(Availability),
}

fn ensure_date_range(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), BookingError> {
    if check_out <= check_in {
        return Err(BookingError::InvalidDateRange);
    }
    Ok(())
}

/// Whether any of `existing` shares a night with the requested stay.
/// `exclude` skips the booking being edited.
pub fn has_conflict(
    existing: &[Booking],
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude: Option<Uuid>,
) -> bool {
    existing
        .iter()
        .filter(|b| b.status.blocks_room())
        .filter(|b| Some(b.id) != exclude)
        .any(|b| check_date_overlap(check_in, check_out, b.check_in, b.check_out))
}

fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub struct BookingService;

impl BookingService {
    pub async fn check_availability(
        pool: &SqlitePool,
        request: &AvailabilityRequest,
    ) -> Result<AvailabilityCheck, BookingError> {
        let (Some(room_id), Some(check_in), Some(check_out)) =
            (request.room_id, request.check_in, request.check_out)
        else {
            return Ok(AvailabilityCheck::Rejected(Availability::unavailable(
                "Missing required fields",
            )));
        };

        if ensure_date_range(check_in, check_out).is_err() {
            return Ok(AvailabilityCheck::Rejected(Availability::unavailable(
                &BookingError::InvalidDateRange.to_string(),
            )));
        }

        let existing = Booking::find_blocking_for_room(pool, room_id).await?;
        if has_conflict(&existing, check_in, check_out, None) {
            debug!(%room_id, %check_in, %check_out, "Room unavailable");
            return Ok(AvailabilityCheck::Answered(Availability::unavailable(
                UNAVAILABLE_MESSAGE,
            )));
        }

        Ok(AvailabilityCheck::Answered(Availability::available()))
    }

    /// Places a public booking. The availability check, guest upsert and
    /// insert share one transaction.
    pub async fn create(
        pool: &SqlitePool,
        request: &CreateBooking,
    ) -> Result<BookingWithDetails, BookingError> {
        request.validate()?;
        ensure_date_range(request.check_in, request.check_out)?;

        let mut tx = pool.begin().await?;

        let room = Room::find_by_id(&mut *tx, request.room_id)
            .await?
            .ok_or(BookingError::RoomNotFound)?;
        if !room.is_active {
            return Err(BookingError::RoomInactive);
        }
        if request.number_of_guests > room.capacity {
            return Err(BookingError::CapacityExceeded {
                capacity: room.capacity,
                requested: request.number_of_guests,
            });
        }

        let existing = Booking::find_blocking_for_room(&mut *tx, room.id).await?;
        if has_conflict(&existing, request.check_in, request.check_out, None) {
            return Err(BookingError::Unavailable);
        }

        let nights = calculate_nights(request.check_in, request.check_out);
        let total_amount = calculate_total(nights, room.price_per_night);

        let customer = Customer::upsert_by_email(
            &mut *tx,
            request.name.trim(),
            request.email.trim(),
            request.phone.trim(),
        )
        .await?;

        let booking = Booking::create(
            &mut *tx,
            Uuid::new_v4(),
            &NewBooking {
                customer_id: customer.id,
                room_id: room.id,
                check_in: request.check_in,
                check_out: request.check_out,
                number_of_guests: request.number_of_guests,
                total_amount,
                status: BookingStatus::Pending,
                special_requests: blank_to_none(request.special_requests.as_deref()),
            },
        )
        .await?;

        tx.commit().await?;

        info!(
            booking_id = %booking.id,
            room = %room.name,
            customer_id = %customer.id,
            nights,
            total_amount,
            "Booking created"
        );

        Ok(BookingWithDetails {
            booking,
            room,
            customer,
        })
    }

    pub async fn find_with_details(
        pool: &SqlitePool,
        id: Uuid,
    ) -> Result<BookingWithDetails, BookingError> {
        Booking::find_by_id_with_details(pool, id)
            .await?
            .ok_or(BookingError::NotFound)
    }

    /// Admin edit: refreshes the guest's contact details, reprices the stay
    /// and re-checks availability when the booking still holds the room.
    /// Room capacity is only enforced at creation.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        request: &UpdateBooking,
    ) -> Result<Booking, BookingError> {
        request.validate()?;
        ensure_date_range(request.check_in, request.check_out)?;

        let mut tx = pool.begin().await?;

        let current = Booking::find_by_id(&mut *tx, id)
            .await?
            .ok_or(BookingError::NotFound)?;
        let room = Room::find_by_id(&mut *tx, current.room_id)
            .await?
            .ok_or(BookingError::RoomNotFound)?;

        if request.status.blocks_room() {
            let existing = Booking::find_blocking_for_room(&mut *tx, room.id).await?;
            if has_conflict(&existing, request.check_in, request.check_out, Some(id)) {
                return Err(BookingError::Unavailable);
            }
        }

        Customer::update_contact(
            &mut *tx,
            current.customer_id,
            request.customer_name.trim(),
            request.customer_phone.trim(),
        )
        .await?;

        let nights = calculate_nights(request.check_in, request.check_out);
        let updated = Booking::update(
            &mut *tx,
            id,
            &BookingChanges {
                check_in: request.check_in,
                check_out: request.check_out,
                number_of_guests: request.number_of_guests,
                status: request.status,
                total_amount: calculate_total(nights, room.price_per_night),
            },
        )
        .await?
        .ok_or(BookingError::NotFound)?;

        tx.commit().await?;

        info!(
            booking_id = %id,
            status = %updated.status,
            total_amount = updated.total_amount,
            "Booking updated"
        );

        Ok(updated)
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<(), BookingError> {
        if Booking::delete(pool, id).await? == 0 {
            return Err(BookingError::NotFound);
        }
        info!(booking_id = %id, "Booking deleted");
        Ok(())
    }
}
