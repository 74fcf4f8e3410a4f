//! Monthly booking report: the admin reports page and the PDF download both
//! build on [`MonthlyReport`].

use chrono::{Datelike, NaiveDate};
use db::models::booking::{Booking, BookingStatus, BookingWithDetails};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use ts_rs::TS;
use utils::dates::{format_long_date, month_bounds, month_name};
use uuid::Uuid;

pub const NO_ROOM: &str = "N/A";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
    #[error("Year {0} is out of range")]
    InvalidYear(i32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ReportBookingRow {
    pub id: Uuid,
    pub customer_name: String,
    pub room_name: String,
    pub check_in: String,
    pub check_out: String,
    pub amount: f64,
    pub status: BookingStatus,
}

impl From<&BookingWithDetails> for ReportBookingRow {
    fn from(b: &BookingWithDetails) -> Self {
        Self {
            id: b.id,
            customer_name: b.customer.name.clone(),
            room_name: b.room.name.clone(),
            check_in: format_long_date(b.check_in),
            check_out: format_long_date(b.check_out),
            amount: b.total_amount,
            status: b.status,
        }
    }
}

impl ReportBookingRow {
    /// First eight characters of the id followed by an ellipsis.
    pub fn short_id(&self) -> String {
        let id = self.id.to_string();
        format!("{}...", &id[..8])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct DailyBookings {
    pub day: u32,
    pub bookings: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: u32,
    pub year: i32,
    pub month_name: String,
    pub total_bookings: usize,
    pub total_revenue: f64,
    pub most_booked_room: String,
    pub bookings: Vec<ReportBookingRow>,
    pub daily_data: Vec<DailyBookings>,
}

/// Room with the most bookings. On a tie the room seen first wins, so with
/// bookings in check-in order that is the room booked earliest in the month.
pub fn most_booked_room<'a, I>(room_names: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for name in room_names {
        match counts.iter_mut().find(|(n, _)| *n == name) {
            Some((_, count)) => *count += 1,
            None => counts.push((name, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (name, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name.to_string())
}

/// Check-ins per day, one entry for every day of the month.
fn daily_check_ins(bookings: &[BookingWithDetails], days: u32) -> Vec<DailyBookings> {
    let mut per_day = vec![0u32; days as usize];
    for booking in bookings {
        if let Some(slot) = per_day.get_mut(booking.check_in.day0() as usize) {
            *slot += 1;
        }
    }
    per_day
        .into_iter()
        .enumerate()
        .map(|(i, bookings)| DailyBookings {
            day: i as u32 + 1,
            bookings,
        })
        .collect()
}

pub struct ReportService;

impl ReportService {
    pub async fn monthly(
        pool: &SqlitePool,
        year: i32,
        month: u32,
    ) -> Result<MonthlyReport, ReportError> {
        if !(1..=12).contains(&month) {
            return Err(ReportError::InvalidMonth(month));
        }
        let (first, last) = month_bounds(year, month).ok_or(ReportError::InvalidYear(year))?;
        let bookings = Booking::find_in_check_in_range(pool, first, last).await?;

        Ok(Self::build(year, month, last, &bookings))
    }

    fn build(
        year: i32,
        month: u32,
        last_day: NaiveDate,
        bookings: &[BookingWithDetails],
    ) -> MonthlyReport {
        let total_revenue = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Confirmed)
            .map(|b| b.total_amount)
            .sum();

        MonthlyReport {
            month,
            year,
            month_name: month_name(month),
            total_bookings: bookings.len(),
            total_revenue,
            most_booked_room: most_booked_room(bookings.iter().map(|b| b.room.name.as_str()))
                .unwrap_or_else(|| NO_ROOM.to_string()),
            bookings: bookings.iter().map(ReportBookingRow::from).collect(),
            daily_data: daily_check_ins(bookings, last_day.day()),
        }
    }
}
