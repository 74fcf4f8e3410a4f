use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use db::models::booking::{Booking, BookingWithDetails, MonthlyTotals};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use ts_rs::TS;
use utils::dates::{month_bounds, month_label, trailing_months};

pub const CHART_MONTHS: u32 = 12;
pub const RECENT_BOOKINGS: i64 = 10;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("no calendar month contains {0}")]
    OutOfRange(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct MonthlyBookings {
    pub month: String,
    #[ts(type = "number")]
    pub bookings: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[ts(type = "number")]
    pub total_bookings: i64,
    #[ts(type = "number")]
    pub bookings_this_month: i64,
    pub total_revenue: f64,
    pub revenue_this_month: f64,
    pub bookings_per_month: Vec<MonthlyBookings>,
    pub revenue_per_month: Vec<MonthlyRevenue>,
    pub recent_bookings: Vec<BookingWithDetails>,
}

/// Lays the sparse per-month totals over the trailing window, filling gaps
/// with zeroes.
fn chart_series(
    today: NaiveDate,
    totals: &[MonthlyTotals],
) -> (Vec<MonthlyBookings>, Vec<MonthlyRevenue>) {
    let by_month: HashMap<&str, &MonthlyTotals> =
        totals.iter().map(|t| (t.month.as_str(), t)).collect();

    trailing_months(today, CHART_MONTHS)
        .into_iter()
        .map(|(year, month)| {
            let key = format!("{year:04}-{month:02}");
            let label = month_label(year, month);
            let (bookings, revenue) = by_month
                .get(key.as_str())
                .map(|t| (t.bookings, t.revenue))
                .unwrap_or((0, 0.0));
            (
                MonthlyBookings {
                    month: label.clone(),
                    bookings,
                },
                MonthlyRevenue {
                    month: label,
                    revenue,
                },
            )
        })
        .unzip()
}

pub struct DashboardService;

impl DashboardService {
    pub async fn stats(
        pool: &SqlitePool,
        today: NaiveDate,
    ) -> Result<DashboardStats, DashboardError> {
        let this_month =
            month_bounds(today.year(), today.month()).ok_or(DashboardError::OutOfRange(today))?;

        let window_start = trailing_months(today, CHART_MONTHS)
            .first()
            .and_then(|&(year, month)| month_bounds(year, month))
            .map(|(first, _)| first)
            .unwrap_or(this_month.0);

        let totals = Booking::monthly_totals_since(pool, window_start).await?;
        let (bookings_per_month, revenue_per_month) = chart_series(today, &totals);

        Ok(DashboardStats {
            total_bookings: Booking::count(pool).await?,
            bookings_this_month: Booking::count_created_between(pool, this_month.0, this_month.1)
                .await?,
            total_revenue: Booking::confirmed_revenue(pool, None).await?,
            revenue_this_month: Booking::confirmed_revenue(pool, Some(this_month)).await?,
            bookings_per_month,
            revenue_per_month,
            recent_bookings: Booking::find_recent(pool, RECENT_BOOKINGS).await?,
        })
    }
}
