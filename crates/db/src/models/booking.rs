use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool, Type, types::Json};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

use super::{customer::Customer, room::Room};

#[derive(
    Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, Hash, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "booking_status")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Pending and confirmed stays hold the room; cancelled ones free it.
    pub fn blocks_room(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub number_of_guests: i32,
    pub total_amount: f64,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking with the room and guest it refers to.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct BookingWithDetails {
    #[serde(flatten)]
    #[ts(flatten)]
    pub booking: Booking,
    pub room: Room,
    pub customer: Customer,
}

impl std::ops::Deref for BookingWithDetails {
    type Target = Booking;
    fn deref(&self) -> &Self::Target {
        &self.booking
    }
}

/// Joined row behind [`BookingWithDetails`].
struct BookingDetailsRow {
    id: Uuid,
    customer_id: Uuid,
    room_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    number_of_guests: i32,
    total_amount: f64,
    status: BookingStatus,
    special_requests: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    room_name: String,
    room_description: String,
    room_price_per_night: f64,
    room_capacity: i32,
    room_amenities: Json<Vec<String>>,
    room_images: Json<Vec<String>>,
    room_is_active: bool,
    room_created_at: DateTime<Utc>,
    room_updated_at: DateTime<Utc>,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    customer_created_at: DateTime<Utc>,
    customer_updated_at: DateTime<Utc>,
}

impl From<BookingDetailsRow> for BookingWithDetails {
    fn from(row: BookingDetailsRow) -> Self {
        Self {
            booking: Booking {
                id: row.id,
                customer_id: row.customer_id,
                room_id: row.room_id,
                check_in: row.check_in,
                check_out: row.check_out,
                number_of_guests: row.number_of_guests,
                total_amount: row.total_amount,
                status: row.status,
                special_requests: row.special_requests,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            room: Room {
                id: row.room_id,
                name: row.room_name,
                description: row.room_description,
                price_per_night: row.room_price_per_night,
                capacity: row.room_capacity,
                amenities: row.room_amenities,
                images: row.room_images,
                is_active: row.room_is_active,
                created_at: row.room_created_at,
                updated_at: row.room_updated_at,
            },
            customer: Customer {
                id: row.customer_id,
                name: row.customer_name,
                email: row.customer_email,
                phone: row.customer_phone,
                created_at: row.customer_created_at,
                updated_at: row.customer_updated_at,
            },
        }
    }
}

/// Public booking form.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub room_id: Uuid,
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 10, message = "Phone number must be at least 10 digits"))]
    pub phone: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, max = 10, message = "Number of guests must be between 1 and 10"))]
    pub number_of_guests: i32,
    pub special_requests: Option<String>,
}

/// Admin edit form for an existing booking.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBooking {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, max = 10, message = "Number of guests must be between 1 and 10"))]
    pub number_of_guests: i32,
    pub status: BookingStatus,
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub customer_name: String,
    #[validate(length(min = 10, message = "Phone number must be at least 10 digits"))]
    pub customer_phone: String,
}

/// Row values for a new booking once price and customer are resolved.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub number_of_guests: i32,
    pub total_amount: f64,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BookingChanges {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub number_of_guests: i32,
    pub status: BookingStatus,
    pub total_amount: f64,
}

/// Booking count and confirmed revenue for one `YYYY-MM` month.
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct MonthlyTotals {
    pub month: String,
    pub bookings: i64,
    pub revenue: f64,
}

impl Booking {
    pub async fn find_all_with_details(
        pool: &SqlitePool,
    ) -> Result<Vec<BookingWithDetails>, sqlx::Error> {
        let rows = sqlx::query_as!(
            BookingDetailsRow,
            r#"SELECT
    b.id               AS "id!: Uuid",
    b.customer_id      AS "customer_id!: Uuid",
    b.room_id          AS "room_id!: Uuid",
    b.check_in         AS "check_in!: NaiveDate",
    b.check_out        AS "check_out!: NaiveDate",
    b.number_of_guests AS "number_of_guests!: i32",
    b.total_amount     AS "total_amount!: f64",
    b.status           AS "status!: BookingStatus",
    b.special_requests AS "special_requests?: String",
    b.created_at       AS "created_at!: DateTime<Utc>",
    b.updated_at       AS "updated_at!: DateTime<Utc>",
    r.name             AS "room_name!: String",
    r.description      AS "room_description!: String",
    r.price_per_night  AS "room_price_per_night!: f64",
    r.capacity         AS "room_capacity!: i32",
    r.amenities        AS "room_amenities!: Json<Vec<String>>",
    r.images           AS "room_images!: Json<Vec<String>>",
    r.is_active        AS "room_is_active!: bool",
    r.created_at       AS "room_created_at!: DateTime<Utc>",
    r.updated_at       AS "room_updated_at!: DateTime<Utc>",
    c.name             AS "customer_name!: String",
    c.email            AS "customer_email!: String",
    c.phone            AS "customer_phone!: String",
    c.created_at       AS "customer_created_at!: DateTime<Utc>",
    c.updated_at       AS "customer_updated_at!: DateTime<Utc>"
FROM bookings b
JOIN rooms r ON r.id = b.room_id
JOIN customers c ON c.id = b.customer_id
ORDER BY b.created_at DESC, b.rowid DESC"#
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_recent(
        pool: &SqlitePool,
        limit: i64,
    ) -> Result<Vec<BookingWithDetails>, sqlx::Error> {
        let rows = sqlx::query_as!(
            BookingDetailsRow,
            r#"SELECT
    b.id               AS "id!: Uuid",
    b.customer_id      AS "customer_id!: Uuid",
    b.room_id          AS "room_id!: Uuid",
    b.check_in         AS "check_in!: NaiveDate",
    b.check_out        AS "check_out!: NaiveDate",
    b.number_of_guests AS "number_of_guests!: i32",
    b.total_amount     AS "total_amount!: f64",
    b.status           AS "status!: BookingStatus",
    b.special_requests AS "special_requests?: String",
    b.created_at       AS "created_at!: DateTime<Utc>",
    b.updated_at       AS "updated_at!: DateTime<Utc>",
    r.name             AS "room_name!: String",
    r.description      AS "room_description!: String",
    r.price_per_night  AS "room_price_per_night!: f64",
    r.capacity         AS "room_capacity!: i32",
    r.amenities        AS "room_amenities!: Json<Vec<String>>",
    r.images           AS "room_images!: Json<Vec<String>>",
    r.is_active        AS "room_is_active!: bool",
    r.created_at       AS "room_created_at!: DateTime<Utc>",
    r.updated_at       AS "room_updated_at!: DateTime<Utc>",
    c.name             AS "customer_name!: String",
    c.email            AS "customer_email!: String",
    c.phone            AS "customer_phone!: String",
    c.created_at       AS "customer_created_at!: DateTime<Utc>",
    c.updated_at       AS "customer_updated_at!: DateTime<Utc>"
FROM bookings b
JOIN rooms r ON r.id = b.room_id
JOIN customers c ON c.id = b.customer_id
ORDER BY b.created_at DESC, b.rowid DESC
LIMIT $1"#,
            limit
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as!(
            Booking,
            r#"SELECT id               AS "id!: Uuid",
                   customer_id      AS "customer_id!: Uuid",
                   room_id          AS "room_id!: Uuid",
                   check_in         AS "check_in!: NaiveDate",
                   check_out        AS "check_out!: NaiveDate",
                   number_of_guests AS "number_of_guests!: i32",
                   total_amount     AS "total_amount!: f64",
                   status           AS "status!: BookingStatus",
                   special_requests AS "special_requests?: String",
                   created_at       AS "created_at!: DateTime<Utc>",
                   updated_at       AS "updated_at!: DateTime<Utc>"
               FROM bookings
               WHERE id = $1"#,
            id
        )
        .fetch_optional(executor)
        .await
    }

    pub async fn find_by_id_with_details<'e, E>(
        executor: E,
        id: Uuid,
    ) -> Result<Option<BookingWithDetails>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as!(
            BookingDetailsRow,
            r#"SELECT
    b.id               AS "id!: Uuid",
    b.customer_id      AS "customer_id!: Uuid",
    b.room_id          AS "room_id!: Uuid",
    b.check_in         AS "check_in!: NaiveDate",
    b.check_out        AS "check_out!: NaiveDate",
    b.number_of_guests AS "number_of_guests!: i32",
    b.total_amount     AS "total_amount!: f64",
    b.status           AS "status!: BookingStatus",
    b.special_requests AS "special_requests?: String",
    b.created_at       AS "created_at!: DateTime<Utc>",
    b.updated_at       AS "updated_at!: DateTime<Utc>",
    r.name             AS "room_name!: String",
    r.description      AS "room_description!: String",
    r.price_per_night  AS "room_price_per_night!: f64",
    r.capacity         AS "room_capacity!: i32",
    r.amenities        AS "room_amenities!: Json<Vec<String>>",
    r.images           AS "room_images!: Json<Vec<String>>",
    r.is_active        AS "room_is_active!: bool",
    r.created_at       AS "room_created_at!: DateTime<Utc>",
    r.updated_at       AS "room_updated_at!: DateTime<Utc>",
    c.name             AS "customer_name!: String",
    c.email            AS "customer_email!: String",
    c.phone            AS "customer_phone!: String",
    c.created_at       AS "customer_created_at!: DateTime<Utc>",
    c.updated_at       AS "customer_updated_at!: DateTime<Utc>"
FROM bookings b
JOIN rooms r ON r.id = b.room_id
JOIN customers c ON c.id = b.customer_id
WHERE b.id = $1"#,
            id
        )
        .fetch_optional(executor)
        .await?;
        Ok(row.map(Into::into))
    }

    /// Pending and confirmed bookings that currently hold `room_id`.
    pub async fn find_blocking_for_room<'e, E>(
        executor: E,
        room_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as!(
            Booking,
            r#"SELECT id               AS "id!: Uuid",
                   customer_id      AS "customer_id!: Uuid",
                   room_id          AS "room_id!: Uuid",
                   check_in         AS "check_in!: NaiveDate",
                   check_out        AS "check_out!: NaiveDate",
                   number_of_guests AS "number_of_guests!: i32",
                   total_amount     AS "total_amount!: f64",
                   status           AS "status!: BookingStatus",
                   special_requests AS "special_requests?: String",
                   created_at       AS "created_at!: DateTime<Utc>",
                   updated_at       AS "updated_at!: DateTime<Utc>"
               FROM bookings
               WHERE room_id = $1 AND status IN ($2, $3)
               ORDER BY check_in ASC"#,
            room_id,
            BookingStatus::Pending,
            BookingStatus::Confirmed
        )
        .fetch_all(executor)
        .await
    }

    /// Bookings whose check-in falls within `[from, to]`, earliest first.
    pub async fn find_in_check_in_range(
        pool: &SqlitePool,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<BookingWithDetails>, sqlx::Error> {
        let rows = sqlx::query_as!(
            BookingDetailsRow,
            r#"SELECT
    b.id               AS "id!: Uuid",
    b.customer_id      AS "customer_id!: Uuid",
    b.room_id          AS "room_id!: Uuid",
    b.check_in         AS "check_in!: NaiveDate",
    b.check_out        AS "check_out!: NaiveDate",
    b.number_of_guests AS "number_of_guests!: i32",
    b.total_amount     AS "total_amount!: f64",
    b.status           AS "status!: BookingStatus",
    b.special_requests AS "special_requests?: String",
    b.created_at       AS "created_at!: DateTime<Utc>",
    b.updated_at       AS "updated_at!: DateTime<Utc>",
    r.name             AS "room_name!: String",
    r.description      AS "room_description!: String",
    r.price_per_night  AS "room_price_per_night!: f64",
    r.capacity         AS "room_capacity!: i32",
    r.amenities        AS "room_amenities!: Json<Vec<String>>",
    r.images           AS "room_images!: Json<Vec<String>>",
    r.is_active        AS "room_is_active!: bool",
    r.created_at       AS "room_created_at!: DateTime<Utc>",
    r.updated_at       AS "room_updated_at!: DateTime<Utc>",
    c.name             AS "customer_name!: String",
    c.email            AS "customer_email!: String",
    c.phone            AS "customer_phone!: String",
    c.created_at       AS "customer_created_at!: DateTime<Utc>",
    c.updated_at       AS "customer_updated_at!: DateTime<Utc>"
FROM bookings b
JOIN rooms r ON r.id = b.room_id
JOIN customers c ON c.id = b.customer_id
WHERE b.check_in BETWEEN $1 AND $2
ORDER BY b.check_in ASC, b.rowid ASC"#,
            from,
            to
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create<'e, E>(executor: E, id: Uuid, data: &NewBooking) -> Result<Self, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as!(
            Booking,
            r#"INSERT INTO bookings
                   (id, customer_id, room_id, check_in, check_out, number_of_guests, total_amount, status, special_requests)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING id               AS "id!: Uuid",
                   customer_id      AS "customer_id!: Uuid",
                   room_id          AS "room_id!: Uuid",
                   check_in         AS "check_in!: NaiveDate",
                   check_out        AS "check_out!: NaiveDate",
                   number_of_guests AS "number_of_guests!: i32",
                   total_amount     AS "total_amount!: f64",
                   status           AS "status!: BookingStatus",
                   special_requests AS "special_requests?: String",
                   created_at       AS "created_at!: DateTime<Utc>",
                   updated_at       AS "updated_at!: DateTime<Utc>""#,
            id,
            data.customer_id,
            data.room_id,
            data.check_in,
            data.check_out,
            data.number_of_guests,
            data.total_amount,
            data.status,
            data.special_requests
        )
        .fetch_one(executor)
        .await
    }

    pub async fn update<'e, E>(
        executor: E,
        id: Uuid,
        changes: &BookingChanges,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as!(
            Booking,
            r#"UPDATE bookings
               SET check_in = $2,
                   check_out = $3,
                   number_of_guests = $4,
                   status = $5,
                   total_amount = $6,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING id               AS "id!: Uuid",
                   customer_id      AS "customer_id!: Uuid",
                   room_id          AS "room_id!: Uuid",
                   check_in         AS "check_in!: NaiveDate",
                   check_out        AS "check_out!: NaiveDate",
                   number_of_guests AS "number_of_guests!: i32",
                   total_amount     AS "total_amount!: f64",
                   status           AS "status!: BookingStatus",
                   special_requests AS "special_requests?: String",
                   created_at       AS "created_at!: DateTime<Utc>",
                   updated_at       AS "updated_at!: DateTime<Utc>""#,
            id,
            changes.check_in,
            changes.check_out,
            changes.number_of_guests,
            changes.status,
            changes.total_amount
        )
        .fetch_optional(executor)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query!("DELETE FROM bookings WHERE id = $1", id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar!(r#"SELECT COUNT(*) as "count!: i64" FROM bookings"#)
            .fetch_one(pool)
            .await
    }

    /// Bookings created between `from` and `to` inclusive.
    pub async fn count_created_between(
        pool: &SqlitePool,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar!(
            r#"SELECT COUNT(*) as "count!: i64"
               FROM bookings
               WHERE date(created_at) BETWEEN $1 AND $2"#,
            from,
            to
        )
        .fetch_one(pool)
        .await
    }

    /// Sum of confirmed booking totals, optionally limited to bookings created
    /// between the given dates.
    pub async fn confirmed_revenue(
        pool: &SqlitePool,
        created_between: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<f64, sqlx::Error> {
        match created_between {
            Some((from, to)) => {
                sqlx::query_scalar!(
                    r#"SELECT TOTAL(total_amount) as "revenue!: f64"
                       FROM bookings
                       WHERE status = $1 AND date(created_at) BETWEEN $2 AND $3"#,
                    BookingStatus::Confirmed,
                    from,
                    to
                )
                .fetch_one(pool)
                .await
            }
            None => {
                sqlx::query_scalar!(
                    r#"SELECT TOTAL(total_amount) as "revenue!: f64"
                       FROM bookings
                       WHERE status = $1"#,
                    BookingStatus::Confirmed
                )
                .fetch_one(pool)
                .await
            }
        }
    }

    /// Per-month booking counts and confirmed revenue for bookings created on
    /// or after `since`. Months without bookings are absent.
    pub async fn monthly_totals_since(
        pool: &SqlitePool,
        since: NaiveDate,
    ) -> Result<Vec<MonthlyTotals>, sqlx::Error> {
        sqlx::query_as!(
            MonthlyTotals,
            r#"SELECT strftime('%Y-%m', created_at) AS "month!: String",
                      COUNT(*) AS "bookings!: i64",
                      TOTAL(CASE WHEN status = $1 THEN total_amount ELSE 0.0 END) AS "revenue!: f64"
               FROM bookings
               WHERE date(created_at) >= $2
               GROUP BY 1
               ORDER BY 1 ASC"#,
            BookingStatus::Confirmed,
            since
        )
        .fetch_all(pool)
        .await
    }

    pub fn nights(&self) -> i64 {
        utils::dates::calculate_nights(self.check_in, self.check_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DBService,
        models::test_support::{insert_booking, insert_customer, insert_room, set_created_at},
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(BookingStatus::Confirmed.to_string(), "Confirmed");
        assert_eq!("Cancelled".parse::<BookingStatus>().unwrap(), BookingStatus::Cancelled);
        assert_eq!(
            serde_json::to_string(&BookingStatus::Pending).unwrap(),
            "\"Pending\""
        );
        assert!(BookingStatus::Pending.blocks_room());
        assert!(!BookingStatus::Cancelled.blocks_room());
    }

    #[tokio::test]
    async fn test_find_with_details_embeds_room_and_customer() {
        let db = DBService::new_in_memory().await.unwrap();
        let room = insert_room(&db.pool, "Tea Estate Cottage", 4500.0, 3).await;
        let customer = insert_customer(&db.pool, "amit@example.com").await;
        let booking = insert_booking(
            &db.pool,
            &room,
            &customer,
            date(2025, 3, 15),
            date(2025, 3, 18),
            BookingStatus::Pending,
        )
        .await;

        let details = Booking::find_by_id_with_details(&db.pool, booking.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(details.room.name, "Tea Estate Cottage");
        assert_eq!(details.customer.email, "amit@example.com");
        assert_eq!(details.nights(), 3);
        assert_eq!(details.total_amount, 13500.0);

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["checkIn"], "2025-03-15");
        assert_eq!(json["room"]["pricePerNight"], 4500.0);
        assert_eq!(json["status"], "Pending");
    }

    #[tokio::test]
    async fn test_find_blocking_skips_cancelled() {
        let db = DBService::new_in_memory().await.unwrap();
        let room = insert_room(&db.pool, "Meadow View", 2500.0, 2).await;
        let customer = insert_customer(&db.pool, "vikram@example.com").await;
        insert_booking(&db.pool, &room, &customer, date(2025, 4, 5), date(2025, 4, 7), BookingStatus::Confirmed).await;
        insert_booking(&db.pool, &room, &customer, date(2025, 4, 8), date(2025, 4, 9), BookingStatus::Cancelled).await;
        insert_booking(&db.pool, &room, &customer, date(2025, 4, 10), date(2025, 4, 12), BookingStatus::Pending).await;

        let blocking = Booking::find_blocking_for_room(&db.pool, room.id).await.unwrap();
        assert_eq!(blocking.len(), 2);
        assert!(blocking.iter().all(|b| b.status.blocks_room()));
    }

    #[tokio::test]
    async fn test_check_in_range_is_inclusive_and_ordered() {
        let db = DBService::new_in_memory().await.unwrap();
        let room = insert_room(&db.pool, "Villa", 8500.0, 6).await;
        let customer = insert_customer(&db.pool, "anjali@example.com").await;
        insert_booking(&db.pool, &room, &customer, date(2025, 3, 31), date(2025, 4, 2), BookingStatus::Confirmed).await;
        insert_booking(&db.pool, &room, &customer, date(2025, 3, 1), date(2025, 3, 2), BookingStatus::Confirmed).await;
        insert_booking(&db.pool, &room, &customer, date(2025, 4, 1), date(2025, 4, 3), BookingStatus::Confirmed).await;

        let march = Booking::find_in_check_in_range(&db.pool, date(2025, 3, 1), date(2025, 3, 31))
            .await
            .unwrap();
        let days: Vec<_> = march.iter().map(|b| b.check_in).collect();
        assert_eq!(days, vec![date(2025, 3, 1), date(2025, 3, 31)]);
    }

    #[tokio::test]
    async fn test_revenue_and_monthly_totals_use_created_at() {
        let db = DBService::new_in_memory().await.unwrap();
        let room = insert_room(&db.pool, "Deluxe", 3500.0, 2).await;
        let customer = insert_customer(&db.pool, "rajesh@example.com").await;
        let a = insert_booking(&db.pool, &room, &customer, date(2025, 5, 5), date(2025, 5, 7), BookingStatus::Confirmed).await;
        let b = insert_booking(&db.pool, &room, &customer, date(2025, 5, 10), date(2025, 5, 11), BookingStatus::Pending).await;
        let c = insert_booking(&db.pool, &room, &customer, date(2025, 6, 1), date(2025, 6, 3), BookingStatus::Confirmed).await;
        set_created_at(&db.pool, a.id, "2025-04-20 09:00:00.000").await;
        set_created_at(&db.pool, b.id, "2025-04-28 18:30:00.000").await;
        set_created_at(&db.pool, c.id, "2025-05-02 12:00:00.000").await;

        assert_eq!(Booking::count(&db.pool).await.unwrap(), 3);
        assert_eq!(
            Booking::count_created_between(&db.pool, date(2025, 4, 1), date(2025, 4, 30))
                .await
                .unwrap(),
            2
        );
        assert_eq!(Booking::confirmed_revenue(&db.pool, None).await.unwrap(), 14000.0);
        assert_eq!(
            Booking::confirmed_revenue(&db.pool, Some((date(2025, 4, 1), date(2025, 4, 30))))
                .await
                .unwrap(),
            7000.0
        );

        let totals = Booking::monthly_totals_since(&db.pool, date(2025, 1, 1)).await.unwrap();
        assert_eq!(
            totals,
            vec![
                MonthlyTotals { month: "2025-04".into(), bookings: 2, revenue: 7000.0 },
                MonthlyTotals { month: "2025-05".into(), bookings: 1, revenue: 7000.0 },
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_revenue_is_zero() {
        let db = DBService::new_in_memory().await.unwrap();
        assert_eq!(Booking::confirmed_revenue(&db.pool, None).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_room_with_bookings_cannot_be_deleted() {
        let db = DBService::new_in_memory().await.unwrap();
        let room = insert_room(&db.pool, "Hilltop", 8500.0, 6).await;
        let customer = insert_customer(&db.pool, "kavya@example.com").await;
        insert_booking(&db.pool, &room, &customer, date(2025, 7, 1), date(2025, 7, 2), BookingStatus::Pending).await;

        let err = Room::delete(&db.pool, room.id).await.unwrap_err();
        assert!(crate::is_foreign_key_violation(&err));
        let err = Customer::delete(&db.pool, customer.id).await.unwrap_err();
        assert!(crate::is_foreign_key_violation(&err));
    }
}
