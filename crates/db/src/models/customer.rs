use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer row for the admin listing
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CustomerWithBookingCount {
    #[serde(flatten)]
    #[ts(flatten)]
    pub customer: Customer,
    #[ts(type = "number")]
    pub booking_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomer {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 10, message = "Phone number must be at least 10 digits"))]
    pub phone: String,
}

impl Customer {
    pub async fn find_all_with_booking_count(
        pool: &SqlitePool,
    ) -> Result<Vec<CustomerWithBookingCount>, sqlx::Error> {
        let records = sqlx::query!(
            r#"SELECT c.id         AS "id!: Uuid",
                      c.name       AS "name!: String",
                      c.email      AS "email!: String",
                      c.phone      AS "phone!: String",
                      c.created_at AS "created_at!: DateTime<Utc>",
                      c.updated_at AS "updated_at!: DateTime<Utc>",
                      (SELECT COUNT(*) FROM bookings b WHERE b.customer_id = c.id) AS "booking_count!: i64"
               FROM customers c
               ORDER BY c.created_at DESC, c.rowid DESC"#
        )
        .fetch_all(pool)
        .await?;

        Ok(records
            .into_iter()
            .map(|rec| CustomerWithBookingCount {
                customer: Customer {
                    id: rec.id,
                    name: rec.name,
                    email: rec.email,
                    phone: rec.phone,
                    created_at: rec.created_at,
                    updated_at: rec.updated_at,
                },
                booking_count: rec.booking_count,
            })
            .collect())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as!(
            Customer,
            r#"SELECT id         AS "id!: Uuid",
                   name       AS "name!: String",
                   email      AS "email!: String",
                   phone      AS "phone!: String",
                   created_at AS "created_at!: DateTime<Utc>",
                   updated_at AS "updated_at!: DateTime<Utc>"
               FROM customers
               WHERE id = $1"#,
            id
        )
        .fetch_optional(executor)
        .await
    }

    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as!(
            Customer,
            r#"SELECT id         AS "id!: Uuid",
                   name       AS "name!: String",
                   email      AS "email!: String",
                   phone      AS "phone!: String",
                   created_at AS "created_at!: DateTime<Utc>",
                   updated_at AS "updated_at!: DateTime<Utc>"
               FROM customers
               WHERE email = $1"#,
            email
        )
        .fetch_optional(executor)
        .await
    }

    /// Customers are keyed by email: a returning guest keeps their id and gets
    /// their name and phone refreshed.
    pub async fn upsert_by_email<'e, E>(
        executor: E,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Self, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let id = Uuid::new_v4();
        sqlx::query_as!(
            Customer,
            r#"INSERT INTO customers (id, name, email, phone)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT(email) DO UPDATE
                   SET name = excluded.name,
                       phone = excluded.phone,
                       updated_at = datetime('now', 'subsec')
               RETURNING id         AS "id!: Uuid",
                   name       AS "name!: String",
                   email      AS "email!: String",
                   phone      AS "phone!: String",
                   created_at AS "created_at!: DateTime<Utc>",
                   updated_at AS "updated_at!: DateTime<Utc>""#,
            id,
            name,
            email,
            phone
        )
        .fetch_one(executor)
        .await
    }

    /// Inserts the customer unless the email is already known; existing rows
    /// are left untouched.
    pub async fn create_if_absent<'e, E>(
        executor: E,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let id = Uuid::new_v4();
        let result = sqlx::query!(
            r#"INSERT INTO customers (id, name, email, phone)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT(email) DO NOTHING"#,
            id,
            name,
            email,
            phone
        )
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateCustomer,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as!(
            Customer,
            r#"UPDATE customers
               SET name = $2, email = $3, phone = $4, updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING id         AS "id!: Uuid",
                   name       AS "name!: String",
                   email      AS "email!: String",
                   phone      AS "phone!: String",
                   created_at AS "created_at!: DateTime<Utc>",
                   updated_at AS "updated_at!: DateTime<Utc>""#,
            id,
            data.name,
            data.email,
            data.phone
        )
        .fetch_optional(pool)
        .await
    }

    /// Name and phone edits made from the booking screen.
    pub async fn update_contact<'e, E>(
        executor: E,
        id: Uuid,
        name: &str,
        phone: &str,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query!(
            r#"UPDATE customers
               SET name = $2, phone = $3, updated_at = datetime('now', 'subsec')
               WHERE id = $1"#,
            id,
            name,
            phone
        )
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query!("DELETE FROM customers WHERE id = $1", id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
