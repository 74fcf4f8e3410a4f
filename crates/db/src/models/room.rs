use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, QueryBuilder, Sqlite, SqlitePool, types::Json};
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_per_night: f64,
    pub capacity: i32,
    #[ts(type = "Array<string>")]
    pub amenities: Json<Vec<String>>,
    #[ts(type = "Array<string>")]
    pub images: Json<Vec<String>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Amenities and images arrive either as a JSON array or as a string that
/// holds a JSON-encoded array (what the admin form posts).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(untagged)]
pub enum StringList {
    List(Vec<String>),
    Encoded(String),
}

impl StringList {
    pub fn into_vec(self) -> Result<Vec<String>, serde_json::Error> {
        match self {
            StringList::List(items) => Ok(items),
            StringList::Encoded(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            StringList::Encoded(raw) => serde_json::from_str(&raw),
        }
    }
}

impl Default for StringList {
    fn default() -> Self {
        StringList::List(Vec::new())
    }
}

/// Request body for creating or replacing a room.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price must be positive"))]
    pub price_per_night: f64,
    #[validate(range(min = 1, max = 10, message = "Capacity must be between 1 and 10"))]
    pub capacity: i32,
    #[serde(default)]
    pub amenities: StringList,
    #[serde(default)]
    pub images: StringList,
    pub is_active: Option<bool>,
}

/// Validated room fields ready to be written.
#[derive(Debug, Clone)]
pub struct RoomData {
    pub name: String,
    pub description: String,
    pub price_per_night: f64,
    pub capacity: i32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub is_active: bool,
}

/// Public listing filter. Zero or missing bounds are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct RoomFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub capacity: Option<i32>,
}

impl Room {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as!(
            Room,
            r#"SELECT id              AS "id!: Uuid",
                   name            AS "name!: String",
                   description     AS "description!: String",
                   price_per_night AS "price_per_night!: f64",
                   capacity        AS "capacity!: i32",
                   amenities       AS "amenities!: Json<Vec<String>>",
                   images          AS "images!: Json<Vec<String>>",
                   is_active       AS "is_active!: bool",
                   created_at      AS "created_at!: DateTime<Utc>",
                   updated_at      AS "updated_at!: DateTime<Utc>"
               FROM rooms
               ORDER BY created_at DESC, rowid DESC"#
        )
        .fetch_all(pool)
        .await
    }

    /// Active rooms matching `filter`, newest first. The filter is optional
    /// per field, so the statement is assembled at runtime.
    pub async fn find_active(
        pool: &SqlitePool,
        filter: &RoomFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, name, description, price_per_night, capacity, amenities, images, is_active, created_at, updated_at FROM rooms WHERE is_active = 1",
        );

        if let Some(min) = filter.min_price.filter(|p| *p > 0.0) {
            query.push(" AND price_per_night >= ").push_bind(min);
        }
        if let Some(max) = filter.max_price.filter(|p| *p > 0.0) {
            query.push(" AND price_per_night <= ").push_bind(max);
        }
        if let Some(capacity) = filter.capacity.filter(|c| *c > 0) {
            query.push(" AND capacity >= ").push_bind(capacity);
        }
        query.push(" ORDER BY created_at DESC, rowid DESC");

        query.build_query_as::<Room>().fetch_all(pool).await
    }

    pub async fn find_featured(pool: &SqlitePool, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as!(
            Room,
            r#"SELECT id              AS "id!: Uuid",
                   name            AS "name!: String",
                   description     AS "description!: String",
                   price_per_night AS "price_per_night!: f64",
                   capacity        AS "capacity!: i32",
                   amenities       AS "amenities!: Json<Vec<String>>",
                   images          AS "images!: Json<Vec<String>>",
                   is_active       AS "is_active!: bool",
                   created_at      AS "created_at!: DateTime<Utc>",
                   updated_at      AS "updated_at!: DateTime<Utc>"
               FROM rooms
               WHERE is_active = 1
               ORDER BY rowid ASC
               LIMIT $1"#,
            limit
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as!(
            Room,
            r#"SELECT id              AS "id!: Uuid",
                   name            AS "name!: String",
                   description     AS "description!: String",
                   price_per_night AS "price_per_night!: f64",
                   capacity        AS "capacity!: i32",
                   amenities       AS "amenities!: Json<Vec<String>>",
                   images          AS "images!: Json<Vec<String>>",
                   is_active       AS "is_active!: bool",
                   created_at      AS "created_at!: DateTime<Utc>",
                   updated_at      AS "updated_at!: DateTime<Utc>"
               FROM rooms
               WHERE id = $1"#,
            id
        )
        .fetch_optional(executor)
        .await
    }

    pub async fn find_active_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as!(
            Room,
            r#"SELECT id              AS "id!: Uuid",
                   name            AS "name!: String",
                   description     AS "description!: String",
                   price_per_night AS "price_per_night!: f64",
                   capacity        AS "capacity!: i32",
                   amenities       AS "amenities!: Json<Vec<String>>",
                   images          AS "images!: Json<Vec<String>>",
                   is_active       AS "is_active!: bool",
                   created_at      AS "created_at!: DateTime<Utc>",
                   updated_at      AS "updated_at!: DateTime<Utc>"
               FROM rooms
               WHERE id = $1 AND is_active = 1"#,
            id
        )
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_name<'e, E>(executor: E, name: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as!(
            Room,
            r#"SELECT id              AS "id!: Uuid",
                   name            AS "name!: String",
                   description     AS "description!: String",
                   price_per_night AS "price_per_night!: f64",
                   capacity        AS "capacity!: i32",
                   amenities       AS "amenities!: Json<Vec<String>>",
                   images          AS "images!: Json<Vec<String>>",
                   is_active       AS "is_active!: bool",
                   created_at      AS "created_at!: DateTime<Utc>",
                   updated_at      AS "updated_at!: DateTime<Utc>"
               FROM rooms
               WHERE name = $1"#,
            name
        )
        .fetch_optional(executor)
        .await
    }

    pub async fn create<'e, E>(executor: E, id: Uuid, data: &RoomData) -> Result<Self, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let amenities = Json(&data.amenities);
        let images = Json(&data.images);
        sqlx::query_as!(
            Room,
            r#"INSERT INTO rooms (id, name, description, price_per_night, capacity, amenities, images, is_active)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING id              AS "id!: Uuid",
                   name            AS "name!: String",
                   description     AS "description!: String",
                   price_per_night AS "price_per_night!: f64",
                   capacity        AS "capacity!: i32",
                   amenities       AS "amenities!: Json<Vec<String>>",
                   images          AS "images!: Json<Vec<String>>",
                   is_active       AS "is_active!: bool",
                   created_at      AS "created_at!: DateTime<Utc>",
                   updated_at      AS "updated_at!: DateTime<Utc>""#,
            id,
            data.name,
            data.description,
            data.price_per_night,
            data.capacity,
            amenities,
            images,
            data.is_active
        )
        .fetch_one(executor)
        .await
    }

    /// Replaces every editable field. Returns `None` when the room is unknown.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &RoomData,
    ) -> Result<Option<Self>, sqlx::Error> {
        let amenities = Json(&data.amenities);
        let images = Json(&data.images);
        sqlx::query_as!(
            Room,
            r#"UPDATE rooms
               SET name = $2,
                   description = $3,
                   price_per_night = $4,
                   capacity = $5,
                   amenities = $6,
                   images = $7,
                   is_active = $8,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING id              AS "id!: Uuid",
                   name            AS "name!: String",
                   description     AS "description!: String",
                   price_per_night AS "price_per_night!: f64",
                   capacity        AS "capacity!: i32",
                   amenities       AS "amenities!: Json<Vec<String>>",
                   images          AS "images!: Json<Vec<String>>",
                   is_active       AS "is_active!: bool",
                   created_at      AS "created_at!: DateTime<Utc>",
                   updated_at      AS "updated_at!: DateTime<Utc>""#,
            id,
            data.name,
            data.description,
            data.price_per_night,
            data.capacity,
            amenities,
            images,
            data.is_active
        )
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query!("DELETE FROM rooms WHERE id = $1", id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
