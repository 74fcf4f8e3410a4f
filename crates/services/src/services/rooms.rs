use db::{
    is_foreign_key_violation, is_unique_violation,
    models::room::{Room, RoomData, RoomFilter, RoomPayload},
};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Rooms shown on the landing page.
pub const FEATURED_ROOM_LIMIT: i64 = 6;

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("{field} must be a JSON array of strings")]
    InvalidList { field: &'static str },
    #[error("Room not found")]
    NotFound,
    #[error("A room named '{0}' already exists")]
    DuplicateName(String),
    #[error("Room has bookings and cannot be deleted")]
    InUse,
}

impl RoomError {
    fn from_write(err: sqlx::Error, name: &str) -> Self {
        if is_unique_violation(&err) {
            RoomError::DuplicateName(name.to_string())
        } else {
            RoomError::Database(err)
        }
    }
}

/// Validates an admin payload and normalises the list fields.
pub fn room_data_from_payload(payload: RoomPayload) -> Result<RoomData, RoomError> {
    payload.validate()?;
    let amenities = payload
        .amenities
        .into_vec()
        .map_err(|_| RoomError::InvalidList { field: "amenities" })?;
    let images = payload
        .images
        .into_vec()
        .map_err(|_| RoomError::InvalidList { field: "images" })?;

    Ok(RoomData {
        name: payload.name.trim().to_string(),
        description: payload.description,
        price_per_night: payload.price_per_night,
        capacity: payload.capacity,
        amenities,
        images,
        is_active: payload.is_active.unwrap_or(true),
    })
}

pub struct RoomService;

impl RoomService {
    pub async fn list_active(pool: &SqlitePool, filter: &RoomFilter) -> Result<Vec<Room>, RoomError> {
        Ok(Room::find_active(pool, filter).await?)
    }

    pub async fn featured(pool: &SqlitePool) -> Result<Vec<Room>, RoomError> {
        Ok(Room::find_featured(pool, FEATURED_ROOM_LIMIT).await?)
    }

    /// Every room, inactive ones included, for the back office.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Room>, RoomError> {
        Ok(Room::find_all(pool).await?)
    }

    pub async fn get_active(pool: &SqlitePool, id: Uuid) -> Result<Room, RoomError> {
        Room::find_active_by_id(pool, id)
            .await?
            .ok_or(RoomError::NotFound)
    }

    pub async fn create(pool: &SqlitePool, payload: RoomPayload) -> Result<Room, RoomError> {
        let data = room_data_from_payload(payload)?;
        let room = Room::create(pool, Uuid::new_v4(), &data)
            .await
            .map_err(|e| RoomError::from_write(e, &data.name))?;
        info!(room_id = %room.id, name = %room.name, "Room created");
        Ok(room)
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        payload: RoomPayload,
    ) -> Result<Room, RoomError> {
        let data = room_data_from_payload(payload)?;
        let room = Room::update(pool, id, &data)
            .await
            .map_err(|e| RoomError::from_write(e, &data.name))?
            .ok_or(RoomError::NotFound)?;
        info!(room_id = %room.id, is_active = room.is_active, "Room updated");
        Ok(room)
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<(), RoomError> {
        let deleted = Room::delete(pool, id).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                RoomError::InUse
            } else {
                RoomError::Database(e)
            }
        })?;
        if deleted == 0 {
            return Err(RoomError::NotFound);
        }
        info!(room_id = %id, "Room deleted");
        Ok(())
    }
}
