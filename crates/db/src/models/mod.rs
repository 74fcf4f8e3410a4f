pub mod admin_user;
pub mod booking;
pub mod customer;
pub mod room;

/// Fixtures shared by the model tests.
#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use sqlx::SqlitePool;
    use uuid::Uuid;

    use super::{
        booking::{Booking, BookingStatus, NewBooking},
        customer::Customer,
        room::{Room, RoomData},
    };

    pub fn room_data(name: &str, price: f64, capacity: i32) -> RoomData {
        RoomData {
            name: name.to_string(),
            description: format!("{name} with a view of the hills"),
            price_per_night: price,
            capacity,
            amenities: vec!["Free Wi-Fi".to_string()],
            images: vec![format!("https://img.example/{capacity}.jpg")],
            is_active: true,
        }
    }

    pub async fn insert_room(pool: &SqlitePool, name: &str, price: f64, capacity: i32) -> Room {
        Room::create(pool, Uuid::new_v4(), &room_data(name, price, capacity))
            .await
            .unwrap()
    }

    pub async fn insert_customer(pool: &SqlitePool, email: &str) -> Customer {
        Customer::upsert_by_email(pool, "Test Guest", email, "9876543210")
            .await
            .unwrap()
    }

    pub async fn insert_booking(
        pool: &SqlitePool,
        room: &Room,
        customer: &Customer,
        check_in: NaiveDate,
        check_out: NaiveDate,
        status: BookingStatus,
    ) -> Booking {
        let nights = utils::dates::calculate_nights(check_in, check_out);
        let data = NewBooking {
            customer_id: customer.id,
            room_id: room.id,
            check_in,
            check_out,
            number_of_guests: 1,
            total_amount: utils::dates::calculate_total(nights, room.price_per_night),
            status,
            special_requests: None,
        };
        Booking::create(pool, Uuid::new_v4(), &data).await.unwrap()
    }

    pub async fn set_created_at(pool: &SqlitePool, booking_id: Uuid, created_at: &str) {
        sqlx::query("UPDATE bookings SET created_at = $2 WHERE id = $1")
            .bind(booking_id)
            .bind(created_at)
            .execute(pool)
            .await
            .unwrap();
    }
}
