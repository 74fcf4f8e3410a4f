//! Demo data: the admin account, the resort's rooms, a handful of guests and
//! sample bookings around the current month. Safe to run repeatedly.

use chrono::{Datelike, Months, NaiveDate};
use db::models::{
    admin_user::AdminUser,
    booking::{Booking, BookingStatus, NewBooking},
    customer::Customer,
    room::{Room, RoomData},
};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};
use utils::dates::{calculate_nights, calculate_total};
use uuid::Uuid;

use super::auth::{AuthError, AuthService};

pub const ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("seed data refers to a missing {0}")]
    MissingReference(&'static str),
    #[error("no sample dates around {0}")]
    DateOutOfRange(NaiveDate),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub rooms_created: usize,
    pub customers_created: usize,
    pub bookings_created: usize,
}

struct SeedRoom {
    name: &'static str,
    description: &'static str,
    price_per_night: f64,
    capacity: i32,
    amenities: &'static [&'static str],
    photos: [&'static str; 2],
}

const ROOMS: [SeedRoom; 5] = [
    SeedRoom {
        name: "Mountain View Deluxe",
        description: "Spacious room looking out over the Vagamon hills, with a king-size bed and a private balcony. A favourite with couples.",
        price_per_night: 3500.0,
        capacity: 2,
        amenities: &[
            "Mountain View",
            "Private Balcony",
            "King Size Bed",
            "Free Wi-Fi",
            "Complimentary Breakfast",
            "Air Conditioning",
        ],
        photos: ["photo-1520250497591-112f2f40a3f4", "photo-1611892440504-42a792e24d32"],
    },
    SeedRoom {
        name: "Pine Forest Suite",
        description: "Suite above the pine forest with a separate living area and wide windows. Roomy enough for families and longer stays.",
        price_per_night: 5500.0,
        capacity: 4,
        amenities: &[
            "Forest View",
            "Separate Living Area",
            "Two Queen Beds",
            "Free Wi-Fi",
            "Complimentary Breakfast",
            "Mini Bar",
            "Air Conditioning",
        ],
        photos: ["photo-1566073771259-6a8506099945", "photo-1590490360182-c33d57733427"],
    },
    SeedRoom {
        name: "Tea Estate Cottage",
        description: "Traditional cottage facing the tea plantations, with a private garden and a path straight onto the nature trails.",
        price_per_night: 4500.0,
        capacity: 3,
        amenities: &[
            "Tea Estate View",
            "Private Garden",
            "Queen Bed + Single Bed",
            "Free Wi-Fi",
            "Complimentary Breakfast",
            "Campfire Access",
            "Nature Trail Access",
        ],
        photos: ["photo-1501594907352-04cda38ebc29", "photo-1441974231531-c6227db76b6e"],
    },
    SeedRoom {
        name: "Meadow View Standard",
        description: "Comfortable room overlooking the meadows with all the essentials, for guests travelling on a budget.",
        price_per_night: 2500.0,
        capacity: 2,
        amenities: &[
            "Meadow View",
            "Double Bed",
            "Free Wi-Fi",
            "Complimentary Breakfast",
            "Air Conditioning",
        ],
        photos: ["photo-1506905925346-21bda4d32df4", "photo-1470071459604-3b5ec3a7fe05"],
    },
    SeedRoom {
        name: "Premium Hilltop Villa",
        description: "Hilltop villa with views all round, three bedrooms and a private terrace. Built for groups and celebrations.",
        price_per_night: 8500.0,
        capacity: 6,
        amenities: &[
            "360-Degree Views",
            "Private Terrace",
            "Three Bedrooms",
            "Free Wi-Fi",
            "Complimentary Breakfast",
            "Mini Bar",
            "Room Service",
            "Private Parking",
        ],
        photos: ["photo-1578683010236-d716f9a3f461", "photo-1564501049412-61c2a3083791"],
    },
];

const CUSTOMERS: [(&str, &str, &str); 10] = [
    ("Rajesh Kumar", "rajesh.kumar@example.com", "+91 98765 43210"),
    ("Priya Sharma", "priya.sharma@example.com", "+91 98765 43211"),
    ("Amit Patel", "amit.patel@example.com", "+91 98765 43212"),
    ("Sneha Menon", "sneha.menon@example.com", "+91 98765 43213"),
    ("Vikram Singh", "vikram.singh@example.com", "+91 98765 43214"),
    ("Anjali Nair", "anjali.nair@example.com", "+91 98765 43215"),
    ("Rahul Iyer", "rahul.iyer@example.com", "+91 98765 43216"),
    ("Meera Krishnan", "meera.krishnan@example.com", "+91 98765 43217"),
    ("Arjun Pillai", "arjun.pillai@example.com", "+91 98765 43218"),
    ("Kavya Suresh", "kavya.suresh@example.com", "+91 98765 43219"),
];

/// Sample stay, placed relative to the month the seed runs in.
struct SeedBooking {
    customer: usize,
    room: usize,
    month_offset: u32,
    check_in_day: u32,
    check_out_day: u32,
    guests: i32,
    status: BookingStatus,
}

const BOOKINGS: [SeedBooking; 5] = [
    SeedBooking { customer: 0, room: 0, month_offset: 0, check_in_day: 5, check_out_day: 7, guests: 2, status: BookingStatus::Confirmed },
    SeedBooking { customer: 1, room: 1, month_offset: 0, check_in_day: 10, check_out_day: 12, guests: 4, status: BookingStatus::Confirmed },
    SeedBooking { customer: 2, room: 2, month_offset: 0, check_in_day: 15, check_out_day: 18, guests: 3, status: BookingStatus::Pending },
    SeedBooking { customer: 3, room: 0, month_offset: 1, check_in_day: 1, check_out_day: 3, guests: 2, status: BookingStatus::Confirmed },
    SeedBooking { customer: 4, room: 3, month_offset: 1, check_in_day: 5, check_out_day: 7, guests: 2, status: BookingStatus::Confirmed },
];

fn room_data(room: &SeedRoom) -> RoomData {
    RoomData {
        name: room.name.to_string(),
        description: room.description.to_string(),
        price_per_night: room.price_per_night,
        capacity: room.capacity,
        amenities: room.amenities.iter().map(|a| a.to_string()).collect(),
        images: room
            .photos
            .iter()
            .map(|p| format!("https://images.unsplash.com/{p}?w=1200"))
            .collect(),
        is_active: true,
    }
}

fn stay_dates(today: NaiveDate, booking: &SeedBooking) -> Option<(NaiveDate, NaiveDate)> {
    let month = today
        .with_day(1)?
        .checked_add_months(Months::new(booking.month_offset))?;
    Some((
        month.with_day(booking.check_in_day)?,
        month.with_day(booking.check_out_day)?,
    ))
}

pub struct SeedService;

impl SeedService {
    pub async fn run(
        pool: &SqlitePool,
        admin_password: &str,
        today: NaiveDate,
    ) -> Result<SeedSummary, SeedError> {
        let mut summary = SeedSummary::default();

        let hash = AuthService::hash_password(admin_password)?;
        let admin = AdminUser::upsert(pool, ADMIN_USERNAME, &hash).await?;
        info!(username = %admin.username, "Admin user ready");

        let seed_bookings = Booking::count(pool).await? == 0;
        let mut tx = pool.begin().await?;

        let mut rooms = Vec::with_capacity(ROOMS.len());
        for seed in &ROOMS {
            let room = match Room::find_by_name(&mut *tx, seed.name).await? {
                Some(existing) => existing,
                None => {
                    summary.rooms_created += 1;
                    Room::create(&mut *tx, Uuid::new_v4(), &room_data(seed)).await?
                }
            };
            debug!(room = %room.name, "Room ready");
            rooms.push(room);
        }

        let mut customers = Vec::with_capacity(CUSTOMERS.len());
        for (name, email, phone) in CUSTOMERS {
            summary.customers_created +=
                Customer::create_if_absent(&mut *tx, name, email, phone).await? as usize;
            let customer = Customer::find_by_email(&mut *tx, email)
                .await?
                .ok_or(SeedError::MissingReference("customer"))?;
            customers.push(customer);
        }

        if seed_bookings {
            for seed in &BOOKINGS {
                let room = rooms.get(seed.room).ok_or(SeedError::MissingReference("room"))?;
                let customer = customers
                    .get(seed.customer)
                    .ok_or(SeedError::MissingReference("customer"))?;
                let (check_in, check_out) =
                    stay_dates(today, seed).ok_or(SeedError::DateOutOfRange(today))?;
                let nights = calculate_nights(check_in, check_out);

                Booking::create(
                    &mut *tx,
                    Uuid::new_v4(),
                    &NewBooking {
                        customer_id: customer.id,
                        room_id: room.id,
                        check_in,
                        check_out,
                        number_of_guests: seed.guests,
                        total_amount: calculate_total(nights, room.price_per_night),
                        status: seed.status,
                        special_requests: None,
                    },
                )
                .await?;
                summary.bookings_created += 1;
            }
        } else {
            info!("Bookings already present, skipping sample bookings");
        }

        tx.commit().await?;

        info!(
            rooms_created = summary.rooms_created,
            customers_created = summary.customers_created,
            bookings_created = summary.bookings_created,
            "Seed complete"
        );
        Ok(summary)
    }
}
