pub mod auth;
pub mod bookings;
pub mod content;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod reports;
pub mod rooms;
