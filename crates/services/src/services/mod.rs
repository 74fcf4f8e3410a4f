pub mod auth;
pub mod booking;
pub mod config;
pub mod content;
pub mod customers;
pub mod dashboard;
pub mod database_validator;
pub mod pdf;
pub mod report;
pub mod rooms;
pub mod seed;
