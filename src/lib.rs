pub mod app;
pub mod auth;
pub mod backend;
pub mod checkins;
pub mod config;
pub mod error;
pub mod insights;
pub mod meals;
pub mod records;
pub mod state;
