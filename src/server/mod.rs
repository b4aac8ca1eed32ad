pub mod blog;
pub mod config;
pub mod connection;
pub mod database;
pub mod error;
pub mod router;
pub mod setup;
pub mod state;
