pub mod cli_client;
pub mod config;
pub mod error;
pub mod services;
