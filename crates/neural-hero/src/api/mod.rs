pub mod config;
pub mod error;
pub mod hero;
pub mod types;
