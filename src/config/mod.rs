/// Application configuration loading from fintrack.toml and environment
pub mod app;

/// Database configuration and connection management
pub mod database;
