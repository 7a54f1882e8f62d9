/// Database configuration and connection management
pub mod database;

/// Insights service settings from environment variables
pub mod insights;

/// Demonstration data loading from config.toml
pub mod seed;
