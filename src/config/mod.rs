/// Application configuration file and environment lookups
pub mod app;

/// Database configuration and connection management
pub mod database;

/// Built-in and configured seed companies
pub mod seed;

pub use app::{AppConfig, load_app_configuration, load_config};
pub use seed::{CompanySeed, default_company_seeds};
