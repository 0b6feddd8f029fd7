pub mod env_keys;
pub mod config;
pub mod error;
pub mod formatter;
pub mod service;
