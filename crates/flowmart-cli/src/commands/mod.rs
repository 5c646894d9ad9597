pub mod auth;
pub mod categories;
pub mod config;
pub mod products;
pub mod profile;
