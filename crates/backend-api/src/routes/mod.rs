pub mod auth;
pub mod classes;
pub mod health;
pub mod models;
pub mod profile;
