pub mod admin;
pub mod auth;
pub mod health;
pub mod orders;
pub mod payment;
pub mod products;
pub mod upload;
