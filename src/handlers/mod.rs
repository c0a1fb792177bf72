pub mod admin;
pub mod auth;
pub mod health;
pub mod leaves;
pub mod settings;
pub mod shared;
pub mod users;
