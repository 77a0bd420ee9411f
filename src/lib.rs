pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notification;
pub mod routes;
pub mod state;
pub mod store;
