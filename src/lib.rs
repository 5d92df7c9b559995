pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod menu;
pub mod middleware;
pub mod server;
pub mod testing;
