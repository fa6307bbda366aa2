pub mod app_context;
pub mod attribute_types;
pub mod common;
pub mod config;
pub mod database;
pub mod errors;
pub mod server;
pub mod services;

pub use app_context::AppContext;
