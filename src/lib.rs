pub mod config;
pub mod database;
pub mod errors;
pub mod graphql;
pub mod server;
pub mod services;
pub mod utils;
