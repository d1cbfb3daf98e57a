pub mod config;
pub mod error;
pub mod logger;
pub mod routes;
pub mod server;
pub mod state;
