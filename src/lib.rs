//! Larder
//!
//! Backend data service for a household food inventory: users, an ingredient
//! catalog, fridge stock and multi-part recipes over PostgreSQL.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;
