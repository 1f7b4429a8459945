//! Storage layer for league players and their season totals
//!
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: CRUD operations and game recording

pub mod models;
pub mod queries;
pub mod schema;


// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::StatsDatabase;
