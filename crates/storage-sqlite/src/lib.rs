//! SQLite storage implementation for SUTA.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `suta-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for merchants, sales, savings, and scores
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place where Diesel dependencies exist. The core
//! crate is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```
//!
//! Reads use the connection pool directly. Every write is sent to the
//! single writer actor (`WriteHandle`), which runs it inside an immediate
//! transaction.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod merchants;
pub mod sales;
pub mod savings;
pub mod scores;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use merchants::MerchantRepository;
pub use sales::SalesRepository;
pub use savings::SavingsRepository;
pub use scores::ScoreRepository;

// Re-export from suta-core for convenience
pub use suta_core::errors::{DatabaseError, Error, Result};
