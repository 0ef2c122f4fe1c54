//! SUTA Core - scoring and savings domain, services, and traits.
//!
//! This crate holds the business rules of the SUTA trust score and the
//! savings ledger. It is database-agnostic and defines repository traits that
//! are implemented by the `storage-sqlite` crate.

pub mod errors;
pub mod merchants;
pub mod sales;
pub mod savings;
pub mod scores;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
