//! SQLite storage implementation for sales.

mod model;
mod repository;

pub use model::SaleDB;
pub use repository::SalesRepository;
