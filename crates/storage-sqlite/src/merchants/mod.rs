//! SQLite storage implementation for merchants.

mod model;
mod repository;

pub use model::MerchantDB;
pub use repository::MerchantRepository;
