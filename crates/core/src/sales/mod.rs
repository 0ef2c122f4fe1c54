//! Sales module - the sale records the scoring engine reads.

mod sales_model;
mod sales_traits;

pub use sales_model::{NewSale, Sale};
pub use sales_traits::SalesRepositoryTrait;
