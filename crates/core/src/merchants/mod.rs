//! Merchants module - account metadata used for seniority.

mod merchants_model;
mod merchants_traits;

pub use merchants_model::{Merchant, NewMerchant};
pub use merchants_traits::MerchantRepositoryTrait;
