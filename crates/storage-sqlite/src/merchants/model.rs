//! Database models for merchants.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use suta_core::merchants::Merchant;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::merchants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MerchantDB {
    pub id: String,
    pub business_name: String,
    pub created_at: NaiveDateTime,
}

impl From<MerchantDB> for Merchant {
    fn from(db: MerchantDB) -> Self {
        Self {
            id: db.id,
            business_name: db.business_name,
            created_at: db.created_at,
        }
    }
}
