//! Database models for sales.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use suta_core::errors::Error;
use suta_core::sales::Sale;

use crate::utils::parse_decimal;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::sales)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SaleDB {
    pub id: String,
    pub merchant_id: String,
    pub total_amount: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<SaleDB> for Sale {
    type Error = Error;

    fn try_from(db: SaleDB) -> Result<Self, Self::Error> {
        Ok(Self {
            total_amount: parse_decimal(&db.total_amount, "total_amount")?,
            id: db.id,
            merchant_id: db.merchant_id,
            created_at: db.created_at,
        })
    }
}
