use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

use suta_core::sales::{NewSale, Sale, SalesRepositoryTrait};
use suta_core::Result;

use super::model::SaleDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::sales;

pub struct SalesRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SalesRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SalesRepositoryTrait for SalesRepository {
    fn list_sales_since(&self, merchant_id: &str, since: NaiveDateTime) -> Result<Vec<Sale>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = sales::table
            .filter(sales::merchant_id.eq(merchant_id))
            .filter(sales::created_at.ge(since))
            .order(sales::created_at.desc())
            .select(SaleDB::as_select())
            .load::<SaleDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(Sale::try_from).collect()
    }

    fn list_sale_dates(&self, merchant_id: &str) -> Result<Vec<NaiveDate>> {
        let mut conn = get_connection(&self.pool)?;
        let timestamps = sales::table
            .filter(sales::merchant_id.eq(merchant_id))
            .select(sales::created_at)
            .load::<NaiveDateTime>(&mut conn)
            .into_core()?;

        let dates: BTreeSet<NaiveDate> = timestamps.into_iter().map(|ts| ts.date()).collect();
        Ok(dates.into_iter().collect())
    }

    async fn insert_sale(&self, new_sale: NewSale) -> Result<Sale> {
        new_sale.validate()?;

        let sale_db = SaleDB {
            id: new_sale.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            merchant_id: new_sale.merchant_id,
            total_amount: new_sale.total_amount.to_string(),
            created_at: new_sale
                .created_at
                .unwrap_or_else(|| Utc::now().naive_utc()),
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Sale> {
                let inserted = diesel::insert_into(sales::table)
                    .values(&sale_db)
                    .returning(SaleDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Sale::try_from(inserted)
            })
            .await
    }
}
