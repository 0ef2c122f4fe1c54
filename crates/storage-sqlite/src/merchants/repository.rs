use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use suta_core::merchants::{Merchant, MerchantRepositoryTrait, NewMerchant};
use suta_core::Result;

use super::model::MerchantDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::merchants;

pub struct MerchantRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MerchantRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl MerchantRepositoryTrait for MerchantRepository {
    fn find_by_id(&self, merchant_id: &str) -> Result<Option<Merchant>> {
        let mut conn = get_connection(&self.pool)?;
        let merchant = merchants::table
            .find(merchant_id)
            .first::<MerchantDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(merchant.map(Merchant::from))
    }

    async fn insert_merchant(&self, new_merchant: NewMerchant) -> Result<Merchant> {
        new_merchant.validate()?;

        let merchant_db = MerchantDB {
            id: new_merchant
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            business_name: new_merchant.business_name,
            created_at: new_merchant
                .created_at
                .unwrap_or_else(|| Utc::now().naive_utc()),
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Merchant> {
                let inserted = diesel::insert_into(merchants::table)
                    .values(&merchant_db)
                    .returning(MerchantDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Merchant::from(inserted))
            })
            .await
    }
}
