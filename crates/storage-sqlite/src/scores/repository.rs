use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use suta_core::scores::{MerchantScore, ScoreHistoryEntry, ScoreRepositoryTrait};
use suta_core::Result;

use super::model::{MerchantScoreDB, ScoreHistoryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{merchant_scores, score_history};

pub struct ScoreRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ScoreRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ScoreRepositoryTrait for ScoreRepository {
    fn get_score(&self, merchant_id: &str) -> Result<Option<MerchantScore>> {
        let mut conn = get_connection(&self.pool)?;
        merchant_scores::table
            .find(merchant_id)
            .first::<MerchantScoreDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(MerchantScore::try_from)
            .transpose()
    }

    fn get_history(&self, merchant_id: &str, limit: i64) -> Result<Vec<ScoreHistoryEntry>> {
        let mut conn = get_connection(&self.pool)?;
        score_history::table
            .filter(score_history::merchant_id.eq(merchant_id))
            .order(score_history::created_at.desc())
            .limit(limit)
            .select(ScoreHistoryDB::as_select())
            .load::<ScoreHistoryDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(ScoreHistoryEntry::try_from)
            .collect()
    }

    async fn save_score(&self, score: MerchantScore) -> Result<MerchantScore> {
        let score_db = MerchantScoreDB::from(&score);
        let history_db = ScoreHistoryDB {
            id: Uuid::new_v4().to_string(),
            merchant_id: score.merchant_id.clone(),
            total_score: score.total_score,
            credit_tier: score.credit_tier.as_str().to_string(),
            created_at: score.last_calculated_at,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<MerchantScore> {
                diesel::insert_into(merchant_scores::table)
                    .values(&score_db)
                    .on_conflict(merchant_scores::merchant_id)
                    .do_update()
                    .set(&score_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                diesel::insert_into(score_history::table)
                    .values(&history_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(score)
            })
            .await
    }
}
