//! End-to-end tests wiring the core services to the SQLite repositories.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tempfile::TempDir;

use suta_core::merchants::{MerchantRepositoryTrait, NewMerchant};
use suta_core::sales::{NewSale, SalesRepositoryTrait};
use suta_core::savings::{
    NewSavingsGoal, SavingsService, SavingsServiceTrait, SavingsSettings,
};
use suta_core::scores::{CreditTier, ScoreService, ScoreServiceTrait};
use suta_storage_sqlite::{
    create_pool, run_migrations, spawn_writer, MerchantRepository, SalesRepository,
    SavingsRepository, ScoreRepository,
};

struct App {
    _dir: TempDir,
    merchants: Arc<MerchantRepository>,
    sales: Arc<SalesRepository>,
    savings: SavingsService,
    scores: ScoreService,
}

fn build_app() -> App {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("suta.db");
    let pool = create_pool(db_path.to_str().unwrap()).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer((*pool).clone());

    let merchants = Arc::new(MerchantRepository::new(Arc::clone(&pool), writer.clone()));
    let sales = Arc::new(SalesRepository::new(Arc::clone(&pool), writer.clone()));
    let savings_repo = Arc::new(SavingsRepository::new(Arc::clone(&pool), writer.clone()));
    let score_repo = Arc::new(ScoreRepository::new(Arc::clone(&pool), writer));

    App {
        _dir: dir,
        savings: SavingsService::new(savings_repo.clone(), SavingsSettings::default()),
        scores: ScoreService::new(score_repo, sales.clone(), savings_repo, merchants.clone()),
        merchants,
        sales,
    }
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

async fn seed_merchant(app: &App, id: &str, age_days: i64) {
    app.merchants
        .insert_merchant(NewMerchant {
            id: Some(id.to_string()),
            business_name: "Maquis Chez Awa".to_string(),
            created_at: Some(now() - Duration::days(age_days)),
        })
        .await
        .unwrap();
}

async fn seed_sale(app: &App, merchant_id: &str, amount: Decimal, days_back: i64) {
    app.sales
        .insert_sale(NewSale {
            id: None,
            merchant_id: merchant_id.to_string(),
            total_amount: amount,
            created_at: Some(now() - Duration::days(days_back)),
        })
        .await
        .unwrap();
}

async fn seed_goal(app: &App, merchant_id: &str, target: Decimal) -> String {
    app.savings
        .create_goal(NewSavingsGoal {
            id: None,
            merchant_id: merchant_id.to_string(),
            name: "Second freezer".to_string(),
            target_amount: target,
            deadline: None,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_score_from_persisted_history() {
    let app = build_app();
    seed_merchant(&app, "m1", 100).await;
    for days_back in 0..10 {
        seed_sale(&app, "m1", dec!(50000), days_back).await;
    }
    // Outside the 30-day window: counts for usage only.
    seed_sale(&app, "m1", dec!(900000), 45).await;

    let goal_id = seed_goal(&app, "m1", dec!(200000)).await;
    app.savings
        .add_deposit(&goal_id, "m1", dec!(60000), None, None)
        .await
        .unwrap();
    app.savings
        .withdraw(&goal_id, "m1", dec!(10000), None)
        .await
        .unwrap();

    let score = app.scores.calculate_score_at("m1", now()).await.unwrap();

    assert_eq!(score.regularity_score, 10);
    assert_eq!(score.total_sales_amount, dec!(500000));
    assert_eq!(score.volume_score, 10);
    assert_eq!(score.total_savings_amount, dec!(50000));
    assert_eq!(score.savings_score, 10);
    assert_eq!(score.app_usage_days, 11);
    assert_eq!(score.usage_score, 5);
    assert_eq!(score.account_age_days, 100);
    assert_eq!(score.seniority_score, 15);
    assert_eq!(score.total_score, 50);
    assert_eq!(score.credit_tier, CreditTier::Silver);
    assert!(score.is_eligible_for_credit);
    assert_eq!(score.max_credit_amount, dec!(100000));

    assert_eq!(app.scores.get_score("m1").unwrap(), Some(score));
}

#[tokio::test]
async fn test_recalculation_keeps_one_snapshot_and_grows_history() {
    let app = build_app();
    seed_merchant(&app, "m1", 5).await;

    assert_eq!(app.scores.get_score("m1").unwrap(), None);

    let first = app.scores.calculate_score_at("m1", now()).await.unwrap();
    seed_sale(&app, "m1", dec!(400000), 0).await;
    let second = app
        .scores
        .calculate_score_at("m1", now() + Duration::hours(1))
        .await
        .unwrap();
    app.scores
        .calculate_score_at("m1", now() + Duration::hours(2))
        .await
        .unwrap();

    assert!(second.total_score > first.total_score);

    let history = app.scores.get_score_history("m1", None).unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].created_at, now() + Duration::hours(2));
    assert_eq!(history[2].total_score, first.total_score);

    let limited = app.scores.get_score_history("m1", Some(2)).unwrap();
    assert_eq!(limited.len(), 2);

    let snapshot = app.scores.get_score("m1").unwrap().unwrap();
    assert_eq!(snapshot.last_calculated_at, now() + Duration::hours(2));
}

#[tokio::test]
async fn test_unregistered_merchant_is_scored_without_seniority() {
    let app = build_app();
    let score = app.scores.calculate_score_at("ghost", now()).await.unwrap();
    assert_eq!(score.total_score, 0);
    assert_eq!(score.credit_tier, CreditTier::None);
    assert_eq!(app.scores.get_score_history("ghost", None).unwrap().len(), 1);
}

#[tokio::test]
async fn test_savings_stats_over_persisted_goals() {
    let app = build_app();
    seed_merchant(&app, "m1", 10).await;
    let stall = seed_goal(&app, "m1", dec!(1000)).await;
    let scale = seed_goal(&app, "m1", dec!(500)).await;

    app.savings
        .add_deposit(&stall, "m1", dec!(500), None, Some("market day".to_string()))
        .await
        .unwrap();
    let completed = app
        .savings
        .add_deposit(&scale, "m1", dec!(600), Some("sale_suggestion".to_string()), None)
        .await
        .unwrap();
    assert!(completed.goal.is_completed);
    assert_eq!(completed.transaction.source.as_deref(), Some("sale_suggestion"));

    let stats = app.savings.get_savings_stats("m1").unwrap();
    assert_eq!(stats.total_savings, dec!(1100));
    assert_eq!(stats.total_goals, 2);
    assert_eq!(stats.completed_goals, 1);
    assert_eq!(stats.active_goals, 1);
    assert_eq!(stats.total_target, dec!(1500));
    assert_eq!(stats.total_current, dec!(1100));
    assert_eq!(stats.overall_progress, 73);

    app.savings.delete_goal(&scale).await.unwrap();
    assert_eq!(app.savings.get_total_savings("m1").unwrap(), dec!(500));
    assert_eq!(app.savings.get_goals("m1").unwrap().len(), 1);
}
