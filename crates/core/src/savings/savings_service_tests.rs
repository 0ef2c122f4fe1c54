#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Error, Result, ValidationError};
    use crate::savings::{
        net_savings, plan_movement, plan_target_change, NewSavingsGoal, NewSavingsMovement,
        SavingsError, SavingsGoal, SavingsGoalUpdate, SavingsMovementResult,
        SavingsRepositoryTrait, SavingsService, SavingsServiceTrait, SavingsSettings,
        SavingsTransaction, WithdrawalCompletionPolicy,
    };
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    fn ts(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 1)
            .unwrap()
            .and_hms_opt(8, minute, 0)
            .unwrap()
    }

    // --- Mock SavingsRepository ---
    #[derive(Default)]
    struct LedgerState {
        goals: Vec<SavingsGoal>,
        transactions: Vec<SavingsTransaction>,
        clock: u32,
    }

    #[derive(Clone, Default)]
    struct MockSavingsRepository {
        state: Arc<Mutex<LedgerState>>,
        offline: bool,
    }

    fn offline() -> Error {
        Error::Database(DatabaseError::Unavailable("ledger store offline".to_string()))
    }

    impl MockSavingsRepository {
        fn with_goal(id: &str, merchant_id: &str, current: Decimal, target: Decimal) -> Self {
            let repo = Self::default();
            repo.state.lock().unwrap().goals.push(SavingsGoal {
                id: id.to_string(),
                merchant_id: merchant_id.to_string(),
                name: format!("Goal {}", id),
                target_amount: target,
                current_amount: current,
                is_completed: current >= target,
                completed_at: (current >= target).then(|| ts(0)),
                deadline: None,
                created_at: ts(0),
                updated_at: ts(0),
            });
            repo
        }

        fn goal(&self, id: &str) -> SavingsGoal {
            self.get_goal(id).unwrap()
        }

        fn transaction_count(&self) -> usize {
            self.state.lock().unwrap().transactions.len()
        }
    }

    #[async_trait]
    impl SavingsRepositoryTrait for MockSavingsRepository {
        fn get_goal(&self, goal_id: &str) -> Result<SavingsGoal> {
            self.state
                .lock()
                .unwrap()
                .goals
                .iter()
                .find(|g| g.id == goal_id)
                .cloned()
                .ok_or_else(|| SavingsError::GoalNotFound(goal_id.to_string()).into())
        }

        fn list_goals_for_merchant(&self, merchant_id: &str) -> Result<Vec<SavingsGoal>> {
            if self.offline {
                return Err(offline());
            }
            Ok(self
                .state
                .lock()
                .unwrap()
                .goals
                .iter()
                .filter(|g| g.merchant_id == merchant_id)
                .cloned()
                .collect())
        }

        fn list_goal_transactions(
            &self,
            goal_id: &str,
            limit: i64,
        ) -> Result<Vec<SavingsTransaction>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .transactions
                .iter()
                .rev()
                .filter(|t| t.savings_goal_id == goal_id)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        fn list_merchant_transactions(
            &self,
            merchant_id: &str,
            limit: i64,
        ) -> Result<Vec<SavingsTransaction>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .transactions
                .iter()
                .rev()
                .filter(|t| t.merchant_id == merchant_id)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        fn get_net_savings(&self, merchant_id: &str) -> Result<Decimal> {
            if self.offline {
                return Err(offline());
            }
            let state = self.state.lock().unwrap();
            net_savings(
                state
                    .transactions
                    .iter()
                    .filter(|t| t.merchant_id == merchant_id)
                    .map(|t| (t.transaction_type, t.amount)),
            )
        }

        async fn insert_goal(&self, new_goal: NewSavingsGoal) -> Result<SavingsGoal> {
            let mut state = self.state.lock().unwrap();
            let goal = SavingsGoal {
                id: format!("goal-{}", state.goals.len() + 1),
                merchant_id: new_goal.merchant_id,
                name: new_goal.name,
                target_amount: new_goal.target_amount,
                current_amount: Decimal::ZERO,
                is_completed: false,
                completed_at: None,
                deadline: new_goal.deadline,
                created_at: ts(0),
                updated_at: ts(0),
            };
            state.goals.push(goal.clone());
            Ok(goal)
        }

        async fn update_goal(
            &self,
            goal_id: String,
            update: SavingsGoalUpdate,
        ) -> Result<SavingsGoal> {
            let mut state = self.state.lock().unwrap();
            let goal = state
                .goals
                .iter_mut()
                .find(|g| g.id == goal_id)
                .ok_or_else(|| Error::from(SavingsError::GoalNotFound(goal_id.clone())))?;
            if let Some(name) = update.name {
                goal.name = name;
            }
            if let Some(target) = update.target_amount {
                let balance = plan_target_change(goal, target, ts(30));
                goal.target_amount = target;
                goal.is_completed = balance.is_completed;
                goal.completed_at = balance.completed_at;
            }
            Ok(goal.clone())
        }

        async fn delete_goal(&self, goal_id: String) -> Result<usize> {
            let mut state = self.state.lock().unwrap();
            let before = state.goals.len();
            state.goals.retain(|g| g.id != goal_id);
            state.transactions.retain(|t| t.savings_goal_id != goal_id);
            Ok(before - state.goals.len())
        }

        async fn record_movement(
            &self,
            movement: NewSavingsMovement,
            policy: WithdrawalCompletionPolicy,
        ) -> Result<SavingsMovementResult> {
            let mut state = self.state.lock().unwrap();
            state.clock += 1;
            let now = ts(state.clock);
            let tx_id = format!("tx-{}", state.transactions.len() + 1);

            let goal = state
                .goals
                .iter_mut()
                .find(|g| g.id == movement.savings_goal_id)
                .ok_or_else(|| {
                    Error::from(SavingsError::GoalNotFound(movement.savings_goal_id.clone()))
                })?;
            let update = plan_movement(goal, &movement, now, policy)?;
            goal.current_amount = update.current_amount;
            goal.is_completed = update.is_completed;
            goal.completed_at = update.completed_at;
            goal.updated_at = now;
            let goal = goal.clone();

            let transaction = SavingsTransaction {
                id: tx_id,
                savings_goal_id: movement.savings_goal_id,
                merchant_id: movement.merchant_id,
                amount: movement.amount,
                transaction_type: movement.transaction_type,
                source: movement.source,
                notes: movement.notes,
                created_at: now,
            };
            state.transactions.push(transaction.clone());

            Ok(SavingsMovementResult {
                new_amount: goal.current_amount,
                goal,
                transaction,
            })
        }
    }

    fn service(repo: &MockSavingsRepository) -> SavingsService {
        SavingsService::new(Arc::new(repo.clone()), SavingsSettings::default())
    }

    #[tokio::test]
    async fn test_deposit_updates_balance_and_defaults_source() {
        let repo = MockSavingsRepository::with_goal("g1", "m1", dec!(200), dec!(1000));
        let svc = service(&repo);

        let result = svc
            .add_deposit("g1", "m1", dec!(300), None, Some("market day".into()))
            .await
            .unwrap();

        assert_eq!(result.new_amount, dec!(500));
        assert!(!result.goal.is_completed);
        assert_eq!(result.transaction.source.as_deref(), Some("manual"));
        assert_eq!(result.transaction.notes.as_deref(), Some("market day"));
        assert_eq!(repo.goal("g1").current_amount, dec!(500));
    }

    #[tokio::test]
    async fn test_deposit_reaching_target_completes_goal() {
        let repo = MockSavingsRepository::with_goal("g1", "m1", dec!(900), dec!(1000));
        let svc = service(&repo);

        let result = svc
            .add_deposit("g1", "m1", dec!(100), Some("sale_suggestion".into()), None)
            .await
            .unwrap();

        assert_eq!(result.new_amount, dec!(1000));
        assert!(result.goal.is_completed);
        assert!(result.goal.completed_at.is_some());
        assert_eq!(result.transaction.source.as_deref(), Some("sale_suggestion"));
    }

    #[tokio::test]
    async fn test_deposit_into_missing_goal_is_not_found() {
        let repo = MockSavingsRepository::default();
        let err = service(&repo)
            .add_deposit("missing", "m1", dec!(10), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Savings(SavingsError::GoalNotFound(_))));
        assert_eq!(repo.transaction_count(), 0);
    }

    #[tokio::test]
    async fn test_zero_amount_is_rejected_before_reaching_repository() {
        let repo = MockSavingsRepository::with_goal("g1", "m1", dec!(0), dec!(1000));
        let err = service(&repo)
            .add_deposit("g1", "m1", Decimal::ZERO, None, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidInput(_))
        ));
        assert_eq!(repo.transaction_count(), 0);
    }

    #[tokio::test]
    async fn test_overdraw_fails_and_leaves_balance_unchanged() {
        let repo = MockSavingsRepository::with_goal("g1", "m1", dec!(150), dec!(1000));
        let err = service(&repo)
            .withdraw("g1", "m1", dec!(151), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Savings(SavingsError::InsufficientFunds { .. })
        ));
        assert_eq!(repo.goal("g1").current_amount, dec!(150));
        assert_eq!(repo.transaction_count(), 0);
    }

    #[tokio::test]
    async fn test_withdrawing_full_balance_leaves_zero() {
        let repo = MockSavingsRepository::with_goal("g1", "m1", dec!(150), dec!(1000));
        let result = service(&repo)
            .withdraw("g1", "m1", dec!(150), None)
            .await
            .unwrap();
        assert_eq!(result.new_amount, Decimal::ZERO);
        assert_eq!(result.transaction.source, None);
    }

    #[tokio::test]
    async fn test_withdrawal_always_uncompletes_goal_by_default() {
        let repo = MockSavingsRepository::with_goal("g1", "m1", dec!(1500), dec!(1000));
        let result = service(&repo)
            .withdraw("g1", "m1", dec!(300), None)
            .await
            .unwrap();

        assert_eq!(result.new_amount, dec!(1200));
        assert!(!result.goal.is_completed);
        assert_eq!(result.goal.completed_at, None);
    }

    #[tokio::test]
    async fn test_reevaluate_policy_keeps_completion() {
        let repo = MockSavingsRepository::with_goal("g1", "m1", dec!(1500), dec!(1000));
        let svc = SavingsService::new(
            Arc::new(repo.clone()),
            SavingsSettings {
                withdrawal_completion: WithdrawalCompletionPolicy::Reevaluate,
            },
        );

        let result = svc.withdraw("g1", "m1", dec!(300), None).await.unwrap();
        assert!(result.goal.is_completed);
        assert_eq!(result.goal.completed_at, Some(ts(0)));
    }

    #[tokio::test]
    async fn test_total_savings_nets_withdrawals() {
        let repo = MockSavingsRepository::with_goal("g1", "m1", dec!(0), dec!(5000));
        let svc = service(&repo);

        svc.add_deposit("g1", "m1", dec!(1000), None, None)
            .await
            .unwrap();
        svc.withdraw("g1", "m1", dec!(300), None).await.unwrap();

        assert_eq!(svc.get_total_savings("m1").unwrap(), dec!(700));
        assert_eq!(svc.get_total_savings("m2").unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_stats_aggregate_goals() {
        let repo = MockSavingsRepository::with_goal("g1", "m1", dec!(0), dec!(1000));
        let svc = service(&repo);
        let second = svc
            .create_goal(NewSavingsGoal {
                id: None,
                merchant_id: "m1".to_string(),
                name: "New freezer".to_string(),
                target_amount: dec!(500),
                deadline: None,
            })
            .await
            .unwrap();

        svc.add_deposit("g1", "m1", dec!(250), None, None)
            .await
            .unwrap();
        svc.add_deposit(&second.id, "m1", dec!(500), None, None)
            .await
            .unwrap();

        let stats = svc.get_savings_stats("m1").unwrap();
        assert_eq!(stats.total_savings, dec!(750));
        assert_eq!(stats.total_goals, 2);
        assert_eq!(stats.active_goals, 1);
        assert_eq!(stats.completed_goals, 1);
        assert_eq!(stats.total_target, dec!(1500));
        assert_eq!(stats.total_current, dec!(750));
        assert_eq!(stats.overall_progress, 50);

        let empty = svc.get_savings_stats("nobody").unwrap();
        assert_eq!(empty.overall_progress, 0);
        assert_eq!(empty.total_goals, 0);
    }

    #[tokio::test]
    async fn test_aggregates_report_unavailable_store() {
        let repo = MockSavingsRepository {
            offline: true,
            ..MockSavingsRepository::with_goal("g1", "m1", dec!(400), dec!(1000))
        };
        let svc = service(&repo);

        let total = svc.get_total_savings("m1").unwrap_err();
        assert!(total.is_store_unavailable());

        let stats = svc.get_savings_stats("m1").unwrap_err();
        assert!(stats.is_store_unavailable());
    }

    #[tokio::test]
    async fn test_create_goal_validates_input() {
        let repo = MockSavingsRepository::default();
        let svc = service(&repo);

        let blank = svc
            .create_goal(NewSavingsGoal {
                id: None,
                merchant_id: "m1".to_string(),
                name: "   ".to_string(),
                target_amount: dec!(100),
                deadline: None,
            })
            .await;
        assert!(matches!(blank, Err(Error::Validation(_))));

        let negative = svc
            .create_goal(NewSavingsGoal {
                id: None,
                merchant_id: "m1".to_string(),
                name: "Tontine".to_string(),
                target_amount: dec!(-1),
                deadline: None,
            })
            .await;
        assert!(matches!(negative, Err(Error::Validation(_))));
        assert!(svc.get_goals("m1").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_goal_target_rederives_completion() {
        let repo = MockSavingsRepository::with_goal("g1", "m1", dec!(600), dec!(1000));
        let updated = service(&repo)
            .update_goal(
                "g1",
                SavingsGoalUpdate {
                    target_amount: Some(dec!(600)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_completed);
        assert!(updated.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_goal_removes_transactions() {
        let repo = MockSavingsRepository::with_goal("g1", "m1", dec!(0), dec!(1000));
        let svc = service(&repo);
        svc.add_deposit("g1", "m1", dec!(10), None, None)
            .await
            .unwrap();

        svc.delete_goal("g1").await.unwrap();
        assert!(svc.get_goal_transactions("g1", None).unwrap().is_empty());

        let again = svc.delete_goal("g1").await.unwrap_err();
        assert!(matches!(again, Error::Savings(SavingsError::GoalNotFound(_))));
    }

    #[tokio::test]
    async fn test_transaction_listings_are_newest_first_and_limited() {
        let repo = MockSavingsRepository::with_goal("g1", "m1", dec!(0), dec!(1000));
        let svc = service(&repo);
        for amount in [dec!(1), dec!(2), dec!(3)] {
            svc.add_deposit("g1", "m1", amount, None, None)
                .await
                .unwrap();
        }

        let latest = svc.get_goal_transactions("g1", Some(2)).unwrap();
        assert_eq!(
            latest.iter().map(|t| t.amount).collect::<Vec<_>>(),
            vec![dec!(3), dec!(2)]
        );
        assert_eq!(svc.get_merchant_transactions("m1", None).unwrap().len(), 3);
    }
}
