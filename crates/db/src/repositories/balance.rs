//! Balance repository: the write path for deposits and withdrawals.
//!
//! A balance change runs as one database transaction covering the balance
//! update, the audit row, point awards, and achievement unlocks. Either
//! the whole sequence commits or none of it does.

use punktwerk_core::achievements::{self, DepositContext};
use punktwerk_core::balance::{
    self, BalanceChange, TransactionKind, UserSnapshot, ACHIEVEMENT_BONUS_POINTS,
};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use thiserror::Error;
use tracing::debug;

use crate::entities::sea_orm_active_enums;
use crate::entities::{achievements as achievement_rows, point_awards, transactions, users};

/// Errors from applying a balance change.
#[derive(Debug, Error)]
pub enum BalanceError {
    #[error("user {0} not found")]
    UserNotFound(i32),

    #[error(transparent)]
    Rejected(#[from] balance::BalanceError),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Everything a committed balance change produced.
#[derive(Debug, Clone)]
pub struct BalanceChangeOutcome {
    /// User row state after the commit.
    pub user: UserSnapshot,
    /// The audit row written for this change.
    pub transaction: transactions::Model,
    /// Formula points credited for a deposit (0 for withdrawals).
    pub points_awarded: i64,
    /// Achievements unlocked by this change, in evaluation order.
    pub unlocked: Vec<achievement_rows::Model>,
}

/// Repository for balance mutations.
#[derive(Debug, Clone)]
pub struct BalanceRepository {
    db: DatabaseConnection,
}

impl BalanceRepository {
    /// Creates a new balance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a deposit or withdrawal atomically.
    ///
    /// For deposits, formula points are credited and achievement rules are
    /// evaluated once against the post-award point total. Unlock bonuses do
    /// not trigger re-evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::UserNotFound`] for an unknown user,
    /// [`BalanceError::Rejected`] when validation or the funds check fails,
    /// and [`BalanceError::Database`] on query failure.
    pub async fn apply_balance_change(
        &self,
        change: &BalanceChange,
    ) -> Result<BalanceChangeOutcome, BalanceError> {
        balance::validate(change)?;

        let txn = self.db.begin().await?;

        let user = users::Entity::find_by_id(change.user_id)
            .one(&txn)
            .await?
            .ok_or(BalanceError::UserNotFound(change.user_id))?;

        // Pre-check against the loaded row so callers get a precise error;
        // the conditional UPDATE below is what actually guards the invariant.
        balance::new_balance(user.balance, change)?;

        let prior_deposits = count_deposits(&txn, change.user_id).await?;

        apply_balance_update(&txn, change).await?;

        let transaction = insert_transaction(&txn, change).await?;

        let mut points_awarded = 0;
        let mut unlocked = Vec::new();

        if change.kind == TransactionKind::Deposit {
            points_awarded = balance::points_for_deposit(change.amount);
            if points_awarded > 0 {
                let reason = format!("Einzahlung über {} Cent", change.amount);
                add_points(&txn, change.user_id, points_awarded, &reason).await?;
            }

            let points_after_award = fetch_points(&txn, change.user_id).await?;
            let ctx = DepositContext {
                deposit_amount: change.amount,
                prior_deposit_count: prior_deposits,
                points_after_award,
            };

            for rule in achievements::evaluate(&ctx) {
                if let Some(row) = unlock_achievement(&txn, change.user_id, rule).await? {
                    add_points(
                        &txn,
                        change.user_id,
                        ACHIEVEMENT_BONUS_POINTS,
                        &format!("Abzeichen freigeschaltet: {}", rule.name),
                    )
                    .await?;
                    unlocked.push(row);
                }
            }
        }

        let user = users::Entity::find_by_id(change.user_id)
            .one(&txn)
            .await?
            .ok_or(BalanceError::UserNotFound(change.user_id))?;

        txn.commit().await?;

        debug!(
            user_id = user.id,
            balance = user.balance,
            points = user.points,
            points_awarded,
            unlocked = unlocked.len(),
            "Balance change committed"
        );

        Ok(BalanceChangeOutcome {
            user: UserSnapshot {
                id: user.id,
                balance: user.balance,
                points: user.points,
            },
            transaction,
            points_awarded,
            unlocked,
        })
    }
}

/// Counts committed deposit rows for a user.
async fn count_deposits(txn: &DatabaseTransaction, user_id: i32) -> Result<u64, DbErr> {
    transactions::Entity::find()
        .filter(transactions::Column::UserId.eq(user_id))
        .filter(transactions::Column::Kind.eq(sea_orm_active_enums::TransactionKind::Deposit))
        .count(txn)
        .await
}

/// Mutates the balance with a single conditional UPDATE.
///
/// Withdrawals filter on `balance >= amount`, so a concurrent change that
/// drained the row leaves zero affected rows instead of a negative balance.
async fn apply_balance_update(
    txn: &DatabaseTransaction,
    change: &BalanceChange,
) -> Result<(), BalanceError> {
    let update = users::Entity::update_many().filter(users::Column::Id.eq(change.user_id));

    let update = match change.kind {
        TransactionKind::Deposit => update.col_expr(
            users::Column::Balance,
            Expr::col(users::Column::Balance).add(change.amount),
        ),
        TransactionKind::Withdrawal => update
            .col_expr(
                users::Column::Balance,
                Expr::col(users::Column::Balance).sub(change.amount),
            )
            .filter(users::Column::Balance.gte(change.amount)),
    };

    let result = update.exec(txn).await?;

    if result.rows_affected == 0 {
        // Row existed moments ago; a concurrent withdrawal won the race.
        let user = users::Entity::find_by_id(change.user_id)
            .one(txn)
            .await?
            .ok_or(BalanceError::UserNotFound(change.user_id))?;

        return Err(balance::BalanceError::InsufficientFunds {
            balance: user.balance,
            requested: change.amount,
        }
        .into());
    }

    Ok(())
}

/// Writes the append-only audit row for a balance change.
async fn insert_transaction(
    txn: &DatabaseTransaction,
    change: &BalanceChange,
) -> Result<transactions::Model, DbErr> {
    let row = transactions::ActiveModel {
        user_id: Set(change.user_id),
        amount: Set(change.amount),
        kind: Set(change.kind.into()),
        description: Set(change.description.clone()),
        created_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    };

    row.insert(txn).await
}

/// Credits points: atomic increment on the user row plus an award row.
async fn add_points(
    txn: &DatabaseTransaction,
    user_id: i32,
    amount: i64,
    reason: &str,
) -> Result<(), DbErr> {
    users::Entity::update_many()
        .col_expr(
            users::Column::Points,
            Expr::col(users::Column::Points).add(amount),
        )
        .filter(users::Column::Id.eq(user_id))
        .exec(txn)
        .await?;

    let row = point_awards::ActiveModel {
        user_id: Set(user_id),
        amount: Set(amount),
        reason: Set(reason.to_string()),
        created_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    };
    row.insert(txn).await?;

    Ok(())
}

/// Reads the current point total inside the transaction.
async fn fetch_points(txn: &DatabaseTransaction, user_id: i32) -> Result<i64, DbErr> {
    let user = users::Entity::find_by_id(user_id)
        .one(txn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("user {user_id}")))?;

    Ok(user.points)
}

/// Inserts an unlock row unless one already exists.
///
/// The `(user_id, achievement_type)` unique constraint backs the
/// at-most-once guarantee; `ON CONFLICT DO NOTHING` turns a lost race into
/// a no-op. Returns the row only when this call created it.
async fn unlock_achievement(
    txn: &DatabaseTransaction,
    user_id: i32,
    rule: &achievements::AchievementRule,
) -> Result<Option<achievement_rows::Model>, DbErr> {
    let already = achievement_rows::Entity::find()
        .filter(achievement_rows::Column::UserId.eq(user_id))
        .filter(achievement_rows::Column::AchievementType.eq(rule.key))
        .count(txn)
        .await?;

    if already > 0 {
        return Ok(None);
    }

    let row = achievement_rows::ActiveModel {
        user_id: Set(user_id),
        achievement_type: Set(rule.key.to_string()),
        name: Set(rule.name.to_string()),
        description: Set(rule.description.to_string()),
        unlocked_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    };

    let result = achievement_rows::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([
                achievement_rows::Column::UserId,
                achievement_rows::Column::AchievementType,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

    if result == 0 {
        return Ok(None);
    }

    achievement_rows::Entity::find()
        .filter(achievement_rows::Column::UserId.eq(user_id))
        .filter(achievement_rows::Column::AchievementType.eq(rule.key))
        .one(txn)
        .await
}
