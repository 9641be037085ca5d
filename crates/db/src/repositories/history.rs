//! Read-side repository for per-user history listings.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::{achievements, point_awards, transactions};

/// Repository for transaction, point award, and achievement listings.
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    db: DatabaseConnection,
}

impl HistoryRepository {
    /// Creates a new history repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a user's balance mutations, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn transactions(&self, user_id: i32) -> Result<Vec<transactions::Model>, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Lists a user's point awards, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn point_awards(&self, user_id: i32) -> Result<Vec<point_awards::Model>, DbErr> {
        point_awards::Entity::find()
            .filter(point_awards::Column::UserId.eq(user_id))
            .order_by_desc(point_awards::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Lists a user's unlocked achievements, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn achievements(&self, user_id: i32) -> Result<Vec<achievements::Model>, DbErr> {
        achievements::Entity::find()
            .filter(achievements::Column::UserId.eq(user_id))
            .order_by_desc(achievements::Column::UnlockedAt)
            .all(&self.db)
            .await
    }
}
