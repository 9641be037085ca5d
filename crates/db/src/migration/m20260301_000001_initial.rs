//! Initial database migration.
//!
//! Creates the users, transactions, point_awards, and achievements tables
//! plus the transaction_kind enum and the updated_at trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(POINT_AWARDS_SQL).await?;
        db.execute_unprepared(ACHIEVEMENTS_SQL).await?;
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Balance change direction
CREATE TYPE transaction_kind AS ENUM ('deposit', 'withdrawal');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id SERIAL PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    full_name TEXT NOT NULL,
    balance BIGINT NOT NULL DEFAULT 0 CHECK (balance >= 0),
    points BIGINT NOT NULL DEFAULT 0 CHECK (points >= 0),
    is_cashier BOOLEAN NOT NULL DEFAULT false,
    qr_code_id TEXT NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_email ON users (email);
CREATE INDEX idx_users_qr_code_id ON users (qr_code_id);
";

const TRANSACTIONS_SQL: &str = r"
-- Append-only audit record of balance mutations
CREATE TABLE transactions (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users (id),
    amount BIGINT NOT NULL CHECK (amount > 0),
    kind transaction_kind NOT NULL,
    description TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_transactions_user_id ON transactions (user_id, created_at DESC);
";

const POINT_AWARDS_SQL: &str = r"
-- Append-only; sum(amount) per user reconciles with users.points
CREATE TABLE point_awards (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users (id),
    amount BIGINT NOT NULL CHECK (amount > 0),
    reason TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_point_awards_user_id ON point_awards (user_id, created_at DESC);
";

const ACHIEVEMENTS_SQL: &str = r"
-- At most one unlock per (user, achievement type)
CREATE TABLE achievements (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users (id),
    achievement_type TEXT NOT NULL,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    unlocked_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (user_id, achievement_type)
);

CREATE INDEX idx_achievements_user_id ON achievements (user_id, unlocked_at DESC);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER users_set_updated_at
    BEFORE UPDATE ON users
    FOR EACH ROW
    EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS achievements;
DROP TABLE IF EXISTS point_awards;
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS users;
DROP TYPE IF EXISTS transaction_kind;
DROP FUNCTION IF EXISTS set_updated_at;
";
