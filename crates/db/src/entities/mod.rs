//! `SeaORM` entity definitions.

pub mod achievements;
pub mod point_awards;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod users;
