//! Static achievement rule set and its evaluation.

mod rules;

pub use rules::{
    AchievementRule, DepositContext, BIG_SPENDER_MIN_DEPOSIT, CATALOG, POINTS_COLLECTOR_THRESHOLD,
    POINTS_PRO_THRESHOLD, evaluate, find_rule,
};
