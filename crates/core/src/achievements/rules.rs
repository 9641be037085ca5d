//! The achievement rule table and its pure, fixed-order evaluation.
//!
//! Rules are evaluated after every deposit, against the state that already
//! includes the points awarded for that deposit. Evaluation is pure; the
//! persistence layer enforces at-most-once unlocking. Bonus points granted
//! for an unlock never re-trigger evaluation.

/// Minimum single-deposit amount (minor units) for the big-spender badge.
pub const BIG_SPENDER_MIN_DEPOSIT: i64 = 1000;

/// Points threshold for the collector badge.
pub const POINTS_COLLECTOR_THRESHOLD: i64 = 100;

/// Points threshold for the pro badge.
pub const POINTS_PRO_THRESHOLD: i64 = 500;

/// State a deposit rule is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct DepositContext {
    /// Amount of the deposit that triggered evaluation, in minor units.
    pub deposit_amount: i64,
    /// Number of deposits the user had made before this one.
    pub prior_deposit_count: u64,
    /// Points balance after the deposit's own point award.
    pub points_after_award: i64,
}

/// One entry in the static achievement table.
pub struct AchievementRule {
    /// Stable key persisted with each unlock.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Display description.
    pub description: &'static str,
    /// Predicate over the post-deposit state. `None` for catalog-only
    /// rules that are displayed but never evaluated by the engine.
    pub predicate: Option<fn(&DepositContext) -> bool>,
}

impl std::fmt::Debug for AchievementRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AchievementRule")
            .field("key", &self.key)
            .field("evaluated", &self.predicate.is_some())
            .finish()
    }
}

fn is_first_deposit(ctx: &DepositContext) -> bool {
    ctx.prior_deposit_count == 0
}

fn is_big_spender(ctx: &DepositContext) -> bool {
    ctx.deposit_amount >= BIG_SPENDER_MIN_DEPOSIT
}

fn reached_points_100(ctx: &DepositContext) -> bool {
    ctx.points_after_award >= POINTS_COLLECTOR_THRESHOLD
}

fn reached_points_500(ctx: &DepositContext) -> bool {
    ctx.points_after_award >= POINTS_PRO_THRESHOLD
}

/// The full achievement table, in evaluation order.
///
/// `regular_user` has no predicate: the 5-day streak badge exists for
/// display but is not tracked by the engine.
pub static CATALOG: [AchievementRule; 5] = [
    AchievementRule {
        key: "first_deposit",
        name: "Erster Einzahler",
        description: "Tätige deine erste Einzahlung",
        predicate: Some(is_first_deposit),
    },
    AchievementRule {
        key: "big_spender",
        name: "Großzahler",
        description: "Tätige eine Einzahlung von mindestens 10€",
        predicate: Some(is_big_spender),
    },
    AchievementRule {
        key: "points_100",
        name: "Punktesammler",
        description: "Sammle 100 Punkte",
        predicate: Some(reached_points_100),
    },
    AchievementRule {
        key: "points_500",
        name: "Punkteprofi",
        description: "Sammle 500 Punkte",
        predicate: Some(reached_points_500),
    },
    AchievementRule {
        key: "regular_user",
        name: "Stammkunde",
        description: "Nutze die App 5 Tage in Folge",
        predicate: None,
    },
];

/// Returns the rules satisfied by this deposit, in declaration order.
///
/// The caller is responsible for skipping rules the user has already
/// unlocked.
#[must_use]
pub fn evaluate(ctx: &DepositContext) -> Vec<&'static AchievementRule> {
    CATALOG
        .iter()
        .filter(|rule| rule.predicate.is_some_and(|p| p(ctx)))
        .collect()
}

/// Looks up a rule by its key.
#[must_use]
pub fn find_rule(key: &str) -> Option<&'static AchievementRule> {
    CATALOG.iter().find(|rule| rule.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(deposit_amount: i64, prior_deposit_count: u64, points_after_award: i64) -> DepositContext {
        DepositContext {
            deposit_amount,
            prior_deposit_count,
            points_after_award,
        }
    }

    fn keys(rules: &[&'static AchievementRule]) -> Vec<&'static str> {
        rules.iter().map(|r| r.key).collect()
    }

    #[test]
    fn test_first_deposit_only_on_first() {
        assert_eq!(keys(&evaluate(&ctx(100, 0, 0))), vec!["first_deposit"]);
        assert!(keys(&evaluate(&ctx(100, 1, 0))).is_empty());
    }

    #[test]
    fn test_big_spender_threshold() {
        assert!(keys(&evaluate(&ctx(999, 3, 0))).is_empty());
        assert_eq!(keys(&evaluate(&ctx(1000, 3, 0))), vec!["big_spender"]);
    }

    #[test]
    fn test_points_thresholds() {
        assert!(keys(&evaluate(&ctx(100, 3, 99))).is_empty());
        assert_eq!(keys(&evaluate(&ctx(100, 3, 100))), vec!["points_100"]);
        assert_eq!(
            keys(&evaluate(&ctx(100, 3, 500))),
            vec!["points_100", "points_500"]
        );
    }

    #[test]
    fn test_evaluation_order_is_fixed() {
        // A deposit crossing first-deposit, big-spender, and points-100
        // at once yields all three, in declaration order.
        let satisfied = evaluate(&ctx(1000, 0, 100));
        assert_eq!(
            keys(&satisfied),
            vec!["first_deposit", "big_spender", "points_100"]
        );
    }

    #[test]
    fn test_streak_rule_is_never_evaluated() {
        // Even an arbitrarily large deposit never satisfies regular_user.
        let satisfied = evaluate(&ctx(1_000_000, 0, 1_000_000));
        assert!(!keys(&satisfied).contains(&"regular_user"));
    }

    #[test]
    fn test_catalog_contains_streak_rule_for_display() {
        let rule = find_rule("regular_user").unwrap();
        assert_eq!(rule.name, "Stammkunde");
        assert!(rule.predicate.is_none());
    }

    #[test]
    fn test_find_rule() {
        assert_eq!(find_rule("big_spender").unwrap().name, "Großzahler");
        assert!(find_rule("unknown").is_none());
    }
}
