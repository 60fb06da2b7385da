//! Points ledger: pure arithmetic over a user's stored balance plus the
//! policy constants for social actions, challenges and rewards.
//!
//! The persisted counterpart lives in `PointsRepository::apply_delta`, which
//! performs the same arithmetic in a single atomic SQL statement so
//! concurrent deltas against one user are never lost.

use serde::Serialize;

/// Awarded for creating a post.
pub const POST_CREATED: i64 = 10;
/// Deducted for deleting a post (mirrored negation of the creation reward).
pub const POST_DELETED: i64 = -10;
/// Awarded for adding a comment.
pub const COMMENT_ADDED: i64 = 5;
/// Deducted for deleting a comment.
pub const COMMENT_DELETED: i64 = -5;
/// Awarded to a post's author when the post receives a like.
pub const LIKE_RECEIVED: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBalance {
    pub current: i64,
    pub lifetime_earned: i64,
}

/// Apply a signed delta to a balance.
///
/// `current` is floored at zero on negative deltas; the excess loss is
/// absorbed, not carried as debt. `lifetime_earned` grows only on positive
/// deltas and never decreases.
pub fn apply_delta(balance: PointsBalance, delta: i64) -> PointsBalance {
    PointsBalance {
        current: (balance.current + delta).max(0),
        lifetime_earned: if delta > 0 {
            balance.lifetime_earned + delta
        } else {
            balance.lifetime_earned
        },
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Challenge {
    pub id: &'static str,
    pub name: &'static str,
    pub points: i64,
}

/// Fixed challenge catalog. Completion awards `points` once per user.
pub const CHALLENGES: &[Challenge] = &[
    Challenge {
        id: "first-workout",
        name: "Log your first workout",
        points: 100,
    },
    Challenge {
        id: "week-streak",
        name: "Train every planned day for a week",
        points: 150,
    },
    Challenge {
        id: "nutrition-week",
        name: "Log every meal for 7 days",
        points: 200,
    },
    Challenge {
        id: "community-star",
        name: "Get 10 likes on a single post",
        points: 300,
    },
    Challenge {
        id: "month-streak",
        name: "Complete 4 consecutive training weeks",
        points: 500,
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Reward {
    pub id: &'static str,
    pub name: &'static str,
    pub points: i64,
}

/// Fixed reward catalog. Redemption costs `points` and is rejected when the
/// balance is insufficient.
pub const REWARDS: &[Reward] = &[
    Reward {
        id: "gym-towel",
        name: "Branded gym towel",
        points: 300,
    },
    Reward {
        id: "shaker-bottle",
        name: "Shaker bottle",
        points: 500,
    },
    Reward {
        id: "t-shirt",
        name: "Training t-shirt",
        points: 800,
    },
    Reward {
        id: "premium-month",
        name: "One month of premium",
        points: 1200,
    },
];

pub fn find_challenge(id: &str) -> Option<&'static Challenge> {
    CHALLENGES.iter().find(|c| c.id == id)
}

pub fn find_reward(id: &str) -> Option<&'static Reward> {
    REWARDS.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_delta_raises_both_counters() {
        let balance = PointsBalance {
            current: 5,
            lifetime_earned: 100,
        };
        let updated = apply_delta(balance, 10);
        assert_eq!(updated.current, 15);
        assert_eq!(updated.lifetime_earned, 110);
    }

    #[test]
    fn test_negative_delta_floors_at_zero() {
        let balance = PointsBalance {
            current: 5,
            lifetime_earned: 100,
        };
        let updated = apply_delta(balance, -10);
        assert_eq!(updated.current, 0);
        assert_eq!(updated.lifetime_earned, 100);
    }

    #[test]
    fn test_zero_delta_is_a_no_op() {
        let balance = PointsBalance {
            current: 42,
            lifetime_earned: 42,
        };
        assert_eq!(apply_delta(balance, 0), balance);
    }

    #[test]
    fn test_delete_mirrors_creation_reward() {
        assert_eq!(POST_CREATED, -POST_DELETED);
        assert_eq!(COMMENT_ADDED, -COMMENT_DELETED);
    }

    #[test]
    fn test_sequential_deltas_sum() {
        let mut balance = PointsBalance {
            current: 0,
            lifetime_earned: 0,
        };
        for delta in [10, 5, -3] {
            balance = apply_delta(balance, delta);
        }
        assert_eq!(balance.current, 12);
        assert_eq!(balance.lifetime_earned, 15);
    }

    #[test]
    fn test_catalogs_resolve_by_id() {
        assert_eq!(find_challenge("week-streak").unwrap().points, 150);
        assert_eq!(find_reward("t-shirt").unwrap().points, 800);
        assert!(find_challenge("nope").is_none());
        assert!(find_reward("nope").is_none());
    }
}
