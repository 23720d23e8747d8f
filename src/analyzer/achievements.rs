use crate::analyzer::catalog::{catalog, filter_by_categories};
use crate::analyzer::categorizer::CategoryTag;
use crate::workout::WorkoutRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    pub name: &'static str,
    pub weight: f64,
    pub category: CategoryTag,
    pub earned: bool,
    /// Fraction of the item's weight covered by the total, capped at 1.0.
    pub progress: f64,
}

/// Sum of every workout total; invalid totals count as zero.
pub fn lifetime_total(history: &[WorkoutRecord]) -> f64 {
    history
        .iter()
        .map(|record| record.total_weight)
        .filter(|weight| weight.is_finite() && *weight > 0.0)
        .sum()
}

pub fn achievements(total_weight: f64, allowed: &[CategoryTag]) -> Vec<Achievement> {
    let total = if total_weight.is_finite() {
        total_weight.max(0.0)
    } else {
        0.0
    };

    let mut items = filter_by_categories(catalog(), allowed)
        .into_iter()
        .map(|item| Achievement {
            name: item.name,
            weight: item.weight,
            category: item.resolved_category(),
            earned: total >= item.weight,
            progress: (total / item.weight).min(1.0),
        })
        .collect::<Vec<_>>();

    items.sort_by(|left, right| left.weight.total_cmp(&right.weight));
    items
}

#[cfg(test)]
mod tests {
    use super::{achievements, lifetime_total};
    use crate::analyzer::catalog::catalog;
    use crate::analyzer::categorizer::CategoryTag;

    #[test]
    fn earned_flag_follows_total() {
        let list = achievements(1000.0, &[]);
        assert_eq!(list.len(), catalog().len());

        let piano = list
            .iter()
            .find(|achievement| achievement.name == "grand piano")
            .expect("grand piano listed");
        assert!(piano.earned);
        assert_eq!(piano.progress, 1.0);

        let cow = list
            .iter()
            .find(|achievement| achievement.name == "dairy cow")
            .expect("dairy cow listed");
        assert!(!cow.earned);
        assert!((cow.progress - 1000.0 / 1500.0).abs() < 1e-12);
    }

    #[test]
    fn ordered_by_weight() {
        let list = achievements(0.0, &[CategoryTag::Space]);
        assert!(list.windows(2).all(|pair| pair[0].weight <= pair[1].weight));
        assert!(list.iter().all(|achievement| !achievement.earned));
        assert!(list.iter().all(|achievement| achievement.category == CategoryTag::Space));
    }

    #[test]
    fn lifetime_total_skips_invalid_weights() {
        let history = crate::workout::parse_workouts(
            r#"[
                {"performed_at": "2025-01-01T10:00:00Z", "day": "A", "total_weight": 500.0},
                {"performed_at": "2026-01-01T10:00:00Z", "day": "B", "total_weight": -20.0},
                {"performed_at": "2026-02-01T10:00:00Z", "day": "C", "total_weight": 250.5}
            ]"#,
        )
        .expect("history");

        assert_eq!(lifetime_total(&history), 750.5);
        assert_eq!(lifetime_total(&[]), 0.0);
    }

    #[test]
    fn invalid_totals_earn_nothing() {
        assert!(achievements(f64::NAN, &[]).iter().all(|achievement| !achievement.earned));
        assert!(achievements(-5.0, &[]).iter().all(|achievement| achievement.progress == 0.0));
    }
}
