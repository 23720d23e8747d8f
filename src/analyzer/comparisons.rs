use crate::analyzer::catalog::{ReferenceItem, catalog, filter_by_categories};
use crate::analyzer::categorizer::CategoryTag;
use serde::Serialize;
use std::collections::HashSet;

pub const DEFAULT_COMPARISON_COUNT: usize = 5;
pub const MIN_MULTIPLE: u32 = 1;
pub const MAX_MULTIPLE: u32 = 50;

const HIGH_MULTIPLE_THRESHOLD: u32 = 10;
const HIGH_MULTIPLE_PENALTY: f64 = 0.1;
const EXACT_ITEM_BONUS: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredComparison {
    pub name: &'static str,
    pub plural_name: &'static str,
    pub reference_weight: f64,
    pub category: CategoryTag,
    pub multiple: u32,
    pub approximated_weight: f64,
    pub fit_ratio: f64,
    pub absolute_error: f64,
    pub score: f64,
    pub label: String,
}

/// Picks the catalog items whose whole multiples best approximate `target_weight`.
pub fn select(target_weight: f64, count: usize, allowed: &[CategoryTag]) -> Vec<ScoredComparison> {
    select_from(catalog(), target_weight, count, allowed)
}

pub fn select_from(
    items: &[ReferenceItem],
    target_weight: f64,
    count: usize,
    allowed: &[CategoryTag],
) -> Vec<ScoredComparison> {
    if !target_weight.is_finite() || target_weight <= 0.0 || count == 0 {
        return Vec::new();
    }

    let mut candidates = filter_by_categories(items, allowed)
        .into_iter()
        .filter_map(|item| score_item(item, target_weight))
        .collect::<Vec<_>>();

    // Stable sort: equal scores keep catalog order.
    candidates.sort_by(|left, right| right.score.total_cmp(&left.score));

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.name))
        .take(count)
        .collect()
}

fn score_item(item: &ReferenceItem, target_weight: f64) -> Option<ScoredComparison> {
    if !item.weight.is_finite() || item.weight <= 0.0 {
        return None;
    }

    let raw_multiple = (target_weight / item.weight).round();
    if !(f64::from(MIN_MULTIPLE)..=f64::from(MAX_MULTIPLE)).contains(&raw_multiple) {
        return None;
    }

    let multiple = raw_multiple as u32;
    let approximated_weight = f64::from(multiple) * item.weight;
    let absolute_error = (target_weight - approximated_weight).abs();
    let fit_ratio = 1.0 - absolute_error / target_weight;

    let penalty = if multiple > HIGH_MULTIPLE_THRESHOLD {
        HIGH_MULTIPLE_PENALTY
    } else {
        0.0
    };
    let bonus = if multiple == 1 { EXACT_ITEM_BONUS } else { 0.0 };

    Some(ScoredComparison {
        name: item.name,
        plural_name: item.plural_name,
        reference_weight: item.weight,
        category: item.resolved_category(),
        multiple,
        approximated_weight,
        fit_ratio,
        absolute_error,
        score: fit_ratio - penalty + bonus,
        label: format!("{} {}", multiple, item.display_name(multiple)),
    })
}
