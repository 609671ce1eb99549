//! Scenario scoring, ordering, and the Good/Better/Best recommendation set.
//!
//! Ranking is a stable, deterministic total order: score descending, then
//! ministerial before discretionary, then scenario name. Group diversity is
//! enforced only when building the recommendation subset; the full ranked
//! list keeps every scenario.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::catalog::ApprovalPath;
use super::scenario::Scenario;

const WEIGHT_UNIT_YIELD: f64 = 0.40;
const WEIGHT_REVENUE: f64 = 0.35;
const WEIGHT_FEASIBILITY: f64 = 0.25;

/// Named recommendation slots. Slots stay empty when fewer than three
/// distinct mutually-exclusive groups produced scenarios; the subset is never
/// padded with duplicate-group entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub best: Option<String>,
    pub better: Option<String>,
    pub good: Option<String>,
}

/// Fully ordered scenarios plus the diverse recommendation subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSet {
    pub scenarios: Vec<Scenario>,
    pub recommendations: Recommendations,
}

pub fn rank(mut scenarios: Vec<Scenario>) -> RankedSet {
    let max_units = scenarios
        .iter()
        .map(|scenario| scenario.total_units)
        .fold(0.0_f64, f64::max);
    let max_value = scenarios
        .iter()
        .filter_map(|scenario| scenario.property_value)
        .fold(0.0_f64, f64::max);

    for scenario in &mut scenarios {
        let unit_norm = if max_units > 0.0 {
            scenario.total_units / max_units
        } else {
            0.0
        };
        let value_norm = match scenario.property_value {
            Some(value) if max_value > 0.0 => value / max_value,
            _ => 0.0,
        };
        let feasibility = scenario.feasibility.multiplier();

        let score = WEIGHT_UNIT_YIELD * unit_norm
            + WEIGHT_REVENUE * value_norm
            + WEIGHT_FEASIBILITY * feasibility;
        scenario.recommendation_score = Some(score);
        scenario.recommendation_reason = reason(scenario, unit_norm);
    }

    scenarios.sort_by(compare);

    let recommendations = pick_recommendations(&scenarios);
    RankedSet {
        scenarios,
        recommendations,
    }
}

fn reason(scenario: &Scenario, unit_norm: f64) -> String {
    let mut phrases = Vec::new();
    if unit_norm >= 0.99 {
        phrases.push("highest unit yield".to_string());
    } else if unit_norm >= 0.66 {
        phrases.push("strong unit yield".to_string());
    } else {
        phrases.push("modest unit yield".to_string());
    }
    if scenario.approval_path == ApprovalPath::Ministerial {
        phrases.push("ministerial approval".to_string());
    }
    phrases.push(format!("{} feasibility", scenario.feasibility.label()));
    format!("Recommended for {}", phrases.join(", "))
}

fn compare(a: &Scenario, b: &Scenario) -> Ordering {
    let score_a = a.recommendation_score.unwrap_or(0.0);
    let score_b = b.recommendation_score.unwrap_or(0.0);
    score_b
        .total_cmp(&score_a)
        .then_with(|| a.approval_path.cmp(&b.approval_path))
        .then_with(|| a.name.cmp(&b.name))
}

fn pick_recommendations(ranked: &[Scenario]) -> Recommendations {
    let mut seen_groups: BTreeSet<String> = BTreeSet::new();
    let mut picks: Vec<&Scenario> = Vec::new();

    for scenario in ranked {
        // Ungrouped rules count as their own group.
        let group = scenario
            .exclusive_group
            .clone()
            .unwrap_or_else(|| scenario.rule_id.clone());
        if seen_groups.insert(group) {
            picks.push(scenario);
            if picks.len() == 3 {
                break;
            }
        }
    }

    let mut names = picks.iter().map(|scenario| scenario.name.clone());
    Recommendations {
        best: names.next(),
        better: names.next(),
        good: names.next(),
    }
}
