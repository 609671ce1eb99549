//! The exhaustive rule-by-rule audit table.
//!
//! One row per registered rule, whatever its eligibility outcome, each with a
//! plain-language "what it enables" tag set derived mechanically from the
//! rule's declared effect. The table never looks at generated scenarios, so
//! it stays correct for rules that produced none.

use serde::{Deserialize, Serialize};

use super::catalog::{
    ApprovalPath, EffectDelta, ParkingRelief, RuleCategory, RuleOutcome, RuleStatus, UnitYield,
};
use super::facts::PropertyFacts;

/// Plain-language capability tags shown to the decision-maker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Enablement {
    FasterApproval,
    MoreUnits,
    MoreHeightFar,
    LessParking,
}

impl Enablement {
    pub const fn label(self) -> &'static str {
        match self {
            Enablement::FasterApproval => "faster approval",
            Enablement::MoreUnits => "more units",
            Enablement::MoreHeightFar => "more height/FAR",
            Enablement::LessParking => "less parking",
        }
    }
}

/// One audit table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRow {
    pub rule: String,
    pub citation: String,
    pub category: RuleCategory,
    pub status: RuleStatus,
    pub reason: String,
    pub effect: String,
    pub what_it_enables: Vec<Enablement>,
}

/// Assembles the audit table in outcome (= registration) order.
pub fn report(outcomes: &[RuleOutcome], facts: &PropertyFacts) -> Vec<AuditRow> {
    outcomes
        .iter()
        .map(|outcome| {
            let delta = outcome.rule.effect(facts);
            AuditRow {
                rule: outcome.rule.name.to_string(),
                citation: outcome.rule.citation.to_string(),
                category: outcome.rule.category,
                status: outcome.status,
                reason: outcome.reason.clone(),
                effect: outcome.rule.summary.to_string(),
                what_it_enables: enablement_tags(&delta),
            }
        })
        .collect()
}

fn enablement_tags(delta: &EffectDelta) -> Vec<Enablement> {
    let mut tags = Vec::new();
    if delta.approval == ApprovalPath::Ministerial {
        tags.push(Enablement::FasterApproval);
    }
    if delta.units != UnitYield::Baseline {
        tags.push(Enablement::MoreUnits);
    }
    if delta.height_bonus_ft > 0.0 || delta.far_multiplier > 1.0 {
        tags.push(Enablement::MoreHeightFar);
    }
    if delta.parking != ParkingRelief::ZoneStandard {
        tags.push(Enablement::LessParking);
    }
    tags
}
