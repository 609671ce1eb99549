//! Scenario synthesis: one development scenario per eligible rule.
//!
//! Rules are never stacked within a scenario; each scenario reflects exactly
//! one rule's declared effect applied to the by-right baseline, plus the
//! rent-stabilization replacement floor applied uniformly across all of them.

use serde::{Deserialize, Serialize};

use super::catalog::{
    ApprovalPath, EffectDelta, Feasibility, ParkingRelief, RuleOutcome, RuleStatus, UnitYield,
};
use super::facts::PropertyFacts;
use super::tables;

/// A legally distinct development option for the parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub rule_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_group: Option<String>,
    pub description: String,
    /// Fractional unit capacity; rounding happens only at presentation.
    pub total_units: f64,
    pub net_new_units: f64,
    pub height_ft: f64,
    pub far: f64,
    pub parking_spaces: f64,
    pub approval_path: ApprovalPath,
    pub affordability_required: Option<String>,
    pub gpr: Option<f64>,
    pub noi: Option<f64>,
    pub property_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_note: Option<String>,
    pub legal_citations: Vec<String>,
    pub key_benefits: Vec<String>,
    pub constraints: Vec<String>,
    pub feasibility: Feasibility,
    pub feasibility_reason: String,
    pub recommendation_score: Option<f64>,
    pub recommendation_reason: String,
    pub unit_calculation_justification: String,
}

/// Builds one scenario per `Eligible` outcome. Non-eligible outcomes produce
/// nothing here but stay in the audit table.
pub fn generate(facts: &PropertyFacts, outcomes: &[RuleOutcome]) -> Vec<Scenario> {
    outcomes
        .iter()
        .filter(|outcome| outcome.status == RuleStatus::Eligible)
        .map(|outcome| build_scenario(facts, outcome))
        .collect()
}

fn build_scenario(facts: &PropertyFacts, outcome: &RuleOutcome) -> Scenario {
    let rule = outcome.rule;
    let delta = rule.effect(facts);
    let baseline = facts.baseline_units();
    let computed = apply_unit_yield(facts, baseline, delta.units);

    // Replacement floor: rent-stabilized units must be replaced 1:1, so the
    // existing count is a floor on every scenario, never a ceiling.
    let rso = facts.is_rent_stabilized();
    let total_units = if rso {
        computed.max(facts.existing_units as f64)
    } else {
        computed
    };
    let floor_applied = rso && total_units > computed;

    let mut legal_citations = rule.citations(facts);
    if rso {
        legal_citations.push("SB 330 Housing Crisis Act: RSO replacement requirements".to_string());
    }

    let mut constraints: Vec<String> = rule.constraints.iter().map(|c| c.to_string()).collect();
    if rso {
        constraints.push(format!(
            "RSO replacement: must replace {} existing rent-stabilized units 1:1",
            facts.existing_units
        ));
    }

    let (feasibility, feasibility_reason) = assess_feasibility(facts, rule.base_feasibility, baseline);

    Scenario {
        name: scenario_name(facts, rule.id, rule.name),
        rule_id: rule.id.to_string(),
        exclusive_group: rule.exclusive_group.map(str::to_string),
        description: rule.description(facts),
        total_units,
        net_new_units: total_units - facts.existing_units as f64,
        height_ft: facts.height_limit_ft + delta.height_bonus_ft,
        far: facts.far_limit * delta.far_multiplier,
        parking_spaces: parking_spaces(facts, total_units, &delta),
        approval_path: delta.approval,
        affordability_required: delta.affordability.clone(),
        gpr: None,
        noi: None,
        property_value: None,
        financial_note: None,
        legal_citations,
        key_benefits: rule.benefits.iter().map(|b| b.to_string()).collect(),
        constraints,
        feasibility,
        feasibility_reason,
        recommendation_score: None,
        recommendation_reason: String::new(),
        unit_calculation_justification: justification(
            facts,
            baseline,
            computed,
            total_units,
            floor_applied,
            delta.units,
        ),
    }
}

fn scenario_name(facts: &PropertyFacts, rule_id: &str, rule_name: &str) -> String {
    // TOC scenarios carry their tier so two parcels in different tiers read
    // differently in the output.
    if rule_id == "toc" {
        if let Some(tier) = super::catalog::toc_tier(facts) {
            return format!("TOC Tier {tier}");
        }
    }
    rule_name.to_string()
}

fn apply_unit_yield(facts: &PropertyFacts, baseline: f64, yield_: UnitYield) -> f64 {
    match yield_ {
        UnitYield::Baseline => baseline,
        UnitYield::BonusPct(pct) => baseline * (1.0 + pct / 100.0),
        UnitYield::Fixed(units) => units,
        UnitYield::SmallSiteCap { cap, floor } => cap.min(baseline.max(floor)),
        UnitYield::PerLotArea { sqft_per_unit } => facts.lot_area_sqft / sqft_per_unit,
    }
}

fn parking_spaces(facts: &PropertyFacts, total_units: f64, delta: &EffectDelta) -> f64 {
    match delta.parking {
        ParkingRelief::ZoneStandard => total_units * tables::parking_per_unit(&facts.zone),
        ParkingRelief::RatioPerUnit(ratio) => total_units * ratio,
        ParkingRelief::Eliminated => 0.0,
    }
}

fn assess_feasibility(
    facts: &PropertyFacts,
    base: Feasibility,
    baseline_units: f64,
) -> (Feasibility, String) {
    if base == Feasibility::Low {
        return (base, "significant regulatory barriers".to_string());
    }
    if facts.is_rent_stabilized() && (facts.existing_units as f64) > baseline_units {
        return (
            Feasibility::Medium,
            "existing building exceeds base zoning density; RSO replacement adds complexity"
                .to_string(),
        );
    }
    if facts.hazards.count() > 2 {
        return (
            Feasibility::Medium,
            "multiple environmental hazards require engineering mitigation".to_string(),
        );
    }
    match base {
        Feasibility::High => (base, "clear regulatory pathway".to_string()),
        Feasibility::Medium => (base, "added process complexity but manageable".to_string()),
        Feasibility::Low => unreachable!("handled above"),
    }
}

fn justification(
    facts: &PropertyFacts,
    baseline: f64,
    computed: f64,
    total: f64,
    floor_applied: bool,
    yield_: UnitYield,
) -> String {
    let mut steps = vec![format!(
        "STEP 1: baseline density = {:.2} sq ft lot / {:.0} sq ft per unit ({}) = {:.4} units",
        facts.lot_area_sqft, facts.density_factor_sqft, facts.zone, baseline
    )];

    let effect_step = match yield_ {
        UnitYield::Baseline => format!("STEP 2: by-right development = {baseline:.4} units"),
        UnitYield::BonusPct(pct) => format!(
            "STEP 2: {:.4} baseline units x {:.2} ({:.0}% density bonus) = {:.4} units",
            baseline,
            1.0 + pct / 100.0,
            pct,
            computed
        ),
        UnitYield::Fixed(units) => {
            format!("STEP 2: statutory allowance fixes the count at {units:.0} units")
        }
        UnitYield::SmallSiteCap { cap, floor } => format!(
            "STEP 2: min({cap:.0} cap, max({baseline:.4} zoning, {floor:.0} minimum)) = {computed:.4} units"
        ),
        UnitYield::PerLotArea { sqft_per_unit } => format!(
            "STEP 2: {:.2} sq ft lot / {:.0} sq ft per unit (statutory density) = {:.4} units",
            facts.lot_area_sqft, sqft_per_unit, computed
        ),
    };
    steps.push(effect_step);

    if floor_applied {
        steps.push(format!(
            "STEP 3: replacement floor = max({:.4} computed, {} existing RSO units) = {:.4} units",
            computed, facts.existing_units, total
        ));
    }

    steps.push(format!("FINAL: {total:.4} units total"));
    steps.join("\n")
}
