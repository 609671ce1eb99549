//! Bundle assembly: turns ranked scenarios and the audit table into the
//! serialized report contract for the presentation layer.

mod summary;
mod views;

pub use views::{AnalysisReport, BaseZoningView, ScenarioView};

use super::audit::AuditRow;
use super::facts::PropertyFacts;
use super::ranking::RankedSet;
use super::scenario::Scenario;
use crate::config::RoundingPolicy;

pub(super) fn assemble(
    facts: &PropertyFacts,
    ranked: RankedSet,
    rules_audit: Vec<AuditRow>,
    rounding: RoundingPolicy,
) -> AnalysisReport {
    let bottom_line = summary::bottom_line(facts, &ranked.scenarios);
    let next_steps = summary::next_steps(facts, &ranked.scenarios);

    AnalysisReport {
        property_summary: summary::property_summary(facts),
        base_zoning: BaseZoningView {
            zone: facts.zone.clone(),
            height_district: facts.height_district.clone(),
            complete_zone: facts.complete_zone(),
            density_factor_sqft: facts.density_factor_sqft,
            baseline_units: facts.baseline_units(),
            height_limit_ft: facts.height_limit_ft,
            far_limit: facts.far_limit,
            interpretation: summary::interpretation(facts),
        },
        development_scenarios: ranked
            .scenarios
            .into_iter()
            .map(|scenario| scenario_view(scenario, rounding))
            .collect(),
        rules_audit,
        recommendations: ranked.recommendations,
        bottom_line,
        next_steps,
    }
}

fn scenario_view(scenario: Scenario, rounding: RoundingPolicy) -> ScenarioView {
    ScenarioView {
        name: scenario.name,
        description: scenario.description,
        total_units: rounding.apply(scenario.total_units),
        net_new_units: rounding.apply(scenario.net_new_units),
        height_ft: scenario.height_ft,
        far: scenario.far,
        parking_spaces: scenario.parking_spaces,
        affordability_required: scenario
            .affordability_required
            .unwrap_or_else(|| "None".to_string()),
        approval_path: scenario.approval_path.label(),
        recommendation_score: scenario.recommendation_score.unwrap_or(0.0),
        recommendation_reason: scenario.recommendation_reason,
        gpr: scenario.gpr,
        noi: scenario.noi,
        property_value: scenario.property_value,
        financial_note: scenario.financial_note,
        unit_calculation_justification: scenario.unit_calculation_justification,
        legal_citations: scenario.legal_citations,
        key_benefits: scenario.key_benefits,
        constraints: scenario.constraints,
        feasibility: scenario.feasibility.label(),
        feasibility_reason: scenario.feasibility_reason,
    }
}
