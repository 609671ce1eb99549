//! Derived human-readable text: the property summary line, the base-zoning
//! interpretation, the bottom-line assessment, and next steps.

use crate::analysis::catalog::Feasibility;
use crate::analysis::facts::PropertyFacts;
use crate::analysis::scenario::Scenario;

pub(super) fn property_summary(facts: &PropertyFacts) -> String {
    let year_text = facts
        .year_built
        .map(|year| format!(" ({year})"))
        .unwrap_or_default();
    format!(
        "APN {} | {} | {:.0} sq ft lot | {} zoning | {} existing units{}",
        facts.apn,
        facts.address,
        facts.lot_area_sqft,
        facts.complete_zone(),
        facts.existing_units,
        year_text
    )
}

pub(super) fn interpretation(facts: &PropertyFacts) -> String {
    let mut text = format!(
        "{} allows ~1 unit per {:.0} sq ft of lot area.",
        facts.zone, facts.density_factor_sqft
    );
    text.push_str(&format!(
        " Height District {} allows up to {:.0} ft height and {}:1 FAR.",
        facts.height_district, facts.height_limit_ft, facts.far_limit
    ));
    text
}

/// Top-ranked scenario with workable feasibility, used for the bottom line
/// and next steps. Scenarios arrive already ranked.
fn best_feasible(ranked: &[Scenario]) -> Option<&Scenario> {
    ranked
        .iter()
        .find(|scenario| scenario.feasibility != Feasibility::Low)
}

pub(super) fn bottom_line(facts: &PropertyFacts, ranked: &[Scenario]) -> String {
    let baseline = facts.baseline_units();
    let baseline_note = if (facts.existing_units as f64) > baseline {
        format!(
            "Site is already above base {} density ({} existing vs. {:.1} allowed by-right).",
            facts.zone, facts.existing_units, baseline
        )
    } else {
        format!(
            "Site is under-built relative to base {} density ({} existing vs. {:.1} allowed).",
            facts.zone, facts.existing_units, baseline
        )
    };

    let rso_note = if facts.is_rent_stabilized() {
        format!(
            "RSO replacement means any redevelopment must replace the {} existing rent-stabilized units first.",
            facts.existing_units
        )
    } else {
        "No RSO replacement requirements.".to_string()
    };

    let unlock_note = match best_feasible(ranked) {
        Some(best) => format!(
            "The real unlock is {} (up to {:.1} units, {:+.1} net new).",
            best.name, best.total_units, best.net_new_units
        ),
        None => "Limited development potential under current zoning.".to_string(),
    };

    format!("{baseline_note} {rso_note} {unlock_note}")
}

pub(super) fn next_steps(facts: &PropertyFacts, ranked: &[Scenario]) -> Vec<String> {
    let mut steps = Vec::new();

    if let Some(best) = best_feasible(ranked) {
        steps.push(format!("Pursue {} for optimal unit yield", best.name));
        if let Some(affordability) = &best.affordability_required {
            steps.push(format!("Confirm {affordability} affordability strategy"));
        }
    }
    if facts.hazards.count() > 0 {
        steps.push("Conduct environmental due diligence for hazard mitigation".to_string());
    }
    if facts.is_rent_stabilized() {
        steps.push("Develop RSO tenant relocation and replacement unit plan".to_string());
    }
    if facts.transit_distance_ft.is_none() {
        steps.push("Verify transit proximity for TOC tier and AB-2097 eligibility".to_string());
    }
    steps.push("Engage a planning consultant for entitlement strategy".to_string());
    steps
}
