//! End-to-end specifications for the entitlement analysis pipeline, driven
//! through the public `EntitlementEngine` facade the way an API layer would
//! call it.

use upzone::analysis::{RuleCatalog, RuleStatus};
use upzone::{
    AnalysisError, EntitlementEngine, MarketAssumptions, MarketBook, RawParcelRecord,
    RoundingPolicy,
};

fn market() -> MarketBook {
    let mut market = MarketBook::default();
    market.insert(
        "single_family",
        MarketAssumptions {
            monthly_rent: 3_800.0,
            operating_expense_ratio: 0.28,
            cap_rate: 0.045,
        },
    );
    market.insert(
        "low_rise_multifamily",
        MarketAssumptions {
            monthly_rent: 2_100.0,
            operating_expense_ratio: 0.32,
            cap_rate: 0.05,
        },
    );
    market.insert(
        "mid_rise_multifamily",
        MarketAssumptions {
            monthly_rent: 2_400.0,
            operating_expense_ratio: 0.35,
            cap_rate: 0.05,
        },
    );
    market
}

/// The Coronado Street test property: R4-2, 11,135.09 sq ft, 30 rent
/// stabilized units from 1927.
fn coronado_r4() -> RawParcelRecord {
    RawParcelRecord {
        apn: Some("5501-022-008".to_string()),
        address: Some("646 S Coronado St".to_string()),
        lot_area_sqft: Some(11_135.09),
        zone: Some("R4".to_string()),
        height_district: Some("2".to_string()),
        existing_units: Some(30),
        year_built: Some(1927),
        transit_distance_ft: Some(900.0),
        ..RawParcelRecord::default()
    }
}

fn r1_parcel() -> RawParcelRecord {
    RawParcelRecord {
        apn: Some("2201-005-017".to_string()),
        address: Some("4312 Sunnyslope Ave".to_string()),
        lot_area_sqft: Some(6_000.0),
        zone: Some("R1".to_string()),
        height_district: Some("1".to_string()),
        existing_units: Some(1),
        year_built: Some(1952),
        ..RawParcelRecord::default()
    }
}

#[test]
fn baseline_units_stay_fractional_and_exact() {
    let engine = EntitlementEngine::new(market());
    let report = engine.analyze(coronado_r4()).expect("analysis succeeds");

    assert_eq!(report.base_zoning.baseline_units, 11_135.09 / 400.0);
    assert_eq!(report.base_zoning.density_factor_sqft, 400.0);
    assert_eq!(report.base_zoning.height_limit_ft, 75.0);
    assert_eq!(report.base_zoning.complete_zone, "R4-2");
}

#[test]
fn rso_floor_holds_every_scenario_at_existing_units() {
    let engine = EntitlementEngine::new(market());
    let report = engine.analyze(coronado_r4()).expect("analysis succeeds");

    // 27.8377... baseline, floored at the 30 existing RSO units.
    for scenario in &report.development_scenarios {
        assert!(
            scenario.total_units >= 30.0,
            "{} fell below the RSO replacement floor",
            scenario.name
        );
    }
    let by_right = report
        .development_scenarios
        .iter()
        .find(|scenario| scenario.name == "By-Right")
        .expect("by-right scenario present");
    assert_eq!(by_right.total_units, 30.0);
    assert_eq!(by_right.net_new_units, 0.0);
}

#[test]
fn audit_table_has_exactly_one_row_per_registered_rule() {
    let engine = EntitlementEngine::new(market());
    let catalog_len = RuleCatalog::builtin().len();

    for raw in [coronado_r4(), r1_parcel()] {
        let report = engine.analyze(raw).expect("analysis succeeds");
        assert_eq!(report.rules_audit.len(), catalog_len);
    }
}

#[test]
fn r1_parcel_unlocks_sb9_but_not_toc() {
    let engine = EntitlementEngine::new(market());
    let report = engine.analyze(r1_parcel()).expect("analysis succeeds");

    let status_of = |rule: &str| {
        report
            .rules_audit
            .iter()
            .find(|row| row.rule == rule)
            .map(|row| row.status)
            .expect("rule audited")
    };

    assert_eq!(status_of("SB-9 Duplex"), RuleStatus::Eligible);
    assert_eq!(status_of("SB-9 Lot Split + Duplex"), RuleStatus::Eligible);
    assert_eq!(status_of("TOC Density Bonus"), RuleStatus::NotApplicable);

    assert!(report
        .development_scenarios
        .iter()
        .any(|scenario| scenario.name == "SB-9 Lot Split + Duplex" && scenario.total_units == 4.0));
}

#[test]
fn builders_remedy_explained_not_omitted_when_jurisdiction_compliant() {
    let engine = EntitlementEngine::new(market());
    let mut raw = coronado_r4();
    raw.housing_element_compliant = Some(true);
    let report = engine.analyze(raw).expect("analysis succeeds");

    let row = report
        .rules_audit
        .iter()
        .find(|row| row.rule == "SB-330 Builder's Remedy")
        .expect("rule audited");
    assert_eq!(row.status, RuleStatus::NotEligible);
    assert!(row.reason.contains("compliant"));
    assert!(!report
        .development_scenarios
        .iter()
        .any(|scenario| scenario.name == "SB-330 Builder's Remedy"));
}

#[test]
fn builders_remedy_opens_when_housing_element_lapses() {
    let engine = EntitlementEngine::new(market());
    let mut raw = coronado_r4();
    raw.housing_element_compliant = Some(false);
    let report = engine.analyze(raw).expect("analysis succeeds");

    assert!(report
        .development_scenarios
        .iter()
        .any(|scenario| scenario.name == "SB-330 Builder's Remedy"));
}

#[test]
fn recommendations_are_diverse_across_exclusive_groups() {
    let engine = EntitlementEngine::new(market());
    let report = engine.analyze(coronado_r4()).expect("analysis succeeds");

    let picks: Vec<String> = [
        &report.recommendations.best,
        &report.recommendations.better,
        &report.recommendations.good,
    ]
    .into_iter()
    .flatten()
    .cloned()
    .collect();
    assert!(!picks.is_empty());

    // Each recommended name must exist in the ranked list exactly once.
    for name in &picks {
        assert!(report
            .development_scenarios
            .iter()
            .any(|scenario| &scenario.name == name));
    }

    // TOC, State Density Bonus, and AB-1287 are alternative density-bonus
    // tracks; at most one may appear in the subset.
    let density_bonus_tracks = [
        "TOC Tier 2",
        "State Density Bonus",
        "AB-1287 Enhanced Density Bonus",
    ];
    let bonus_picks = picks
        .iter()
        .filter(|name| density_bonus_tracks.contains(&name.as_str()))
        .count();
    assert!(bonus_picks <= 1, "duplicate density-bonus recommendations");
}

#[test]
fn ranking_is_byte_identical_across_runs() {
    let engine = EntitlementEngine::new(market());
    let first = engine.analyze(coronado_r4()).expect("analysis succeeds");
    let second = engine.analyze(coronado_r4()).expect("analysis succeeds");

    let a = serde_json::to_string(&first).expect("serializes");
    let b = serde_json::to_string(&second).expect("serializes");
    assert_eq!(a, b);
}

#[test]
fn ranked_scenarios_are_sorted_by_score_descending() {
    let engine = EntitlementEngine::new(market());
    let report = engine.analyze(coronado_r4()).expect("analysis succeeds");

    let scores: Vec<f64> = report
        .development_scenarios
        .iter()
        .map(|scenario| scenario.recommendation_score)
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn zero_lot_area_aborts_before_any_downstream_component() {
    let engine = EntitlementEngine::new(market());
    let mut raw = coronado_r4();
    raw.lot_area_sqft = Some(0.0);

    let err = engine.analyze(raw).expect_err("must abort");
    assert!(matches!(
        err,
        AnalysisError::DataIncomplete {
            field: "lot_area_sqft"
        }
    ));
}

#[test]
fn missing_market_family_leaves_scenario_with_note_not_dropped() {
    let engine = EntitlementEngine::new(MarketBook::default());
    let report = engine.analyze(coronado_r4()).expect("analysis succeeds");

    assert!(!report.development_scenarios.is_empty());
    for scenario in &report.development_scenarios {
        assert!(scenario.gpr.is_none());
        assert!(scenario.property_value.is_none());
        assert!(scenario.financial_note.is_some());
    }
}

#[test]
fn financials_follow_the_configured_assumptions() {
    let engine = EntitlementEngine::new(market());
    let report = engine.analyze(coronado_r4()).expect("analysis succeeds");

    let by_right = report
        .development_scenarios
        .iter()
        .find(|scenario| scenario.name == "By-Right")
        .expect("by-right present");
    let gpr = by_right.gpr.expect("gpr annotated");
    assert_eq!(gpr, 30.0 * 2_400.0 * 12.0);
    let noi = by_right.noi.expect("noi annotated");
    assert!((noi - gpr * 0.65).abs() < 1e-9);
    let value = by_right.property_value.expect("value annotated");
    assert!((value - noi / 0.05).abs() < 1e-6);
}

#[test]
fn display_rounding_applies_only_at_the_view_boundary() {
    let raw = RawParcelRecord {
        existing_units: Some(0),
        year_built: None,
        ..coronado_r4()
    };

    let exact = EntitlementEngine::new(market())
        .analyze(raw.clone())
        .expect("analysis succeeds");
    let floored = EntitlementEngine::with_rounding(market(), RoundingPolicy::Floor)
        .analyze(raw)
        .expect("analysis succeeds");

    let by_right_units = |report: &upzone::AnalysisReport| {
        report
            .development_scenarios
            .iter()
            .find(|scenario| scenario.name == "By-Right")
            .map(|scenario| scenario.total_units)
            .expect("by-right present")
    };

    assert_eq!(by_right_units(&exact), 11_135.09 / 400.0);
    assert_eq!(by_right_units(&floored), 27.0);
    // The internal baseline stays fractional under either policy.
    assert_eq!(floored.base_zoning.baseline_units, 11_135.09 / 400.0);
}

#[test]
fn next_steps_cover_rso_replacement_and_unverified_transit() {
    let engine = EntitlementEngine::new(market());
    let mut raw = coronado_r4();
    raw.transit_distance_ft = None;
    let report = engine.analyze(raw).expect("analysis succeeds");

    // The list opens with the top feasible scenario and carries the
    // parcel-specific follow-ups: RSO replacement planning and transit
    // verification for the programs that need it.
    assert!(report.next_steps[0].starts_with("Pursue"));
    assert!(report
        .next_steps
        .iter()
        .any(|step| step.contains("RSO") && step.contains("replacement")));
    assert!(report
        .next_steps
        .iter()
        .any(|step| step.contains("transit proximity")));
}

#[test]
fn bottom_line_names_the_top_feasible_unlock() {
    let engine = EntitlementEngine::new(market());
    let report = engine.analyze(coronado_r4()).expect("analysis succeeds");

    let top = &report.development_scenarios[0];
    assert!(report.bottom_line.contains(&top.name) || report.bottom_line.contains("unlock"));
    assert!(report
        .bottom_line
        .contains("rent-stabilized"));
}
