//! Revenue annotation for scenarios.
//!
//! All three market parameters come from external configuration keyed by zone
//! family, so the same computation is reproducible and auditable. A missing
//! family never silently defaults to zero: that would corrupt the ranking.

use super::facts::PropertyFacts;
use super::scenario::Scenario;
use crate::config::MarketBook;
use crate::error::ConfigurationIncomplete;

/// Annotates a scenario with gross potential rent, net operating income, and
/// a capitalized property value.
///
/// A missing zone-family parameter aborts the financial annotation only: the
/// scenario keeps null revenue fields and carries a note, because the unit and
/// legal analysis remains valid without market data.
pub fn annotate(scenario: &mut Scenario, facts: &PropertyFacts, market: &MarketBook) {
    match estimate(scenario.total_units, facts, market) {
        Ok(estimate) => {
            scenario.gpr = Some(estimate.gpr);
            scenario.noi = Some(estimate.noi);
            scenario.property_value = Some(estimate.property_value);
        }
        Err(missing) => {
            tracing::warn!(
                scenario = %scenario.name,
                zone_family = %missing.zone_family,
                "financial annotation skipped"
            );
            scenario.financial_note = Some(missing.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenueEstimate {
    pub gpr: f64,
    pub noi: f64,
    pub property_value: f64,
}

pub fn estimate(
    total_units: f64,
    facts: &PropertyFacts,
    market: &MarketBook,
) -> Result<RevenueEstimate, ConfigurationIncomplete> {
    let assumptions = market.lookup(facts.zone_family())?;
    let gpr = total_units * assumptions.monthly_rent * 12.0;
    let noi = gpr * (1.0 - assumptions.operating_expense_ratio);
    let property_value = noi / assumptions.cap_rate;
    Ok(RevenueEstimate {
        gpr,
        noi,
        property_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::catalog::RuleCatalog;
    use crate::analysis::facts::{FactBuilder, RawParcelRecord};
    use crate::analysis::scenario;
    use crate::config::MarketAssumptions;

    fn facts() -> PropertyFacts {
        FactBuilder::build(RawParcelRecord {
            apn: Some("3333-333-333".to_string()),
            address: Some("300 Example Ave".to_string()),
            lot_area_sqft: Some(10_000.0),
            zone: Some("R4".to_string()),
            height_district: Some("2".to_string()),
            existing_units: Some(0),
            ..RawParcelRecord::default()
        })
        .expect("facts build")
    }

    fn market_with_r4() -> MarketBook {
        let mut market = MarketBook::default();
        market.insert(
            "mid_rise_multifamily",
            MarketAssumptions {
                monthly_rent: 2_000.0,
                operating_expense_ratio: 0.35,
                cap_rate: 0.05,
            },
        );
        market
    }

    #[test]
    fn revenue_math_follows_gpr_noi_value_chain() {
        let estimate = estimate(25.0, &facts(), &market_with_r4()).expect("family configured");
        assert_eq!(estimate.gpr, 25.0 * 2_000.0 * 12.0);
        assert_eq!(estimate.noi, estimate.gpr * 0.65);
        assert_eq!(estimate.property_value, estimate.noi / 0.05);
    }

    #[test]
    fn missing_family_keeps_scenario_with_null_financials() {
        let parcel = facts();
        let outcomes = RuleCatalog::builtin().evaluate(&parcel);
        let mut scenarios = scenario::generate(&parcel, &outcomes);
        let scenario = scenarios
            .iter_mut()
            .find(|scenario| scenario.rule_id == "by_right")
            .expect("by-right generated");

        annotate(scenario, &parcel, &MarketBook::default());

        assert!(scenario.gpr.is_none());
        assert!(scenario.noi.is_none());
        assert!(scenario.property_value.is_none());
        let note = scenario.financial_note.as_deref().expect("note recorded");
        assert!(note.contains("mid_rise_multifamily"));
    }

    #[test]
    fn configured_family_fills_all_three_fields() {
        let parcel = facts();
        let outcomes = RuleCatalog::builtin().evaluate(&parcel);
        let mut scenarios = scenario::generate(&parcel, &outcomes);
        for scenario in &mut scenarios {
            annotate(scenario, &parcel, &market_with_r4());
            assert!(scenario.gpr.is_some(), "{} missing gpr", scenario.name);
            assert!(scenario.noi.is_some());
            assert!(scenario.property_value.is_some());
            assert!(scenario.financial_note.is_none());
        }
    }
}
