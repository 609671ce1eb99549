//! The entitlement analysis pipeline.
//!
//! A strict linear computation per request: fact normalization, catalog
//! evaluation, scenario generation, financial annotation, ranking, and audit
//! assembly. No I/O, no suspension points, no shared mutable state; the rule
//! catalog and market book are read-only after construction, so concurrent
//! analyses of different parcels are safe.

pub mod audit;
pub mod catalog;
pub mod facts;
pub mod finance;
pub mod ranking;
pub mod report;
pub mod scenario;
pub mod tables;

pub use catalog::{ApprovalPath, Feasibility, RuleCatalog, RuleOutcome, RuleStatus};
pub use facts::{FactBuilder, HazardFlags, OverlayFlags, PropertyFacts, RawParcelRecord};
pub use ranking::{RankedSet, Recommendations};
pub use report::{AnalysisReport, BaseZoningView, ScenarioView};
pub use scenario::Scenario;

use crate::config::{MarketBook, RoundingPolicy};
use crate::error::AnalysisError;

/// Facade over the full pipeline. Construct once at process start; `analyze`
/// is pure and deterministic per call.
pub struct EntitlementEngine {
    catalog: RuleCatalog,
    market: MarketBook,
    rounding: RoundingPolicy,
}

impl EntitlementEngine {
    pub fn new(market: MarketBook) -> Self {
        Self::with_rounding(market, RoundingPolicy::Exact)
    }

    pub fn with_rounding(market: MarketBook, rounding: RoundingPolicy) -> Self {
        Self {
            catalog: RuleCatalog::builtin(),
            market,
            rounding,
        }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Runs the full analysis for one parcel. Fails only when required facts
    /// are missing; no downstream component runs in that case.
    pub fn analyze(&self, raw: RawParcelRecord) -> Result<AnalysisReport, AnalysisError> {
        let facts = FactBuilder::build(raw)?;
        tracing::info!(
            apn = %facts.apn,
            zone = %facts.complete_zone(),
            lot_area_sqft = facts.lot_area_sqft,
            "facts normalized"
        );

        let outcomes = self.catalog.evaluate(&facts);
        let mut scenarios = scenario::generate(&facts, &outcomes);
        tracing::info!(
            rules = outcomes.len(),
            scenarios = scenarios.len(),
            "catalog evaluated"
        );

        for scenario in &mut scenarios {
            finance::annotate(scenario, &facts, &self.market);
        }

        let ranked = ranking::rank(scenarios);
        let rules_audit = audit::report(&outcomes, &facts);

        Ok(report::assemble(&facts, ranked, rules_audit, self.rounding))
    }
}
