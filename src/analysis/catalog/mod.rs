//! Regulatory rule catalog.
//!
//! Each incentive or constraint program is modeled as data: a pure predicate,
//! a declared numeric effect, and citations, instead of conditionals buried in
//! scenario construction. The catalog is process-wide, read-only configuration
//! initialized once; evaluation order equals registration order and becomes
//! the audit table order.

mod rules;

pub(crate) use rules::toc_tier;

use serde::{Deserialize, Serialize};

use super::facts::PropertyFacts;

/// Where a program's authority comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleCategory {
    StateLaw,
    LocalOrdinance,
    MunicipalCode,
}

impl RuleCategory {
    pub const fn label(self) -> &'static str {
        match self {
            RuleCategory::StateLaw => "state_law",
            RuleCategory::LocalOrdinance => "local_ordinance",
            RuleCategory::MunicipalCode => "municipal_code",
        }
    }
}

/// Approval pathway a scenario would follow. Ministerial sorts ahead of
/// discretionary wherever an approval-timeline tie-break is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApprovalPath {
    Ministerial,
    Discretionary,
}

impl ApprovalPath {
    pub const fn label(self) -> &'static str {
        match self {
            ApprovalPath::Ministerial => "ministerial",
            ApprovalPath::Discretionary => "discretionary",
        }
    }
}

/// Feasibility rating carried on scenarios and seeded by each rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feasibility {
    High,
    Medium,
    Low,
}

impl Feasibility {
    pub const fn label(self) -> &'static str {
        match self {
            Feasibility::High => "high",
            Feasibility::Medium => "medium",
            Feasibility::Low => "low",
        }
    }

    /// Scoring multiplier used by the ranker.
    pub const fn multiplier(self) -> f64 {
        match self {
            Feasibility::High => 1.0,
            Feasibility::Medium => 0.7,
            Feasibility::Low => 0.4,
        }
    }
}

/// How a rule changes the unit count relative to the by-right baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UnitYield {
    /// Leaves the baseline unit count untouched.
    Baseline,
    /// Density bonus: baseline × (1 + pct/100).
    BonusPct(f64),
    /// A fixed statutory unit count (e.g. the SB-9 duplex allowance).
    Fixed(f64),
    /// Small-site programs: min(cap, max(baseline, floor)).
    SmallSiteCap { cap: f64, floor: f64 },
    /// Re-derives units from lot area at a statutory density.
    PerLotArea { sqft_per_unit: f64 },
}

/// Parking requirement relief declared by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParkingRelief {
    /// The zone's baseline ratio applies.
    ZoneStandard,
    /// Reduced ratio in spaces per unit.
    RatioPerUnit(f64),
    /// No parking minimums.
    Eliminated,
}

/// The declared, mechanical effect of a rule on the development envelope.
/// Audit enablement tags derive from this record alone, independent of
/// whether a scenario was generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectDelta {
    pub units: UnitYield,
    pub height_bonus_ft: f64,
    pub far_multiplier: f64,
    pub parking: ParkingRelief,
    pub approval: ApprovalPath,
    pub affordability: Option<String>,
}

impl EffectDelta {
    /// Envelope-neutral starting point; rules override the fields they touch.
    pub fn baseline() -> Self {
        Self {
            units: UnitYield::Baseline,
            height_bonus_ft: 0.0,
            far_multiplier: 1.0,
            parking: ParkingRelief::ZoneStandard,
            approval: ApprovalPath::Discretionary,
            affordability: None,
        }
    }
}

/// Predicate verdict for one rule against one set of facts.
#[derive(Debug, Clone, PartialEq)]
pub enum Applicability {
    /// The program is available; the reason explains what qualified.
    Eligible(String),
    /// The program was considered and ruled out; the reason explains why.
    NotEligible(String),
    /// A fact the predicate needs is absent or the program does not speak to
    /// this kind of parcel. Never an error: a missing optional fact must not
    /// abort the catalog pass.
    NotApplicable(String),
}

/// Eligibility status recorded in the audit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleStatus {
    Eligible,
    NotEligible,
    NotApplicable,
}

impl RuleStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RuleStatus::Eligible => "eligible",
            RuleStatus::NotEligible => "not_eligible",
            RuleStatus::NotApplicable => "not_applicable",
        }
    }
}

/// One registered regulatory program: pure predicate, declared effect,
/// citations, and the descriptive text reused by scenarios and the audit.
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub category: RuleCategory,
    /// Rules sharing a group are alternative, non-combinable tracks. The
    /// ranker's recommendation subset picks at most one per group; catalog
    /// evaluation and scenario generation ignore the tag.
    pub exclusive_group: Option<&'static str>,
    /// Primary citation shown on the audit row.
    pub citation: &'static str,
    /// Technical one-line effect description for the audit table.
    pub summary: &'static str,
    pub benefits: &'static [&'static str],
    pub constraints: &'static [&'static str],
    pub base_feasibility: Feasibility,
    predicate: fn(&PropertyFacts) -> Applicability,
    effect: fn(&PropertyFacts) -> EffectDelta,
    citations: fn(&PropertyFacts) -> Vec<String>,
    description: fn(&PropertyFacts) -> String,
}

impl Rule {
    pub fn applicability(&self, facts: &PropertyFacts) -> Applicability {
        (self.predicate)(facts)
    }

    /// Total over all facts: callable regardless of eligibility so the audit
    /// can tag every rule mechanically.
    pub fn effect(&self, facts: &PropertyFacts) -> EffectDelta {
        (self.effect)(facts)
    }

    pub fn citations(&self, facts: &PropertyFacts) -> Vec<String> {
        (self.citations)(facts)
    }

    pub fn description(&self, facts: &PropertyFacts) -> String {
        (self.description)(facts)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("exclusive_group", &self.exclusive_group)
            .finish()
    }
}

/// Exactly one outcome per registered rule per request, required for the
/// audit table's cardinality invariant.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    pub rule: &'static Rule,
    pub status: RuleStatus,
    pub reason: String,
}

/// The registry of rules, evaluated in registration order.
#[derive(Debug, Clone, Copy)]
pub struct RuleCatalog {
    rules: &'static [Rule],
}

impl RuleCatalog {
    /// The built-in catalog of LA programs. Static data: initialized at
    /// process start, never mutated at request time.
    pub fn builtin() -> Self {
        Self {
            rules: rules::REGISTERED,
        }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates every rule independently and yields one outcome per rule in
    /// registration order. Mutual exclusivity between rules does not suppress
    /// evaluation; each individually eligible rule still gets its outcome.
    pub fn evaluate(&self, facts: &PropertyFacts) -> Vec<RuleOutcome> {
        self.rules
            .iter()
            .map(|rule| {
                let (status, reason) = match rule.applicability(facts) {
                    Applicability::Eligible(reason) => (RuleStatus::Eligible, reason),
                    Applicability::NotEligible(reason) => (RuleStatus::NotEligible, reason),
                    Applicability::NotApplicable(reason) => (RuleStatus::NotApplicable, reason),
                };
                tracing::debug!(rule = rule.id, status = status.label(), "rule evaluated");
                RuleOutcome {
                    rule,
                    status,
                    reason,
                }
            })
            .collect()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::facts::{FactBuilder, RawParcelRecord};

    fn facts(zone: &str, lot_area: f64, existing_units: u32) -> PropertyFacts {
        FactBuilder::build(RawParcelRecord {
            apn: Some("0000-000-000".to_string()),
            address: Some("1 Test St".to_string()),
            lot_area_sqft: Some(lot_area),
            zone: Some(zone.to_string()),
            height_district: Some("1".to_string()),
            existing_units: Some(existing_units),
            ..RawParcelRecord::default()
        })
        .expect("facts build")
    }

    #[test]
    fn every_rule_yields_exactly_one_outcome() {
        let catalog = RuleCatalog::builtin();
        let outcomes = catalog.evaluate(&facts("R1", 6_000.0, 1));
        assert_eq!(outcomes.len(), catalog.len());
    }

    #[test]
    fn evaluation_order_is_registration_order() {
        let catalog = RuleCatalog::builtin();
        let parcel = facts("R4", 10_000.0, 4);
        let first = catalog.evaluate(&parcel);
        let second = catalog.evaluate(&parcel);
        let ids = |outcomes: &[RuleOutcome]| {
            outcomes
                .iter()
                .map(|outcome| outcome.rule.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(
            ids(&first),
            catalog
                .rules()
                .iter()
                .map(|rule| rule.id)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn rule_ids_are_unique() {
        let catalog = RuleCatalog::builtin();
        let mut ids = catalog
            .rules()
            .iter()
            .map(|rule| rule.id)
            .collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }
}
