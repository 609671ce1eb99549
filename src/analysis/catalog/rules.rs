//! The registered regulatory programs.
//!
//! Registration order is deliberate: it is the order the audit table reports,
//! starting from the by-right envelope, then density-bonus tracks, then the
//! state streamlining statutes, then standalone relief programs.

use super::{
    Applicability, ApprovalPath, EffectDelta, Feasibility, ParkingRelief, Rule, RuleCategory,
    UnitYield,
};
use crate::analysis::facts::PropertyFacts;

/// Half mile in feet: the TOC and AB-2097 transit qualification radius.
const TRANSIT_QUALIFYING_FT: f64 = 2_640.0;

/// Five acres in square feet: the SB-684 lot-size ceiling.
const SB684_MAX_LOT_SQFT: f64 = 217_800.0;

pub(super) static REGISTERED: &[Rule] = &[
    Rule {
        id: "by_right",
        name: "By-Right",
        category: RuleCategory::MunicipalCode,
        exclusive_group: None,
        citation: "LAMC 12.21: base zone density and envelope",
        summary: "Baseline envelope under the parcel's zone and height district",
        benefits: &[
            "No affordability requirement",
            "Predictable approval",
            "Fastest path",
        ],
        constraints: &["Limited unit count"],
        base_feasibility: Feasibility::High,
        predicate: by_right_predicate,
        effect: by_right_effect,
        citations: by_right_citations,
        description: by_right_description,
    },
    Rule {
        id: "toc",
        name: "TOC Density Bonus",
        category: RuleCategory::LocalOrdinance,
        exclusive_group: Some("density-bonus"),
        citation: "LAMC 12.22-A.31: Transit Oriented Communities",
        summary: "Tiered density bonus and parking relief near major transit",
        benefits: &[
            "Tiered density bonus up to 70%",
            "Reduced or no parking",
            "Streamlined approval without hearing",
        ],
        constraints: &["Very Low Income set-aside scaled by tier"],
        base_feasibility: Feasibility::High,
        predicate: toc_predicate,
        effect: toc_effect,
        citations: toc_citations,
        description: toc_description,
    },
    Rule {
        id: "state_density_bonus",
        name: "State Density Bonus",
        category: RuleCategory::StateLaw,
        exclusive_group: Some("density-bonus"),
        citation: "Gov Code 65915: California State Density Bonus Law",
        summary: "Up to 50% density bonus for a 15% Very Low Income set-aside",
        benefits: &[
            "Up to 50% density bonus",
            "Up to 3 concessions (parking, setback, height)",
            "Cannot be denied if compliant",
        ],
        constraints: &["15% Very Low Income set-aside for maximum bonus"],
        base_feasibility: Feasibility::High,
        predicate: multi_family_predicate,
        effect: state_density_bonus_effect,
        citations: state_density_bonus_citations,
        description: state_density_bonus_description,
    },
    Rule {
        id: "ab1287",
        name: "AB-1287 Enhanced Density Bonus",
        category: RuleCategory::StateLaw,
        exclusive_group: Some("density-bonus"),
        citation: "Gov Code 65915(f)(4): AB-1287 enhanced bonus",
        summary: "Up to 100% density bonus with stacked moderate and VLI set-asides",
        benefits: &[
            "Up to 100% density bonus",
            "Additional concessions available",
            "Cannot be denied if compliant",
        ],
        constraints: &["Moderate plus Very Low Income set-asides for maximum bonus"],
        base_feasibility: Feasibility::High,
        predicate: multi_family_predicate,
        effect: ab1287_effect,
        citations: ab1287_citations,
        description: ab1287_description,
    },
    Rule {
        id: "sb9_duplex",
        name: "SB-9 Duplex",
        category: RuleCategory::StateLaw,
        exclusive_group: Some("sb9"),
        citation: "Gov Code 65852.21: SB-9 duplex allowance",
        summary: "Two units on any single-family lot, ministerial",
        benefits: &[
            "No affordability requirement",
            "Ministerial approval",
            "No parking minimums near transit",
        ],
        constraints: &[
            "Owner-occupancy required for 3 years",
            "Cannot exceed 2 units on a single lot",
        ],
        base_feasibility: Feasibility::High,
        predicate: sb9_duplex_predicate,
        effect: sb9_duplex_effect,
        citations: sb9_duplex_citations,
        description: sb9_duplex_description,
    },
    Rule {
        id: "sb9_lot_split",
        name: "SB-9 Lot Split + Duplex",
        category: RuleCategory::StateLaw,
        exclusive_group: Some("sb9"),
        citation: "Gov Code 66411.7: SB-9 urban lot split",
        summary: "Split an R1 lot in two and build a duplex on each, four units total",
        benefits: &[
            "No affordability requirement",
            "Ministerial approval",
            "Lots can be sold separately",
        ],
        constraints: &[
            "Minimum 1,200 sq ft per lot after split",
            "Owner-occupancy required for 3 years",
        ],
        base_feasibility: Feasibility::High,
        predicate: sb9_lot_split_predicate,
        effect: sb9_lot_split_effect,
        citations: sb9_lot_split_citations,
        description: sb9_lot_split_description,
    },
    Rule {
        id: "ed1",
        name: "100% Affordable (ED-1)",
        category: RuleCategory::LocalOrdinance,
        exclusive_group: Some("full-affordable"),
        citation: "Executive Directive No. 1: streamlined affordable housing",
        summary: "Doubled envelope, no parking, ministerial, for 100% affordable projects",
        benefits: &[
            "No parking requirements",
            "Streamlined ministerial approval",
            "Expedited permitting",
        ],
        constraints: &["100% affordability requirement"],
        base_feasibility: Feasibility::High,
        predicate: residential_predicate,
        effect: ed1_effect,
        citations: ed1_citations,
        description: ed1_description,
    },
    Rule {
        id: "sb35",
        name: "SB-35 Streamlined Affordable",
        category: RuleCategory::StateLaw,
        exclusive_group: Some("streamlined"),
        citation: "Gov Code 65913.4: SB-35 streamlined approval",
        summary: "Ministerial approval and CEQA exemption for 20% affordable projects",
        benefits: &[
            "No CEQA review",
            "Ministerial approval",
            "Cannot be denied if compliant",
        ],
        constraints: &[
            "20% affordability requirement",
            "Jurisdiction must not have met RHNA goals",
        ],
        base_feasibility: Feasibility::High,
        predicate: multi_family_predicate,
        effect: sb35_effect,
        citations: sb35_citations,
        description: sb35_description,
    },
    Rule {
        id: "builders_remedy",
        name: "SB-330 Builder's Remedy",
        category: RuleCategory::StateLaw,
        exclusive_group: Some("streamlined"),
        citation: "Gov Code 65589.5: Housing Accountability Act",
        summary: "Overrides local zoning while the housing element is out of compliance",
        benefits: &[
            "Overrides local zoning",
            "Cannot be downzoned",
            "Strong legal protections",
        ],
        constraints: &[
            "Only available during housing element non-compliance",
            "20% affordability requirement",
        ],
        base_feasibility: Feasibility::Medium,
        predicate: builders_remedy_predicate,
        effect: builders_remedy_effect,
        citations: builders_remedy_citations,
        description: builders_remedy_description,
    },
    Rule {
        id: "sb684",
        name: "SB-684 Small Site Housing",
        category: RuleCategory::StateLaw,
        exclusive_group: Some("small-site"),
        citation: "Gov Code 65913.5: SB-684 small site housing",
        summary: "Up to 10 units on urban multifamily lots under 5 acres, ministerial",
        benefits: &[
            "No affordability requirement",
            "CEQA-exempt",
            "60-day approval timeline",
        ],
        constraints: &["Maximum 10 units", "Urban lots under 5 acres only"],
        base_feasibility: Feasibility::High,
        predicate: sb684_predicate,
        effect: sb684_effect,
        citations: sb684_citations,
        description: sb684_description,
    },
    Rule {
        id: "ab2011",
        name: "AB-2011 Commercial Conversion",
        category: RuleCategory::StateLaw,
        exclusive_group: Some("commercial-conversion"),
        citation: "Gov Code 65912.111: AB-2011 commercial conversion",
        summary: "Housing on commercially zoned land at R4-equivalent density, ministerial",
        benefits: &[
            "Ministerial approval",
            "Commercial to residential conversion",
            "CEQA streamlining",
        ],
        constraints: &[
            "15% affordability requirement",
            "Prevailing wage requirement",
        ],
        base_feasibility: Feasibility::High,
        predicate: ab2011_predicate,
        effect: ab2011_effect,
        citations: ab2011_citations,
        description: ab2011_description,
    },
    Rule {
        id: "ab2097",
        name: "AB-2097 Parking Elimination",
        category: RuleCategory::StateLaw,
        exclusive_group: Some("parking-relief"),
        citation: "Gov Code 65863.2: AB-2097 parking minimums",
        summary: "Removes residential parking minimums within a half mile of major transit",
        benefits: &[
            "No parking minimums",
            "Lower construction cost",
            "More buildable area",
        ],
        constraints: &["Requires verified transit proximity"],
        base_feasibility: Feasibility::High,
        predicate: ab2097_predicate,
        effect: ab2097_effect,
        citations: ab2097_citations,
        description: ab2097_description,
    },
];

// By-Right

fn by_right_predicate(facts: &PropertyFacts) -> Applicability {
    Applicability::Eligible(format!(
        "automatic right under {} zoning",
        facts.complete_zone()
    ))
}

fn by_right_effect(_facts: &PropertyFacts) -> EffectDelta {
    EffectDelta::baseline()
}

fn by_right_citations(facts: &PropertyFacts) -> Vec<String> {
    vec![
        format!(
            "LAMC 12.21: {} zone density requirement ({:.0} sq ft/unit)",
            facts.zone, facts.density_factor_sqft
        ),
        format!(
            "LAMC 12.21.1: Height District {} regulations",
            facts.height_district
        ),
    ]
}

fn by_right_description(facts: &PropertyFacts) -> String {
    format!(
        "UNLOCK: Automatic right under {} zoning. No special requirements.",
        facts.complete_zone()
    )
}

// TOC

/// TOC tier from verified transit distance; `None` outside the half-mile
/// radius or when the distance is unknown.
pub(crate) fn toc_tier(facts: &PropertyFacts) -> Option<u8> {
    let distance = facts.transit_distance_ft?;
    if distance <= 750.0 {
        Some(3)
    } else if distance <= 1_320.0 {
        Some(2)
    } else if distance <= TRANSIT_QUALIFYING_FT {
        Some(1)
    } else {
        None
    }
}

fn toc_bonus_pct(tier: u8) -> f64 {
    match tier {
        3 => 70.0,
        2 => 60.0,
        _ => 50.0,
    }
}

fn toc_affordability(tier: u8) -> &'static str {
    match tier {
        3 => "10% Very Low Income",
        2 => "9% Very Low Income",
        _ => "8% Very Low Income",
    }
}

fn toc_predicate(facts: &PropertyFacts) -> Applicability {
    if !facts.is_multi_family_zone() {
        return Applicability::NotApplicable(format!(
            "{} is not a qualifying multi-family zone for TOC",
            facts.zone
        ));
    }
    let Some(distance) = facts.transit_distance_ft else {
        return Applicability::NotApplicable(
            "transit distance unknown; TOC tier cannot be determined".to_string(),
        );
    };
    match toc_tier(facts) {
        Some(tier) => Applicability::Eligible(format!(
            "within {distance:.0} ft of major transit (Tier {tier})"
        )),
        None => Applicability::NotEligible(format!(
            "{distance:.0} ft from major transit exceeds the half-mile TOC radius"
        )),
    }
}

fn toc_effect(facts: &PropertyFacts) -> EffectDelta {
    // Tier 1 stands in when the distance is unknown, so the declared effect
    // stays total for audit tagging.
    let tier = toc_tier(facts).unwrap_or(1);
    EffectDelta {
        units: UnitYield::BonusPct(toc_bonus_pct(tier)),
        height_bonus_ft: match tier {
            3 => 22.0,
            2 => 11.0,
            _ => 0.0,
        },
        far_multiplier: 1.0,
        parking: if tier >= 3 {
            ParkingRelief::Eliminated
        } else {
            ParkingRelief::RatioPerUnit(0.5)
        },
        approval: ApprovalPath::Ministerial,
        affordability: Some(toc_affordability(tier).to_string()),
    }
}

fn toc_citations(facts: &PropertyFacts) -> Vec<String> {
    let tier = toc_tier(facts).unwrap_or(1);
    vec![
        format!(
            "LAMC 12.22-A.31: TOC Tier {tier} density bonus ({:.0}%)",
            toc_bonus_pct(tier)
        ),
        format!(
            "TOC Guidelines: {} set-aside for Tier {tier}",
            toc_affordability(tier)
        ),
        "Measure JJJ (2016): voter-approved TOC program".to_string(),
    ]
}

fn toc_description(facts: &PropertyFacts) -> String {
    let tier = toc_tier(facts).unwrap_or(1);
    format!(
        "UNLOCK: Property within half mile of a major transit stop (Tier {tier}). Requires {} affordable units.",
        toc_affordability(tier)
    )
}

// Shared zone predicates

fn multi_family_predicate(facts: &PropertyFacts) -> Applicability {
    if facts.is_multi_family_zone() {
        Applicability::Eligible(format!("{} is a multi-family zone", facts.zone))
    } else {
        Applicability::NotApplicable(format!(
            "{} is not a qualifying multi-family zone",
            facts.zone
        ))
    }
}

fn residential_predicate(facts: &PropertyFacts) -> Applicability {
    if facts.is_residential() {
        Applicability::Eligible(format!("{} is a residential zone", facts.zone))
    } else {
        Applicability::NotApplicable(format!("{} is not a residential zone", facts.zone))
    }
}

// State Density Bonus

fn state_density_bonus_effect(_facts: &PropertyFacts) -> EffectDelta {
    EffectDelta {
        units: UnitYield::BonusPct(50.0),
        height_bonus_ft: 11.0,
        far_multiplier: 1.0,
        parking: ParkingRelief::RatioPerUnit(0.5),
        approval: ApprovalPath::Ministerial,
        affordability: Some("15% Very Low Income".to_string()),
    }
}

fn state_density_bonus_citations(_facts: &PropertyFacts) -> Vec<String> {
    vec![
        "Gov Code 65915: California State Density Bonus Law".to_string(),
        "Gov Code 65915(b)(1)(B): 15% VLI units = 50% density bonus".to_string(),
        "AB 2345 (2020): increased maximum bonus from 35% to 50%".to_string(),
        "Gov Code 65915(d): up to 3 regulatory concessions".to_string(),
    ]
}

fn state_density_bonus_description(facts: &PropertyFacts) -> String {
    format!(
        "UNLOCK: Available to all multi-family zones ({}). Requires 15% Very Low Income units for the maximum 50% bonus.",
        facts.zone
    )
}

// AB-1287

fn ab1287_effect(_facts: &PropertyFacts) -> EffectDelta {
    EffectDelta {
        units: UnitYield::BonusPct(100.0),
        height_bonus_ft: 11.0,
        far_multiplier: 1.0,
        parking: ParkingRelief::RatioPerUnit(0.5),
        approval: ApprovalPath::Ministerial,
        affordability: Some("Moderate plus Very Low Income mix".to_string()),
    }
}

fn ab1287_citations(_facts: &PropertyFacts) -> Vec<String> {
    vec![
        "Gov Code 65915(f)(4): AB-1287 enhanced bonus".to_string(),
        "Gov Code 65915.7: moderate income provisions".to_string(),
        "Gov Code 65915(k): additional concessions".to_string(),
    ]
}

fn ab1287_description(facts: &PropertyFacts) -> String {
    format!(
        "UNLOCK: Up to 100% density bonus on {} with stacked moderate and very-low-income set-asides.",
        facts.zone
    )
}

// SB-9

fn sb9_duplex_predicate(facts: &PropertyFacts) -> Applicability {
    if facts.zone == "R1" {
        Applicability::Eligible("R1 lots qualify for the SB-9 duplex allowance".to_string())
    } else {
        Applicability::NotApplicable(format!("SB-9 applies to R1 zones only, not {}", facts.zone))
    }
}

fn sb9_duplex_effect(_facts: &PropertyFacts) -> EffectDelta {
    EffectDelta {
        units: UnitYield::Fixed(2.0),
        height_bonus_ft: 0.0,
        far_multiplier: 1.0,
        parking: ParkingRelief::Eliminated,
        approval: ApprovalPath::Ministerial,
        affordability: None,
    }
}

fn sb9_duplex_citations(_facts: &PropertyFacts) -> Vec<String> {
    vec![
        "Gov Code 65852.21: SB-9 duplex allowance".to_string(),
        "Gov Code 65852.21(f): owner-occupancy requirement".to_string(),
    ]
}

fn sb9_duplex_description(_facts: &PropertyFacts) -> String {
    "UNLOCK: R1 zone allows duplex conversion or a new duplex on the existing lot.".to_string()
}

fn sb9_lot_split_predicate(facts: &PropertyFacts) -> Applicability {
    if facts.zone != "R1" {
        return Applicability::NotApplicable(format!(
            "SB-9 applies to R1 zones only, not {}",
            facts.zone
        ));
    }
    if facts.lot_area_sqft >= 2_400.0 {
        Applicability::Eligible(format!(
            "R1 lot of {:.0} sq ft meets the 2,400 sq ft split minimum",
            facts.lot_area_sqft
        ))
    } else {
        Applicability::NotEligible(format!(
            "lot of {:.0} sq ft is below the 2,400 sq ft minimum for a lot split",
            facts.lot_area_sqft
        ))
    }
}

fn sb9_lot_split_effect(_facts: &PropertyFacts) -> EffectDelta {
    EffectDelta {
        units: UnitYield::Fixed(4.0),
        height_bonus_ft: 0.0,
        far_multiplier: 1.0,
        parking: ParkingRelief::Eliminated,
        approval: ApprovalPath::Ministerial,
        affordability: None,
    }
}

fn sb9_lot_split_citations(_facts: &PropertyFacts) -> Vec<String> {
    vec![
        "Gov Code 66411.7: SB-9 lot split".to_string(),
        "Gov Code 65852.21: SB-9 duplex allowance".to_string(),
    ]
}

fn sb9_lot_split_description(facts: &PropertyFacts) -> String {
    format!(
        "UNLOCK: R1 lot of {:.0} sq ft can be split into two parcels with a duplex on each (4 units total).",
        facts.lot_area_sqft
    )
}

// ED-1

fn ed1_effect(_facts: &PropertyFacts) -> EffectDelta {
    EffectDelta {
        units: UnitYield::BonusPct(100.0),
        height_bonus_ft: 0.0,
        far_multiplier: 1.0,
        parking: ParkingRelief::Eliminated,
        approval: ApprovalPath::Ministerial,
        affordability: Some("100% affordable (VLI/LI/Moderate mix allowed)".to_string()),
    }
}

fn ed1_citations(_facts: &PropertyFacts) -> Vec<String> {
    vec![
        "Executive Directive No. 1 (Mayor's Directive)".to_string(),
        "LAMC 12.22-A.25: 100% affordable housing".to_string(),
        "Gov Code 65915(p): no parking for 100% affordable projects".to_string(),
    ]
}

fn ed1_description(facts: &PropertyFacts) -> String {
    format!(
        "UNLOCK: Available to all residential zones ({}). Requires a 100% affordable housing commitment.",
        facts.zone
    )
}

// SB-35

fn sb35_effect(_facts: &PropertyFacts) -> EffectDelta {
    EffectDelta {
        units: UnitYield::BonusPct(25.0),
        height_bonus_ft: 0.0,
        far_multiplier: 1.0,
        parking: ParkingRelief::RatioPerUnit(0.5),
        approval: ApprovalPath::Ministerial,
        affordability: Some("20% affordable".to_string()),
    }
}

fn sb35_citations(_facts: &PropertyFacts) -> Vec<String> {
    vec![
        "Gov Code 65913.4: SB-35 streamlined approval".to_string(),
        "Gov Code 65913.4(a)(5): 20% affordability".to_string(),
        "Gov Code 65913.4(c): CEQA exemption".to_string(),
    ]
}

fn sb35_description(facts: &PropertyFacts) -> String {
    format!(
        "UNLOCK: Ministerial approval on {} while the jurisdiction trails its RHNA goals. Requires 20% affordable units.",
        facts.zone
    )
}

// Builder's Remedy

fn builders_remedy_predicate(facts: &PropertyFacts) -> Applicability {
    if !facts.is_residential() {
        return Applicability::NotApplicable(format!(
            "{} is not a residential zone",
            facts.zone
        ));
    }
    if facts.housing_element_compliant {
        // The jurisdiction flag is a required read here: a compliant housing
        // element closes the remedy, and the audit must say so rather than
        // dropping the rule.
        Applicability::NotEligible(
            "jurisdiction's housing element is HCD-compliant; Builder's Remedy is unavailable"
                .to_string(),
        )
    } else {
        Applicability::Eligible(
            "jurisdiction's housing element is out of HCD compliance".to_string(),
        )
    }
}

fn builders_remedy_effect(_facts: &PropertyFacts) -> EffectDelta {
    EffectDelta {
        units: UnitYield::BonusPct(50.0),
        height_bonus_ft: 0.0,
        far_multiplier: 1.0,
        parking: ParkingRelief::ZoneStandard,
        approval: ApprovalPath::Ministerial,
        affordability: Some("20% affordable".to_string()),
    }
}

fn builders_remedy_citations(_facts: &PropertyFacts) -> Vec<String> {
    vec![
        "Gov Code 65589.5: Housing Accountability Act (Builder's Remedy)".to_string(),
        "Gov Code 65589.5(j)(2): 20% affordability".to_string(),
        "Gov Code 65589.5(d): limits on disapproval".to_string(),
    ]
}

fn builders_remedy_description(_facts: &PropertyFacts) -> String {
    "UNLOCK: Available while the local housing element is not HCD-certified; overrides local density limits."
        .to_string()
}

// SB-684

fn sb684_predicate(facts: &PropertyFacts) -> Applicability {
    if !facts.is_multi_family_zone() {
        return Applicability::NotApplicable(format!(
            "{} is not a qualifying multi-family zone",
            facts.zone
        ));
    }
    if facts.lot_area_sqft < SB684_MAX_LOT_SQFT {
        Applicability::Eligible(format!(
            "urban multifamily lot of {:.0} sq ft is under 5 acres",
            facts.lot_area_sqft
        ))
    } else {
        Applicability::NotEligible(format!(
            "lot of {:.0} sq ft is at or above the 5-acre SB-684 ceiling",
            facts.lot_area_sqft
        ))
    }
}

fn sb684_effect(_facts: &PropertyFacts) -> EffectDelta {
    EffectDelta {
        units: UnitYield::SmallSiteCap {
            cap: 10.0,
            floor: 3.0,
        },
        height_bonus_ft: 0.0,
        far_multiplier: 1.0,
        parking: ParkingRelief::ZoneStandard,
        approval: ApprovalPath::Ministerial,
        affordability: None,
    }
}

fn sb684_citations(_facts: &PropertyFacts) -> Vec<String> {
    vec![
        "Gov Code 65913.5: SB-684 small site housing".to_string(),
        "Gov Code 65913.5(a)(1): 10 unit maximum".to_string(),
        "Gov Code 65913.5(b): 60-day approval".to_string(),
    ]
}

fn sb684_description(_facts: &PropertyFacts) -> String {
    "UNLOCK: Up to 10 units on urban lots under 5 acres, ministerial approval in 60 days, no affordability requirement."
        .to_string()
}

// AB-2011

fn ab2011_predicate(facts: &PropertyFacts) -> Applicability {
    if facts.is_commercial() {
        Applicability::Eligible(format!(
            "{} is a commercially zoned parcel eligible for conversion",
            facts.zone
        ))
    } else {
        Applicability::NotApplicable(format!(
            "{} is not a commercial zone; nothing to convert",
            facts.zone
        ))
    }
}

fn ab2011_effect(_facts: &PropertyFacts) -> EffectDelta {
    EffectDelta {
        units: UnitYield::PerLotArea {
            sqft_per_unit: 400.0,
        },
        height_bonus_ft: 0.0,
        far_multiplier: 1.0,
        parking: ParkingRelief::RatioPerUnit(0.5),
        approval: ApprovalPath::Ministerial,
        affordability: Some("15% affordable".to_string()),
    }
}

fn ab2011_citations(_facts: &PropertyFacts) -> Vec<String> {
    vec![
        "Gov Code 65912.111: AB-2011 commercial conversion".to_string(),
        "Gov Code 65912.111(h): 15% affordability".to_string(),
        "Gov Code 65912.111(f): prevailing wage".to_string(),
    ]
}

fn ab2011_description(facts: &PropertyFacts) -> String {
    format!(
        "UNLOCK: Ministerial conversion of commercial {} land to housing at R4-equivalent density.",
        facts.zone
    )
}

// AB-2097

fn ab2097_predicate(facts: &PropertyFacts) -> Applicability {
    let Some(distance) = facts.transit_distance_ft else {
        return Applicability::NotApplicable(
            "transit distance unknown; AB-2097 proximity cannot be verified".to_string(),
        );
    };
    if distance <= TRANSIT_QUALIFYING_FT {
        Applicability::Eligible(format!(
            "within {distance:.0} ft of major transit (half-mile radius)"
        ))
    } else {
        Applicability::NotEligible(format!(
            "{distance:.0} ft from major transit exceeds the half-mile radius"
        ))
    }
}

fn ab2097_effect(_facts: &PropertyFacts) -> EffectDelta {
    EffectDelta {
        units: UnitYield::Baseline,
        height_bonus_ft: 0.0,
        far_multiplier: 1.0,
        parking: ParkingRelief::Eliminated,
        approval: ApprovalPath::Discretionary,
        affordability: None,
    }
}

fn ab2097_citations(_facts: &PropertyFacts) -> Vec<String> {
    vec!["Gov Code 65863.2: AB-2097 parking minimums".to_string()]
}

fn ab2097_description(_facts: &PropertyFacts) -> String {
    "UNLOCK: Within half mile of major transit, no residential parking minimums apply.".to_string()
}

#[cfg(test)]
mod tests {
    use super::super::{Applicability, RuleCatalog, RuleStatus};
    use crate::analysis::facts::{FactBuilder, RawParcelRecord};
    use crate::analysis::PropertyFacts;

    fn facts_for(zone: &str, lot_area: f64, existing_units: u32) -> PropertyFacts {
        FactBuilder::build(RawParcelRecord {
            apn: Some("1111-111-111".to_string()),
            address: Some("100 Example Ave".to_string()),
            lot_area_sqft: Some(lot_area),
            zone: Some(zone.to_string()),
            height_district: Some("1".to_string()),
            existing_units: Some(existing_units),
            ..RawParcelRecord::default()
        })
        .expect("facts build")
    }

    fn status_of(facts: &PropertyFacts, rule_id: &str) -> RuleStatus {
        RuleCatalog::builtin()
            .evaluate(facts)
            .into_iter()
            .find(|outcome| outcome.rule.id == rule_id)
            .map(|outcome| outcome.status)
            .expect("rule registered")
    }

    #[test]
    fn sb9_eligible_on_r1_lot() {
        let facts = facts_for("R1", 6_000.0, 1);
        assert_eq!(status_of(&facts, "sb9_duplex"), RuleStatus::Eligible);
        assert_eq!(status_of(&facts, "sb9_lot_split"), RuleStatus::Eligible);
    }

    #[test]
    fn sb9_lot_split_needs_minimum_lot() {
        let facts = facts_for("R1", 2_000.0, 1);
        assert_eq!(status_of(&facts, "sb9_duplex"), RuleStatus::Eligible);
        assert_eq!(status_of(&facts, "sb9_lot_split"), RuleStatus::NotEligible);
    }

    #[test]
    fn toc_not_applicable_for_single_family_zone() {
        let facts = facts_for("R1", 6_000.0, 1);
        assert_eq!(status_of(&facts, "toc"), RuleStatus::NotApplicable);
    }

    #[test]
    fn toc_not_applicable_without_transit_distance() {
        let facts = facts_for("R4", 10_000.0, 4);
        assert_eq!(status_of(&facts, "toc"), RuleStatus::NotApplicable);
        assert_eq!(status_of(&facts, "ab2097"), RuleStatus::NotApplicable);
    }

    #[test]
    fn toc_tier_scales_with_distance() {
        let mut facts = facts_for("R4", 10_000.0, 4);
        facts.transit_distance_ft = Some(600.0);
        assert_eq!(super::toc_tier(&facts), Some(3));
        facts.transit_distance_ft = Some(1_000.0);
        assert_eq!(super::toc_tier(&facts), Some(2));
        facts.transit_distance_ft = Some(2_500.0);
        assert_eq!(super::toc_tier(&facts), Some(1));
        facts.transit_distance_ft = Some(4_000.0);
        assert_eq!(super::toc_tier(&facts), None);
        assert_eq!(status_of(&facts, "toc"), RuleStatus::NotEligible);
    }

    #[test]
    fn builders_remedy_not_eligible_when_jurisdiction_compliant() {
        let facts = facts_for("R3", 8_000.0, 2);
        assert!(facts.housing_element_compliant);

        let outcome = RuleCatalog::builtin()
            .evaluate(&facts)
            .into_iter()
            .find(|outcome| outcome.rule.id == "builders_remedy")
            .expect("rule registered");
        assert_eq!(outcome.status, RuleStatus::NotEligible);
        assert!(outcome.reason.contains("compliant"));
    }

    #[test]
    fn builders_remedy_opens_when_jurisdiction_noncompliant() {
        let mut facts = facts_for("R3", 8_000.0, 2);
        facts.housing_element_compliant = false;
        assert!(matches!(
            super::builders_remedy_predicate(&facts),
            Applicability::Eligible(_)
        ));
    }

    #[test]
    fn sb684_limited_to_small_multifamily_lots() {
        let small = facts_for("R3", 8_000.0, 2);
        assert_eq!(status_of(&small, "sb684"), RuleStatus::Eligible);

        let huge = facts_for("R3", 300_000.0, 2);
        assert_eq!(status_of(&huge, "sb684"), RuleStatus::NotEligible);

        let r1 = facts_for("R1", 8_000.0, 1);
        assert_eq!(status_of(&r1, "sb684"), RuleStatus::NotApplicable);
    }

    #[test]
    fn ab2011_only_speaks_to_commercial_zones() {
        let commercial = facts_for("C2", 20_000.0, 0);
        assert_eq!(status_of(&commercial, "ab2011"), RuleStatus::Eligible);

        let residential = facts_for("R4", 20_000.0, 0);
        assert_eq!(status_of(&residential, "ab2011"), RuleStatus::NotApplicable);
    }

    #[test]
    fn by_right_always_eligible() {
        for zone in ["R1", "R4", "C2"] {
            let facts = facts_for(zone, 10_000.0, 0);
            assert_eq!(status_of(&facts, "by_right"), RuleStatus::Eligible);
        }
    }
}
