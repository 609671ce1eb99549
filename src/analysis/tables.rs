//! Static zoning tables from the LA Municipal Code.
//!
//! These are process-wide, immutable reference data: density factors per zone,
//! height and FAR envelopes per height district, and baseline parking ratios.
//! Never mutated per request.

/// Square feet of lot area required per dwelling unit, by base zone.
pub fn density_factor_sqft(zone: &str) -> Option<f64> {
    let factor = match zone {
        "R1" | "RS" => 5000.0,
        "RE" | "RA" | "RD2" => 2000.0,
        "RD1.5" | "RD3" => 1500.0,
        "RD4" => 1200.0,
        "RD5" => 1000.0,
        "RD6" | "RU" | "R2" | "R3" | "RAS3" => 800.0,
        "R4" | "RAS4" => 400.0,
        "R5" => 200.0,
        _ => return None,
    };
    Some(factor)
}

/// Conservative fallback when a zone has no cataloged density factor.
pub const FALLBACK_DENSITY_FACTOR: f64 = 1000.0;

/// Height reported for the no-limit district so the envelope stays numeric.
pub const NO_LIMIT_HEIGHT_FT: f64 = 200.0;

/// Maximum building height in feet, by height district. `None` means the
/// district imposes no height limit.
pub fn height_limit_ft(district: &str) -> Option<f64> {
    match district {
        "1" => Some(45.0),
        "1L" => Some(30.0),
        "1VL" => Some(25.0),
        "1XL" => Some(20.0),
        "2" => Some(75.0),
        "3" => Some(150.0),
        "4" => Some(275.0),
        _ => None,
    }
}

/// Floor-area ratio limit by height district.
pub fn far_limit(district: &str) -> f64 {
    match district {
        "1" | "1L" | "1VL" | "1XL" => 1.5,
        "2" | "3" => 6.0,
        "4" => 13.0,
        _ => 6.0,
    }
}

/// Baseline parking requirement in spaces per unit, by base zone.
pub fn parking_per_unit(zone: &str) -> f64 {
    match zone {
        "R1" | "RS" => 2.0,
        _ => 1.0,
    }
}

/// Market-assumption key for a base zone. Revenue parameters are configured
/// per family rather than per individual zone.
pub fn zone_family(zone: &str) -> &'static str {
    match zone {
        "R1" | "RS" | "RE" | "RA" => "single_family",
        "R2" | "R3" | "RU" | "RAS3" | "RD1.5" | "RD2" | "RD3" | "RD4" | "RD5" | "RD6" => {
            "low_rise_multifamily"
        }
        "R4" | "RAS4" => "mid_rise_multifamily",
        "R5" => "high_rise_multifamily",
        zone if zone.starts_with('C') => "commercial_mixed",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_factors_match_municipal_code() {
        assert_eq!(density_factor_sqft("R4"), Some(400.0));
        assert_eq!(density_factor_sqft("R1"), Some(5000.0));
        assert_eq!(density_factor_sqft("R5"), Some(200.0));
        assert_eq!(density_factor_sqft("PF"), None);
    }

    #[test]
    fn height_district_two_allows_seventy_five_feet() {
        assert_eq!(height_limit_ft("2"), Some(75.0));
        assert_eq!(height_limit_ft("NL"), None);
    }

    #[test]
    fn zone_families_group_related_zones() {
        assert_eq!(zone_family("R4"), "mid_rise_multifamily");
        assert_eq!(zone_family("RD4"), "low_rise_multifamily");
        assert_eq!(zone_family("C2"), "commercial_mixed");
    }
}
