use serde::{Deserialize, Serialize};

use super::tables;
use crate::error::AnalysisError;

/// Parcel record as handed over by the data-fetch layer, before validation.
/// Optional everywhere; the fact builder decides what is actually required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawParcelRecord {
    #[serde(default)]
    pub apn: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub lot_area_sqft: Option<f64>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub height_district: Option<String>,
    #[serde(default)]
    pub density_factor_sqft: Option<f64>,
    #[serde(default)]
    pub height_limit_ft: Option<f64>,
    #[serde(default)]
    pub far_limit: Option<f64>,
    #[serde(default)]
    pub existing_units: Option<u32>,
    #[serde(default)]
    pub year_built: Option<u16>,
    #[serde(default)]
    pub overlays: OverlayFlags,
    #[serde(default)]
    pub hazards: HazardFlags,
    #[serde(default)]
    pub transit_distance_ft: Option<f64>,
    #[serde(default)]
    pub housing_element_compliant: Option<bool>,
}

/// Planning overlay designations. Optional data: absent means not designated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayFlags {
    #[serde(default)]
    pub specific_plan: bool,
    #[serde(default)]
    pub cpio: bool,
    #[serde(default)]
    pub hpoz: bool,
    #[serde(default)]
    pub historic_resource: bool,
}

/// Environmental hazard designations. Optional data: absent means clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardFlags {
    #[serde(default)]
    pub fault_zone: bool,
    #[serde(default)]
    pub liquefaction: bool,
    #[serde(default)]
    pub very_high_fire: bool,
    #[serde(default)]
    pub methane: bool,
    #[serde(default)]
    pub landslide: bool,
    #[serde(default)]
    pub flood: bool,
}

impl HazardFlags {
    pub fn count(self) -> usize {
        [
            self.fault_zone,
            self.liquefaction,
            self.very_high_fire,
            self.methane,
            self.landslide,
            self.flood,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count()
    }
}

/// Canonical, validated parcel facts. Built once per request and never
/// mutated afterwards; every downstream component reads from this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFacts {
    pub apn: String,
    pub address: String,
    pub lot_area_sqft: f64,
    pub zone: String,
    pub height_district: String,
    pub density_factor_sqft: f64,
    pub height_limit_ft: f64,
    pub far_limit: f64,
    pub existing_units: u32,
    pub year_built: Option<u16>,
    pub overlays: OverlayFlags,
    pub hazards: HazardFlags,
    pub transit_distance_ft: Option<f64>,
    pub housing_element_compliant: bool,
}

impl PropertyFacts {
    /// By-right unit capacity: lot area over the zone density factor.
    /// Fractional values are semantically valid and kept unrounded.
    pub fn baseline_units(&self) -> f64 {
        self.lot_area_sqft / self.density_factor_sqft
    }

    pub fn complete_zone(&self) -> String {
        format!("{}-{}", self.zone, self.height_district)
    }

    pub fn is_residential(&self) -> bool {
        self.zone.starts_with('R')
    }

    /// Multi-family zones, i.e. residential zones other than R1/RS.
    pub fn is_multi_family_zone(&self) -> bool {
        self.is_residential() && self.zone != "R1" && self.zone != "RS"
    }

    pub fn is_commercial(&self) -> bool {
        self.zone.starts_with('C')
    }

    pub fn zone_family(&self) -> &'static str {
        tables::zone_family(&self.zone)
    }

    /// Rent-stabilization eligibility: multi-family building (2+ existing
    /// units) constructed before 1978. Unknown construction year means the
    /// replacement floor is not assumed.
    pub fn is_rent_stabilized(&self) -> bool {
        self.existing_units >= 2 && self.year_built.map(|year| year < 1978).unwrap_or(false)
    }
}

/// Normalizes a raw parcel record into immutable [`PropertyFacts`].
pub struct FactBuilder;

impl FactBuilder {
    /// Validates required facts and resolves the zoning envelope from the
    /// static tables when the raw record does not carry explicit values.
    ///
    /// Missing or non-positive required fields abort the whole analysis: the
    /// density arithmetic downstream has no safe default to fall back on.
    pub fn build(raw: RawParcelRecord) -> Result<PropertyFacts, AnalysisError> {
        let zone_input = raw
            .zone
            .as_deref()
            .map(str::trim)
            .filter(|zone| !zone.is_empty())
            .ok_or(AnalysisError::DataIncomplete { field: "zone" })?;

        // Zone strings like "R4-2" fold the height district into the zone.
        let (zone, district_from_zone) = match zone_input.split_once('-') {
            Some((base, district)) => (base.to_string(), Some(district.to_string())),
            None => (zone_input.to_string(), None),
        };

        let height_district = raw
            .height_district
            .as_deref()
            .map(str::trim)
            .filter(|district| !district.is_empty())
            .map(str::to_string)
            .or(district_from_zone)
            .ok_or(AnalysisError::DataIncomplete {
                field: "height_district",
            })?;

        let lot_area_sqft = raw
            .lot_area_sqft
            .filter(|area| *area > 0.0)
            .ok_or(AnalysisError::DataIncomplete {
                field: "lot_area_sqft",
            })?;

        let existing_units = raw.existing_units.ok_or(AnalysisError::DataIncomplete {
            field: "existing_units",
        })?;

        let density_factor_sqft = match raw.density_factor_sqft {
            Some(factor) if factor > 0.0 => factor,
            Some(_) => {
                return Err(AnalysisError::DataIncomplete {
                    field: "density_factor_sqft",
                })
            }
            None => {
                tables::density_factor_sqft(&zone).unwrap_or(tables::FALLBACK_DENSITY_FACTOR)
            }
        };

        let height_limit_ft = raw.height_limit_ft.unwrap_or_else(|| {
            tables::height_limit_ft(&height_district).unwrap_or(tables::NO_LIMIT_HEIGHT_FT)
        });
        let far_limit = raw
            .far_limit
            .unwrap_or_else(|| tables::far_limit(&height_district));

        Ok(PropertyFacts {
            apn: raw.apn.unwrap_or_default(),
            address: raw.address.unwrap_or_default(),
            lot_area_sqft,
            zone,
            height_district,
            density_factor_sqft,
            height_limit_ft,
            far_limit,
            existing_units,
            year_built: raw.year_built,
            overlays: raw.overlays,
            hazards: raw.hazards,
            transit_distance_ft: raw.transit_distance_ft,
            housing_element_compliant: raw.housing_element_compliant.unwrap_or(true),
        })
    }
}
