//! Serialized views handed to the presentation layer. Views are where the
//! configurable unit-rounding policy applies; internal values stay fractional.

use serde::Serialize;

use crate::analysis::audit::AuditRow;
use crate::analysis::ranking::Recommendations;

/// The complete analysis bundle for one parcel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub property_summary: String,
    pub base_zoning: BaseZoningView,
    pub development_scenarios: Vec<ScenarioView>,
    pub rules_audit: Vec<AuditRow>,
    pub recommendations: Recommendations,
    pub bottom_line: String,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseZoningView {
    pub zone: String,
    pub height_district: String,
    pub complete_zone: String,
    pub density_factor_sqft: f64,
    pub baseline_units: f64,
    pub height_limit_ft: f64,
    pub far_limit: f64,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioView {
    pub name: String,
    pub description: String,
    pub total_units: f64,
    pub net_new_units: f64,
    pub height_ft: f64,
    pub far: f64,
    pub parking_spaces: f64,
    pub affordability_required: String,
    pub approval_path: &'static str,
    pub recommendation_score: f64,
    pub recommendation_reason: String,
    pub gpr: Option<f64>,
    pub noi: Option<f64>,
    pub property_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_note: Option<String>,
    pub unit_calculation_justification: String,
    pub legal_citations: Vec<String>,
    pub key_benefits: Vec<String>,
    pub constraints: Vec<String>,
    pub feasibility: &'static str,
    pub feasibility_reason: String,
}
