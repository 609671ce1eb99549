//! Failure taxonomy for the analysis pipeline.
//!
//! The engine performs no I/O, so every failure here is deterministic given
//! the same input and is reproducible by construction rather than by retry.

/// Aborts the whole analysis for a property. Raised by the fact builder when a
/// required field is missing or invalid; no partial bundle is returned because
/// downstream density arithmetic has no safe default.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("required parcel fact missing or invalid: {field}")]
    DataIncomplete { field: &'static str },
}

/// Aborts a single scenario's financial annotation only. The scenario stays in
/// the bundle with null revenue fields and a note, since the unit and legal
/// analysis remains valid without market data.
#[derive(Debug, thiserror::Error)]
#[error("no market assumptions configured for zone family '{zone_family}'")]
pub struct ConfigurationIncomplete {
    pub zone_family: String,
}
