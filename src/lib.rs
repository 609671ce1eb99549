//! Entitlement analysis engine for Los Angeles parcels.
//!
//! Given a normalized description of a parcel's zoning envelope and regulatory
//! attributes, the engine evaluates every incentive program in a static rule
//! catalog, synthesizes one development scenario per eligible program, attaches
//! revenue estimates, and ranks the results into a short recommendation set
//! plus a complete rule-by-rule audit table.
//!
//! The engine is a pure, synchronous computation: all I/O (geocoding, GIS and
//! assessor retrieval, HTTP transport) lives in outer layers. Identical inputs
//! always produce identical output.

pub mod analysis;
pub mod config;
pub mod error;
pub mod telemetry;

pub use analysis::{AnalysisReport, EntitlementEngine, RawParcelRecord};
pub use config::{AppConfig, MarketAssumptions, MarketBook, RoundingPolicy};
pub use error::{AnalysisError, ConfigurationIncomplete};
