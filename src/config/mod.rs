use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationIncomplete;

/// Top-level configuration for the engine process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    pub unit_rounding: RoundingPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let unit_rounding = match env::var("APP_UNIT_ROUNDING") {
            Ok(value) => RoundingPolicy::from_str(&value)?,
            Err(_) => RoundingPolicy::Exact,
        };

        Ok(Self {
            telemetry: TelemetryConfig { log_level },
            unit_rounding,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// How fractional unit counts are rounded at the presentation boundary.
///
/// Internal unit math always stays fractional; this policy applies only when
/// scenario views are assembled for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Report the computed value unrounded.
    Exact,
    /// Round to the nearest whole unit.
    Nearest,
    /// Round down to the whole unit count that could actually be built.
    Floor,
}

impl RoundingPolicy {
    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "nearest" => Ok(Self::Nearest),
            "floor" => Ok(Self::Floor),
            other => Err(ConfigError::InvalidRoundingPolicy {
                value: other.to_string(),
            }),
        }
    }

    pub fn apply(self, units: f64) -> f64 {
        match self {
            Self::Exact => units,
            Self::Nearest => units.round(),
            Self::Floor => units.floor(),
        }
    }
}

/// Market parameters for one zone family, externally supplied so revenue math
/// stays reproducible and auditable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketAssumptions {
    pub monthly_rent: f64,
    pub operating_expense_ratio: f64,
    pub cap_rate: f64,
}

#[derive(Debug, Deserialize)]
struct MarketRow {
    zone_family: String,
    monthly_rent: f64,
    operating_expense_ratio: f64,
    cap_rate: f64,
}

/// Per-zone-family market assumptions, loaded once at process start and
/// treated as read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MarketBook {
    assumptions: BTreeMap<String, MarketAssumptions>,
}

impl MarketBook {
    pub fn from_csv_path(path: &Path) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path).map_err(|source| ConfigError::MarketTableIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let mut book = MarketBook::default();
        let mut csv_reader = csv::Reader::from_reader(reader);
        for row in csv_reader.deserialize::<MarketRow>() {
            let row = row.map_err(ConfigError::MarketTableParse)?;
            book.assumptions.insert(
                row.zone_family,
                MarketAssumptions {
                    monthly_rent: row.monthly_rent,
                    operating_expense_ratio: row.operating_expense_ratio,
                    cap_rate: row.cap_rate,
                },
            );
        }
        Ok(book)
    }

    pub fn insert(&mut self, zone_family: impl Into<String>, assumptions: MarketAssumptions) {
        self.assumptions.insert(zone_family.into(), assumptions);
    }

    pub fn lookup(&self, zone_family: &str) -> Result<MarketAssumptions, ConfigurationIncomplete> {
        self.assumptions
            .get(zone_family)
            .copied()
            .filter(|assumptions| assumptions.cap_rate > 0.0)
            .ok_or_else(|| ConfigurationIncomplete {
                zone_family: zone_family.to_string(),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.assumptions.is_empty()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidRoundingPolicy { value: String },
    MarketTableIo { path: String, source: std::io::Error },
    MarketTableParse(csv::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRoundingPolicy { value } => {
                write!(
                    f,
                    "APP_UNIT_ROUNDING must be one of exact|nearest|floor, got '{value}'"
                )
            }
            ConfigError::MarketTableIo { path, .. } => {
                write!(f, "unable to read market assumptions table at {path}")
            }
            ConfigError::MarketTableParse(err) => {
                write!(f, "malformed market assumptions row: {err}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidRoundingPolicy { .. } => None,
            ConfigError::MarketTableIo { source, .. } => Some(source),
            ConfigError::MarketTableParse(err) => Some(err),
        }
    }
}
