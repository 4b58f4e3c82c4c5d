//! On-disk configuration layout.
//!
//! A config file is a TOML document with one table per runtime config.
//! Every table and every key is optional; omitted values take the runtime
//! type's default.
//!
//! ```toml
//! timezone = "Asia/Kolkata"
//!
//! [location]
//! latitude_deg = 23.02
//! longitude_deg = 72.57
//!
//! [boundary]
//! probe_step_minutes = 30.0
//!
//! [dasha]
//! depth = 2
//! ```

use std::fs;
use std::path::Path;

use chrono::TimeDelta;
use chrono_tz::Tz;
use kaal_oracle::MeanMotionConfig;
use kaal_search::{BoundaryConfig, PanchangConfig, ScanConfig};
use kaal_time::{GeoLocation, delta_from_days, delta_to_days};
use kaal_vedic_base::DashaConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

const MINUTES_PER_DAY: f64 = 1_440.0;

/// Complete configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KaalConfig {
    /// IANA zone whose civil dates define Vedic days.
    pub timezone: String,
    /// Default observer; commands may override it.
    pub location: Option<GeoLocation>,
    pub boundary: BoundarySection,
    pub panchang: PanchangSection,
    pub scan: ScanSection,
    pub dasha: DashaSection,
    pub oracle: OracleSection,
}

impl Default for KaalConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            location: None,
            boundary: BoundarySection::default(),
            panchang: PanchangSection::default(),
            scan: ScanSection::default(),
            dasha: DashaSection::default(),
            oracle: OracleSection::default(),
        }
    }
}

/// `[boundary]`: probing and bisection.
///
/// Element horizons come from `[panchang] horizon_factor`, so there is no
/// horizon key here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundarySection {
    pub probe_step_minutes: f64,
    pub bisection_iterations: u32,
}

impl Default for BoundarySection {
    fn default() -> Self {
        let config = BoundaryConfig::default();
        Self {
            probe_step_minutes: delta_to_days(config.probe_step) * MINUTES_PER_DAY,
            bisection_iterations: config.bisection_iterations,
        }
    }
}

/// `[panchang]`: element horizons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanchangSection {
    /// Horizon as a multiple of the element's mean period.
    pub horizon_factor: f64,
}

impl Default for PanchangSection {
    fn default() -> Self {
        Self {
            horizon_factor: PanchangConfig::default().horizon_factor,
        }
    }
}

/// `[scan]`: window scanner step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSection {
    pub step_minutes: f64,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            step_minutes: delta_to_days(ScanConfig::default().step) * MINUTES_PER_DAY,
        }
    }
}

/// `[dasha]`: lifetime tree shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashaSection {
    pub days_per_year: f64,
    pub depth: u8,
}

impl Default for DashaSection {
    fn default() -> Self {
        let config = DashaConfig::default();
        Self {
            days_per_year: config.days_per_year,
            depth: config.depth,
        }
    }
}

/// `[oracle]`: reference oracle parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OracleSection {
    pub sidereal: bool,
    pub ayanamsha_j2000_deg: f64,
    pub precession_deg_per_century: f64,
    pub rise_altitude_deg: f64,
}

impl Default for OracleSection {
    fn default() -> Self {
        let config = MeanMotionConfig::default();
        Self {
            sidereal: config.sidereal,
            ayanamsha_j2000_deg: config.ayanamsha_j2000_deg,
            precession_deg_per_century: config.precession_deg_per_century,
            rise_altitude_deg: config.rise_altitude_deg,
        }
    }
}

fn span(value: f64, per_day: f64, section: &'static str) -> Result<TimeDelta, ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::invalid(section)("durations must be positive"));
    }
    delta_from_days(value / per_day)
        .ok_or_else(|| ConfigError::invalid(section)("duration out of range"))
}

impl KaalConfig {
    /// Read and parse a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading config");
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The file at `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::invalid("timezone")("unknown IANA time zone"))
    }

    /// The configured observer, validated.
    pub fn location(&self) -> Result<Option<GeoLocation>, ConfigError> {
        let Some(location) = self.location else {
            return Ok(None);
        };
        if location.validate().is_err() {
            return Err(ConfigError::invalid("location")(
                "latitude must be within [-90, 90] and longitude within [-180, 180]",
            ));
        }
        Ok(Some(location))
    }

    pub fn boundary_config(&self) -> Result<BoundaryConfig, ConfigError> {
        let section = &self.boundary;
        let config = BoundaryConfig {
            probe_step: span(section.probe_step_minutes, MINUTES_PER_DAY, "boundary")?,
            bisection_iterations: section.bisection_iterations,
            search_horizon: BoundaryConfig::default().search_horizon,
        };
        config.validate().map_err(ConfigError::invalid("boundary"))?;
        Ok(config)
    }

    pub fn panchang_config(&self) -> Result<PanchangConfig, ConfigError> {
        let config = PanchangConfig {
            boundary: self.boundary_config()?,
            horizon_factor: self.panchang.horizon_factor,
            timezone: self.timezone()?,
        };
        config.validate().map_err(ConfigError::invalid("panchang"))?;
        Ok(config)
    }

    pub fn scan_config(&self) -> Result<ScanConfig, ConfigError> {
        let config = ScanConfig {
            step: span(self.scan.step_minutes, MINUTES_PER_DAY, "scan")?,
            timezone: self.timezone()?,
        };
        config.validate().map_err(ConfigError::invalid("scan"))?;
        Ok(config)
    }

    pub fn dasha_config(&self) -> Result<DashaConfig, ConfigError> {
        let config = DashaConfig {
            days_per_year: self.dasha.days_per_year,
            depth: self.dasha.depth,
        };
        config.validate().map_err(ConfigError::invalid("dasha"))?;
        Ok(config)
    }

    pub fn oracle_config(&self) -> Result<MeanMotionConfig, ConfigError> {
        let section = &self.oracle;
        let config = MeanMotionConfig {
            sidereal: section.sidereal,
            ayanamsha_j2000_deg: section.ayanamsha_j2000_deg,
            precession_deg_per_century: section.precession_deg_per_century,
            rise_altitude_deg: section.rise_altitude_deg,
        };
        config.validate().map_err(ConfigError::invalid("oracle"))?;
        Ok(config)
    }
}
