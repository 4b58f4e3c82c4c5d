//! Loading config files from disk.

use std::path::Path;

use chrono::TimeDelta;
use kaal_config::{ConfigError, KaalConfig};

const EXAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../kaal.example.toml");

#[test]
fn example_file_loads_and_converts() {
    let cfg = KaalConfig::load(Some(Path::new(EXAMPLE))).unwrap();
    assert_eq!(cfg.timezone().unwrap(), chrono_tz::Asia::Kolkata);

    let loc = cfg.location().unwrap().unwrap();
    assert!((loc.latitude_deg - 23.0225).abs() < 1e-12);

    let boundary = cfg.boundary_config().unwrap();
    assert_eq!(boundary.bisection_iterations, 12);
    assert_eq!(boundary.probe_step, TimeDelta::hours(1));

    let scan = cfg.scan_config().unwrap();
    assert_eq!(scan.step, TimeDelta::minutes(15));

    let panchang = cfg.panchang_config().unwrap();
    assert_eq!(panchang.boundary, boundary);
    assert_eq!(panchang.timezone, chrono_tz::Asia::Kolkata);

    assert_eq!(cfg.dasha_config().unwrap().depth, 3);
    assert!(cfg.oracle_config().unwrap().sidereal);
}

#[test]
fn written_file_round_trips() {
    let path = std::env::temp_dir().join(format!("kaal_config_{}.toml", std::process::id()));
    let mut cfg = KaalConfig::default();
    cfg.dasha.depth = 2;
    cfg.timezone = "America/New_York".to_string();
    std::fs::write(&path, toml::to_string(&cfg).unwrap()).unwrap();

    let loaded = KaalConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, cfg);
    assert_eq!(loaded.dasha_config().unwrap().depth, 2);
}

#[test]
fn malformed_toml_reports_parse_error() {
    let err = KaalConfig::from_toml_str("[dasha\ndepth = 2").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("cannot parse config"));
}
