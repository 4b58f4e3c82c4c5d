use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{NaiveDate, TimeDelta};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand, ValueEnum};
use kaal_config::KaalConfig;
use kaal_oracle::{Body, MeanMotionOracle, Oracle};
use kaal_search::{
    BoundaryConfig, BoundaryPolicy, MuhurtaActivity, PanchangElement, SIDEREAL_MONTH_DAYS,
    ScanConfig, day_tables, element_index, find_boundary, find_muhurta, panchang_elements,
};
use kaal_time::{GeoLocation, Instant, Interval, delta_from_days, parse_utc};
use kaal_vedic_base::{
    Classifier, DashaConfig, Graha, PeriodNode, lifetime_snapshot, lifetime_tree,
};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kaal", about = "Kaal panchang, muhurta and dasha CLI")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
struct LocationArgs {
    /// Latitude in degrees (north positive)
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Longitude in degrees (east positive)
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,
    /// Altitude in meters
    #[arg(long, default_value = "0")]
    alt: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ClassifierArg {
    Tithi,
    Nakshatra,
    Yoga,
    Karana,
    Rashi,
}

impl ClassifierArg {
    fn classifier(self) -> Classifier {
        match self {
            Self::Tithi => Classifier::Tithi,
            Self::Nakshatra => Classifier::Nakshatra,
            Self::Yoga => Classifier::Yoga,
            Self::Karana => Classifier::Karana,
            Self::Rashi => Classifier::Rashi,
        }
    }

    fn element(self) -> Option<PanchangElement> {
        match self {
            Self::Tithi => Some(PanchangElement::Tithi),
            Self::Nakshatra => Some(PanchangElement::Nakshatra),
            Self::Yoga => Some(PanchangElement::Yoga),
            Self::Karana => Some(PanchangElement::Karana),
            Self::Rashi => None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Vimshottari dasha tree, or the active chain with --at
    Dasha {
        /// Birth UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        birth: String,
        #[command(flatten)]
        location: LocationArgs,
        /// Show only the periods active at this UTC datetime
        #[arg(long)]
        at: Option<String>,
        /// Levels below the root (1-5), overrides the config
        #[arg(long)]
        depth: Option<u8>,
        /// Sidereal Moon longitude at birth, instead of the oracle's
        #[arg(long)]
        moon_lon: Option<f64>,
    },
    /// Next change of a tithi, nakshatra, yoga, karana or Moon rashi
    Boundary {
        #[arg(value_enum)]
        classifier: ClassifierArg,
        /// UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        date: String,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// The five panchang elements and when each ends
    Panchang {
        /// UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        date: String,
        #[command(flatten)]
        location: LocationArgs,
        /// IANA time zone, overrides the config
        #[arg(long)]
        tz: Option<String>,
        /// Use the mean period when a boundary is not found
        #[arg(long)]
        fallback: bool,
    },
    /// Sunrise, sunset, choghadiya, horas and kalams of a local date
    Day {
        /// Local civil date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[command(flatten)]
        location: LocationArgs,
        /// IANA time zone, overrides the config
        #[arg(long)]
        tz: Option<String>,
    },
    /// Muhurta windows for an activity
    Muhurta {
        /// Activity preset (vehicle-purchase, marriage, griha-pravesh,
        /// new-business, namakarana, property-purchase)
        #[arg(long)]
        activity: String,
        /// Start UTC datetime
        #[arg(long)]
        from: String,
        /// End UTC datetime
        #[arg(long)]
        to: String,
        #[command(flatten)]
        location: LocationArgs,
        /// IANA time zone, overrides the config
        #[arg(long)]
        tz: Option<String>,
        /// Scan step in minutes, overrides the config
        #[arg(long)]
        step_minutes: Option<i64>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn resolve_location(args: &LocationArgs, config: &KaalConfig) -> Result<GeoLocation> {
    let location = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => GeoLocation::new(lat, lon, args.alt),
        (None, None) => config
            .location()?
            .ok_or_else(|| anyhow!("--lat/--lon required (or [location] in the config)"))?,
        _ => bail!("--lat and --lon must be given together"),
    };
    location.validate()?;
    Ok(location)
}

fn resolve_timezone(tz: Option<&str>, config: &KaalConfig) -> Result<Tz> {
    match tz {
        Some(name) => name
            .parse::<Tz>()
            .map_err(|_| anyhow!("unknown time zone: {name}")),
        None => Ok(config.timezone()?),
    }
}

fn parse_instant(s: &str, location: GeoLocation) -> Result<Instant> {
    Ok(Instant::new(parse_utc(s)?, location))
}

fn load_oracle(config: &KaalConfig) -> Result<MeanMotionOracle> {
    Ok(MeanMotionOracle::new(config.oracle_config()?))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_period(node: &PeriodNode<Graha>, indent: usize) {
    let label = node.dasha_level().map_or("Root", |l| l.name());
    let partial = if node.is_partial() { " (partial)" } else { "" };
    println!(
        "{:indent$}{} {}: {} .. {}{}",
        "",
        label,
        node.ruler(),
        node.start(),
        node.end(),
        partial,
        indent = indent * 2
    );
    for child in node.children() {
        print_period(child, indent + 1);
    }
}

/// Search horizon for a classifier: its mean period times the configured factor.
fn boundary_config_for(arg: ClassifierArg, config: &KaalConfig) -> Result<BoundaryConfig> {
    let panchang = config.panchang_config()?;
    let boundary = match arg.element() {
        Some(element) => panchang.boundary_for(element),
        None => {
            let nominal = delta_from_days(SIDEREAL_MONTH_DAYS / 12.0)
                .context("rashi period out of range")?;
            BoundaryConfig::for_nominal(nominal, panchang.horizon_factor).map(|b| {
                BoundaryConfig {
                    probe_step: panchang.boundary.probe_step,
                    bisection_iterations: panchang.boundary.bisection_iterations,
                    ..b
                }
            })
        }
    };
    boundary.context("search horizon out of range")
}

fn cmd_dasha(
    config: &KaalConfig,
    json: bool,
    birth: &str,
    location: &LocationArgs,
    at: Option<&str>,
    depth: Option<u8>,
    moon_lon: Option<f64>,
) -> Result<()> {
    let location = resolve_location(location, config)?;
    let birth = parse_instant(birth, location)?;
    let mut dasha: DashaConfig = config.dasha_config()?;
    if let Some(d) = depth {
        dasha.depth = d;
    }
    let moon = match moon_lon {
        Some(lon) => lon,
        None => load_oracle(config)?.longitude(&birth, Body::Moon)?,
    };
    debug!(moon_lon = moon, depth = dasha.depth, "dasha request");

    match at {
        Some(at) => {
            let at = parse_instant(at, location)?;
            let chain = lifetime_snapshot(birth, moon, &at, &dasha)?;
            if json {
                return print_json(&chain);
            }
            if chain.is_empty() {
                println!("{at} is outside the dasha cycle");
            }
            for node in &chain {
                let label = node.dasha_level().map_or("Root", |l| l.name());
                println!("{label}: {} ({} .. {})", node.ruler(), node.start(), node.end());
            }
        }
        None => {
            let tree = lifetime_tree(birth, moon, &dasha)?;
            if json {
                return print_json(&tree);
            }
            for mahadasha in tree.children() {
                print_period(mahadasha, 0);
            }
        }
    }
    Ok(())
}

fn cmd_boundary(
    config: &KaalConfig,
    json: bool,
    arg: ClassifierArg,
    date: &str,
    location: &LocationArgs,
) -> Result<()> {
    let location = resolve_location(location, config)?;
    let start = parse_instant(date, location)?;
    let oracle = load_oracle(config)?;
    let classifier = arg.classifier();
    let boundary = boundary_config_for(arg, config)?;

    let index = element_index(&oracle, classifier, &start)?;
    let end = find_boundary(
        &start,
        index,
        |t| element_index(&oracle, classifier, t),
        &boundary,
    )?;
    let next = element_index(&oracle, classifier, &end)?;
    if json {
        return print_json(&json!({
            "classifier": classifier,
            "index": index,
            "end": end,
            "next_index": next,
        }));
    }
    println!("{} {} ends at {}", classifier.name(), index, end);
    println!("  Next: {} {}", classifier.name(), next);
    Ok(())
}

fn cmd_panchang(
    config: &KaalConfig,
    json: bool,
    date: &str,
    location: &LocationArgs,
    tz: Option<&str>,
    fallback: bool,
) -> Result<()> {
    let location = resolve_location(location, config)?;
    let at = parse_instant(date, location)?;
    let mut panchang = config.panchang_config()?;
    panchang.timezone = resolve_timezone(tz, config)?;
    let policy = if fallback {
        BoundaryPolicy::NominalFallback
    } else {
        BoundaryPolicy::Strict
    };
    let oracle = load_oracle(config)?;
    let elements = panchang_elements(&oracle, &at, &panchang, policy);

    if json {
        let entries: Vec<_> = elements
            .all()
            .into_iter()
            .map(|(element, result)| match result {
                Ok(span) => json!({ "element": element, "span": span }),
                Err(e) => json!({ "element": element, "error": e.to_string() }),
            })
            .collect();
        return print_json(&json!({ "at": at, "elements": entries }));
    }

    println!("Panchang at {at}");
    for (element, result) in elements.all() {
        match result {
            Ok(span) => {
                let estimated = if span.estimated { " (estimated)" } else { "" };
                println!(
                    "  {:<10} {:>2}  until {}{}",
                    element.name(),
                    span.index,
                    span.end,
                    estimated
                );
            }
            Err(e) => println!("  {:<10} error: {e}", element.name()),
        }
    }
    Ok(())
}

fn cmd_day(
    config: &KaalConfig,
    json: bool,
    date: &str,
    location: &LocationArgs,
    tz: Option<&str>,
) -> Result<()> {
    let location = resolve_location(location, config)?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("expected YYYY-MM-DD, got {date}"))?;
    let tz = resolve_timezone(tz, config)?;
    let oracle = load_oracle(config)?;
    let day = day_tables(&oracle, date, &location, &tz)?;
    if json {
        return print_json(&day);
    }

    let local = |t: Instant| t.local(&tz).format("%Y-%m-%d %H:%M:%S %Z").to_string();
    println!("{} ({})", day.date, day.weekday);
    println!("  Sunrise:      {}", local(day.parts.sunrise()));
    println!("  Sunset:       {}", local(day.parts.sunset()));
    println!("  Next sunrise: {}", local(day.parts.next_sunrise()));
    println!("Choghadiya:");
    for slot in &day.choghadiya {
        println!(
            "  {:<6} {:<8} {} .. {}",
            slot.choghadiya.name(),
            format!("{:?}", slot.nature),
            local(slot.interval.start()),
            local(slot.interval.end())
        );
    }
    println!("Horas:");
    for slot in &day.horas {
        println!(
            "  {:>2} {:<8} {} .. {}",
            slot.hora_index,
            slot.lord.name(),
            local(slot.interval.start()),
            local(slot.interval.end())
        );
    }
    println!("Kalams:");
    for slot in &day.kalams {
        println!(
            "  {:<12} {} .. {}",
            slot.kalam.name(),
            local(slot.interval.start()),
            local(slot.interval.end())
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_muhurta(
    config: &KaalConfig,
    json: bool,
    activity: &str,
    from: &str,
    to: &str,
    location: &LocationArgs,
    tz: Option<&str>,
    step_minutes: Option<i64>,
) -> Result<()> {
    let activity = MuhurtaActivity::from_name(activity)
        .with_context(|| format!("unknown activity: {activity}"))?;
    let location = resolve_location(location, config)?;
    let interval = Interval::new(parse_instant(from, location)?, parse_instant(to, location)?)?;
    let mut scan: ScanConfig = config.scan_config()?;
    scan.timezone = resolve_timezone(tz, config)?;
    if let Some(minutes) = step_minutes {
        scan.step = TimeDelta::try_minutes(minutes).context("step out of range")?;
    }
    let oracle = load_oracle(config)?;
    let windows = find_muhurta(&oracle, &interval, activity, &scan)?;
    if json {
        return print_json(&windows);
    }

    println!("{activity}: {} window(s)", windows.len());
    for w in &windows {
        println!(
            "  {} .. {}  {:<7} {}",
            w.start().local(&scan.timezone).format("%Y-%m-%d %H:%M"),
            w.end().local(&scan.timezone).format("%Y-%m-%d %H:%M"),
            w.quality().name(),
            w.factors().join(", ")
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = KaalConfig::load(cli.config.as_deref())?;
    let json = cli.json;
    match cli.command {
        Commands::Dasha {
            birth,
            location,
            at,
            depth,
            moon_lon,
        } => cmd_dasha(
            &config,
            json,
            &birth,
            &location,
            at.as_deref(),
            depth,
            moon_lon,
        ),
        Commands::Boundary {
            classifier,
            date,
            location,
        } => cmd_boundary(&config, json, classifier, &date, &location),
        Commands::Panchang {
            date,
            location,
            tz,
            fallback,
        } => cmd_panchang(&config, json, &date, &location, tz.as_deref(), fallback),
        Commands::Day { date, location, tz } => {
            cmd_day(&config, json, &date, &location, tz.as_deref())
        }
        Commands::Muhurta {
            activity,
            from,
            to,
            location,
            tz,
            step_minutes,
        } => cmd_muhurta(
            &config,
            json,
            &activity,
            &from,
            &to,
            &location,
            tz.as_deref(),
            step_minutes,
        ),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
