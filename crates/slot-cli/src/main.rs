//! `slots` CLI: inspect booking slots for a service from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Slots for one date (service JSON from a file, busy payload from another)
//! slots --now 2026-03-16T06:00:00Z generate -s service.json --date 2026-03-16 --busy busy.json
//!
//! # Service JSON on stdin, only free slots, 90-minute variant
//! cat service.json | slots generate --date 2026-03-16 --duration 90 --free-only
//!
//! # Fully booked dates over the next 62 days
//! slots --timezone Europe/Tallinn scan -s service.json --busy-calendar calendar.json
//!
//! # Allowed weekdays and the initially selected date
//! slots dates -s service.json
//!
//! # Pre-check a checkout payload
//! slots check -s service.json --booking booking.json --busy busy.json
//! ```
//!
//! Output is JSON on stdout. Logs go to stderr, filtered by `RUST_LOG`
//! (default `warn`).

use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use slot_engine::busy::{BusyCalendar, BusyIntervals};
use slot_engine::context::{parse_date, parse_instant, parse_timezone};
use slot_engine::weekly::day_label;
use slot_engine::{horizon, selection, BookingRequest, EngineConfig, ServiceDefinition, SlotContext};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slots", version, about = "Booking slot engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file (leadTimeHours, horizonDays, defaultLookaheadDays)
    #[arg(long, global = true)]
    config: Option<String>,

    /// IANA timezone of the viewer
    #[arg(long, global = true, default_value = "UTC")]
    timezone: String,

    /// Freeze "now" at this RFC 3339 instant instead of the system clock
    #[arg(long, global = true)]
    now: Option<String>,

    /// Override the minimum notice before a slot, in hours
    #[arg(long, global = true)]
    lead_hours: Option<i64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List candidate slots for one date
    Generate {
        /// Service JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        service: Option<String>,
        /// Date to generate for (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Slot length in minutes (defaults to the service's first variant)
        #[arg(long)]
        duration: Option<u32>,
        /// Busy-interval payload for the date
        #[arg(long)]
        busy: Option<String>,
        /// Print only slots that can be booked
        #[arg(long)]
        free_only: bool,
    },
    /// Classify the date-picker window and report fully booked dates
    Scan {
        /// Service JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        service: Option<String>,
        /// Slot length in minutes (defaults to the service's first variant)
        #[arg(long)]
        duration: Option<u32>,
        /// Busy payloads keyed by YYYY-MM-DD
        #[arg(long)]
        busy_calendar: Option<String>,
        /// Days past today to scan
        #[arg(long)]
        horizon_days: Option<u32>,
        /// Currently selected date; advanced if it turns out fully booked
        #[arg(long)]
        selected: Option<String>,
    },
    /// Show allowed weekdays and the initially selected date
    Dates {
        /// Service JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        service: Option<String>,
    },
    /// Validate a checkout payload against the slots for its date
    Check {
        /// Service JSON file
        #[arg(short, long)]
        service: String,
        /// Booking request JSON file (reads from stdin if omitted)
        #[arg(long)]
        booking: Option<String>,
        /// Busy-interval payload for the booking date
        #[arg(long)]
        busy: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanReport {
    duration: u32,
    candidate_dates: Vec<NaiveDate>,
    fully_booked: Vec<NaiveDate>,
    selected: Option<NaiveDate>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DatesReport {
    allowed_weekdays: Vec<&'static str>,
    default_date: Option<NaiveDate>,
    default_duration: Option<u32>,
    default_price: Option<f64>,
}

#[derive(Serialize)]
struct CheckReport {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let ctx = build_context(&cli, &config)?;
    tracing::debug!(?config, timezone = %ctx.timezone, now = %ctx.now, "resolved context");

    match cli.command {
        Commands::Generate {
            service,
            date,
            duration,
            busy,
            free_only,
        } => {
            let service = read_service(service.as_deref())?;
            let date = parse_date(&date)?;
            let duration = resolve_duration(&service, duration)?;
            let busy = read_busy(busy.as_deref());

            let mut slots = slot_engine::generate_slots(&service.availability, date, duration, &busy, &ctx);
            if free_only {
                slots.retain(|s| !s.busy);
            }
            print_json(&slots)?;
        }
        Commands::Scan {
            service,
            duration,
            busy_calendar,
            horizon_days,
            selected,
        } => {
            let service = read_service(service.as_deref())?;
            let duration = resolve_duration(&service, duration)?;
            let busy = match busy_calendar.as_deref() {
                Some(path) => BusyCalendar::from_payload(&read_json(path)?),
                None => BusyCalendar::new(),
            };
            let selected = selected.as_deref().map(parse_date).transpose()?;

            let dates = horizon::candidate_dates(
                &service.availability,
                ctx.today(),
                horizon_days.unwrap_or(config.horizon_days),
            );
            let fully_booked = horizon::scan_horizon(&service.availability, duration, &dates, &busy, &ctx);
            let selected = horizon::reconcile_selection(selected, &dates, &fully_booked);

            print_json(&ScanReport {
                duration,
                candidate_dates: dates,
                fully_booked: fully_booked.into_iter().collect(),
                selected,
            })?;
        }
        Commands::Dates { service } => {
            let service = read_service(service.as_deref())?;
            let variant = service.default_variant();
            print_json(&DatesReport {
                allowed_weekdays: service
                    .availability
                    .allowed_weekdays()
                    .into_iter()
                    .map(day_label)
                    .collect(),
                default_date: selection::default_date(
                    &service.availability,
                    ctx.today(),
                    config.default_lookahead_days,
                ),
                default_duration: variant.map(|v| v.duration),
                default_price: variant.map(|v| v.price),
            })?;
        }
        Commands::Check {
            service,
            booking,
            busy,
        } => {
            let service = read_service(Some(service.as_str()))?;
            let raw = read_input(booking.as_deref())?;
            let request: BookingRequest =
                serde_json::from_str(&raw).context("Failed to parse booking request JSON")?;
            let date = parse_date(&request.date)?;
            let busy = read_busy(busy.as_deref());

            let slots =
                slot_engine::generate_slots(&service.availability, date, request.duration, &busy, &ctx);
            let outcome = request.validate(&slots);
            let report = CheckReport {
                valid: outcome.is_ok(),
                error: outcome.err().map(|e| e.to_string()),
            };
            print_json(&report)?;
            if !report.valid {
                process::exit(2);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            EngineConfig::from_json(&raw).with_context(|| format!("Invalid config file: {}", path))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn build_context(cli: &Cli, config: &EngineConfig) -> Result<SlotContext> {
    let tz = parse_timezone(&cli.timezone)?;
    let ctx = match cli.now.as_deref() {
        Some(s) => SlotContext::at(parse_instant(s)?, tz),
        None => SlotContext::system(tz),
    };
    let mut ctx = ctx.with_config(config);
    if let Some(hours) = cli.lead_hours {
        ctx = ctx.with_lead_time_hours(hours);
    }
    Ok(ctx)
}

/// The requested duration, or the service's first variant.
fn resolve_duration(service: &ServiceDefinition, requested: Option<u32>) -> Result<u32> {
    match requested {
        Some(d) => Ok(d),
        None => service
            .default_variant()
            .map(|v| v.duration)
            .with_context(|| format!("Service {} has no variants; pass --duration", service.id)),
    }
}

fn read_service(path: Option<&str>) -> Result<ServiceDefinition> {
    let raw = read_input(path)?;
    ServiceDefinition::from_json(&raw).context("Failed to parse service JSON")
}

/// Busy intervals for a date. An unreadable payload counts as a failed fetch
/// and leaves the date free; the backend re-checks at submission.
fn read_busy(path: Option<&str>) -> BusyIntervals {
    match path {
        Some(path) => BusyIntervals::from_fetch(read_json(path)),
        None => BusyIntervals::empty(),
    }
}

fn read_json(path: &str) -> Result<Value> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    println!("{}", pretty);
    Ok(())
}
