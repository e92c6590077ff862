//! `booking` CLI — validate booking candidates and list free slots from JSON files.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a candidate (stdin → checkout payload on stdout)
//! cat candidate.json | booking validate --resources resources.json
//!
//! # Validate with a custom policy and a pinned clock
//! booking validate -i candidate.json --resources resources.json \
//!     --policy policy.toml --now 2026-03-16T08:00:00Z
//!
//! # Free hourly slots between 09:00 and 17:00
//! booking slots -i bookings.json --date 2026-03-16
//!
//! # Half-hour slots as a JSON array
//! booking slots -i bookings.json --date 2026-03-16 --interval 30 --json
//!
//! # Check a create-member request
//! booking member -i member.json
//! ```
//!
//! A rejected candidate exits with status 2; other errors exit with status 1.

use anyhow::{Context, Result};
use booking_engine::{
    compute_available_slots, occurrences_from_bookings, Booking, BookingCandidate, BookingPolicy,
    BookingValidator, MemberRequest, ResourceCatalog, SlotWindow,
};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::process;
use tracing_subscriber::EnvFilter;

/// Exit status for a candidate that failed a booking rule.
const EXIT_REJECTED: i32 = 2;

#[derive(Parser)]
#[command(
    name = "booking",
    version,
    about = "Validate coworking bookings and list free slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a booking candidate and print its checkout payload
    Validate {
        /// Candidate JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// JSON array of resources to look candidates up in
        #[arg(long)]
        resources: String,
        /// TOML booking policy (defaults apply when omitted)
        #[arg(long)]
        policy: Option<String>,
        /// Evaluate as of this RFC 3339 instant instead of the system clock
        #[arg(long)]
        now: Option<String>,
        /// Print the booking-summary body instead of the checkout body
        #[arg(long)]
        summary: bool,
    },
    /// List free slots for a day from a JSON array of bookings
    Slots {
        /// Bookings JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Target date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long, default_value_t = 9)]
        start_hour: u32,
        #[arg(long, default_value_t = 17)]
        end_hour: u32,
        /// Slot length in minutes
        #[arg(long, default_value_t = 60)]
        interval: u32,
        /// Print a JSON array instead of one label per line
        #[arg(long)]
        json: bool,
    },
    /// Check a create-member request
    Member {
        /// Member request JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            input,
            resources,
            policy,
            now,
            summary,
        } => {
            let candidate: BookingCandidate = serde_json::from_str(&read_input(input.as_deref())?)
                .context("Failed to parse booking candidate")?;
            let catalog = ResourceCatalog::from_json(&read_input(Some(&resources))?)
                .context("Failed to parse resources")?;
            let policy = load_policy(policy.as_deref())?;
            let now = match now.as_deref() {
                Some(raw) => raw
                    .parse::<DateTime<Utc>>()
                    .with_context(|| format!("Invalid --now instant: {}", raw))?,
                None => Utc::now(),
            };
            tracing::debug!(resources = catalog.len(), %now, "validating candidate");

            match BookingValidator::new(policy).validate_at(&candidate, &catalog, now) {
                Ok(request) => {
                    let body = if summary {
                        request.summary_payload()
                    } else {
                        request.checkout_payload()
                    };
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(failure) => {
                    eprintln!("rejected: {}", failure);
                    if let Some(cause) = &failure.cause {
                        eprintln!("  caused by: {}", cause);
                    }
                    process::exit(EXIT_REJECTED);
                }
            }
        }
        Commands::Slots {
            input,
            date,
            start_hour,
            end_hour,
            interval,
            json,
        } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("Invalid --date: {}", date))?;
            let window = SlotWindow::new(start_hour, end_hour, interval)?;
            let bookings: Vec<Booking> = serde_json::from_str(&read_input(input.as_deref())?)
                .context("Failed to parse bookings")?;
            let occurrences = occurrences_from_bookings(&bookings, date)?;

            let slots = compute_available_slots(&occurrences, date, &window);
            if json {
                println!("{}", serde_json::to_string(&slots)?);
            } else {
                for slot in &slots {
                    println!("{}", slot);
                }
            }
        }
        Commands::Member { input } => {
            let request: MemberRequest = serde_json::from_str(&read_input(input.as_deref())?)
                .context("Failed to parse member request")?;
            request.validate().context("Invalid member request")?;
            println!("ok");
        }
    }

    Ok(())
}

fn load_policy(path: Option<&str>) -> Result<BookingPolicy> {
    let Some(path) = path else {
        return Ok(BookingPolicy::default());
    };
    let content = read_input(Some(path))?;
    let policy: BookingPolicy =
        toml::from_str(&content).with_context(|| format!("Failed to parse policy: {}", path))?;
    policy.validate()?;
    tracing::info!("Loaded booking policy from: {}", path);
    Ok(policy)
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
