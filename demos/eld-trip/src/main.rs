//! eld-trip — plan a trip and write its daily driver logs.
//!
//! ```text
//! eld-trip plan --request demos/eld-trip/data/trip.json --out ./output
//! eld-trip legs --legs demos/eld-trip/data/legs.csv --start 2026-03-02T08:00:00 \
//!               --cycle-used 12 --config demos/eld-trip/data/config.json
//! ```
//!
//! Set `RUST_LOG=debug` (or `trace` for every segment) to follow the
//! pipeline.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use eld_core::{TripConfig, TripId};
use eld_log::{
    CsvLogWriter, JsonLogWriter, LogWriter, RouteInput, TripHeader, TripLogs, TripRequest, plan_trip,
};

#[derive(Parser, Debug)]
#[command(version, about = "Plan an HOS-compliant trip and write its daily logs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Plan the trip described by a JSON request")]
    Plan(PlanArgs),

    #[command(about = "Plan a trip from a two-row leg CSV")]
    Legs(LegsArgs),
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// JSON `TripConfig` overriding the default rules and planner settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the logs are written to (created if missing).
    #[arg(long, default_value = "output")]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Both)]
    format: Format,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[arg(long)]
    request: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct LegsArgs {
    #[arg(long)]
    legs: PathBuf,

    /// Local departure time, e.g. 2026-03-02T08:00:00.
    #[arg(long)]
    start: NaiveDateTime,

    /// On-duty hours already used in the current cycle.
    #[arg(long, default_value_t = 0.0)]
    cycle_used: f64,

    #[arg(long, default_value_t = 1)]
    trip_id: u64,

    #[arg(long, default_value = "")]
    driver: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
    Both,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let (request, output) = match cli.command {
        Commands::Plan(args) => (read_json::<TripRequest>(&args.request)?, args.output),
        Commands::Legs(args) => {
            let route = eld_plan::load_route_csv(&args.legs)
                .with_context(|| format!("loading legs from {}", args.legs.display()))?;
            let request = TripRequest {
                header: TripHeader {
                    trip_id: TripId(args.trip_id),
                    driver: args.driver,
                    ..TripHeader::default()
                },
                start: args.start,
                cycle_used_hours: args.cycle_used,
                recap: None,
                route: RouteInput::Legs(route),
            };
            (request, args.output)
        }
    };

    let config = match &output.config {
        Some(path) => read_json::<TripConfig>(path)?,
        None => TripConfig::default(),
    };

    let trip = plan_trip(&request, &config).context("planning trip")?;
    write_logs(&trip, &output)?;
    print_summary(&trip);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))
}

fn write_logs(trip: &TripLogs, output: &OutputArgs) -> Result<()> {
    if output.out.exists() && !output.out.is_dir() {
        bail!("{} exists and is not a directory", output.out.display());
    }
    std::fs::create_dir_all(&output.out)
        .with_context(|| format!("creating {}", output.out.display()))?;

    let mut writers: Vec<Box<dyn LogWriter>> = Vec::new();
    if matches!(output.format, Format::Csv | Format::Both) {
        writers.push(Box::new(CsvLogWriter::new(&output.out)?));
    }
    if matches!(output.format, Format::Json | Format::Both) {
        writers.push(Box::new(JsonLogWriter::new(&output.out)?));
    }
    for writer in &mut writers {
        writer.write_logs(&trip.daily_logs)?;
        writer.finish()?;
    }
    log::info!("wrote {} daily logs to {}", trip.days(), output.out.display());
    Ok(())
}

fn print_summary(trip: &TripLogs) {
    println!(
        "trip {}: {} → {}",
        trip.header.trip_id, trip.route.to_pickup.origin, trip.route.to_dropoff.destination
    );
    println!(
        "  {:.1} mi, {:.2} h driving, {:.2} h on duty, {:.2} h elapsed",
        trip.total_miles(),
        trip.driving_hours(),
        trip.on_duty_hours(),
        trip.elapsed_hours()
    );
    for log in &trip.daily_logs {
        let totals = log.totals();
        println!(
            "  day {} {}  OFF {:>5.2}  SB {:>5.2}  D {:>5.2}  ON {:>5.2}  {:>7.1} mi  {} → {}",
            log.day_number,
            log.date,
            totals.off_duty,
            totals.sleeper_berth,
            totals.driving,
            totals.on_duty,
            log.miles,
            log.from,
            log.to
        );
    }
}
