#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line tools for the gun violence map.
//!
//! Works on the JSON the record parser produces (a list of incident features
//! and a list of region anchors). `summary` prints the aggregated per-region
//! table; `replay` drives a [`Dashboard`] through a scripted pointer session
//! using a plain equirectangular projection in place of a map engine.

mod session;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use gun_map_analytics::aggregate;
use gun_map_dashboard::{DEFAULT_CONFIG_TOML, Dashboard, DashboardConfig};
use gun_map_incident_models::{IncidentFeature, RegionAnchor};
use serde::de::DeserializeOwned;

use crate::session::{Session, replay};

#[derive(Parser)]
#[command(name = "gun_map", about = "Gun violence map tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print per-region totals for one or every year
    Summary {
        /// Incident features as JSON
        #[arg(long)]
        records: PathBuf,

        /// Only this year
        #[arg(long)]
        year: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Replay a scripted pointer session and report each frame
    Replay {
        /// Incident features as JSON
        #[arg(long)]
        records: PathBuf,

        /// Region anchors as JSON
        #[arg(long)]
        anchors: PathBuf,

        /// Session script (TOML)
        #[arg(long)]
        session: PathBuf,

        /// Dashboard config (TOML); the built-in defaults when omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the built-in dashboard config
    DefaultConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Summary {
            records,
            year,
            json,
        } => summary(&records, year.as_deref(), json)?,
        Commands::Replay {
            records,
            anchors,
            session,
            config,
        } => run_replay(&records, &anchors, &session, config.as_deref())?,
        Commands::DefaultConfig => print!("{DEFAULT_CONFIG_TOML}"),
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    Ok(serde_json::from_str(&text)?)
}

fn summary(records: &Path, year: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let features: Vec<IncidentFeature> = read_json(records)?;
    let table = aggregate(&features)?;

    let years: Vec<&str> = match year {
        Some(year) => vec![year],
        None => table.years().collect(),
    };

    for year in years {
        let rows = table.summary(year);
        if rows.is_empty() {
            log::warn!("No incidents recorded for {year}");
        }

        if json {
            println!("{}", serde_json::to_string(&serde_json::json!({ "year": year, "regions": rows }))?);
            continue;
        }

        println!("{year}");
        println!("  {:<24} {:>9} {:>7} {:>8}", "region", "shootings", "killed", "injured");
        for row in &rows {
            println!(
                "  {:<24} {:>9} {:>7} {:>8}",
                row.region, row.stat.shooting_count, row.stat.killed, row.stat.injured
            );
        }
    }

    Ok(())
}

fn run_replay(
    records: &Path,
    anchors: &Path,
    session: &Path,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => DashboardConfig::from_path(path)?,
        None => DashboardConfig::default(),
    };
    let features: Vec<IncidentFeature> = read_json(records)?;
    let anchors: Vec<RegionAnchor> = read_json(anchors)?;
    let session_text = std::fs::read_to_string(session)
        .map_err(|e| format!("failed to read {}: {e}", session.display()))?;
    let session = Session::from_toml_str(&session_text)?;

    let projection = config.map.projection();
    let mut dashboard = Dashboard::load(&features, anchors, config)?;

    log::info!("Replaying {} events", session.events.len());

    for (i, step) in replay(&mut dashboard, &projection, &session).iter().enumerate() {
        println!(
            "#{i} {:?} -> year {} {:?}, {} regions, {} incidents{}{}",
            step.event,
            step.year,
            step.drill,
            step.regions_drawn,
            step.incidents_drawn,
            step.hovered
                .map_or_else(String::new, |kind| format!(", hovering {kind}")),
            step.year_change
                .map_or_else(String::new, |change| format!(" ({change:?})"))
        );
        if let Some(info) = &step.info {
            for line in info.lines() {
                println!("    {line}");
            }
        }
    }

    Ok(())
}
