//! Replays a recorded GPS log through the route progress engine.
//!
//! The log is the CSV written by the position logger
//! (`utc_d,utc_t,lat,lon,alt,head`). Routes come from a live Valhalla
//! instance; render commands and notifications are logged.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use clap::Parser;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use route_progress::traits::{NotificationSink, RenderSink};
use route_progress::valhalla::{ValhallaClient, ValhallaConfig};
use route_progress::{
    Coordinate, Event, NavigationConfig, Navigator, Notification, PositionFix, RenderCommand,
    SessionState,
};

#[derive(Parser, Debug)]
#[command(about = "Replay a GPS log against a routing service")]
struct Args {
    /// CSV log with columns utc_d,utc_t,lat,lon,alt,head.
    log: PathBuf,
    #[arg(long, allow_hyphen_values = true)]
    dest_lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    dest_lon: f64,
    #[arg(long, env = "VALHALLA_URL", default_value = "http://localhost:8002")]
    valhalla_url: String,
    #[arg(long, default_value = "auto")]
    costing: String,
    /// Lateral deviation in meters that triggers a reroute.
    #[arg(long, default_value_t = 30.0)]
    off_route_m: f64,
    /// Seconds to wait for each route response.
    #[arg(long, default_value_t = 15)]
    route_wait_secs: u64,
}

#[derive(Debug, Deserialize)]
struct LogRow {
    utc_d: String,
    utc_t: String,
    lat: f64,
    lon: f64,
    alt: f64,
    head: f64,
}

impl LogRow {
    fn into_fix(self) -> Result<PositionFix, chrono::ParseError> {
        let stamp = format!("{} {}", self.utc_d, self.utc_t);
        let timestamp = NaiveDateTime::parse_from_str(&stamp, "%Y/%m/%d %H:%M:%S%.f")?.and_utc();
        Ok(PositionFix {
            timestamp,
            lat: self.lat,
            lon: self.lon,
            alt: self.alt,
            heading: self.head,
        })
    }
}

struct LogRenderer;

impl RenderSink for LogRenderer {
    fn apply(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::AddRouteLine(line) => info!(points = line.len(), "route line added"),
            RenderCommand::UpdateRouteLine(line) => info!(points = line.len(), "route line updated"),
            RenderCommand::RemoveRouteLine => info!("route line removed"),
            RenderCommand::MoveMarker { .. } | RenderCommand::RemoveMarker => {}
        }
    }
}

struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::NavigationComplete => info!("navigation complete"),
            Notification::RouteFailed(message) => warn!(%message, "route failed"),
            Notification::PositionUnavailable => warn!("no current position"),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut reader = csv::Reader::from_path(&args.log)?;
    let fixes = reader
        .deserialize::<LogRow>()
        .map(|row| -> Result<PositionFix, Box<dyn Error>> { Ok(row?.into_fix()?) })
        .collect::<Result<Vec<_>, _>>()?;
    info!(fixes = fixes.len(), "loaded log");

    let client = ValhallaClient::new(ValhallaConfig {
        base_url: args.valhalla_url.clone(),
        costing: args.costing.clone(),
        ..ValhallaConfig::default()
    })?;
    let config = NavigationConfig {
        off_route_threshold_m: args.off_route_m,
        ..NavigationConfig::default()
    };
    info!(
        url = %client.config().base_url,
        costing = %client.config().costing,
        "routing service"
    );
    let mut navigator = Navigator::new(config, Arc::new(client), LogRenderer, LogNotifier)?;
    let destination = Coordinate::new(args.dest_lon, args.dest_lat);
    let route_wait = Duration::from_secs(args.route_wait_secs);

    let mut last_instruction = None;
    for (index, fix) in fixes.into_iter().enumerate() {
        navigator.handle_at(Event::Position(fix), fix.timestamp);
        if index == 0 {
            navigator.handle_at(Event::Navigate { destination }, fix.timestamp);
        }

        // Replay is synchronous: wait for any outstanding route before the
        // next fix so runs are reproducible.
        while navigator.session().state() == SessionState::RecomputePending {
            if !navigator.process_next(route_wait) {
                warn!("timed out waiting for a route");
                break;
            }
        }

        let snapshot = navigator.snapshot();
        let instruction = snapshot.maneuver.map(|m| m.instruction);
        if instruction.is_some() && instruction != last_instruction {
            info!(
                instruction = instruction.as_deref().unwrap_or_default(),
                distance_m = snapshot.distance_to_maneuver_m.unwrap_or_default(),
                "maneuver"
            );
            last_instruction = instruction;
        }

        if index > 0 && !navigator.session().is_navigating() {
            break;
        }
    }

    Ok(())
}
