//! SkyRoute CLI - plan safe flight routes from the command line.

use anyhow::{bail, Context, Result};
use clap::Parser;
use skyroute_core::{
    Airport, AirportCatalog, FlightPath, GraphOptions, HazardIndex, HazardZone, RoutePlanner,
    DEFAULT_MAX_HOPS,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Average cruise speed used for the time estimate, km/h.
const CRUISE_SPEED_KMH: f64 = 800.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan safe flight routes between airports", long_about = None)]
struct Args {
    /// Path to the airports JSON file
    #[arg(long, default_value = "data/airports.json")]
    airports: PathBuf,

    /// Path to the hazard zones JSON file
    #[arg(long, default_value = "data/hazard-zones.json")]
    hazards: PathBuf,

    /// Source airport (catalog index or exact name)
    #[arg(long)]
    from: String,

    /// Destination airport (catalog index or exact name)
    #[arg(long)]
    to: String,

    /// Number of routes to compute (primary + alternatives)
    #[arg(long, default_value_t = 5)]
    routes: usize,

    /// Maximum hops per route
    #[arg(long, default_value_t = DEFAULT_MAX_HOPS)]
    max_hops: usize,

    /// Longest direct edge in km
    #[arg(long, default_value_t = 3000.0)]
    max_edge_km: f64,

    /// Plan as if no hazard zones existed
    #[arg(long)]
    ignore_hazards: bool,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let catalog = load_airports(&args.airports)?;
    let zones = if args.ignore_hazards {
        Vec::new()
    } else {
        load_hazard_zones(&args.hazards)?
    };
    tracing::info!(
        airports = catalog.len(),
        hazard_zones = zones.len(),
        "data loaded"
    );
    let hazards = HazardIndex::new(zones);

    let source = resolve_airport(&catalog, &args.from)?;
    let dest = resolve_airport(&catalog, &args.to)?;

    let options = GraphOptions {
        max_edge_distance_km: args.max_edge_km,
        ..GraphOptions::default()
    };
    let planner = RoutePlanner::new(options, args.max_hops);
    let routes = planner.plan(&catalog, &hazards, source, dest, args.routes)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&routes)?);
    } else {
        print_routes(&routes);
    }

    Ok(())
}

fn load_airports(path: &Path) -> Result<AirportCatalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read airports file {}", path.display()))?;
    let airports: Vec<Airport> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse airports file {}", path.display()))?;

    // Drop records with unusable coordinates rather than failing the run.
    let airports: Vec<Airport> = airports
        .into_iter()
        .filter(|airport| {
            let ok = airport.lat().is_finite() && airport.lon().is_finite();
            if !ok {
                tracing::warn!(airport = %airport.name, "skipping airport with invalid coordinates");
            }
            ok
        })
        .collect();

    if airports.is_empty() {
        bail!("no usable airports in {}", path.display());
    }
    Ok(AirportCatalog::new(airports))
}

fn load_hazard_zones(path: &Path) -> Result<Vec<HazardZone>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read hazard zones file {}", path.display()))?;
    let zones: Vec<HazardZone> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse hazard zones file {}", path.display()))?;
    Ok(zones)
}

/// Accept either a catalog index or an exact airport name.
fn resolve_airport(catalog: &AirportCatalog, selector: &str) -> Result<usize> {
    if let Ok(index) = selector.parse::<usize>() {
        if index < catalog.len() {
            return Ok(index);
        }
        bail!(
            "airport index {index} out of range (have {} airports)",
            catalog.len()
        );
    }

    catalog
        .airports()
        .iter()
        .position(|airport| airport.name.eq_ignore_ascii_case(selector))
        .with_context(|| format!("no airport named {selector:?}"))
}

fn print_routes(routes: &[FlightPath]) {
    for (rank, route) in routes.iter().enumerate() {
        let label = if rank == 0 { " (shortest)" } else { "" };
        println!("Route {}{label}", rank + 1);
        println!(
            "  distance: {:.1} km   time: {}   stops: {}",
            route.total_distance_km,
            format_time(route.total_distance_km / CRUISE_SPEED_KMH),
            route.stops
        );
        if route.intersects_hazard {
            println!("  warning: crosses {}", route.hazard_names.join(", "));
        }
        for pair in route.airports.windows(2) {
            println!(
                "    {} -> {}  {:.1} km",
                pair[0].name,
                pair[1].name,
                pair[0].distance_to(&pair[1])
            );
        }
        println!();
    }
}

fn format_time(hours: f64) -> String {
    let whole = hours.floor() as u64;
    let minutes = ((hours - hours.floor()) * 60.0).round() as u64;
    format!("{whole}h {minutes:02}m")
}
