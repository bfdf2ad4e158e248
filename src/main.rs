use anyhow::Context;
use clap::Parser;
use std::{
    fs::File,
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};
use trailroute::{
    sdk::config::AppConfig,
    sdk::map::{init_map, GraphicStore, MapCanvas, MapPoint, MemoryCanvas},
    sdk::routing::{ArcGisRouteProvider, RouteRequester},
    sdk::session::{RouteSession, SessionController, SessionEvent},
    sdk::util::{log::init_logging, rate_limit::route_limiter},
};

/// Click two points on a map and get driving directions between them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// A map click as "LON,LAT" (repeatable, e.g. --click=-118.40,34.20).
    /// Without any, clicks are read from stdin, one per line; "clear" clears.
    #[arg(short, long, allow_hyphen_values = true)]
    click: Vec<String>,

    /// [Optional] Write the final session (markers, steps, graphics) as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_event(line: &str) -> anyhow::Result<Option<SessionEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if line.eq_ignore_ascii_case("clear") {
        return Ok(Some(SessionEvent::Clear));
    }
    let point: MapPoint = line
        .parse()
        .with_context(|| format!("Invalid click \"{}\"", line))?;
    Ok(Some(SessionEvent::Click(point)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    dotenvy::dotenv().ok();

    // --- 1. Configuration and collaborators ---
    let config = AppConfig::from_env()?;
    let limiter = route_limiter(config.routing.requests_per_minute);
    let provider = ArcGisRouteProvider::new(&config.routing, limiter)?;
    let requester = RouteRequester::new(Arc::new(provider), config.routing.route_line.clone());

    // --- 2. Map view ---
    let mut canvas = MemoryCanvas::new();
    if let Err(e) = init_map(&mut canvas, &config.map) {
        log::error!("Map is not interactive: {}", e);
        return Err(e.into());
    }
    let canvas: Box<dyn MapCanvas> = Box::new(canvas);
    let store = GraphicStore::new(
        canvas,
        config.map.origin_symbol.clone(),
        config.map.destination_symbol.clone(),
    );
    let mut controller = SessionController::new(RouteSession::new(store, Arc::new(requester)));

    // --- 3. Feed clicks, one route at a time ---
    let lines: Vec<String> = if cli.click.is_empty() {
        log::info!("Reading clicks from stdin (LON,LAT per line)");
        io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
    } else {
        cli.click
    };

    for line in &lines {
        let Some(event) = parse_event(line)? else {
            continue;
        };
        controller.apply(event);
        controller.settle().await;
    }

    // --- 4. Output ---
    let session = controller.session();
    println!("{}", session.view());

    if let Some(path) = cli.output {
        let json_output = serde_json::to_string_pretty(&session.snapshot())?;
        let mut file = File::create(&path)?;
        file.write_all(json_output.as_bytes())?;
        log::info!("Session written to {}", path.display());
    }

    Ok(())
}
