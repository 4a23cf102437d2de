//! venue-directions binary
//!
//! Replays a recorded pathfinder result through the navigation controller
//! and prints the summary, the step list and (optionally) every map command.
//!
//! ## Configuration (env / TOML via `config` crate)
//!
//! | Key                                | Default | Description                       |
//! |------------------------------------|---------|-----------------------------------|
//! | `DIRECTIONS_CONFIG`                | –       | TOML file with overrides          |
//! | `DIRECTIONS_VENUE`                 | –       | Venue JSON (floors + spaces)      |
//! | `DIRECTIONS_ROUTE`                 | –       | Recorded pathfinder result JSON   |
//! | `DIRECTIONS_SURFACE`               | desktop | `desktop` or `mobile`             |
//! | `DIRECTIONS_WALKING_SPEED_MPS`     | `1.4`   | Walking speed for time estimates  |
//! | `DIRECTIONS_FLOOR_SWITCH_DELAY_MS` | `800`   | Camera delay after floor switches |

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use venue_directions::{
    config::{DirectionsConfig, Surface},
    controller::{NavigationController, RouteStatus},
    instructions::format_distance,
    protocol::UserProfile,
    recording::{LogArrivalLogger, RecordedPathfinder, RecordingRenderer},
    venue::VenueDirectory,
};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "venue-directions", about = "Venue turn-by-turn directions", version)]
struct Args {
    /// Venue JSON with `floors` and `spaces`
    #[arg(long, env = "DIRECTIONS_VENUE")]
    venue: PathBuf,

    /// Recorded pathfinder result JSON
    #[arg(long, env = "DIRECTIONS_ROUTE")]
    route: PathBuf,

    /// Departure space (id or name)
    #[arg(long)]
    from: String,

    /// Destination space (id or name)
    #[arg(long)]
    to: String,

    /// Presentation surface: desktop or mobile
    #[arg(long, env = "DIRECTIONS_SURFACE", default_value = "desktop")]
    surface: Surface,

    /// Optional TOML config file
    #[arg(long, env = "DIRECTIONS_CONFIG")]
    config: Option<PathBuf>,

    /// Walk through every step with `next`
    #[arg(long)]
    steps: bool,

    /// Print every renderer command as JSON lines
    #[arg(long)]
    commands: bool,

    /// Email reported with the arrival event
    #[arg(long, env = "DIRECTIONS_USER_EMAIL")]
    user_email: Option<String>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialise logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("venue_directions=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = DirectionsConfig::load(args.config.as_deref())
        .context("Failed to load directions config")?;

    let venue_json = std::fs::read_to_string(&args.venue)
        .with_context(|| format!("Failed to read venue {}", args.venue.display()))?;
    let venue = Arc::new(VenueDirectory::from_json(&venue_json).context("Invalid venue JSON")?);

    let route_json = std::fs::read_to_string(&args.route)
        .with_context(|| format!("Failed to read route {}", args.route.display()))?;
    let pathfinder = RecordedPathfinder::from_json(&route_json).context("Invalid route JSON")?;

    log::info!(
        "Starting venue-directions ({} floors, {} spaces, surface={})",
        venue.floor_count(),
        venue.space_count(),
        args.surface.as_str(),
    );

    let renderer = Arc::new(RecordingRenderer::new());
    let mut controller = NavigationController::new(
        config,
        venue,
        pathfinder,
        Arc::clone(&renderer),
        LogArrivalLogger::new(),
    );
    controller.set_user(args.user_email.map(|email| UserProfile {
        email: Some(email),
        ..Default::default()
    }));

    controller.set_departure(&args.from).await?;
    let status = controller.set_destination(&args.to).await?;
    if status != RouteStatus::Ready {
        println!("No path found between locations!");
        return Ok(());
    }

    let summary = controller.view();
    println!(
        "{} → {}: {} min, {}",
        summary.departure.unwrap_or_default(),
        summary.destination.unwrap_or_default(),
        summary.estimated_minutes.unwrap_or(1),
        summary.total_distance.unwrap_or_default(),
    );

    if let Some(directions) = controller.directions() {
        let outline: Vec<String> = directions
            .groups()
            .iter()
            .map(|g| {
                format!(
                    "{} x{} ({})",
                    g.kind.label(),
                    g.steps.len(),
                    format_distance(g.total_distance)
                )
            })
            .collect();
        println!("Outline: {}", outline.join(", "));
    }

    controller.view_steps(args.surface)?;
    for step in controller.step_list(args.surface) {
        println!("{:>3}. {} {}", step.index + 1, step.distance_label, step.instruction);
    }

    if args.steps {
        while controller.next_step().is_some() {
            let view = controller.view();
            if let (Some(n), Some(current)) = (view.step_number, view.current) {
                println!("[{} / {}] {}", n, view.step_count, current.instruction);
            }
        }
        // Let deferred floor-switch animations land before dumping commands.
        let delay = controller.config().floor_switch_delay();
        tokio::time::sleep(delay).await;
    }

    controller.back().await;

    if args.commands {
        print!("{}", renderer.to_json_lines()?);
    }

    Ok(())
}
