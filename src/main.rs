//! touchtrace - force-panel press tracker
//!
//! Drives a two-axis pen plotter toward the dominant press on a
//! force-touch panel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use touchtrace::app::cli::{Cli, Commands, ConfigAction};
use touchtrace::app::config::Config;
use touchtrace::display::heatmap::TerminalHeatmap;
use touchtrace::plotter::driver::{PenPlotter, PlotterPoint};
use touchtrace::plotter::simulated::SimulatedPlotter;
use touchtrace::sensor;
use touchtrace::session::{self, SessionStats};
use touchtrace::tracking::controller::MotionController;
use touchtrace::tracking::mapper::GridMapper;
use touchtrace::tracking::raster::RasterScan;
use touchtrace::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Run { duration, demo } => {
            run_follow(duration, demo, &config)?;
        }
        Commands::Raster { duration, demo } => {
            run_raster(duration, demo, &config)?;
        }
        Commands::Monitor { duration, demo } => {
            run_monitor(duration, demo, &config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

/// Install the session termination flag.
///
/// The handler runs on its own watcher thread and only ever writes the flag;
/// the control loop only ever reads it, between cycles.
fn install_stop_flag() -> anyhow::Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&stop);

    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::SeqCst);
    })?;

    Ok(stop)
}

fn open_source(demo: bool, config: &Config) -> anyhow::Result<Box<dyn sensor::FrameSource>> {
    match sensor::open_panel(&config.sensor, demo) {
        Ok(source) => {
            let dims = source.dimensions();
            info!(rows = dims.rows, cols = dims.cols, "panel open");
            Ok(source)
        }
        Err(e) => {
            error!("cannot start session: {e}");
            Err(e.into())
        }
    }
}

fn connect_plotter(config: &Config) -> anyhow::Result<SimulatedPlotter> {
    // No hardware driver is compiled in; the simulated plotter executes the
    // same command stream and logs it.
    let mut plotter = SimulatedPlotter::new();
    if let Err(e) = plotter.connect() {
        error!("cannot reach plotter: {e}");
        return Err(Error::PlotterUnreachable(e.to_string()).into());
    }
    plotter.configure(
        config.plotter.pen_up_height,
        config.plotter.pen_down_height,
    )?;
    Ok(plotter)
}

/// Travel pen-up to the given position, then drop the pen.
fn lower_pen_at(plotter: &mut SimulatedPlotter, position: PlotterPoint) -> anyhow::Result<()> {
    plotter.pen_up()?;
    plotter.move_to(position)?;
    plotter.pen_down()?;
    Ok(())
}

/// End-of-session choreography: lift, park, release the motors.
fn park_and_disconnect(plotter: &mut SimulatedPlotter, config: &Config) -> anyhow::Result<()> {
    plotter.pen_up()?;
    plotter.move_to(PlotterPoint::new(
        config.motion.park_x,
        config.motion.park_y,
    ))?;
    plotter.disconnect()?;
    Ok(())
}

fn heatmap_for(config: &Config) -> Option<TerminalHeatmap> {
    config
        .display
        .enabled
        .then(|| TerminalHeatmap::new(&config.display))
}

fn run_follow(duration: u64, demo: bool, config: &Config) -> anyhow::Result<()> {
    info!("starting press-follow session");

    let mut source = open_source(demo, config)?;
    let dims = source.dimensions();

    let mut plotter = connect_plotter(config)?;
    lower_pen_at(
        &mut plotter,
        PlotterPoint::new(config.motion.start_x, config.motion.start_y),
    )?;

    let mapper = GridMapper::from_config(dims, &config.mapping);
    let mut controller = MotionController::new(
        mapper,
        config.motion.max_step,
        config.motion.trail_capacity,
        plotter.position(),
    );
    let mut heatmap = heatmap_for(config);

    let stop = install_stop_flag()?;
    let stats = SessionStats::default();
    info!("following; press Ctrl+C to stop");

    session::run_follow(
        source.as_mut(),
        &mut plotter,
        heatmap.as_mut(),
        &mut controller,
        &stop,
        &stats,
        Duration::from_secs(duration),
    )?;

    park_and_disconnect(&mut plotter, config)?;
    info!("session finished: {}", stats.summary());

    Ok(())
}

fn run_raster(duration: u64, demo: bool, config: &Config) -> anyhow::Result<()> {
    info!("starting raster session");

    let mut source = open_source(demo, config)?;
    let dims = source.dimensions();

    let mut plotter = connect_plotter(config)?;
    // The pass sweeps Y from the bottom of the envelope
    lower_pen_at(&mut plotter, PlotterPoint::new(config.motion.start_x, 0.0))?;

    let mapper = GridMapper::from_config(dims, &config.mapping);
    let mut scan = RasterScan::new(&config.raster, config.mapping.y_max, config.motion.start_x);
    let mut heatmap = heatmap_for(config);

    let stop = install_stop_flag()?;
    let stats = SessionStats::default();
    info!("sweeping; press Ctrl+C to stop");

    session::run_raster(
        source.as_mut(),
        &mut plotter,
        heatmap.as_mut(),
        &mapper,
        &mut scan,
        &stop,
        &stats,
        Duration::from_secs(duration),
    )?;

    park_and_disconnect(&mut plotter, config)?;
    info!("session finished: {}", stats.summary());

    Ok(())
}

fn run_monitor(duration: u64, demo: bool, config: &Config) -> anyhow::Result<()> {
    info!("starting monitor session (no plotter)");

    let mut source = open_source(demo, config)?;
    let mut heatmap = TerminalHeatmap::new(&config.display);

    let stop = install_stop_flag()?;
    let stats = SessionStats::default();
    info!("monitoring; press Ctrl+C to stop");

    session::run_monitor(
        source.as_mut(),
        &mut heatmap,
        &stop,
        &stats,
        Duration::from_secs(duration),
    )?;

    info!("session finished: {}", stats.summary());

    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => {
            let toml_str = config.to_toml()?;
            // Simple key lookup in TOML output
            let value = find_toml_value(&toml_str, &key);
            match value {
                Some(v) => println!("{} = {}", key, v),
                None => {
                    anyhow::bail!("Configuration key '{}' not found", key);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let config_path = Config::default_path();
            if !config_path.exists() {
                anyhow::bail!("No config file found. Run 'touchtrace init' first.");
            }

            // Load, modify, and save
            let mut toml_content = std::fs::read_to_string(&config_path)?;
            if set_toml_value(&mut toml_content, &key, &value) {
                std::fs::write(&config_path, &toml_content)?;
                println!("Set {} = {}", key, value);
            } else {
                anyhow::bail!("Failed to set '{}'. Key may not exist in config.", key);
            }
        }
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            let default_config = Config::default();
            default_config.save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}

/// Simple TOML value lookup by dotted key
fn find_toml_value<'a>(toml_str: &'a str, key: &str) -> Option<&'a str> {
    let parts: Vec<&str> = key.split('.').collect();
    let leaf_key = parts.last()?;

    // Find the right section
    let mut in_section = parts.len() == 1; // Top-level key
    let section_name = if parts.len() > 1 { parts[0] } else { "" };

    for line in toml_str.lines() {
        let trimmed = line.trim();

        // Check for section header
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = &trimmed[1..trimmed.len() - 1];
            in_section = section == section_name;
            continue;
        }

        if in_section {
            if let Some(eq_pos) = trimmed.find('=') {
                let line_key = trimmed[..eq_pos].trim();
                if line_key == *leaf_key {
                    return Some(trimmed[eq_pos + 1..].trim());
                }
            }
        }
    }

    None
}

/// Simple TOML value setter by dotted key
fn set_toml_value(toml_str: &mut String, key: &str, value: &str) -> bool {
    let parts: Vec<&str> = key.split('.').collect();
    let leaf_key = parts.last().unwrap();

    let section_name = if parts.len() > 1 { parts[0] } else { "" };
    let mut in_section = parts.len() == 1;
    let mut found = false;

    let lines: Vec<String> = toml_str.lines().map(|l| l.to_string()).collect();
    let mut new_lines = Vec::with_capacity(lines.len());

    for line in &lines {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = &trimmed[1..trimmed.len() - 1];
            in_section = section == section_name;
        }

        if in_section && !found {
            if let Some(eq_pos) = trimmed.find('=') {
                let line_key = trimmed[..eq_pos].trim();
                if line_key == *leaf_key {
                    new_lines.push(format!("{} = {}", leaf_key, value));
                    found = true;
                    continue;
                }
            }
        }

        new_lines.push(line.clone());
    }

    if found {
        *toml_str = new_lines.join("\n");
        // Ensure trailing newline
        if !toml_str.ends_with('\n') {
            toml_str.push('\n');
        }
    }

    found
}
