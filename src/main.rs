// src/main.rs

use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use gaze_replay::data_analysis::color_mapping::GradientPolicy;
use gaze_replay::data_input::calibration::CalibrationSource;
use gaze_replay::playback::session::{ReplaySession, TickOutcome};
use gaze_replay::plot_functions::plot_gaze_heatmap::plot_gaze_heatmap;
use gaze_replay::presentation::{present, HeadlessPresenter, ReplayPresenter};
use gaze_replay::session_context::{resolve_session_path, ReplayConfig, RoomLayout};

/// Replays a recorded rod-and-frame session and renders its gaze heatmap.
#[derive(Parser, Debug)]
#[command(name = "gaze_replay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Recording to replay. Overrides --logs-dir/--participant.
    input: Option<PathBuf>,

    /// Directory holding `[Rod-Frame]Participant_<id>[ empty].csv` recordings
    #[arg(long, requires = "participant")]
    logs_dir: Option<PathBuf>,

    /// Participant id, used for file lookup and the HUD label
    #[arg(long)]
    participant: Option<String>,

    /// Session was recorded in the room with objects
    #[arg(long)]
    objects_room: bool,

    /// Heatmap grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Heatmap grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Visit count at which a cell reaches full color
    #[arg(long)]
    saturation: Option<u32>,

    /// Keep darkening cells past the saturation count
    #[arg(long)]
    extrapolate: bool,

    /// Start playback from this position (frames)
    #[arg(long)]
    scrub_to: Option<f64>,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<usize>,

    /// Directory for output files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Write convergence points (frame,x,y,z) to this CSV file
    #[arg(long)]
    points_csv: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn room_layout(&self) -> RoomLayout {
        if self.objects_room {
            RoomLayout::ObjectsRoom
        } else {
            RoomLayout::EmptyRoom
        }
    }

    fn replay_config(&self) -> ReplayConfig {
        let defaults = ReplayConfig::default();
        ReplayConfig {
            heatmap_width: self.width.unwrap_or(defaults.heatmap_width),
            heatmap_height: self.height.unwrap_or(defaults.heatmap_height),
            saturation_count: self.saturation.unwrap_or(defaults.saturation_count),
            gradient: if self.extrapolate {
                GradientPolicy::Extrapolated
            } else {
                GradientPolicy::Clamped
            },
            participant_id: self.participant.clone().unwrap_or_default(),
            room_layout: self.room_layout(),
            ..defaults
        }
    }

    fn input_path(&self) -> Option<PathBuf> {
        if let Some(input) = &self.input {
            return Some(input.clone());
        }
        match (&self.logs_dir, &self.participant) {
            (Some(dir), Some(id)) => Some(resolve_session_path(dir, id, self.room_layout())),
            _ => None,
        }
    }
}

fn write_points_csv(path: &Path, session: &ReplaySession) -> Result<usize, Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["frame", "x", "y", "z"])?;
    for (frame, point) in session.convergence_points().iter().enumerate() {
        writer.write_record(&[
            frame.to_string(),
            point.x.to_string(),
            point.y.to_string(),
            point.z.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(session.convergence_points().len())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .try_init();

    let Some(input_path) = cli.input_path() else {
        eprintln!("Usage: gaze_replay <input_file.csv> | --logs-dir <DIR> --participant <ID>");
        std::process::exit(1);
    };
    let root_name = input_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();

    // --- Load ---
    println!("\n--- Loading Session ---");
    println!("  Input: {}", input_path.display());
    let config = cli.replay_config();
    let mut session = match ReplaySession::open(&input_path, config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: could not load '{}': {}", input_path.display(), e);
            std::process::exit(1);
        }
    };
    println!(
        "  Read {} frames with {} columns.",
        session.dataset().len(),
        session.dataset().header().len()
    );

    // --- Calibration ---
    println!("\n--- Calibrating Head Height ---");
    let calibration = *session.calibration();
    match calibration.source {
        CalibrationSource::Sampled { start_row, rows } => {
            println!("  Sampled rows {}..{}.", start_row, start_row + rows)
        }
        CalibrationSource::Clamped { start_row, rows } => println!(
            "  Session too short for the calibration row; used rows {}..{} instead.",
            start_row,
            start_row + rows
        ),
    }
    println!("  Head height: {:.4}", calibration.head_height);

    let mut presenter = HeadlessPresenter::new();
    presenter.apply_calibration(calibration.head_height, session.config().room_layout);

    if let Some(position) = cli.scrub_to {
        if session.scrub_to(position) {
            println!("  Starting from position {:.2}.", session.position());
        } else {
            println!("  Ignoring invalid start position {}.", position);
        }
    }

    // --- Playback ---
    println!("\n--- Replaying ---");
    let mut ticks = 0usize;
    loop {
        if cli.max_ticks.is_some_and(|max| ticks >= max) {
            println!("  Stopped after {} ticks.", ticks);
            break;
        }
        let outcome = session.tick();
        present(&session, &outcome, &mut presenter);
        if outcome == TickOutcome::Finished {
            println!("  Reached end of session after {} ticks.", ticks);
            break;
        }
        ticks += 1;
    }

    // --- Summary ---
    println!("\n--- Summary ---");
    if let Some(labels) = &presenter.labels {
        println!("  {}", labels.current_time);
        println!("  {}", labels.participant);
        println!("  {}", labels.trial);
    }
    println!("  Net apparatus rotation: {:.2} deg", presenter.apparatus_rotation);
    println!("  Rod angle: {:.2} deg", presenter.rod_angle);
    if let Some(point) = presenter.gaze_indicator {
        println!("  Gaze indicator: ({:.4}, {:.4}, {:.4})", point.x, point.y, point.z);
    }
    let heatmap = session.heatmap();
    println!(
        "  Heatmap {}x{}: {} samples, peak cell {}.",
        heatmap.width(),
        heatmap.height(),
        heatmap.total_count(),
        heatmap.peak_count()
    );

    // --- Export ---
    println!("\n--- Generating Gaze Heatmap Plot ---");
    fs::create_dir_all(&cli.output_dir)?;
    plot_gaze_heatmap(
        heatmap,
        &cli.output_dir,
        &root_name,
        session.current_frame_index(),
        session.trial(),
    )?;

    if let Some(points_path) = &cli.points_csv {
        println!("\n--- Writing Convergence Points ---");
        let written = write_points_csv(points_path, &session)?;
        println!("  {} points written to '{}'.", written, points_path.display());
    }

    Ok(())
}

// src/main.rs
