//! Hand gesture control application: depth-sensor gestures to desktop input.

use anyhow::{bail, Context, Result};
use clap::Parser;
use hand_gesture_control::{
    app::GestureApp,
    config::Config,
    input::{InputSink, LoggingSink, X11InputSink},
    replay::JointRecording,
};
use log::info;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Recorded joint stream to replay (YAML format)
    #[arg(short, long)]
    replay: Option<String>,

    /// Use the pinch interpreter instead of the steering wheel
    #[arg(long)]
    pinch: bool,

    /// Override the far depth threshold
    #[arg(long)]
    threshold_end: Option<u16>,

    /// Log input events instead of injecting them
    #[arg(long)]
    dry_run: bool,

    /// Playback rate in frames per second (0 for unpaced)
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Hand Gesture Control");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if args.pinch {
        config.interpreters.double_hand_wheel_mode = false;
    }
    if let Some(threshold_end) = args.threshold_end {
        config.preprocessing.threshold_end = threshold_end;
    }

    // Depth acquisition is an external concern; the binary drives recorded
    // joint streams through the pipeline.
    let Some(replay_path) = &args.replay else {
        bail!("no depth source available; provide a recording with --replay");
    };

    let recording = JointRecording::from_file(replay_path)
        .with_context(|| format!("failed to load recording {replay_path}"))?;
    let frame_interval = if args.fps > 0 {
        Some(Duration::from_secs(1) / args.fps)
    } else {
        None
    };
    let (mut source, tracker) = recording.into_pipeline(frame_interval);

    // Real X11 injection unless this is a dry run
    let (sink, screen_size): (Box<dyn InputSink>, (u16, u16)) = if args.dry_run {
        info!("Dry run: input events will be logged, not injected");
        (Box::new(LoggingSink), (1920, 1080))
    } else {
        let sink = X11InputSink::new()?;
        let screen_size = sink.screen_size();
        (Box::new(sink), screen_size)
    };

    let mut app = GestureApp::new(config, Box::new(tracker), sink, screen_size)?;

    let running = AtomicBool::new(true);
    app.run(&mut source, &running)?;

    Ok(())
}
