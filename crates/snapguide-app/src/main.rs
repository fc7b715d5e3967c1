//! Command-line driver: replays a pointer script against a scene.

mod script;

use clap::Parser;
use script::{PointerEvent, Replay, Report};
use snapguide_core::{Scene, SnapConfig};
use std::path::PathBuf;

/// Replay a pointer script against a scene and print the snapping report
#[derive(Debug, Parser)]
#[command(name = "snapguide")]
#[command(version, about, long_about = None)]
struct Args {
    /// Scene file (JSON)
    scene: PathBuf,

    /// Snap config file (JSON); defaults apply when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pointer events to replay (JSON array)
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,
}

fn run(args: &Args) -> Result<Report, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => SnapConfig::load(path)?,
        None => SnapConfig::default(),
    };
    let scene = Scene::from_json(&std::fs::read_to_string(&args.scene)?)?;
    log::info!("Loaded {} shapes from {}", scene.len(), args.scene.display());

    let events: Vec<PointerEvent> = match &args.script {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Vec::new(),
    };

    Ok(Replay::new(scene, config)?.run(&events))
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Starting snapguide");

    let result = run(&args).and_then(|report| {
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    });
    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
