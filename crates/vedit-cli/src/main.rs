//! Video enhancement pipeline binary.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vedit_cli::{PipelineConfig, Processor};

/// AI-powered video enhancement for marketing material.
#[derive(Debug, Parser)]
#[command(name = "vedit", version, about)]
struct Cli {
    /// Path to input video file
    input_video: PathBuf,

    /// Output video path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// AI model to use
    #[arg(long)]
    model: Option<String>,

    /// Frame extraction interval in seconds
    #[arg(long)]
    frame_interval: Option<f64>,

    /// Maximum frames to process per segment
    #[arg(long)]
    max_frames: Option<usize>,

    /// Attach the video itself to the analysis request
    #[arg(long)]
    attach_video: bool,

    /// Attach N evenly spaced frame stills to the analysis request
    #[arg(long, value_name = "N")]
    analysis_frames: Option<usize>,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("vedit=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let cli = Cli::parse();

    let mut config = PipelineConfig::from_env();
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(interval) = cli.frame_interval {
        config.frame_interval_secs = interval;
    }
    if let Some(max_frames) = cli.max_frames {
        config.max_frames = max_frames;
    }
    config.attach_video = cli.attach_video;
    if let Some(n) = cli.analysis_frames {
        config.analysis_frames = n;
    }

    info!("Pipeline config: {:?}", config);

    // Missing tools degrade to copy fallbacks later; surface that early
    if let Err(e) = vedit_media::check_ffmpeg() {
        warn!("{}", e);
    }
    if let Err(e) = vedit_media::check_ffprobe() {
        warn!("{}", e);
    }

    let processor = match Processor::new(config) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create processor: {}", e);
            std::process::exit(1);
        }
    };

    let result = processor
        .process(&cli.input_video, cli.output.as_deref())
        .await;

    if result.success {
        println!("✅ Video processing completed successfully!");
        println!("Input: {}", result.input_path.display());
        if let Some(ref output) = result.output_path {
            println!("Output: {}", output.display());
        }
        println!("Segments processed: {}", result.segments_processed);
        if let Some(ref report) = result.analysis {
            if report.mocked {
                println!("AI analysis unavailable - used fallback analysis");
            } else {
                println!("AI analysis completed - check logs for details");
            }
        }
    } else {
        println!(
            "❌ Video processing failed: {}",
            result.error_message.as_deref().unwrap_or("unknown error")
        );
        std::process::exit(1);
    }
}
