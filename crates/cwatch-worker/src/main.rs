//! Media risk analysis binary.
//!
//! Runs one analysis invocation: buffer the given video and/or audio
//! file, drive both branches, persist the merged report.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cwatch_ml_client::GeminiClient;
use cwatch_models::MediaInput;
use cwatch_worker::{Analyzer, WorkerConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("cwatch=info".parse().expect("valid directive"));

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
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting cwatch-worker");

    let (video_path, audio_path) = match parse_args() {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: cwatch-worker [--video <path>] [--audio <path>]");
            std::process::exit(1);
        }
    };

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    let inference = match GeminiClient::from_env() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create inference client: {}", e);
            std::process::exit(1);
        }
    };

    let video = match load_input(video_path.as_deref(), MediaInput::video).await {
        Ok(input) => input,
        Err(e) => {
            error!("Failed to load video input: {:#}", e);
            std::process::exit(1);
        }
    };
    let audio = match load_input(audio_path.as_deref(), MediaInput::audio).await {
        Ok(input) => input,
        Err(e) => {
            error!("Failed to load audio input: {:#}", e);
            std::process::exit(1);
        }
    };

    let analyzer = Analyzer::new(config, inference);
    match analyzer.analyze(video, audio).await {
        Ok(report) => {
            if let Some(verdict) = &report.video_analysis {
                info!("Video verdict:\n{}", verdict);
            }
            if let Some(verdict) = &report.audio_analysis {
                info!("Audio verdict:\n{}", verdict);
            }
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Parse `--video <path>` / `--audio <path>` arguments; at least one is
/// required for a meaningful invocation.
fn parse_args() -> anyhow::Result<(Option<String>, Option<String>)> {
    let mut video = None;
    let mut audio = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--video" => {
                video = Some(args.next().context("--video requires a path")?);
            }
            "--audio" => {
                audio = Some(args.next().context("--audio requires a path")?);
            }
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }

    if video.is_none() && audio.is_none() {
        anyhow::bail!("at least one of --video or --audio is required");
    }

    Ok((video, audio))
}

/// Buffer a media file and wrap it with its container hint.
async fn load_input<F, E>(path: Option<&str>, make: F) -> anyhow::Result<Option<MediaInput>>
where
    F: FnOnce(Vec<u8>, &str) -> Result<MediaInput, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let Some(path) = path else {
        return Ok(None);
    };

    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .context("input path has no file extension")?
        .to_string();

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("cannot read {}", path))?;

    let input = make(bytes, &extension)?;
    Ok(Some(input))
}
