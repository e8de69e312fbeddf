use anyhow::Result;
use base64::Engine;
use clap::Parser;
use convo_capture::{Config, FsSink, MergeScope, SessionConfig, SessionRecorder};
use tracing::info;

/// Capture a two-origin PCM session and export it as WAV
#[derive(Debug, Parser)]
#[command(name = "convo-capture", version)]
struct Args {
    /// Configuration file (without extension)
    #[arg(long, default_value = "config/convo-capture")]
    config: String,

    /// Override the recordings output directory
    #[arg(long)]
    output_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;
    let output_dir = args.output_dir.unwrap_or(cfg.audio.recordings_path);

    info!("convo-capture v0.1.0");
    info!("Service: {}", cfg.service.name);
    info!("Sample rate: {} Hz", cfg.audio.sample_rate);
    info!("Recordings directory: {}", output_dir);

    let mut recorder = SessionRecorder::new(SessionConfig {
        sample_rate: cfg.audio.sample_rate,
    });
    recorder.start();

    // One second of a 440 Hz tone stands in for the microphone stream
    let sample_rate = cfg.audio.sample_rate;
    recorder.add_local_audio(&sine_tone(440.0, sample_rate, sample_rate as usize));

    // Remote frames arrive as base64-encoded PCM bytes
    let remote = sine_tone(220.0, sample_rate, sample_rate as usize / 2);
    let remote_bytes: Vec<u8> = remote.iter().flat_map(|s| s.to_le_bytes()).collect();
    let frame = base64::engine::general_purpose::STANDARD.encode(&remote_bytes);
    recorder.add_remote_audio(&frame);

    recorder.stop()?;

    let stats = recorder.stats();
    info!("Session stats:\n{}", serde_json::to_string_pretty(&stats)?);

    let sink = FsSink::new(&output_dir)?;
    for scope in [MergeScope::All, MergeScope::LocalOnly, MergeScope::RemoteOnly] {
        let location = recorder.export_artifact(scope, &sink).await?;
        info!("Exported {} -> {}", scope.label(), location);
    }

    Ok(())
}

fn sine_tone(freq: f64, sample_rate: u32, len: usize) -> Vec<i16> {
    (0..len)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            ((t * freq * std::f64::consts::TAU).sin() * 8000.0) as i16
        })
        .collect()
}
