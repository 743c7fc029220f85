//! tonegen: sine tone and FSK WAV generator.
//!
//! With no subcommand this writes the stock 15 kHz example tone. The
//! `encode` and `decode` subcommands run the FSK text modem.

use std::io::BufRead;
use std::path::Path;

use anyhow::Context;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tonegen::audio::{read_wav, samples_to_duration, write_wav};
use tonegen::cli::{Cli, Command, DecodeArgs, EncodeArgs, ToneArgs};
use tonegen::config::ToneConfig;
use tonegen::fsk::{fsk_decode, fsk_encode};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = ToneConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(msg) = config.validate() {
        warn!("configuration problem: {}", msg);
    }

    match cli.command_or_default() {
        Command::Tone(args) => run_tone(config, &args),
        Command::Encode(args) => run_encode(config, &args),
        Command::Decode(args) => run_decode(config, &args),
    }
}

/// Renders one tone to a WAV file.
fn run_tone(mut config: ToneConfig, args: &ToneArgs) -> anyhow::Result<()> {
    args.apply(&mut config);
    let spec = config.tone_spec(args.frequency, args.duration);
    let output_path = args.output_path();

    eprintln!("=== tonegen tone ===");
    eprintln!("Frequency: {} Hz", spec.frequency);
    eprintln!("Duration: {}s", spec.duration);
    eprintln!("Sample rate: {} Hz", spec.sample_rate);
    eprintln!("Amplitude: {}", spec.amplitude);
    eprintln!("Clip policy: {}", config.clip_policy);
    eprintln!("Output: {}", output_path.display());

    let samples = spec.generate()?;
    write_wav(&output_path, &samples, spec.sample_rate, config.clip_policy)?;

    eprintln!(
        "Saved {} samples ({:.2}s) to {}",
        samples.len(),
        samples_to_duration(samples.len(), spec.sample_rate),
        output_path.display()
    );
    Ok(())
}

/// Encodes a message as an FSK WAV file.
fn run_encode(mut config: ToneConfig, args: &EncodeArgs) -> anyhow::Result<()> {
    args.fsk.apply(&mut config.fsk);
    if let Some(rate) = args.sample_rate {
        config.fsk.sample_rate = rate;
    }

    let message = match &args.message {
        Some(m) => m.clone(),
        None => prompt_message()?,
    };

    eprintln!("Encoding: {}", message);
    let samples = fsk_encode(message.as_bytes(), &config.fsk)?;
    write_wav(&args.output, &samples, config.fsk.sample_rate, config.clip_policy)?;

    eprintln!(
        "Saved as {} ({:.2}s at {} Hz)",
        args.output.display(),
        samples_to_duration(samples.len(), config.fsk.sample_rate),
        config.fsk.sample_rate
    );
    Ok(())
}

/// Decodes an FSK WAV file and stores the message.
fn run_decode(mut config: ToneConfig, args: &DecodeArgs) -> anyhow::Result<()> {
    args.fsk.apply(&mut config.fsk);

    let wav = read_wav(&args.input)?;
    eprintln!("Loaded WAV with {} samples.", wav.samples.len());

    let fsk = config.fsk.with_sample_rate(wav.sample_rate);
    let payload = fsk_decode(&wav.samples, &fsk)?;
    let message = String::from_utf8_lossy(&payload);

    eprintln!("Payload length = {} bytes", payload.len());
    println!("{}", message);

    write_text(&args.output, &payload)?;
    eprintln!("Saved to {}", args.output.display());
    Ok(())
}

fn prompt_message() -> anyhow::Result<String> {
    eprint!("Convert following to audio: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read message from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn write_text(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
