//! Command-line interface.
//!
//! Running `tonegen` with no subcommand renders the stock example tone.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::audio::ClipPolicy;
use crate::config::ToneConfig;
use crate::fsk::FskConfig;

/// Frequency of the stock example tone (Hz).
pub const EXAMPLE_FREQUENCY: f64 = 15_000.0;

/// Duration of the stock example tone (seconds).
pub const EXAMPLE_DURATION: f64 = 1.0;

/// Output file of the stock example tone.
pub const EXAMPLE_OUTPUT: &str = "15kHz.wav";

/// Default WAV file used by the FSK subcommands.
pub const FSK_WAV: &str = "auxon_fsk.wav";

/// Default file receiving a decoded message.
pub const DECODED_TEXT: &str = "decoded.txt";

/// Overflow handling for quantization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ClipPolicyArg {
    /// Saturate at the 16-bit limits
    #[default]
    Clip,
    /// Wrap around like an unchecked integer cast
    Wrap,
    /// Refuse to write out-of-range samples
    Error,
}

impl From<ClipPolicyArg> for ClipPolicy {
    fn from(arg: ClipPolicyArg) -> Self {
        match arg {
            ClipPolicyArg::Clip => ClipPolicy::Clip,
            ClipPolicyArg::Wrap => ClipPolicy::Wrap,
            ClipPolicyArg::Error => ClipPolicy::Error,
        }
    }
}

/// tonegen: sine tones and FSK text as 16-bit PCM WAV
#[derive(Parser, Debug)]
#[command(name = "tonegen")]
#[command(about = "Generate sine tones and FSK-encoded text as mono 16-bit WAV files")]
#[command(version)]
pub struct Cli {
    /// JSON config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Write a single sine tone
    Tone(ToneArgs),
    /// Encode a text message as FSK audio
    Encode(EncodeArgs),
    /// Decode an FSK recording back to text
    Decode(DecodeArgs),
}

/// Arguments for `tonegen tone`.
#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct ToneArgs {
    /// Tone frequency in Hz
    #[arg(short, long, default_value_t = EXAMPLE_FREQUENCY)]
    pub frequency: f64,

    /// Tone duration in seconds
    #[arg(short, long, default_value_t = EXAMPLE_DURATION)]
    pub duration: f64,

    /// Sample rate in Hz (overrides config)
    #[arg(short, long)]
    pub sample_rate: Option<u32>,

    /// Peak amplitude, normally 0.0-1.0 (overrides config)
    #[arg(short, long)]
    pub amplitude: Option<f64>,

    /// Handling of samples outside the 16-bit range (overrides config)
    #[arg(long, value_enum)]
    pub clip_policy: Option<ClipPolicyArg>,

    /// Output WAV file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Default for ToneArgs {
    fn default() -> Self {
        Self {
            frequency: EXAMPLE_FREQUENCY,
            duration: EXAMPLE_DURATION,
            sample_rate: None,
            amplitude: None,
            clip_policy: None,
            output: None,
        }
    }
}

impl ToneArgs {
    /// Returns the effective output path.
    ///
    /// Defaults to "15kHz.wav" in the current directory if not specified.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(EXAMPLE_OUTPUT))
    }

    /// Applies flag overrides on top of the loaded config.
    pub fn apply(&self, config: &mut ToneConfig) {
        if let Some(rate) = self.sample_rate {
            config.sample_rate = rate;
        }
        if let Some(amp) = self.amplitude {
            config.amplitude = amp;
        }
        if let Some(policy) = self.clip_policy {
            config.clip_policy = policy.into();
        }
    }
}

/// Modem flags shared by `encode` and `decode`.
#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct FskArgs {
    /// Carrier for 0 bits in Hz
    #[arg(long)]
    pub f0: Option<f64>,

    /// Carrier for 1 bits in Hz
    #[arg(long)]
    pub f1: Option<f64>,

    /// Seconds per bit
    #[arg(long)]
    pub bit_duration: Option<f64>,
}

impl FskArgs {
    /// Applies flag overrides on top of the loaded modem config.
    pub fn apply(&self, fsk: &mut FskConfig) {
        if let Some(f0) = self.f0 {
            fsk.f0 = f0;
        }
        if let Some(f1) = self.f1 {
            fsk.f1 = f1;
        }
        if let Some(bit) = self.bit_duration {
            fsk.bit_duration = bit;
        }
    }
}

/// Arguments for `tonegen encode`.
#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct EncodeArgs {
    /// Message to encode; read from stdin when omitted
    #[arg(short, long)]
    pub message: Option<String>,

    /// Sample rate in Hz (overrides config)
    #[arg(short, long)]
    pub sample_rate: Option<u32>,

    /// Output WAV file path
    #[arg(short, long, default_value = FSK_WAV)]
    pub output: PathBuf,

    #[command(flatten)]
    pub fsk: FskArgs,
}

/// Arguments for `tonegen decode`.
#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct DecodeArgs {
    /// FSK recording to decode
    #[arg(short, long, default_value = FSK_WAV)]
    pub input: PathBuf,

    /// File receiving the decoded message
    #[arg(short, long, default_value = DECODED_TEXT)]
    pub output: PathBuf,

    #[command(flatten)]
    pub fsk: FskArgs,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Returns the subcommand, falling back to the stock example tone.
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Tone(ToneArgs::default()))
    }
}
