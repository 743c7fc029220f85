//! Runtime configuration.
//!
//! Settings are layered: built-in defaults, then a JSON config file, then
//! `TONEGEN_*` environment variables. Command-line flags are applied on top
//! by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::audio::ClipPolicy;
use crate::error::{ErrorCode, Result, ToneError};
use crate::fsk::FskConfig;
use crate::synth::{ToneSpec, DEFAULT_AMPLITUDE, DEFAULT_SAMPLE_RATE};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Runtime configuration for tone synthesis and the FSK modem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    /// Sample rate for plain tones (Hz).
    pub sample_rate: u32,

    /// Peak amplitude for plain tones.
    pub amplitude: f64,

    /// Handling of samples that overflow 16 bits.
    pub clip_policy: ClipPolicy,

    /// FSK modem settings.
    pub fsk: FskConfig,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            amplitude: DEFAULT_AMPLITUDE,
            clip_policy: ClipPolicy::default(),
            fsk: FskConfig::default(),
        }
    }
}

impl ToneConfig {
    /// Creates a ToneConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the layered configuration.
    ///
    /// `explicit` must exist if given. Otherwise the platform config file is
    /// read when present. Environment variables are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env();
        Ok(config)
    }

    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ToneError::with_source(
                ErrorCode::IoFailed,
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;
        let config = serde_json::from_str(&text).map_err(|e| {
            ToneError::with_source(
                ErrorCode::InvalidConfig,
                format!("Failed to parse config file {}", path.display()),
                e,
            )
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Creates a ToneConfig from defaults and environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Applies environment variables from the process environment.
    ///
    /// Reads the following environment variables:
    /// - `TONEGEN_SAMPLE_RATE` - Tone sample rate in Hz
    /// - `TONEGEN_AMPLITUDE` - Tone amplitude
    /// - `TONEGEN_CLIP_POLICY` - clip, wrap or error
    /// - `TONEGEN_FSK_F0` - FSK carrier for 0 bits
    /// - `TONEGEN_FSK_F1` - FSK carrier for 1 bits
    /// - `TONEGEN_FSK_BIT_DURATION` - FSK seconds per bit
    /// - `TONEGEN_FSK_SAMPLE_RATE` - FSK sample rate in Hz
    ///
    /// Unset or unparsable variables leave the current value untouched.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    /// Applies variables from an arbitrary lookup.
    pub fn apply_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rate) = lookup("TONEGEN_SAMPLE_RATE").and_then(|s| s.parse::<u32>().ok()) {
            if rate > 0 {
                self.sample_rate = rate;
            }
        }

        if let Some(amp) = lookup("TONEGEN_AMPLITUDE").and_then(|s| s.parse::<f64>().ok()) {
            if amp.is_finite() && amp >= 0.0 {
                self.amplitude = amp;
            }
        }

        if let Some(policy) = lookup("TONEGEN_CLIP_POLICY").and_then(|s| ClipPolicy::parse(&s)) {
            self.clip_policy = policy;
        }

        if let Some(f0) = lookup("TONEGEN_FSK_F0").and_then(|s| s.parse::<f64>().ok()) {
            if f0.is_finite() && f0 > 0.0 {
                self.fsk.f0 = f0;
            }
        }

        if let Some(f1) = lookup("TONEGEN_FSK_F1").and_then(|s| s.parse::<f64>().ok()) {
            if f1.is_finite() && f1 > 0.0 {
                self.fsk.f1 = f1;
            }
        }

        if let Some(bit) = lookup("TONEGEN_FSK_BIT_DURATION").and_then(|s| s.parse::<f64>().ok()) {
            if bit.is_finite() && bit > 0.0 {
                self.fsk.bit_duration = bit;
            }
        }

        if let Some(rate) = lookup("TONEGEN_FSK_SAMPLE_RATE").and_then(|s| s.parse::<u32>().ok()) {
            if rate > 0 {
                self.fsk.sample_rate = rate;
            }
        }
    }

    /// Builds a tone spec using this config's sample rate and amplitude.
    pub fn tone_spec(&self, frequency: f64, duration: f64) -> ToneSpec {
        ToneSpec {
            frequency,
            duration,
            sample_rate: self.sample_rate,
            amplitude: self.amplitude,
        }
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if self.sample_rate == 0 {
            return Some("sample_rate must be > 0".to_string());
        }

        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Some(format!("amplitude must be >= 0, got {}", self.amplitude));
        }

        if let Err(e) = self.fsk.validate() {
            return Some(format!("fsk: {}", e.message));
        }

        None
    }
}

/// Returns the platform-specific config file path.
///
/// - macOS: ~/Library/Application Support/tonegen/config.json
/// - Linux: ~/.config/tonegen/config.json
/// - Windows: C:\Users\<user>\AppData\Roaming\tonegen\config\config.json
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "tonegen")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = ToneConfig::new();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.amplitude, 0.5);
        assert_eq!(config.clip_policy, ClipPolicy::Clip);
        assert!(config.validate().is_none());
    }

    #[test]
    fn env_overrides() {
        let env = vars(&[
            ("TONEGEN_SAMPLE_RATE", "48000"),
            ("TONEGEN_AMPLITUDE", "0.9"),
            ("TONEGEN_CLIP_POLICY", "wrap"),
            ("TONEGEN_FSK_F0", "1200"),
            ("TONEGEN_FSK_F1", "2200"),
            ("TONEGEN_FSK_BIT_DURATION", "0.01"),
            ("TONEGEN_FSK_SAMPLE_RATE", "44100"),
        ]);
        let mut config = ToneConfig::new();
        config.apply_vars(|k| env.get(k).cloned());

        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.amplitude, 0.9);
        assert_eq!(config.clip_policy, ClipPolicy::Wrap);
        assert_eq!(config.fsk.f0, 1200.0);
        assert_eq!(config.fsk.f1, 2200.0);
        assert_eq!(config.fsk.bit_duration, 0.01);
        assert_eq!(config.fsk.sample_rate, 44100);
        assert!(config.validate().is_none());
    }

    #[test]
    fn invalid_env_values_ignored() {
        let env = vars(&[
            ("TONEGEN_SAMPLE_RATE", "0"),
            ("TONEGEN_AMPLITUDE", "-1"),
            ("TONEGEN_CLIP_POLICY", "sometimes"),
            ("TONEGEN_FSK_BIT_DURATION", "fast"),
            ("TONEGEN_FSK_F0", "NaN"),
            ("TONEGEN_FSK_F1", "-5"),
        ]);
        let mut config = ToneConfig::new();
        config.apply_vars(|k| env.get(k).cloned());
        assert_eq!(config, ToneConfig::default());

        let env = vars(&[
            ("TONEGEN_FSK_F0", "inf"),
            ("TONEGEN_FSK_F1", "0"),
            ("TONEGEN_FSK_BIT_DURATION", "inf"),
        ]);
        let mut config = ToneConfig::new();
        config.apply_vars(|k| env.get(k).cloned());
        assert_eq!(config, ToneConfig::default());
    }

    #[test]
    fn partial_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "amplitude": 0.25, "clip_policy": "error", "fsk": { "f0": 1000.0 } }"#,
        )
        .unwrap();

        let config = ToneConfig::from_file(&path).unwrap();
        assert_eq!(config.amplitude, 0.25);
        assert_eq!(config.clip_policy, ClipPolicy::Error);
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.fsk.f0, 1000.0);
        assert_eq!(config.fsk.f1, 45_000.0);
    }

    #[test]
    fn bad_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ToneConfig::from_file(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfig);

        let err = ToneConfig::load(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::IoFailed);
    }

    #[test]
    fn validation_reports_fsk_problems() {
        let mut config = ToneConfig::new();
        config.fsk.sample_rate = 44100;
        let msg = config.validate().unwrap();
        assert!(msg.starts_with("fsk:"));
    }

    #[test]
    fn tone_spec_uses_config() {
        let config = ToneConfig { sample_rate: 8000, amplitude: 0.1, ..ToneConfig::default() };
        let spec = config.tone_spec(440.0, 2.0);
        assert_eq!(spec.sample_rate, 8000);
        assert_eq!(spec.amplitude, 0.1);
        assert_eq!(spec.len(), 16000);
    }

    #[test]
    fn default_config_path_is_json() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }
}
