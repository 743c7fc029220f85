//! WAV file codec for mono 16-bit PCM.
//!
//! Writes quantized samples with the hound crate and reads them back as
//! normalized floats.

use std::io::{Cursor, Read};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::{debug, info};

use crate::audio::quantize::{quantize, ClipPolicy};
use crate::error::{Result, ToneError};

/// Number of audio channels (mono).
pub const CHANNELS: u16 = 1;

/// Bits per PCM sample.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Largest frame count a mono 16-bit file can hold: the RIFF size field is a
/// u32 and covers 36 header bytes plus 2 bytes per frame.
pub const MAX_WAV_FRAMES: u64 = (u32::MAX as u64 - 36) / 2;

/// Divisor used when normalizing 16-bit samples on read.
const READ_SCALE: f64 = 32768.0;

/// Decoded contents of a mono 16-bit WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct WavData {
    /// Sample rate declared in the header, in Hz.
    pub sample_rate: u32,
    /// Samples normalized to [-1.0, 1.0).
    pub samples: Vec<f64>,
}

impl WavData {
    /// Duration of the decoded audio in seconds.
    pub fn duration(&self) -> f64 {
        samples_to_duration(self.samples.len(), self.sample_rate)
    }
}

/// Header used for every file this crate writes.
pub fn pcm_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

/// Writes samples to a mono 16-bit PCM WAV file.
///
/// All samples are quantized before the file is created, so an overflow
/// under [`ClipPolicy::Error`] leaves no file behind. The target is created
/// or overwritten.
///
/// # Example
///
/// ```ignore
/// use tonegen::audio::{write_wav, ClipPolicy};
///
/// let samples = vec![0.0, 0.5, -0.5, 0.0];
/// write_wav(Path::new("/tmp/test.wav"), &samples, 44100, ClipPolicy::Clip)?;
/// ```
pub fn write_wav(path: &Path, samples: &[f64], sample_rate: u32, policy: ClipPolicy) -> Result<()> {
    let frames = quantize(samples, policy)?;

    let mut writer = WavWriter::create(path, pcm_spec(sample_rate)).map_err(|e| {
        ToneError::wav_write_failed(format!("Failed to create WAV file {}", path.display()), e)
    })?;

    for frame in &frames {
        writer
            .write_sample(*frame)
            .map_err(|e| ToneError::wav_write_failed("Failed to write sample", e))?;
    }

    writer
        .finalize()
        .map_err(|e| ToneError::wav_write_failed("Failed to finalize WAV file", e))?;

    info!(
        path = %path.display(),
        frames = frames.len(),
        sample_rate,
        "wrote WAV file"
    );
    Ok(())
}

/// Writes samples to an in-memory WAV buffer.
///
/// Returns the WAV file contents as a byte vector.
pub fn write_wav_to_buffer(samples: &[f64], sample_rate: u32, policy: ClipPolicy) -> Result<Vec<u8>> {
    let frames = quantize(samples, policy)?;

    let mut buffer = Vec::new();
    {
        let mut writer = WavWriter::new(Cursor::new(&mut buffer), pcm_spec(sample_rate))
            .map_err(|e| ToneError::wav_write_failed("Failed to create WAV writer", e))?;

        for frame in &frames {
            writer
                .write_sample(*frame)
                .map_err(|e| ToneError::wav_write_failed("Failed to write sample", e))?;
        }

        writer
            .finalize()
            .map_err(|e| ToneError::wav_write_failed("Failed to finalize WAV buffer", e))?;
    }

    Ok(buffer)
}

/// Reads a mono 16-bit PCM WAV file.
pub fn read_wav(path: &Path) -> Result<WavData> {
    let reader = WavReader::open(path).map_err(|e| {
        ToneError::wav_read_failed(format!("Failed to open WAV file {}", path.display()), e)
    })?;
    let data = decode(reader)?;
    info!(
        path = %path.display(),
        samples = data.samples.len(),
        sample_rate = data.sample_rate,
        "read WAV file"
    );
    Ok(data)
}

/// Reads a mono 16-bit PCM WAV image from memory.
pub fn read_wav_from_buffer(bytes: &[u8]) -> Result<WavData> {
    let reader = WavReader::new(Cursor::new(bytes))
        .map_err(|e| ToneError::wav_read_failed("Failed to parse WAV buffer", e))?;
    decode(reader)
}

fn decode<R: Read>(reader: WavReader<R>) -> Result<WavData> {
    let spec = reader.spec();
    debug!(?spec, "WAV header");

    if spec.sample_format != SampleFormat::Int {
        return Err(ToneError::invalid_wav("Only PCM integer WAV supported"));
    }
    if spec.channels != CHANNELS {
        return Err(ToneError::invalid_wav(format!(
            "Only mono WAV supported, got {} channels",
            spec.channels
        )));
    }
    if spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(ToneError::invalid_wav(format!(
            "Only 16-bit WAV supported, got {} bits",
            spec.bits_per_sample
        )));
    }

    let samples = reader
        .into_samples::<i16>()
        .map(|s| s.map(|v| v as f64 / READ_SCALE))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ToneError::wav_read_failed("Failed to read sample data", e))?;

    Ok(WavData {
        sample_rate: spec.sample_rate,
        samples,
    })
}

/// Calculates the duration of audio in seconds from sample count.
pub fn samples_to_duration(sample_count: usize, sample_rate: u32) -> f64 {
    sample_count as f64 / sample_rate as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::tempdir;

    #[test]
    fn write_wav_creates_valid_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.wav");

        let samples = vec![0.0, 0.5, -0.5, 0.0];
        write_wav(&path, &samples, 22050, ClipPolicy::Clip).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.sample_format, SampleFormat::Int);
        assert_eq!(reader.len(), 4);
    }

    #[test]
    fn constant_samples_round_trip_exactly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("const.wav");

        write_wav(&path, &[0.5; 10], 44100, ClipPolicy::Clip).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let frames: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(frames, vec![16383; 10]);
    }

    #[test]
    fn empty_sequence_writes_zero_frames() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.wav");

        write_wav(&path, &[], 44100, ClipPolicy::Clip).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.len(), 0);
        assert_eq!(reader.spec().sample_rate, 44100);
    }

    #[test]
    fn frame_bytes_are_little_endian() {
        let buffer = write_wav_to_buffer(&[0.5, -0.5], 8000, ClipPolicy::Clip).unwrap();
        assert_eq!(&buffer[0..4], b"RIFF");
        assert_eq!(&buffer[8..12], b"WAVE");
        // Canonical 44-byte header followed by the frames
        assert_eq!(buffer.len(), 44 + 4);
        assert_eq!(&buffer[44..46], &16383i16.to_le_bytes());
        assert_eq!(&buffer[46..48], &(-16383i16).to_le_bytes());
    }

    #[test]
    fn overflow_with_error_policy_creates_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loud.wav");

        let err = write_wav(&path, &[0.2, 1.2], 44100, ClipPolicy::Error).unwrap_err();
        assert_eq!(err.code, ErrorCode::SampleOutOfRange);
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_path_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.wav");

        let err = write_wav(&path, &[0.0], 44100, ClipPolicy::Clip).unwrap_err();
        assert_eq!(err.code, ErrorCode::WavWriteFailed);
    }

    #[test]
    fn read_wav_normalizes_samples() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("read.wav");
        write_wav(&path, &[1.0, -1.0, 0.0], 16000, ClipPolicy::Clip).unwrap();

        let data = read_wav(&path).unwrap();
        assert_eq!(data.sample_rate, 16000);
        assert_eq!(data.samples, vec![32767.0 / 32768.0, -32767.0 / 32768.0, 0.0]);
    }

    #[test]
    fn read_wav_rejects_stereo() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut buffer = Vec::new();
        {
            let mut writer = WavWriter::new(Cursor::new(&mut buffer), spec).unwrap();
            writer.write_sample(0i16).unwrap();
            writer.write_sample(0i16).unwrap();
            writer.finalize().unwrap();
        }

        let err = read_wav_from_buffer(&buffer).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidWav);
    }

    #[test]
    fn read_wav_truncated_data_chunk() {
        let mut buffer = write_wav_to_buffer(&[0.25; 10], 8000, ClipPolicy::Clip).unwrap();
        buffer.truncate(buffer.len() - 3);

        let err = read_wav_from_buffer(&buffer).unwrap_err();
        assert_eq!(err.code, ErrorCode::WavReadFailed);
    }

    #[test]
    fn max_frames_fits_riff_size() {
        assert_eq!(MAX_WAV_FRAMES, 2_147_483_629);
        assert!(36 + 2 * MAX_WAV_FRAMES <= u32::MAX as u64);
    }

    #[test]
    fn read_wav_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_wav(&dir.path().join("nope.wav")).unwrap_err();
        assert_eq!(err.code, ErrorCode::WavReadFailed);
    }

    #[test]
    fn samples_to_duration_calculation() {
        assert_eq!(samples_to_duration(44100, 44100), 1.0);
        assert_eq!(samples_to_duration(22050, 44100), 0.5);
        let data = WavData { sample_rate: 4, samples: vec![0.0; 8] };
        assert_eq!(data.duration(), 2.0);
    }
}
