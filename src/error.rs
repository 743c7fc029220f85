//! Error types for tonegen.
//!
//! Defines the error codes and the error type shared by the synthesizer,
//! the WAV codec and the FSK modem.

use std::fmt;

/// Error codes identifying the class of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A tone or modem parameter is outside its valid range.
    /// Trigger: non-positive frequency or sample rate, negative duration.
    InvalidParameter,

    /// A quantized sample does not fit in a signed 16-bit integer.
    /// Trigger: amplitude above 1.0 with the `error` clip policy.
    SampleOutOfRange,

    /// Creating or writing the WAV output failed.
    /// Trigger: unwritable path, disk full.
    WavWriteFailed,

    /// Opening or reading a WAV input failed.
    /// Trigger: missing file, truncated data chunk.
    WavReadFailed,

    /// The WAV input is not mono 16-bit integer PCM.
    InvalidWav,

    /// No sync word was found in the demodulated bitstream.
    SyncNotFound,

    /// The bitstream ends before the length field or payload is complete.
    TruncatedFrame,

    /// The payload does not fit the 16-bit length field.
    PayloadTooLong,

    /// Generic filesystem failure outside the WAV codec.
    IoFailed,

    /// The configuration file could not be parsed.
    InvalidConfig,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidParameter => "INVALID_PARAMETER",
            ErrorCode::SampleOutOfRange => "SAMPLE_OUT_OF_RANGE",
            ErrorCode::WavWriteFailed => "WAV_WRITE_FAILED",
            ErrorCode::WavReadFailed => "WAV_READ_FAILED",
            ErrorCode::InvalidWav => "INVALID_WAV",
            ErrorCode::SyncNotFound => "SYNC_NOT_FOUND",
            ErrorCode::TruncatedFrame => "TRUNCATED_FRAME",
            ErrorCode::PayloadTooLong => "PAYLOAD_TOO_LONG",
            ErrorCode::IoFailed => "IO_FAILED",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidParameter => "A synthesis parameter is outside its valid range",
            ErrorCode::SampleOutOfRange => "A sample exceeds the signed 16-bit range",
            ErrorCode::WavWriteFailed => "Failed to write the WAV file",
            ErrorCode::WavReadFailed => "Failed to read the WAV file",
            ErrorCode::InvalidWav => "Only mono 16-bit PCM WAV files are supported",
            ErrorCode::SyncNotFound => "Sync word not found in the bitstream",
            ErrorCode::TruncatedFrame => "Bitstream too short for the declared frame",
            ErrorCode::PayloadTooLong => "Payload exceeds 65535 bytes",
            ErrorCode::IoFailed => "Filesystem operation failed",
            ErrorCode::InvalidConfig => "Configuration file is invalid",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::InvalidParameter => {
                "Use a positive frequency and sample rate, a non-negative duration \
                 and a non-negative amplitude"
            }
            ErrorCode::SampleOutOfRange => {
                "Lower the amplitude to at most 1.0 or use --clip-policy clip"
            }
            ErrorCode::WavWriteFailed => {
                "Check that the output directory exists, is writable and has free space"
            }
            ErrorCode::WavReadFailed => "Check that the input file exists and is readable",
            ErrorCode::InvalidWav => {
                "Convert the input to mono, 16-bit signed PCM before decoding"
            }
            ErrorCode::SyncNotFound => {
                "The recording may be noise or use different carrier frequencies; \
                 check --f0/--f1 and the bit duration"
            }
            ErrorCode::TruncatedFrame => {
                "The recording was cut short; capture the full transmission"
            }
            ErrorCode::PayloadTooLong => "Split the message into chunks of at most 65535 bytes",
            ErrorCode::IoFailed => "Check file permissions and available disk space",
            ErrorCode::InvalidConfig => "Fix the JSON syntax or remove the configuration file",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for tonegen operations.
#[derive(Debug)]
pub struct ToneError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ToneError {
    /// Creates a new ToneError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new ToneError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an INVALID_PARAMETER error.
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidParameter,
            format!("Invalid {}: {}", name, reason.into()),
        )
    }

    /// Creates a SAMPLE_OUT_OF_RANGE error.
    pub fn sample_out_of_range(index: usize, value: f64) -> Self {
        Self::new(
            ErrorCode::SampleOutOfRange,
            format!(
                "Sample {} quantizes to {} (outside -32768..=32767)",
                index, value
            ),
        )
    }

    /// Creates a WAV_WRITE_FAILED error.
    pub fn wav_write_failed(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(ErrorCode::WavWriteFailed, context, source)
    }

    /// Creates a WAV_READ_FAILED error.
    pub fn wav_read_failed(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(ErrorCode::WavReadFailed, context, source)
    }

    /// Creates an INVALID_WAV error.
    pub fn invalid_wav(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidWav, reason)
    }

    /// Creates a SYNC_NOT_FOUND error.
    pub fn sync_not_found(bit_count: usize) -> Self {
        Self::new(
            ErrorCode::SyncNotFound,
            format!("Sync word not found in {} recovered bits", bit_count),
        )
    }

    /// Creates a TRUNCATED_FRAME error.
    pub fn truncated_frame(needed: usize, available: usize) -> Self {
        Self::new(
            ErrorCode::TruncatedFrame,
            format!(
                "Bitstream too short: need {} bits after sync, have {}",
                needed, available
            ),
        )
    }

    /// Creates a PAYLOAD_TOO_LONG error.
    pub fn payload_too_long(len: usize) -> Self {
        Self::new(
            ErrorCode::PayloadTooLong,
            format!("Payload too long: {} bytes (maximum 65535)", len),
        )
    }
}

impl fmt::Display for ToneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for ToneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using ToneError.
pub type Result<T> = std::result::Result<T, ToneError>;
