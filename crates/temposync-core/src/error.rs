use thiserror::Error;

/// Reasons free-form time signature text is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("time signature must look like N/M, e.g. 7/8")]
    Malformed,
    #[error("time signature {numerator}/{denominator} is outside 1..=64")]
    OutOfRange { numerator: u32, denominator: u32 },
}

/// Reasons raw BPM text is not displayable as a tempo.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BpmInputError {
    #[error("not a number")]
    NotANumber,
    #[error("{0} is outside 1..=999 BPM")]
    OutOfRange(f64),
}

/// Errors raised while loading or validating calculator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}
