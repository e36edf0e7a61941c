/// Why a mesh code was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// The code is neither 6 nor 8 digits long (carries the length seen).
    UnsupportedLength(usize),
    /// A parsed position holds something other than an ASCII digit.
    NonNumericDigit,
    /// A sub-index lies outside its range (strict decoding only).
    SubIndexOutOfRange,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidReason::UnsupportedLength(_) => write!(f, "unsupported length"),
            InvalidReason::NonNumericDigit => write!(f, "non-numeric digit"),
            InvalidReason::SubIndexOutOfRange => write!(f, "sub-index out of range"),
        }
    }
}

/// Error type for jpmesh-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum JpMeshError {
    /// The mesh code could not be decoded.
    InvalidMeshCode { code: String, reason: InvalidReason },
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// A configuration could not be read.
    ConfigError(String),
}

impl JpMeshError {
    pub(crate) fn invalid(code: &str, reason: InvalidReason) -> Self {
        JpMeshError::InvalidMeshCode {
            code: code.to_string(),
            reason,
        }
    }

    /// Returns the rejection reason when this is an `InvalidMeshCode` error.
    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            JpMeshError::InvalidMeshCode { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

impl std::fmt::Display for JpMeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JpMeshError::InvalidMeshCode { code, reason } => {
                write!(f, "Invalid mesh code '{}': {}", code, reason)
            }
            JpMeshError::IoError(msg) => write!(f, "IO error: {}", msg),
            JpMeshError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            JpMeshError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for JpMeshError {}
