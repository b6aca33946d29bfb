use std::error::Error;
use std::fmt;
use std::io;

/// Enumeration of all errors that can surface while turning an MP4 into an SRT track
#[derive(Debug)]
pub enum Mp4SrtError {
    Mp4(Mp4Error),
    Metadata(MetadataError),
    Subtitle(SubtitleError),
    Io(io::Error),
}

/// Embedded XML metadata specific errors
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataError {
    pub message: String,
}

impl MetadataError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Caption writing specific errors
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleError {
    pub message: String,
}

impl SubtitleError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// MP4 box decoding errors
#[derive(Debug, Clone, PartialEq)]
pub enum Mp4Error {
    /// Generic MP4 error with a descriptive message
    Error { message: String },
    /// The mvhd box holds fewer bytes than its fixed layout
    MvhdTooShort { len: usize },
    /// The mvhd time scale is zero
    InvalidTimeScale,
    /// The creation time cannot be represented as a calendar instant
    CreationTimeOutOfRange { raw: u64 },
    /// The ftyp payload cannot hold a major brand and minor version
    FtypTooShort { len: usize },
}

impl fmt::Display for Mp4SrtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mp4SrtError::Io(err) => write!(f, "I/O error: {}", err),
            Mp4SrtError::Mp4(err) => write!(f, "MP4 error: {}", err),
            Mp4SrtError::Metadata(err) => write!(f, "Metadata error: {}", err),
            Mp4SrtError::Subtitle(err) => write!(f, "Subtitle error: {}", err),
        }
    }
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for SubtitleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for Mp4Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mp4Error::Error { message } => write!(f, "{}", message),
            Mp4Error::MvhdTooShort { len } => write!(
                f,
                "mvhd data is too short: expected at least 108 bytes, got {} bytes",
                len
            ),
            Mp4Error::InvalidTimeScale => write!(f, "mvhd time scale is zero"),
            Mp4Error::CreationTimeOutOfRange { raw } => {
                write!(f, "mvhd creation time {} is out of range", raw)
            }
            Mp4Error::FtypTooShort { len } => write!(
                f,
                "ftyp data is too short: expected at least 8 bytes, got {} bytes",
                len
            ),
        }
    }
}

impl Error for Mp4SrtError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Mp4SrtError::Io(err) => Some(err),
            Mp4SrtError::Mp4(err) => Some(err),
            Mp4SrtError::Metadata(err) => Some(err),
            Mp4SrtError::Subtitle(err) => Some(err),
        }
    }
}
impl Error for MetadataError {}
impl Error for SubtitleError {}
impl Error for Mp4Error {}

// Conversion implementations
impl From<io::Error> for Mp4SrtError {
    fn from(err: io::Error) -> Self {
        Mp4SrtError::Io(err)
    }
}

impl From<Mp4Error> for Mp4SrtError {
    fn from(err: Mp4Error) -> Self {
        Mp4SrtError::Mp4(err)
    }
}

impl From<MetadataError> for Mp4SrtError {
    fn from(err: MetadataError) -> Self {
        Mp4SrtError::Metadata(err)
    }
}

impl From<SubtitleError> for Mp4SrtError {
    fn from(err: SubtitleError) -> Self {
        Mp4SrtError::Subtitle(err)
    }
}

// Conversion to io::Error for callers that only speak std::io
impl From<Mp4SrtError> for io::Error {
    fn from(err: Mp4SrtError) -> Self {
        match err {
            Mp4SrtError::Io(err) => err,
            other => io::Error::other(other),
        }
    }
}

impl From<Mp4Error> for io::Error {
    fn from(err: Mp4Error) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

impl From<MetadataError> for io::Error {
    fn from(err: MetadataError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

// Type alias for Result with Mp4SrtError
pub type Mp4SrtResult<T> = Result<T, Mp4SrtError>;
