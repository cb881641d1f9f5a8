use std::fmt;

/// Main error type for the pokehub crate
#[derive(Debug, Clone, PartialEq)]
pub enum PokehubError {
    /// Error talking to the external species data API
    Fetch(FetchError),
    /// Error validating or persisting an annotation
    Annotation(AnnotationError),
}

/// Errors raised while fetching combatant data from the external API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be sent or the connection failed
    Request(String),
    /// The server answered with a non-success status code
    Status { code: u16 },
    /// The response body could not be decoded into the expected shape
    Decode(String),
}

/// Errors raised by the annotation store
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationError {
    /// Height must be a finite number in [0, 1000]
    HeightOutOfRange(f64),
    /// Weight must be a finite number in [0, 10000]
    WeightOutOfRange(f64),
    /// Description is limited to 500 characters
    DescriptionTooLong(usize),
    /// Nickname must be non-empty after trimming
    NicknameEmpty,
    /// Nickname is limited to 100 characters
    NicknameTooLong(usize),
    /// The backing file could not be read or written
    Io(String),
    /// The backing file held data that could not be encoded or decoded
    Encoding(String),
}

impl fmt::Display for PokehubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PokehubError::Fetch(err) => write!(f, "Fetch error: {}", err),
            PokehubError::Annotation(err) => write!(f, "Annotation error: {}", err),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Request(details) => write!(f, "Request failed: {}", details),
            FetchError::Status { code } => write!(f, "Server answered with status {}", code),
            FetchError::Decode(details) => write!(f, "Malformed response: {}", details),
        }
    }
}

impl fmt::Display for AnnotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationError::HeightOutOfRange(value) => {
                write!(f, "Height must be between 0 and 1000, got {}", value)
            }
            AnnotationError::WeightOutOfRange(value) => {
                write!(f, "Weight must be between 0 and 10000, got {}", value)
            }
            AnnotationError::DescriptionTooLong(len) => {
                write!(f, "Description must be at most 500 characters, got {}", len)
            }
            AnnotationError::NicknameEmpty => write!(f, "Nickname must not be empty"),
            AnnotationError::NicknameTooLong(len) => {
                write!(f, "Nickname must be at most 100 characters, got {}", len)
            }
            AnnotationError::Io(details) => write!(f, "Annotation file error: {}", details),
            AnnotationError::Encoding(details) => {
                write!(f, "Annotation encoding error: {}", details)
            }
        }
    }
}

impl std::error::Error for PokehubError {}
impl std::error::Error for FetchError {}
impl std::error::Error for AnnotationError {}

impl From<FetchError> for PokehubError {
    fn from(err: FetchError) -> Self {
        PokehubError::Fetch(err)
    }
}

impl From<AnnotationError> for PokehubError {
    fn from(err: AnnotationError) -> Self {
        PokehubError::Annotation(err)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status {
                code: status.as_u16(),
            }
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// Type alias for Results using PokehubError
pub type PokehubResult<T> = Result<T, PokehubError>;

/// Type alias for Results using FetchError
pub type FetchResult<T> = Result<T, FetchError>;

/// Type alias for Results using AnnotationError
pub type AnnotationResult<T> = Result<T, AnnotationError>;
