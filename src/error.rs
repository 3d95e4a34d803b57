use {
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
    },
    tower::BoxError,
};

/// Error returned when a tracking operation or codeless validation cannot be completed.
///
/// A codeless hash that simply does not match is *not* an error; see
/// [`CodelessValidator::validate`][crate::CodelessValidator::validate].
#[derive(Debug)]
#[non_exhaustive]
pub enum TrackingError {
    /// A required partner parameter was missing or empty. Sample message:
    /// `partnerId is required and cannot be empty.`
    MissingParameter(/* message */ String),

    /// A signing key could not be decoded from base64.
    InvalidKey(/* message */ String),

    /// A codeless hash matched, but the timestamp it attests is not a count of milliseconds since the Unix epoch
    /// (or lies outside the representable range).
    InvalidTimestamp(/* message */ String),

    /// The tracking URL could not be turned into an HTTP request, typically because the configured hostname or
    /// protocol contains characters that are not legal in a URI.
    InvalidUrl(/* message */ String),

    /// The transport failed to deliver the redemption. The underlying error is passed through untouched.
    Transport(BoxError),
}

impl Display for TrackingError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::MissingParameter(msg) => f.write_str(msg),
            Self::InvalidKey(msg) => f.write_str(msg),
            Self::InvalidTimestamp(msg) => f.write_str(msg),
            Self::InvalidUrl(msg) => f.write_str(msg),
            Self::Transport(ref e) => Display::fmt(e, f),
        }
    }
}

impl Error for TrackingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(ref e) => Some(&**e),
            _ => None,
        }
    }
}

impl From<BoxError> for TrackingError {
    fn from(e: BoxError) -> TrackingError {
        match e.downcast::<TrackingError>() {
            Ok(tracking_err) => *tracking_err,
            Err(e) => TrackingError::Transport(e),
        }
    }
}

impl From<http::Error> for TrackingError {
    fn from(e: http::Error) -> TrackingError {
        TrackingError::InvalidUrl(format!("Unable to build tracking request: {}", e))
    }
}
