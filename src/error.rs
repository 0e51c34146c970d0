use thiserror::Error;

/// Errors raised by the subtitle core.
///
/// Structural defects in individual SRT blocks never surface here; the
/// parser drops those blocks. Only a timestamp that reaches the codec in a
/// bad shape aborts a transformation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    #[error("malformed timestamp: '{value}' (expected HH:MM:SS,mmm)")]
    MalformedTimestamp { value: String },
}

impl SubtitleError {
    pub(crate) fn malformed(value: &str) -> Self {
        Self::MalformedTimestamp {
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SubtitleError>;
