use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{SectionId, SlideId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    OutOfRange,
    NoSlides,
    NoSections,
    Duplicate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("slide index {index} is out of range for {len} slides")]
    OutOfRange { index: usize, len: usize },
    #[error("carousel requires at least one slide")]
    NoSlides,
    #[error("section tracker requires at least one section")]
    NoSections,
    #[error("section id '{0}' is listed more than once")]
    DuplicateSection(SectionId),
    #[error("slide id {0} is listed more than once")]
    DuplicateSlide(SlideId),
}

impl EngineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::OutOfRange { .. } => ErrorCode::OutOfRange,
            Self::NoSlides => ErrorCode::NoSlides,
            Self::NoSections => ErrorCode::NoSections,
            Self::DuplicateSection(_) | Self::DuplicateSlide(_) => ErrorCode::Duplicate,
        }
    }
}

/// Serializable form of an [`EngineError`] for render listeners and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&EngineError> for ErrorReport {
    fn from(value: &EngineError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}

impl From<EngineError> for ErrorReport {
    fn from(value: EngineError) -> Self {
        Self::from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_code_and_message() {
        let report = ErrorReport::from(EngineError::OutOfRange { index: 9, len: 4 });
        assert_eq!(report.code, ErrorCode::OutOfRange);
        assert_eq!(report.message, "slide index 9 is out of range for 4 slides");

        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["code"], "out_of_range");
    }
}
