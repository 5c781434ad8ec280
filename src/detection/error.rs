use thiserror::Error;

/// Errors raised by the detection core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    #[error("Row {y} is outside the image (height {height})")]
    RowOutOfRange { y: u32, height: u32 },
    #[error("Invalid detection config: {0}")]
    InvalidConfig(String),
}
