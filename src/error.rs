use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("series generation failed: {0}")]
    GenerationFailure(String),

    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("fullscreen request failed: {0}")]
    FullscreenRequestFailure(String),
}

impl ChartError {
    /// Wraps any load-path error into `GenerationFailure`, keeping the cause text.
    #[must_use]
    pub fn into_generation_failure(self) -> Self {
        match self {
            Self::GenerationFailure(_) => self,
            other => Self::GenerationFailure(other.to_string()),
        }
    }
}
