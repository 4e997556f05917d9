use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Sample too large: requested {requested} values from a population of {available}")]
    SampleTooLarge { requested: usize, available: usize },

    #[error("Insufficient data: at least {required} values required, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Distribution error: {0}")]
    Distribution(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InferenceError>;

impl From<validator::ValidationErrors> for InferenceError {
    fn from(err: validator::ValidationErrors) -> Self {
        InferenceError::Validation(err.to_string())
    }
}
