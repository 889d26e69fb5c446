use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterceptError {
    #[error("Lookup table has {found} entries but the sensor has {expected} cells")]
    LookupWidthMismatch { expected: usize, found: usize },

    #[error("Training did not converge after {attempts} epochs (max deviation {max_deviation:.5})")]
    TrainingNotConverged { attempts: u64, max_deviation: f64 },

    #[error("No training candidates inside the sensor cone")]
    EmptyTrainingSet,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InterceptError {
    /// Startup errors refuse to run at all; the rest only disable learned guidance.
    pub fn is_fatal_at_startup(&self) -> bool {
        match self {
            InterceptError::LookupWidthMismatch { .. } => true,
            InterceptError::InvalidConfig(_) => true,
            InterceptError::Config(_) => true,
            InterceptError::Io(_) => true,
            InterceptError::TrainingNotConverged { .. } => false,
            InterceptError::EmptyTrainingSet => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, InterceptError>;
