use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConsensusError>;

#[derive(Error, Debug)]
pub enum ConsensusError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    #[error("Invalid call file '{path}': {reason}")]
    InvalidFileFormat { path: String, reason: String },
}

impl ConsensusError {
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        ConsensusError::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }
}
