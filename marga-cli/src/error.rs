//! Error types for marga-cli

use marga::MargaError;
use thiserror::Error;

/// marga-cli error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Marga(#[from] MargaError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    #[error("{failed} of {total} scenario files could not be loaded")]
    ScenarioFiles { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, CliError>;
