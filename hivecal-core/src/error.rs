//! Error types for hivecal.

use thiserror::Error;

/// Errors that can occur around the scheduling engine.
///
/// The generator and serializer themselves never fail; these cover
/// configuration, hive lookup and feed parsing.
#[derive(Error, Debug)]
pub enum HivecalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Apiary not found: {0}")]
    ApiaryNotFound(String),

    #[error("Could not read apiary '{slug}': {reason}")]
    ApiarySource { slug: String, reason: String },

    #[error("Horizon of {0} days exceeds the maximum of {max} days", max = crate::constants::MAX_HORIZON_DAYS)]
    HorizonTooLong(u32),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for hivecal operations.
pub type HivecalResult<T> = Result<T, HivecalError>;
