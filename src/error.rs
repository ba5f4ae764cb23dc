//! Errors from the collaborators around the checks

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Everything that can go wrong before a check has data to classify
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("option --warning({warning}) must be greater than --critical({critical})")]
    PercentThresholds { warning: f64, critical: f64 },

    #[error("option --warningcount({warning}) must be greater than --criticalcount({critical})")]
    CountThresholds { warning: u64, critical: u64 },

    #[error("Option --{flag} invalid. Value {value} must be between 0 and 100")]
    PercentOutOfRange { flag: &'static str, value: f64 },

    #[error("Invalid value passed for timeout: {0}")]
    InvalidTimeout(f64),

    #[error("AWS credentials not passed in arguments")]
    MissingCredentials,

    #[error("unexpected status: {0}")]
    UnknownStatus(String),

    /// The external program could not be started at all
    #[error("unable to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The external program ran but reported failure
    #[error("{program} failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid timestamp {raw:?}: {source}")]
    Timestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Email(String),
}
