//! Error types for the clipcast pipeline.

use std::io;
use thiserror::Error;

/// Result type alias for pipeline functions.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning pattern text into clip commands.
///
/// Every variant is fatal to the run: the pipeline validates all three
/// tracks before any command is emitted, so a failure never leaves the
/// receiving application with a partially programmed clip set.
#[derive(Error, Debug)]
pub enum Error {
    /// A section marker was not found in the input text.
    ///
    /// All three markers must be present before extraction starts;
    /// parsing is never attempted on a text missing one.
    #[error("section marker '{0}' not found in pattern text")]
    MissingSection(String),

    /// A section yielded zero valid note rows after filtering.
    ///
    /// Both a missing table body and a table where every row was
    /// rejected by the row guards end up here.
    #[error("section '{0}' contains no valid note rows")]
    EmptyTable(String),

    /// A numeric field failed to convert in a row that passed the guards.
    ///
    /// Rows with a bad leading pitch token are filtered silently; a row
    /// that passed that guard but carries an unparseable number is
    /// structurally broken data, not noise, and aborts the run.
    #[error("malformed {column} value '{token}' in note row")]
    MalformedField {
        /// Name of the schema column that failed to convert.
        column: &'static str,
        /// The offending token, verbatim.
        token: String,
    },

    /// Input/Output error on the UDP transport.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// OSC packet encoding error.
    #[error("OSC error: {0}")]
    Osc(#[from] rosc::OscError),
}
