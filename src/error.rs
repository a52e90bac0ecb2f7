//! Error types for host queries, the session report, and command dispatch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A host connection query that could not be answered.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("failed to read session file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse session file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid access token: {0}")]
    InvalidToken(String),

    #[error("host connection unavailable: {0}")]
    Unavailable(String),
}

/// Why a session report could not be produced.
///
/// A partially targeted session (org without space or the reverse) is not
/// an error; the targeting line is simply left out.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No API endpoint set. Use 'cf login' or 'cf api' to target an endpoint.")]
    NoApiEndpoint,

    #[error("Not logged in. Use 'cf login' to log in.")]
    NotLoggedIn,

    #[error("Logged in, but the session has no username.")]
    InconsistentSession,

    #[error("{query} failed: {source}")]
    HostQuery {
        query: &'static str,
        #[source]
        source: ConnectionError,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl ReportError {
    pub(crate) fn query(query: &'static str) -> impl FnOnce(ConnectionError) -> Self {
        move |source| Self::HostQuery { query, source }
    }
}

/// Failure of a plugin command as seen by the host.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("'{0}' is not a registered command. See 'cf-whoami help'.")]
    UnknownCommand(String),

    #[error("'{0}' is already registered by another command")]
    DuplicateTrigger(String),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
