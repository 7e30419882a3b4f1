//! Build error types.
//!
//! Every failure aborts the build; nothing here is retried or downgraded.
//! The only soft condition in the pipeline (a missing cache entry) never
//! becomes an `Error` at all.

use crate::utils::exec::ExecError;
use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by the build pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unreadable file/directory, or failure to create one.
    #[error("{action} `{}`", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to convert `{}`", path.display())]
    Conversion {
        path: PathBuf,
        #[source]
        source: ConversionError,
    },

    /// Malformed sidecar JSON.
    #[error("invalid metadata in `{}`", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("template rendering failed")]
    Template(#[from] tera::Error),

    /// Feed encoding failure.
    #[error("failed to serialize {0}")]
    Serialization(String),
}

/// Markdown converter failures.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Process could not be started, exited non-zero, or timed out.
    #[error(transparent)]
    Process(#[from] ExecError),

    #[error("converter output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to read source")]
    Read(#[source] io::Error),
}

impl ConversionError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Process(ExecError::Timeout { .. }))
    }
}

/// Attach a path and a short description to an `io::Result`.
pub trait IoContext<T> {
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Filesystem {
            action,
            path: path.to_path_buf(),
            source,
        })
    }
}
