// src/error.rs
//! Typed errors for the feed pipeline.
//!
//! Extraction never errors: a field that cannot be found is an empty value.
//! Everything here belongs to the I/O edges (settings, sources, artifact, transfer).

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Local file or directory operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source document could not be decoded
    #[error("invalid document {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Document source failed for a reason of its own
    #[error("document source error: {0}")]
    Source(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl FeedError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Errors reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot access settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid value for `{key}`: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Structured upload failures. Reported in the run status, never fatal to the process.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("local file not found: {}", path.display())]
    NoLocalFile { path: PathBuf },

    #[error("could not connect to FTP host {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("FTP login failed for {user}")]
    Login { user: String },

    #[error("could not create remote directory {dir}: {reply}")]
    CreateDir { dir: String, reply: String },

    #[error("FTP upload failed: {reply}")]
    Put { reply: String },

    #[error("unexpected FTP reply to {command}: {reply}")]
    Protocol { command: String, reply: String },

    #[error("FTP I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, FeedError>;
