//! Error type shared by the batch tasks.

use std::path::PathBuf;

use thiserror::Error;

use crate::locale::Locale;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("input directory not found: {}", .0.display())]
    MissingInputDir(PathBuf),

    #[error("API key not found: no file at {} and {env_var} is unset", path.display())]
    MissingCredential { path: PathBuf, env_var: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    ProcessFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned status {status}: {body}")]
    Provider {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("no {engine} voice configured for locale {locale}")]
    NoVoice { engine: &'static str, locale: Locale },
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
