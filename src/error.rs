use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MustcError {
    #[error("Unsupported language: {0}. Use one of de, es, fr, it, nl, pt, ro, ru")]
    UnsupportedLanguage(String),

    #[error("Unknown split: {0}. Use 'train', 'validation' or 'test'")]
    UnknownSplit(String),

    #[error("{} does not exist. Make sure the data directory contains the downloaded corpus. {instructions}", path.display())]
    DataDirNotFound {
        path: PathBuf,
        instructions: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse segment list {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to decode audio {}: {source}", path.display())]
    Audio {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("Resampling failed: {0}")]
    Resample(String),
}

pub type Result<T> = std::result::Result<T, MustcError>;
