use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{MustcError, Result};

/// One entry of a split's segment list: a time window inside a talk recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Filename of the talk recording.
    pub wav: String,
    /// Start of the window in seconds.
    #[serde(deserialize_with = "seconds")]
    pub offset: f64,
    /// Length of the window in seconds.
    #[serde(deserialize_with = "seconds")]
    pub duration: f64,
    /// Kept as written; ids such as `007` or `1.10` are not re-typed.
    pub speaker_id: String,
}

// The corpus writes numbers unquoted, but some tools re-emit every value as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

fn seconds<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(v) => Ok(v as f64),
        Scalar::Float(v) => Ok(v),
        Scalar::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| D::Error::custom(format!("invalid seconds value '{s}': {e}"))),
    }
}

/// Parse a YAML segment list.
pub fn parse_segment_list(yaml: &str) -> std::result::Result<Vec<Segment>, serde_yaml::Error> {
    // An empty document is an empty split, not a parse failure.
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(yaml)
}

/// Read and parse the segment list of a split.
pub fn read_segments(path: &Path) -> Result<Vec<Segment>> {
    let contents = std::fs::read_to_string(path).map_err(|source| MustcError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let segments = parse_segment_list(&contents).map_err(|source| MustcError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Parsed {} segments from {}", segments.len(), path.display());
    Ok(segments)
}
