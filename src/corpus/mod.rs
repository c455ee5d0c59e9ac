pub mod segment;
pub mod text;

pub use segment::{parse_segment_list, read_segments, Segment};
pub use text::read_lines;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{Language, SOURCE_LANGUAGE};
use crate::error::{MustcError, Result};

/// A named partition of the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    /// Splits in the order a builder lists them.
    pub const ALL: [Split; 3] = [Split::Validation, Split::Test, Split::Train];

    pub fn name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Validation => "validation",
            Split::Test => "test",
        }
    }

    /// Directory under `data/` the split is stored in.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Validation => "dev",
            Split::Test => "tst-COMMON",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Split {
    type Err = MustcError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "train" => Ok(Split::Train),
            "validation" | "dev" => Ok(Split::Validation),
            "test" | "tst-common" => Ok(Split::Test),
            _ => Err(MustcError::UnknownSplit(s.to_string())),
        }
    }
}

/// Files of one split of one language pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPaths {
    pub segments: PathBuf,
    pub source: PathBuf,
    pub target: PathBuf,
    pub wav_dir: PathBuf,
}

impl SplitPaths {
    /// Lay out the paths of `split` under `pair_dir` (`<root>/en-<lang>`).
    ///
    /// Nothing is checked on disk here; see [`language_pair_dir`].
    pub fn new(pair_dir: &Path, language: Language, split: Split) -> Self {
        let dir = split.dir_name();
        let split_dir = pair_dir.join("data").join(dir);
        let txt_dir = split_dir.join("txt");

        Self {
            segments: txt_dir.join(format!("{dir}.yaml")),
            source: txt_dir.join(format!("{dir}.{SOURCE_LANGUAGE}")),
            target: txt_dir.join(format!("{dir}.{}", language.code())),
            wav_dir: split_dir.join("wav"),
        }
    }

    /// Path of a talk recording referenced by a segment.
    pub fn wav_path(&self, wav: &str) -> PathBuf {
        self.wav_dir.join(wav)
    }
}

/// Resolve `<root>/en-<lang>`, failing if it was not downloaded.
pub fn language_pair_dir(root: &Path, language: Language) -> Result<PathBuf> {
    let pair_dir = root.join(language.pair_dir());
    if !pair_dir.exists() {
        return Err(MustcError::DataDirNotFound {
            path: pair_dir,
            instructions: crate::dataset::info::manual_download_instructions().to_string(),
        });
    }
    Ok(pair_dir)
}
