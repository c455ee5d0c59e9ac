use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::audio::TARGET_SAMPLE_RATE;
use crate::config::{Language, CORPUS_VERSION};
use crate::corpus::{language_pair_dir, Split, SplitPaths};
use crate::error::Result;

const DESCRIPTION: &str = "MuST-C is a multilingual speech translation corpus whose size and \
quality will facilitate the training of end-to-end systems for SLT from English into 8 languages.";

const CITATION: &str = r"@article{cattoni_must-c_2021,
        title = {{MuST}-{C}: {A} multilingual corpus for end-to-end speech translation},
        volume = {66},
        issn = {0885-2308},
        shorttitle = {{MuST}-{C}},
        url = {https://www.sciencedirect.com/science/article/pii/S0885230820300887},
        doi = {10.1016/j.csl.2020.101155},
        language = {en},
        journal = {Computer Speech \& Language},
        author = {Cattoni, Roldano and Di Gangi, Mattia Antonino and Bentivogli, Luisa and Negri, Matteo and Turchi, Marco},
        month = mar,
        year = {2021},
        pages = {101155}
}
";

const HOMEPAGE: &str = "https://ict.fbk.eu/must-c/";

const LICENSE: &str = "cc-by-nc-nd-4.0";

/// Column type of the record schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeatureType {
    Float,
    String,
    Audio { sampling_rate: u32 },
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub description: &'static str,
    pub citation: &'static str,
    pub homepage: &'static str,
    pub license: &'static str,
    pub version: &'static str,
    pub features: Vec<(&'static str, FeatureType)>,
}

/// Columns of an example record, in record order.
pub fn features() -> Vec<(&'static str, FeatureType)> {
    vec![
        ("duration", FeatureType::Float),
        ("offset", FeatureType::Float),
        ("speaker_id", FeatureType::String),
        ("doc_id", FeatureType::String),
        (
            "audio",
            FeatureType::Audio {
                sampling_rate: TARGET_SAMPLE_RATE,
            },
        ),
        ("transcript", FeatureType::String),
        ("translation", FeatureType::String),
    ]
}

pub fn dataset_info() -> DatasetInfo {
    DatasetInfo {
        description: DESCRIPTION,
        citation: CITATION,
        homepage: HOMEPAGE,
        license: LICENSE,
        version: CORPUS_VERSION,
        features: features(),
    }
}

pub fn manual_download_instructions() -> &'static str {
    "To use MuST-C you must download it manually from https://ict.fbk.eu/must-c/ and extract it. \
     Then point the loader at the folder holding the en-<lang> directories, \
     e.g. `mustc --data-dir path/to/MUSTC_v1.0 --language <target-language>`."
}

/// A split and the files it is generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitGenerator {
    pub split: Split,
    pub language: Language,
    pub pair_dir: PathBuf,
    pub paths: SplitPaths,
}

/// List the splits of `language` under `root`: validation, test, then train.
///
/// Fails if `<root>/en-<lang>` does not exist.
pub fn split_generators(language: Language, root: &Path) -> Result<Vec<SplitGenerator>> {
    let pair_dir = language_pair_dir(root, language)?;

    Ok(Split::ALL
        .into_iter()
        .map(|split| SplitGenerator {
            split,
            language,
            paths: SplitPaths::new(&pair_dir, language, split),
            pair_dir: pair_dir.clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MustcError;

    #[test]
    fn test_features_schema() {
        let names: Vec<&str> = features().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["duration", "offset", "speaker_id", "doc_id", "audio", "transcript", "translation"]
        );
        assert!(features().contains(&("audio", FeatureType::Audio { sampling_rate: 16000 })));
    }

    #[test]
    fn test_dataset_info() {
        let info = dataset_info();
        assert_eq!(info.homepage, "https://ict.fbk.eu/must-c/");
        assert_eq!(info.license, "cc-by-nc-nd-4.0");
        assert_eq!(info.version, "2.3.3");
        assert!(info.citation.contains("cattoni_must-c_2021"));

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"sampling_rate\":16000"));
    }

    #[test]
    fn test_split_generators_order() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("en-fr")).unwrap();

        let generators = split_generators(Language::Fr, root.path()).unwrap();
        let splits: Vec<Split> = generators.iter().map(|g| g.split).collect();
        assert_eq!(splits, vec![Split::Validation, Split::Test, Split::Train]);
        assert!(generators[0].paths.segments.ends_with("data/dev/txt/dev.yaml"));
        assert!(generators[1].paths.target.ends_with("data/tst-COMMON/txt/tst-COMMON.fr"));
    }

    #[test]
    fn test_split_generators_missing_root() {
        let root = tempfile::tempdir().unwrap();
        let result = split_generators(Language::Fr, root.path());
        assert!(matches!(result, Err(MustcError::DataDirNotFound { .. })));
    }
}
