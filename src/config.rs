use crate::error::{MustcError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source language shared by every language pair of the corpus.
pub const SOURCE_LANGUAGE: &str = "en";

/// Version of the corpus release the loader targets.
pub const CORPUS_VERSION: &str = "2.3.3";

/// Target languages of MuST-C v1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    Es,
    Fr,
    It,
    Nl,
    Pt,
    Ro,
    Ru,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::De,
        Language::Es,
        Language::Fr,
        Language::It,
        Language::Nl,
        Language::Pt,
        Language::Ro,
        Language::Ru,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::It => "it",
            Language::Nl => "nl",
            Language::Pt => "pt",
            Language::Ro => "ro",
            Language::Ru => "ru",
        }
    }

    /// Directory name of the language pair, e.g. `en-de`.
    pub fn pair_dir(&self) -> String {
        format!("{}-{}", SOURCE_LANGUAGE, self.code())
    }

    pub fn builder_config(&self) -> &'static BuilderConfig {
        &BUILDER_CONFIGS[*self as usize]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = MustcError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|l| l.code() == code)
            .ok_or_else(|| MustcError::UnsupportedLanguage(s.to_string()))
    }
}

/// Per-language builder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuilderConfig {
    pub name: &'static str,
    pub language: Language,
    pub version: &'static str,
    pub description: &'static str,
}

const fn builder_config(language: Language, name: &'static str, description: &'static str) -> BuilderConfig {
    BuilderConfig {
        name,
        language,
        version: CORPUS_VERSION,
        description,
    }
}

/// One configuration per target language, indexed in `Language` order.
pub static BUILDER_CONFIGS: [BuilderConfig; 8] = [
    builder_config(Language::De, "de", "English to German"),
    builder_config(Language::Es, "es", "English to Spanish"),
    builder_config(Language::Fr, "fr", "English to French"),
    builder_config(Language::It, "it", "English to Italian"),
    builder_config(Language::Nl, "nl", "English to Dutch"),
    builder_config(Language::Pt, "pt", "English to Portuguese"),
    builder_config(Language::Ro, "ro", "English to Romanian"),
    builder_config(Language::Ru, "ru", "English to Russian"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the manually downloaded `en-<lang>` folders.
    pub data_dir: Option<PathBuf>,
    pub language: Language,
    pub verbose: bool,
}

impl Config {
    /// Load the config file, then apply overrides from `lookup`
    /// (normally `std::env::var`).
    pub fn load<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path).map_err(|source| {
                    MustcError::Io {
                        path: config_path.clone(),
                        source,
                    }
                })?;
                config = toml::from_str::<Config>(&contents).map_err(|e| {
                    MustcError::Config(format!("{}: {e}", config_path.display()))
                })?;
            }
        }

        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Override fields from `MUSTC_DATA_DIR` and `MUSTC_LANGUAGE`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("MUSTC_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(language) = lookup("MUSTC_LANGUAGE") {
            self.language = language.parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.is_none() {
            return Err(MustcError::Config(
                "data directory not set. Pass --data-dir or export MUSTC_DATA_DIR=/path/to/MUSTC_v1.0"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mustc").join("config.toml"))
    }
}
