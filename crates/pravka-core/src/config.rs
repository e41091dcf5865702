//! Configuration: discovery, layering and the user dictionary.
//!
//! Sources, lowest precedence first:
//!
//! | source | where |
//! |---|---|
//! | defaults | [`Config::default`] |
//! | user | `~/.config/pravka/config.<ext>` (platform equivalent elsewhere) |
//! | project | `.pravka.<ext>` then `pravka.<ext>`, in the closest directory that has one |
//! | explicit | files passed to [`ConfigLoader::with_file`], in order |
//! | environment | `PRAVKA_*` variables, e.g. `PRAVKA_MAX_EDIT_DISTANCE=1` |
//!
//! `<ext>` is `toml`, `yaml`, `yml` or `json`; files in one directory merge in
//! that order. The project search walks up from the starting directory and
//! stops at a directory containing `.git` (a config next to `.git` still counts).
//!
//! ```no_run
//! use camino::Utf8PathBuf;
//! use pravka_core::config::ConfigLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir()?)?;
//! let (config, sources) = ConfigLoader::new().with_project_search(&cwd).load()?;
//! let dictionary = config.load_dictionary()?;
//! # let _ = (dictionary, sources);
//! # Ok(())
//! # }
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::value::magic::RelativePathBuf;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_MAX_INPUT_BYTES;
use crate::classify::DEFAULT_CONTEXT_WIDTH;
use crate::error::{ConfigError, ConfigResult};
use crate::lexicon::{DEFAULT_MAX_DISTANCE, UserDictionary};

const APP_NAME: &str = "pravka";
const ENV_PREFIX: &str = "PRAVKA_";
const DEFAULT_BOUNDARY: &str = ".git";

/// Settings for checking, correcting and logging.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Baseline log level; `-v`/`-q` and `RUST_LOG` adjust it.
    pub log_level: LogLevel,
    /// Directory for JSONL log files. No file logging when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Personal dictionary file, one word per line.
    ///
    /// Relative paths resolve against the directory of the config file that
    /// set them, or the working directory when set from the environment.
    pub dictionary: Option<RelativePathBuf>,
    /// Extra dictionary words, merged with the dictionary file.
    pub words: Option<Vec<String>>,
    /// Maximum edit distance for near dictionary matches (default: 2).
    pub max_edit_distance: Option<usize>,
    /// Characters of context shown on each side of an error (default: 20).
    pub context_width: Option<usize>,
    /// Default minimum composite score for readability gates.
    pub min_score: Option<f64>,
    /// Maximum input size in bytes (default: 5 MiB).
    pub max_input_bytes: Option<usize>,
    /// Remove the input size limit; `max_input_bytes` is then ignored.
    pub disable_input_limit: bool,
}

impl Config {
    /// Effective near-match threshold.
    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance.unwrap_or(DEFAULT_MAX_DISTANCE)
    }

    /// Effective context width.
    pub fn context_width(&self) -> usize {
        self.context_width.unwrap_or(DEFAULT_CONTEXT_WIDTH)
    }

    /// Effective input limit in bytes, `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }

    /// Build the user dictionary from the configured file and inline words.
    ///
    /// No file and no words yields an empty dictionary.
    pub fn load_dictionary(&self) -> ConfigResult<UserDictionary> {
        let mut dictionary = match self.dictionary {
            Some(ref file) => {
                let path = file.relative();
                let content = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::DictionaryFile { path, source })?;
                UserDictionary::from_text(&content)
            }
            None => UserDictionary::new(),
        };
        for word in self.words.iter().flatten() {
            dictionary.insert(word);
        }
        tracing::debug!(words = dictionary.len(), "dictionary loaded");
        Ok(dictionary)
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Debug detail.
    Debug,
    /// Normal operation (default).
    #[default]
    Info,
    /// Warnings only.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// Lowercase name, usable as an `EnvFilter` directive.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// The config files that went into a [`Config`], lowest precedence first
/// within each group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// User config file, if one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Project files from the closest directory that has any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// Files given explicitly (`--config`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The highest-precedence file: explicit, then project, then user.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .or_else(|| self.project_files.last())
            .or(self.user_file.as_ref())
            .map(Utf8PathBuf::as_path)
    }

    /// Whether no file was found at all.
    pub fn is_empty(&self) -> bool {
        self.user_file.is_none() && self.project_files.is_empty() && self.explicit_files.is_empty()
    }

    /// All files in merge order.
    pub fn files(&self) -> impl Iterator<Item = &Utf8Path> {
        self.user_file
            .iter()
            .chain(&self.project_files)
            .chain(&self.explicit_files)
            .map(Utf8PathBuf::as_path)
    }
}

/// A config file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Extensions in merge order.
    const EXTENSIONS: [&'static str; 4] = ["toml", "yaml", "yml", "json"];

    /// Anything unrecognized is read as TOML.
    fn of(path: &Utf8Path) -> Self {
        match path.extension() {
            Some("yaml" | "yml") => Self::Yaml,
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    fn merge_into(self, figment: Figment, path: &Utf8Path) -> Figment {
        match self {
            Self::Toml => figment.merge(Toml::file_exact(path.as_str())),
            Self::Yaml => figment.merge(Yaml::file_exact(path.as_str())),
            Self::Json => figment.merge(Json::file_exact(path.as_str())),
        }
    }
}

/// Builder that discovers and merges configuration.
#[derive(Debug)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    user_config: bool,
    boundary: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads user config and stops project search at `.git`.
    pub fn new() -> Self {
        Self {
            search_root: None,
            user_config: true,
            boundary: Some(DEFAULT_BOUNDARY.to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Search for project config starting at `dir` and walking up.
    #[must_use]
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.search_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip the user config file.
    #[must_use]
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Stop the project search at a directory containing `marker`.
    #[must_use]
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary = Some(marker.into());
        self
    }

    /// Search all the way to the filesystem root.
    #[must_use]
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary = None;
        self
    }

    /// Load `path` after everything discovered. Later files win.
    #[must_use]
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Find the files this loader would merge, without reading them.
    pub fn discover(&self) -> ConfigSources {
        ConfigSources {
            user_file: if self.user_config {
                find_user_config()
            } else {
                None
            },
            project_files: self
                .search_root
                .as_deref()
                .map(|root| self.find_project_configs(root))
                .unwrap_or_default(),
            explicit_files: self.explicit_files.clone(),
        }
    }

    /// Merge every source into a [`Config`].
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = self.discover();
        let config = extract(&sources)?;
        tracing::debug!(
            files = sources.files().count(),
            log_level = config.log_level.as_str(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Like [`load`](Self::load), but fail with [`ConfigError::NotFound`]
    /// when no config file exists.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = self.discover();
        if sources.is_empty() {
            return Err(ConfigError::NotFound);
        }
        let config = extract(&sources)?;
        Ok((config, sources))
    }

    /// Config files in the closest directory (from `start` upward) that has
    /// any, dotfiles first.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        for dir in start.ancestors() {
            let found: Vec<Utf8PathBuf> = [format!(".{APP_NAME}"), APP_NAME.to_string()]
                .iter()
                .flat_map(|stem| {
                    ConfigFormat::EXTENSIONS
                        .iter()
                        .map(move |ext| dir.join(format!("{stem}.{ext}")))
                })
                .filter(|candidate| candidate.is_file())
                .collect();
            if !found.is_empty() {
                return found;
            }
            let at_boundary = self
                .boundary
                .as_ref()
                .is_some_and(|marker| dir != start && dir.join(marker).exists());
            if at_boundary {
                break;
            }
        }
        Vec::new()
    }
}

fn extract(sources: &ConfigSources) -> ConfigResult<Config> {
    let figment = sources.files().fold(
        Figment::new().merge(Serialized::defaults(Config::default())),
        |figment, path| ConfigFormat::of(path).merge_into(figment, path),
    );
    figment
        .merge(Env::prefixed(ENV_PREFIX).lowercase(true))
        .extract()
        .map_err(|e| ConfigError::Deserialize(Box::new(e)))
}

fn find_user_config() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    ConfigFormat::EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// The platform's config directory for pravka (`~/.config/pravka` on Linux).
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(project_dirs()?.config_dir().to_path_buf()).ok()
}
