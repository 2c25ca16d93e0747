//! Configuration loading and discovery.
//!
//! Settings are layered with figment, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `~/.config/versekit/config.<ext>`
//! 3. the nearest directory (walking up from the search root, stopping at
//!    the repository root marked by `.git`) holding any of `.verse.<ext>`,
//!    `verse.<ext>`, `.versekit.<ext>`, `versekit.<ext>`
//! 4. files passed explicitly, in order
//! 5. `VERSEKIT_*` environment variables
//!
//! `<ext>` is `toml`, `yaml`, `yml` or `json`. Every matching file in the
//! chosen directory is merged, in the order listed above and by extension in
//! that same order.
//!
//! Relative `dictionary` and `log_dir` paths are taken relative to the file
//! that set them, so a project can ship its own dictionary next to its config.
//!
//! ```no_run
//! use camino::Utf8Path;
//! use versekit_core::ConfigLoader;
//!
//! let (config, sources) = ConfigLoader::new()
//!     .with_project_search(Utf8Path::new("songs/drafts"))
//!     .load()?;
//! println!("{:?} from {:?}", config.lexicon_source(), sources.primary_file());
//! # Ok::<(), versekit_core::ConfigError>(())
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::lexicon::LexiconSource;
use crate::syllables::SyllableMode;

/// Config file stems, lowest precedence first.
const FILE_STEMS: &[&str] = &[".verse", "verse", ".versekit", "versekit"];

/// Config file extensions, lowest precedence first.
const EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// A directory containing this entry is the top of the project search.
const PROJECT_ROOT_MARKER: &str = ".git";

const APP_NAME: &str = "versekit";
const ENV_PREFIX: &str = "VERSEKIT_";

/// versekit settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Minimum level for log output.
    pub log_level: LogLevel,
    /// Directory for daily JSON-lines log files. No file logging when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// CMU-format dictionary to load instead of the bundled sample.
    pub dictionary: Option<Utf8PathBuf>,
    /// Syllable counting mode used when a command does not pick one.
    pub syllable_mode: Option<SyllableMode>,
    /// Most rhymes listed when a command does not pass a limit.
    pub rhyme_limit: Option<usize>,
    /// Largest lyric text accepted, in bytes. Defaults to
    /// [`DEFAULT_MAX_INPUT_BYTES`](crate::DEFAULT_MAX_INPUT_BYTES).
    pub max_input_bytes: Option<usize>,
    /// Accept input of any size, ignoring `max_input_bytes`.
    pub disable_input_limit: bool,
}

impl Config {
    /// The dictionary these settings select.
    pub fn lexicon_source(&self) -> LexiconSource {
        LexiconSource::from_option(self.dictionary.as_deref())
    }

    /// The input size limit in force, `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        (!self.disable_input_limit)
            .then(|| self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
    }
}

/// Configured log level.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything including per-query detail.
    Debug,
    /// Normal operation.
    #[default]
    Info,
    /// Recoverable problems only.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Lowercase name, usable as a tracing filter directive.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// The config files that went into a [`Config`], lowest precedence first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// User config file, if one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files found in the nearest project directory.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// Files passed explicitly (`--config`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file with the final say, if any file was loaded.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.files().last().copied()
    }

    /// All loaded files in merge order.
    pub fn files(&self) -> Vec<&Utf8Path> {
        self.user_file
            .iter()
            .chain(&self.project_files)
            .chain(&self.explicit_files)
            .map(Utf8PathBuf::as_path)
            .collect()
    }
}

/// Builds a [`Config`] from defaults, discovered files and the environment.
#[derive(Debug)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    user_config: bool,
    files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads the user config and nothing else yet.
    pub const fn new() -> Self {
        Self {
            search_root: None,
            user_config: true,
            files: Vec::new(),
        }
    }

    /// Search for project config from `dir` upward.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.search_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Whether to read `~/.config/versekit/config.<ext>`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Merge `path` above everything discovered. Later calls win.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge all layers and extract the settings.
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = ConfigSources {
            user_file: if self.user_config {
                user_config_file()
            } else {
                None
            },
            project_files: self
                .search_root
                .as_deref()
                .map(project_config_files)
                .unwrap_or_default(),
            explicit_files: self.files,
        };

        let figment = sources
            .files()
            .into_iter()
            .fold(
                Figment::from(Serialized::defaults(Config::default())),
                merge_file,
            )
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let mut config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        config.dictionary = config
            .dictionary
            .map(|path| relative_to_source(&figment, "dictionary", path));
        config.log_dir = config
            .log_dir
            .map(|path| relative_to_source(&figment, "log_dir", path));

        tracing::debug!(
            files = sources.files().len(),
            dictionary = ?config.dictionary,
            syllable_mode = ?config.syllable_mode,
            "configuration loaded"
        );
        Ok((config, sources))
    }
}

/// Config files in the nearest directory at or above `start` that has any.
fn project_config_files(start: &Utf8Path) -> Vec<Utf8PathBuf> {
    for dir in start.ancestors() {
        let found: Vec<Utf8PathBuf> = FILE_STEMS
            .iter()
            .flat_map(|stem| EXTENSIONS.iter().map(move |ext| dir.join(format!("{stem}.{ext}"))))
            .filter(|path| path.is_file())
            .collect();
        if !found.is_empty() {
            tracing::debug!(%dir, count = found.len(), "found project config");
            return found;
        }
        if dir.join(PROJECT_ROOT_MARKER).exists() {
            break;
        }
    }
    Vec::new()
}

fn user_config_file() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    let dir = Utf8Path::from_path(dirs.config_dir())?;
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_std_path())),
        Some("json") => figment.merge(Json::file_exact(path.as_std_path())),
        _ => figment.merge(Toml::file_exact(path.as_std_path())),
    }
}

/// Anchor a relative path at the directory of the file that supplied `key`.
///
/// Values from the environment or defaults have no file and stay as given.
fn relative_to_source(figment: &Figment, key: &str, path: Utf8PathBuf) -> Utf8PathBuf {
    if path.is_absolute() {
        return path;
    }
    figment
        .find_metadata(key)
        .and_then(|metadata| metadata.source.as_ref())
        .and_then(figment::Source::file_path)
        .and_then(std::path::Path::parent)
        .and_then(Utf8Path::from_path)
        .map(|dir| dir.join(&path))
        .unwrap_or(path)
}
