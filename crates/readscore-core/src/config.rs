//! Configuration loading and discovery.
//!
//! Sources are merged with [`figment`], lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `config.<ext>` in the user config directory
//!    (`~/.config/readscore/` on Linux)
//! 3. `.readscore.<ext>` then `readscore.<ext>` in the closest directory,
//!    walking up from the search root, that has either
//! 4. files passed with [`ConfigLoader::with_file`], in order
//! 5. `READSCORE_*` environment variables
//!
//! `<ext>` is one of `toml`, `yaml`, `yml` or `json`. Several files in the
//! same directory are all merged, later extensions winning.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use readscore_core::config::ConfigLoader;
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir().unwrap()).unwrap();
//! let (config, sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! let defaults = config.score_config();
//! # let _ = (defaults, sources);
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, WordListResult};
use crate::formulas::Formula;
use crate::score::ScoreConfig;
use crate::word_lists::WordLists;

/// Input size limit used when `max_input_bytes` is not set.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// The configuration for readscore.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level (`debug`, `info`, `warn` or `error`).
    pub log_level: LogLevel,
    /// Directory for JSONL log files (falls back to platform defaults if unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Maximum input size in bytes. Defaults to 5 MiB.
    pub max_input_bytes: Option<usize>,
    /// Skip the input size check entirely.
    pub disable_input_limit: bool,
    /// Report flagged words alongside the counts.
    pub difficult_words: bool,
    /// Treat capitalized words as proper names.
    pub caps_as_names: bool,
    /// Compute this formula alone.
    pub only: Option<Formula>,
    /// Formulas to leave out when `only` is unset.
    pub skip: Vec<Formula>,
    /// Replacement Spache list, one word per line.
    pub spache_list: Option<Utf8PathBuf>,
    /// Replacement Dale-Chall list, one word per line.
    pub dale_chall_list: Option<Utf8PathBuf>,
    /// Fail `score` when the gated formula exceeds this grade.
    pub max_grade: Option<f64>,
    /// The formula compared against `max_grade`.
    pub gate: Formula,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_dir: None,
            max_input_bytes: None,
            disable_input_limit: false,
            difficult_words: false,
            caps_as_names: false,
            only: None,
            skip: Vec::new(),
            spache_list: None,
            dale_chall_list: None,
            max_grade: None,
            gate: Formula::FleschKincaid,
        }
    }
}

impl Config {
    /// Scoring options implied by these defaults.
    pub fn score_config(&self) -> ScoreConfig {
        let config = self
            .only
            .map_or_else(|| ScoreConfig::skipping(&self.skip), ScoreConfig::only);
        config
            .with_difficult_words(self.difficult_words)
            .with_caps_as_names(self.caps_as_names)
    }

    /// The effective input size limit, or `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        (!self.disable_input_limit)
            .then(|| self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
    }

    /// Load the replacement word lists, if any are configured.
    ///
    /// A list that is not configured keeps its bundled contents.
    pub fn word_lists(&self) -> WordListResult<Option<WordLists>> {
        WordLists::load(self.spache_list.as_deref(), self.dale_chall_list.as_deref())
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Which configuration files were loaded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files, low to high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files passed explicitly, e.g. with `--config`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The highest-precedence file that was loaded.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

const APP_NAME: &str = "readscore";

const ENV_PREFIX: &str = "READSCORE_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// A loader that reads the user config and stops project search at `.git`.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Walk up from `path` looking for project config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Whether to read `config.<ext>` from the user config directory.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Stop the project search at a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Search all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file. Later files take precedence.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every source and report which files were read.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = find_user_config()
        {
            figment = merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for path in &project_configs {
                figment = merge_file(figment, path);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // READSCORE_ONLY=smog, READSCORE_CAPS_AS_NAMES=true, ...
        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            files = sources.project_files.len() + sources.explicit_files.len(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Like [`load`](Self::load), but fails when no file was found.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let has_user = self.include_user_config && find_user_config().is_some();
        let has_project = self
            .project_search_root
            .as_ref()
            .is_some_and(|root| !self.find_project_configs(root).is_empty());

        if !has_user && !has_project && self.explicit_files.is_empty() {
            return Err(ConfigError::NotFound);
        }
        self.load()
    }

    /// Config files in the closest directory that has any, dotfiles first.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let base = &dir;
            let found: Vec<Utf8PathBuf> = [format!(".{APP_NAME}"), APP_NAME.to_string()]
                .iter()
                .flat_map(|stem| {
                    CONFIG_EXTENSIONS
                        .iter()
                        .map(move |ext| base.join(format!("{stem}.{ext}")))
                })
                .filter(|path| path.is_file())
                .collect();

            if !found.is_empty() {
                return found;
            }

            // The marker is checked after the files so a config beside it is found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }
}

fn find_user_config() -> Option<Utf8PathBuf> {
    let config_dir = user_config_dir()?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| config_dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// The user config directory, e.g. `~/.config/readscore/` on Linux.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that touch `READSCORE_*` environment variables.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn write(dir: &std::path::Path, name: &str, contents: &str) -> Utf8PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        Utf8PathBuf::try_from(path).unwrap()
    }

    /// Load one file while holding the env lock.
    fn load_file(path: &Utf8Path) -> Config {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        ConfigLoader::new()
            .with_user_config(false)
            .with_file(path)
            .load()
            .unwrap()
            .0
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.gate, Formula::FleschKincaid);
        assert!(config.only.is_none());
        assert!(config.skip.is_empty());
        assert_eq!(config.input_limit(), Some(DEFAULT_MAX_INPUT_BYTES));
    }

    #[test]
    fn test_loader_builds_with_defaults() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load()
            .unwrap();
        assert_eq!(config, Config::default());
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn test_single_file_overrides_default() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            tmp.path(),
            "config.toml",
            "log_level = \"debug\"\nonly = \"dale-chall\"\ndifficult_words = true\n",
        );

        let config = load_file(&path);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.only, Some(Formula::DaleChall));
        assert!(config.difficult_words);
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let tmp = TempDir::new().unwrap();
        let base = write(tmp.path(), "base.toml", "gate = \"smog\"\nmax_grade = 8.0\n");
        let over = write(tmp.path(), "override.toml", "gate = \"ari\"\n");

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&base)
            .with_file(&over)
            .load()
            .unwrap();

        assert_eq!(config.gate, Formula::Ari);
        assert_eq!(config.max_grade, Some(8.0));
        assert_eq!(sources.primary_file(), Some(over.as_path()));
    }

    #[test]
    fn test_project_config_discovery() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        let deep = project.join("src").join("deep");
        fs::create_dir_all(&deep).unwrap();
        write(&project, ".readscore.yaml", "caps_as_names: true\n");

        let deep = Utf8PathBuf::try_from(deep).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&deep)
            .load()
            .unwrap();

        assert!(config.caps_as_names);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn test_regular_file_beats_dotfile_in_same_directory() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".readscore.toml", "gate = \"smog\"\n");
        write(tmp.path(), "readscore.json", r#"{"gate": "gunning-fog"}"#);

        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&root)
            .load()
            .unwrap();

        assert_eq!(config.gate, Formula::GunningFog);
        assert_eq!(sources.project_files.len(), 2);
    }

    #[test]
    fn test_boundary_marker_stops_search() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();
        write(&parent, ".readscore.toml", "log_level = \"warn\"\n");
        fs::create_dir(child.join(".git")).unwrap();

        let work = Utf8PathBuf::try_from(work).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(&work)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn test_explicit_file_overrides_project_config() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".readscore.toml", "log_level = \"warn\"\n");
        let over = write(tmp.path(), "override.toml", "log_level = \"error\"\n");

        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&root)
            .with_file(&over)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.explicit_files.len(), 1);
    }

    #[test]
    fn test_load_or_error_fails_when_no_config() {
        let result = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load_or_error();
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn test_load_or_error_succeeds_with_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "config.toml", "log_level = \"debug\"\n");
        let (config, _) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&path)
            .load_or_error()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_unknown_formula_is_rejected() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "config.toml", "only = \"flesch\"\n");
        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&path)
            .load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_user_config_dir() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("readscore"));
        }
    }

    #[test]
    fn disable_input_limit_overrides_max_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            tmp.path(),
            "config.toml",
            "max_input_bytes = 1024\ndisable_input_limit = true\n",
        );
        let config = load_file(&path);
        assert_eq!(config.max_input_bytes, Some(1024));
        assert_eq!(config.input_limit(), None);
    }

    #[test]
    fn score_config_from_only() {
        let config = Config {
            only: Some(Formula::Smog),
            skip: vec![Formula::Smog],
            caps_as_names: true,
            ..Config::default()
        };
        let score = config.score_config();
        assert!(score.only_smog);
        assert!(!score.skip_smog);
        assert!(score.caps_as_names);
    }

    #[test]
    fn score_config_from_skip() {
        let yaml = "skip: [ari, coleman-liau]\ndifficult_words: true\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let score = config.score_config();
        assert!(score.skip_ari);
        assert!(score.skip_coleman_liau);
        assert!(!score.skip_smog);
        assert!(score.difficult_words);
    }

    #[test]
    fn word_list_paths_deserialize_from_yaml() {
        let yaml = "spache_list: lists/spache.txt\ndale_chall_list: /srv/dc.txt\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.spache_list.as_deref().map(Utf8Path::as_str), Some("lists/spache.txt"));
        assert_eq!(config.dale_chall_list.as_deref().map(Utf8Path::as_str), Some("/srv/dc.txt"));
    }

    #[test]
    fn no_configured_lists_means_bundled() {
        assert!(Config::default().word_lists().unwrap().is_none());
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_env_var_overrides_file_config() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "config.toml", "only = \"ari\"\n");

        // SAFETY: the mutex serializes env access across tests.
        unsafe {
            std::env::set_var("READSCORE_ONLY", "smog");
        }

        let (config, _) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&path)
            .load()
            .unwrap();
        assert_eq!(config.only, Some(Formula::Smog));

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("READSCORE_ONLY");
        }
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_env_var_sets_boolean_flags() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        // SAFETY: the mutex serializes env access across tests.
        unsafe {
            std::env::set_var("READSCORE_CAPS_AS_NAMES", "true");
        }

        let (config, _) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load()
            .unwrap();
        assert!(config.caps_as_names);

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("READSCORE_CAPS_AS_NAMES");
        }
    }
}
