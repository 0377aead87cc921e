//! Info command implementation

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use readscore_core::{Config, ConfigSources, Formula, ListKind, WordLists};
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ListInfo {
    /// A file path, or "bundled".
    source: String,
    entries: usize,
}

impl ListInfo {
    fn new(path: Option<&Utf8PathBuf>, lists: &WordLists, kind: ListKind) -> Self {
        Self {
            source: path.map_or_else(|| "bundled".to_string(), ToString::to_string),
            entries: lists.get(kind).len(),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
    formulas: Vec<Formula>,
    difficult_words: bool,
    caps_as_names: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_grade: Option<f64>,
    gate: Formula,
    spache_list: ListInfo,
    dale_chall_list: ListInfo,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> anyhow::Result<Self> {
        let loaded = config
            .word_lists()
            .context("failed to load configured word lists")?;
        let lists = match &loaded {
            Some(lists) => lists,
            None => WordLists::bundled(),
        };
        let selection = readscore_core::ScoreSelection::resolve(&config.score_config());
        Ok(Self {
            config_file: sources.primary_file().map(ToString::to_string),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(ToString::to_string),
            max_input_bytes: config.input_limit(),
            formulas: selection.formulas().collect(),
            difficult_words: config.difficult_words,
            caps_as_names: config.caps_as_names,
            max_grade: config.max_grade,
            gate: config.gate,
            spache_list: ListInfo::new(config.spache_list.as_ref(), lists, ListKind::Spache),
            dale_chall_list: ListInfo::new(
                config.dale_chall_list.as_ref(),
                lists,
                ListKind::DaleChall,
            ),
        })
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources)?,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let FullInfo { package, config } = full_info;
    println!("{} {}", package.name.bold(), package.version.green());
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), package.license);
    }

    println!();
    println!("{}", "Configuration".bold().underline());
    match config.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    println!("{}: {}", "Log level".dimmed(), config.log_level);
    if let Some(ref dir) = config.log_dir {
        println!("{}: {dir}", "Log directory".dimmed());
    }
    match config.max_input_bytes {
        Some(max) => println!("{}: {max} bytes", "Input limit".dimmed()),
        None => println!("{}: {}", "Input limit".dimmed(), "disabled".yellow()),
    }

    println!();
    println!("{}", "Scoring".bold().underline());
    let formulas: Vec<&str> = config.formulas.iter().map(|f| f.label()).collect();
    println!("{}: {}", "Formulas".dimmed(), formulas.join(", "));
    println!("{}: {}", "Difficult words".dimmed(), config.difficult_words);
    println!("{}: {}", "Caps as names".dimmed(), config.caps_as_names);
    match config.max_grade {
        Some(max) => println!("{}: {max:.1} ({})", "Max grade".dimmed(), config.gate.label()),
        None => println!("{}: {}", "Max grade".dimmed(), "(not set)".dimmed()),
    }

    println!();
    println!("{}", "Word Lists".bold().underline());
    for (label, list) in [
        ("Spache", &config.spache_list),
        ("Dale-Chall", &config.dale_chall_list),
    ] {
        println!(
            "{}: {} ({} entries)",
            label.dimmed(),
            list.source,
            list.entries
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_info_text_succeeds() {
        let result = cmd_info(
            InfoArgs::default(),
            false,
            &Config::default(),
            &ConfigSources::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        let result = cmd_info(
            InfoArgs::default(),
            true,
            &Config::default(),
            &ConfigSources::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn config_info_reports_defaults() {
        let info = ConfigInfo::from_config(&Config::default(), &ConfigSources::default()).unwrap();
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.gate, Formula::FleschKincaid);
        assert!(!info.formulas.contains(&Formula::Spache));
        assert_eq!(info.formulas.len(), 6);
        assert_eq!(info.spache_list.source, "bundled");
        assert!(info.dale_chall_list.entries > 2000);
    }

    #[test]
    fn config_info_follows_only() {
        let config = Config {
            only: Some(Formula::Smog),
            ..Config::default()
        };
        let info = ConfigInfo::from_config(&config, &ConfigSources::default()).unwrap();
        assert_eq!(info.formulas, vec![Formula::Smog]);
    }

    #[test]
    fn config_info_counts_replacement_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("familiar.txt")).unwrap();
        std::fs::write(&path, "cat\nsat\n").unwrap();
        let config = Config {
            dale_chall_list: Some(path.clone()),
            ..Config::default()
        };

        let info = ConfigInfo::from_config(&config, &ConfigSources::default()).unwrap();
        assert_eq!(info.dale_chall_list.source, path.as_str());
        assert_eq!(info.dale_chall_list.entries, 2);
        assert_eq!(info.spache_list.source, "bundled");
        assert!(info.spache_list.entries > 2);
    }

    #[test]
    fn missing_word_list_is_an_error() {
        let config = Config {
            dale_chall_list: Some("/nonexistent/dale-chall.txt".into()),
            ..Config::default()
        };
        assert!(ConfigInfo::from_config(&config, &ConfigSources::default()).is_err());
    }
}
