//! Score command: counts and readability scores for one document.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use readscore_core::{Config, Formula, ScoreConfig, ScoreResult, markdown};

use super::{read_input_file, read_stdin, scorer_for};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug, Default)]
pub struct ScoreArgs {
    /// File to score. Reads stdin when omitted or `-`.
    pub file: Option<Utf8PathBuf>,

    /// List the words that counted as difficult, unfamiliar or polysyllabic.
    #[arg(long)]
    pub difficult_words: bool,

    /// Treat words starting with a capital letter as proper names.
    #[arg(long)]
    pub caps_as_names: bool,

    /// Compute only this formula.
    #[arg(long, value_enum, value_name = "FORMULA")]
    pub only: Option<Formula>,

    /// Leave out a formula (repeatable).
    #[arg(long, value_enum, value_name = "FORMULA", conflicts_with = "only")]
    pub skip: Vec<Formula>,

    /// Treat the input as markdown (automatic for .md and .markdown files).
    #[arg(long)]
    pub markdown: bool,

    /// Fail when the gated formula scores above this grade.
    #[arg(long)]
    pub max_grade: Option<f64>,

    /// Formula compared against --max-grade.
    #[arg(long, value_enum, value_name = "FORMULA")]
    pub gate: Option<Formula>,
}

impl ScoreArgs {
    fn is_stdin(&self) -> bool {
        self.file.as_ref().is_none_or(|f| f.as_str() == "-")
    }

    fn is_markdown(&self) -> bool {
        self.markdown
            || self
                .file
                .as_ref()
                .and_then(|f| f.extension())
                .is_some_and(|ext| matches!(ext, "md" | "markdown"))
    }

    /// Flags override config; `--only` or `--skip` replace the configured selection.
    fn score_config(&self, config: &Config) -> ScoreConfig {
        let base = match (self.only, self.skip.is_empty()) {
            (Some(formula), _) => ScoreConfig::only(formula),
            (None, false) => ScoreConfig::skipping(&self.skip),
            (None, true) => config.score_config(),
        };
        base.with_difficult_words(self.difficult_words || config.difficult_words)
            .with_caps_as_names(self.caps_as_names || config.caps_as_names)
    }

    fn label(&self) -> String {
        match self.file {
            Some(ref file) if !self.is_stdin() => file.to_string(),
            _ => "stdin".to_string(),
        }
    }
}

/// Score a file or stdin.
#[instrument(name = "cmd_score", skip_all, fields(file = ?args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let score_config = args.score_config(config);
    let max_grade = args.max_grade.or(config.max_grade);
    let gate = args.gate.unwrap_or(config.gate);
    debug!(?score_config, ?max_grade, %gate, "executing score command");

    let content = match args.file {
        Some(ref path) if !args.is_stdin() => read_input_file(path, max_input_bytes)?,
        _ => read_stdin(max_input_bytes)?,
    };
    let text = if args.is_markdown() {
        markdown::strip_to_prose(&content)
    } else {
        content
    };

    let scorer = scorer_for(config)?;
    let label = args.label();
    let Some(result) = scorer.score(&text, &score_config) else {
        bail!("{label} contains no text to score");
    };

    if global_json {
        let json = serde_json::to_string_pretty(&result).context("failed to serialize scores")?;
        println!("{json}");
    } else {
        print_report(&result);
    }

    if let Some(max) = max_grade {
        let Some(value) = result.get(gate) else {
            bail!("{label}: {} was not computed, so --max-grade cannot be checked", gate.label());
        };
        if value > max {
            bail!(
                "{label} scores {value} on {} (max: {max}). Shorten sentences or use plainer words.",
                gate.label()
            );
        }
        if !global_json {
            println!(
                "{} {label} scores {value} on {} (max: {max})",
                "PASS:".green(),
                gate.label()
            );
        }
    }

    Ok(())
}

fn print_report(result: &ScoreResult) {
    println!("{}", "Counts".bold().underline());
    row("Words", result.word_count);
    row("Sentences", result.sentence_count);
    row("Letters", result.letter_count);
    row("Syllables", result.syllable_count);
    row("Polysyllabic words", result.polysyllabic_word_count);
    if let Some(count) = result.spache_unique_unfamiliar_word_count {
        row("Spache unfamiliar", count);
    }
    if let Some(count) = result.dale_chall_difficult_word_count {
        row("Dale-Chall difficult", count);
    }

    let scores: Vec<(Formula, f64)> = Formula::ALL
        .into_iter()
        .filter_map(|f| result.get(f).map(|value| (f, value)))
        .collect();
    if !scores.is_empty() {
        println!();
        println!("{}", "Scores".bold().underline());
        for (formula, value) in scores {
            row(formula.label(), value.cyan());
        }
    }

    let lists = [
        ("Polysyllabic words", &result.polysyllabic_words),
        ("Spache unfamiliar words", &result.spache_unique_unfamiliar_words),
        ("Dale-Chall difficult words", &result.dale_chall_difficult_words),
    ];
    for (title, words) in lists {
        if let Some(words) = words.as_ref().filter(|w| !w.is_empty()) {
            println!();
            println!("{}", title.bold().underline());
            println!("{}", words.join(", "));
        }
    }
}

fn row(label: &str, value: impl std::fmt::Display) {
    println!("{:<22} {value}", format!("{label}:").dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_add_to_config_defaults() {
        let config = Config {
            difficult_words: true,
            skip: vec![Formula::Smog],
            ..Config::default()
        };
        let args = ScoreArgs {
            caps_as_names: true,
            ..ScoreArgs::default()
        };
        let score = args.score_config(&config);
        assert!(score.difficult_words);
        assert!(score.caps_as_names);
        assert!(score.skip_smog);
    }

    #[test]
    fn only_flag_replaces_configured_selection() {
        let config = Config {
            skip: vec![Formula::Ari],
            ..Config::default()
        };
        let args = ScoreArgs {
            only: Some(Formula::Spache),
            ..ScoreArgs::default()
        };
        let score = args.score_config(&config);
        assert!(score.only_spache);
        assert!(!score.skip_ari);
    }

    #[test]
    fn markdown_is_detected_by_extension() {
        let args = ScoreArgs {
            file: Some("notes.md".into()),
            ..ScoreArgs::default()
        };
        assert!(args.is_markdown());
        assert!(!args.is_stdin());

        let dash = ScoreArgs {
            file: Some("-".into()),
            ..ScoreArgs::default()
        };
        assert!(dash.is_stdin());
        assert_eq!(dash.label(), "stdin");
    }
}
