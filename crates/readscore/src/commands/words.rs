//! Words command: show how individual words are classified.

use anyhow::Context;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use readscore_core::{Config, Familiarity, WordReport};

use super::scorer_for;

/// Arguments for the `words` subcommand.
#[derive(Args, Debug, Default)]
pub struct WordsArgs {
    /// Words to classify
    #[arg(required = true)]
    pub words: Vec<String>,

    /// Treat words starting with a capital letter as proper names.
    #[arg(long)]
    pub caps_as_names: bool,
}

/// Classify each word against the Spache and Dale-Chall lists.
#[instrument(name = "cmd_words", skip_all, fields(count = args.words.len()))]
pub fn cmd_words(args: WordsArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let caps_as_names = args.caps_as_names || config.caps_as_names;
    debug!(caps_as_names, "executing words command");

    let scorer = scorer_for(config)?;
    let reports = scorer.describe(args.words.iter().map(String::as_str), caps_as_names);

    if global_json {
        let json =
            serde_json::to_string_pretty(&reports).context("failed to serialize word reports")?;
        println!("{json}");
        return Ok(());
    }

    for report in &reports {
        print_report(report);
    }
    Ok(())
}

fn print_report(report: &WordReport) {
    let mut traits = vec![format!("{} syllables", report.syllables)];
    if report.polysyllabic {
        traits.push("polysyllabic".to_string());
    }
    println!(
        "{}  {}",
        report.word.bold(),
        format!("({}; {})", report.normalized, traits.join(", ")).dimmed()
    );
    if let Some(spache) = report.spache {
        println!("  {:<12} {}", "Spache:", outcome(spache));
    }
    if let Some(dale_chall) = report.dale_chall {
        println!("  {:<12} {}", "Dale-Chall:", outcome(dale_chall));
    }
}

fn outcome(familiarity: Familiarity) -> String {
    if familiarity.is_familiar() {
        familiarity.green().to_string()
    } else {
        familiarity.yellow().to_string()
    }
}
