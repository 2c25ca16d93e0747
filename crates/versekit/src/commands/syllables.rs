//! Syllables command: count syllables in individual words.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use versekit_core::{Lexicon, SyllableMode, SyllableReport, SyllableSource};

/// Arguments for the `syllables` subcommand.
#[derive(Args, Debug)]
pub struct SyllablesArgs {
    /// Words to count.
    #[arg(required = true)]
    pub words: Vec<String>,

    /// Counting mode (defaults to config, then `auto`).
    #[arg(short, long, value_enum)]
    pub mode: Option<SyllableMode>,
}

/// Print the syllable count of each word.
#[instrument(name = "cmd_syllables", skip_all, fields(words = args.words.len()))]
pub fn cmd_syllables(
    args: SyllablesArgs,
    global_json: bool,
    lexicon: &Lexicon,
    config_mode: Option<SyllableMode>,
) -> anyhow::Result<()> {
    let mode = args.mode.or(config_mode).unwrap_or_default();
    debug!(mode = %mode, "executing syllables command");

    let reports: Vec<SyllableReport> = args
        .words
        .iter()
        .map(|word| lexicon.syllables(word, mode))
        .collect();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        match report.source {
            SyllableSource::Dictionary => println!("{}: {}", report.word.bold(), report.syllables),
            SyllableSource::Estimate => println!(
                "{}: {} {}",
                report.word.bold(),
                report.syllables,
                "(estimated)".yellow()
            ),
        }
    }

    Ok(())
}
