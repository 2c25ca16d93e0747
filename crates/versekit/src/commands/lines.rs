//! Lines command: per-line syllable counts for a lyric or poem.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use versekit_core::lines::{LinesReport, analyze_lines};
use versekit_core::{Lexicon, SyllableMode, SyllableSource};

use super::read_lyrics;

/// Arguments for the `lines` subcommand.
#[derive(Args, Debug)]
pub struct LinesArgs {
    /// File to analyze (`.md` files have markdown stripped).
    pub file: Utf8PathBuf,

    /// Counting mode (defaults to config, then `auto`).
    #[arg(short, long, value_enum)]
    pub mode: Option<SyllableMode>,

    /// Show the count of every word.
    #[arg(short, long)]
    pub words: bool,
}

/// Count syllables line by line.
#[instrument(name = "cmd_lines", skip_all, fields(file = %args.file))]
pub fn cmd_lines(
    args: LinesArgs,
    global_json: bool,
    lexicon: &Lexicon,
    config_mode: Option<SyllableMode>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let mode = args.mode.or(config_mode).unwrap_or_default();
    debug!(mode = %mode, "executing lines command");

    let content = read_lyrics(&args.file, max_input_bytes)?;
    let report = analyze_lines(lexicon, &content, mode)
        .with_context(|| format!("failed to count syllables in {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, args.words);
    }

    Ok(())
}

fn print_report(report: &LinesReport, show_words: bool) {
    let width = report
        .lines
        .iter()
        .map(|l| l.syllables.to_string().len())
        .max()
        .unwrap_or(1);

    for line in &report.lines {
        println!(
            "{:>width$}  {}",
            line.syllables.to_string().cyan(),
            line.text
        );
        if show_words {
            let words: Vec<String> = line
                .words
                .iter()
                .map(|w| match w.source {
                    SyllableSource::Dictionary => format!("{}:{}", w.word, w.syllables),
                    SyllableSource::Estimate => format!("{}:{}*", w.word, w.syllables),
                })
                .collect();
            println!("{:>width$}  {}", "", words.join(" ").dimmed());
        }
    }

    println!();
    println!(
        "{} syllables, {} words, {} lines",
        report.total_syllables.bold(),
        report.total_words,
        report.lines.len()
    );
    if report.estimated_words > 0 {
        println!(
            "{}",
            format!("{} words estimated from spelling", report.estimated_words).yellow()
        );
    }
}
