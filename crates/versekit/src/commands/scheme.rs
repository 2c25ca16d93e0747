//! Scheme command: label each line by the rhyme of its final word.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use versekit_core::Lexicon;
use versekit_core::scheme::{SchemeReport, UNKNOWN_LABEL, rhyme_scheme};

use super::read_lyrics;

/// Arguments for the `scheme` subcommand.
#[derive(Args, Debug)]
pub struct SchemeArgs {
    /// File to analyze (`.md` files have markdown stripped).
    pub file: Utf8PathBuf,
}

/// Print the rhyme scheme of a file.
#[instrument(name = "cmd_scheme", skip_all, fields(file = %args.file))]
pub fn cmd_scheme(
    args: SchemeArgs,
    global_json: bool,
    lexicon: &Lexicon,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!("executing scheme command");

    let content = read_lyrics(&args.file, max_input_bytes)?;
    let report = rhyme_scheme(lexicon, &content)
        .with_context(|| format!("failed to label rhyme scheme of {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &SchemeReport) {
    let width = report.lines.iter().map(|l| l.label.len()).max().unwrap_or(1);
    for line in &report.lines {
        if line.label == UNKNOWN_LABEL {
            println!("{:>width$}  {}", line.label.dimmed(), line.text);
        } else {
            println!("{:>width$}  {}", line.label.green(), line.text);
        }
    }
    println!();
    println!("{}", report.scheme.bold());
}
