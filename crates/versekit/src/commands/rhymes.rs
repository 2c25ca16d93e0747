//! Rhymes command: list dictionary words sharing a word's rhyme key.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use versekit_core::{Lexicon, RhymeReport};

/// Arguments for the `rhymes` subcommand.
#[derive(Args, Debug)]
pub struct RhymesArgs {
    /// Word to find rhymes for.
    pub word: String,

    /// Show at most this many rhymes.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Print the words that rhyme with `args.word`.
///
/// Unknown and keyless words are not errors; they simply have no rhymes.
#[instrument(name = "cmd_rhymes", skip_all, fields(word = %args.word))]
pub fn cmd_rhymes(
    args: RhymesArgs,
    global_json: bool,
    lexicon: &Lexicon,
    config_limit: Option<usize>,
) -> anyhow::Result<()> {
    let limit = args.limit.or(config_limit);
    debug!(limit = ?limit, "executing rhymes command");

    let report = lexicon.rhyme_report(&args.word, limit);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &RhymeReport) {
    if report.rhymes.is_empty() {
        let reason = if report.pronunciation.is_none() {
            "not in the dictionary"
        } else {
            "no other word shares its rhyme"
        };
        println!("No rhymes for {} ({reason})", report.word.bold());
        return;
    }

    if let (Some(key), Some(pron)) = (&report.key, &report.pronunciation) {
        println!(
            "{} {} {}",
            report.word.bold(),
            format!("[{pron}]").dimmed(),
            format!("rhyme key {key}").dimmed()
        );
    }
    println!("{}", report.rhymes.join(", "));
    if report.rhymes.len() < report.total {
        println!(
            "{}",
            format!("... {} of {} shown", report.rhymes.len(), report.total).dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::bundled().unwrap()
    }

    #[test]
    fn known_word_succeeds() {
        let args = RhymesArgs {
            word: "time".to_string(),
            limit: None,
        };
        assert!(cmd_rhymes(args, false, &lexicon(), None).is_ok());
    }

    #[test]
    fn unknown_word_is_not_an_error() {
        let args = RhymesArgs {
            word: "blorfle".to_string(),
            limit: Some(3),
        };
        assert!(cmd_rhymes(args, true, &lexicon(), None).is_ok());
    }
}
