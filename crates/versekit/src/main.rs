//! versekit CLI
#![deny(unsafe_code)]

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::debug;
use versekit::{Cli, Commands, commands};
use versekit_core::{ConfigLoader, Lexicon, LexiconSource};

mod observability;

fn utf8_path(path: std::path::PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path).map_err(|e| {
        anyhow::anyhow!(
            "{what} is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = utf8_path(cwd, "current directory")?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        loader = loader.with_file(utf8_path(config_path.clone(), "config path")?);
    }
    let (config, config_sources) = loader.load().context("failed to load configuration")?;

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        file_logging = obs_config.writes_file(),
        "CLI initialized"
    );

    // --dictionary wins over the configured dictionary
    let source = match cli.dictionary {
        Some(path) => LexiconSource::File(utf8_path(path, "dictionary path")?),
        None => config.lexicon_source(),
    };
    let lexicon = Lexicon::load(&source)
        .with_context(|| format!("failed to load pronunciation dictionary ({source})"))?;

    let max_input = config.input_limit();

    let result = match command {
        Commands::Rhymes(args) => {
            commands::rhymes::cmd_rhymes(args, cli.json, &lexicon, config.rhyme_limit)
        }
        Commands::Syllables(args) => {
            commands::syllables::cmd_syllables(args, cli.json, &lexicon, config.syllable_mode)
        }
        Commands::Lines(args) => commands::lines::cmd_lines(
            args,
            cli.json,
            &lexicon,
            config.syllable_mode,
            max_input,
        ),
        Commands::Scheme(args) => {
            commands::scheme::cmd_scheme(args, cli.json, &lexicon, max_input)
        }
        Commands::Info(args) => {
            commands::info::cmd_info(args, cli.json, &config, &config_sources, &lexicon)
        }
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new()
                .context("failed to create async runtime for MCP server")?;
            rt.block_on(commands::serve::cmd_serve(args, config, lexicon))
        }
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
