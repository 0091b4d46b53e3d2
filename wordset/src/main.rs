//! wordset - word counting tools built on slotset
//!
//! Usage:
//!   wordset count <PATH>
//!   wordset unique <PATH> [--exclude <PATH>] [--list]
//!   wordset parity <PATH>
//!
//! `--strategy` and `--capacity` (or `WORDSET_STRATEGY` and
//! `WORDSET_CAPACITY`) select the set used by `unique` and `parity`.

mod words;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use slotset::{SetConfig, Strategy, StringSet};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default bound on distinct words held at once.
const DEFAULT_CAPACITY: usize = 18_000;

#[derive(Parser, Debug)]
#[command(name = "wordset")]
#[command(about = "Count, de-duplicate and pair up the words of a text file")]
struct Cli {
    /// Storage strategy (unsorted|sorted|open-addressing|chained)
    #[arg(long, short = 's', global = true, env = "WORDSET_STRATEGY", default_value_t = Strategy::OpenAddressing)]
    strategy: Strategy,

    /// Maximum number of distinct words
    #[arg(long, short = 'c', global = true, env = "WORDSET_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the total number of words
    Count(CountArgs),
    /// Print the number of distinct words
    Unique(UniqueArgs),
    /// Print the number of words occurring an odd number of times
    Parity(ParityArgs),
}

#[derive(Args, Debug)]
struct CountArgs {
    /// Input text file
    path: PathBuf,
}

#[derive(Args, Debug)]
struct UniqueArgs {
    /// Input text file
    path: PathBuf,

    /// Remove every word of this file before reporting
    #[arg(long, short = 'x')]
    exclude: Option<PathBuf>,

    /// Also print the remaining words, one per line
    #[arg(long, short = 'l')]
    list: bool,
}

#[derive(Args, Debug)]
struct ParityArgs {
    /// Input text file
    path: PathBuf,

    /// Also print the odd words, one per line
    #[arg(long, short = 'l')]
    list: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,slotset=info,wordset=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed arguments");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    match &cli.command {
        Commands::Count(args) => {
            let total = words::count_words(open(&args.path)?)?;
            writeln!(out, "{total} total words")?;
        }
        Commands::Unique(args) => {
            let mut set = new_set(cli)?;
            words::insert_words(open(&args.path)?, &mut set)
                .with_context(|| format!("failed to collect words of {}", args.path.display()))?;
            if let Some(exclude) = &args.exclude {
                let removed = words::remove_words(open(exclude)?, &mut set)?;
                tracing::info!(removed, path = %exclude.display(), "excluded words");
            }
            writeln!(out, "{} distinct words", set.count())?;
            if args.list {
                print_words(&set, out)?;
            }
        }
        Commands::Parity(args) => {
            let mut set = new_set(cli)?;
            words::toggle_words(open(&args.path)?, &mut set)
                .with_context(|| format!("failed to pair words of {}", args.path.display()))?;
            writeln!(out, "{} words occur an odd number of times", set.count())?;
            if args.list {
                print_words(&set, out)?;
            }
        }
    }
    Ok(())
}

fn new_set(cli: &Cli) -> Result<StringSet> {
    let config = SetConfig::new(cli.strategy, cli.capacity);
    tracing::info!(strategy = %cli.strategy, capacity = cli.capacity, "creating word set");
    StringSet::from_config(&config).context("invalid set configuration")
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .with_context(|| format!("failed to open {}", path.display()))
}

fn print_words<W: Write>(set: &StringSet, out: &mut W) -> Result<()> {
    for word in set.snapshot() {
        writeln!(out, "{word}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::env;
    use std::fs;

    fn fixture(name: &str, text: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("wordset-{}-{name}", std::process::id()));
        fs::write(&path, text).unwrap();
        path
    }

    fn run_to_string(arguments: &[&str]) -> String {
        let cli = Cli::try_parse_from(arguments).unwrap();
        let mut out = Vec::new();
        run(&cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[rstest]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[rstest]
    fn test_count() {
        let path = fixture("count.txt", "a b\nc  d a\n");
        let output = run_to_string(&["wordset", "count", path.to_str().unwrap()]);
        assert_eq!(output, "5 total words\n");
    }

    #[rstest]
    #[case("unsorted")]
    #[case("sorted")]
    #[case("open-addressing")]
    #[case("chained")]
    fn test_unique_with_exclude_and_list(#[case] strategy: &str) {
        let input = fixture(&format!("unique-{strategy}.txt"), "pear fig pear kiwi fig plum\n");
        let exclude = fixture(&format!("exclude-{strategy}.txt"), "kiwi\n");
        let output = run_to_string(&[
            "wordset",
            "--strategy",
            strategy,
            "unique",
            input.to_str().unwrap(),
            "--exclude",
            exclude.to_str().unwrap(),
            "--list",
        ]);

        let mut lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.remove(0), "3 distinct words");
        lines.sort_unstable();
        assert_eq!(lines, vec!["fig", "pear", "plum"]);
    }

    #[rstest]
    fn test_parity() {
        let path = fixture("parity.txt", "x y x z x y\n");
        let output = run_to_string(&["wordset", "parity", path.to_str().unwrap(), "--list"]);
        assert_eq!(output, "2 words occur an odd number of times\nx\nz\n");
    }

    #[rstest]
    fn test_capacity_overflow_is_an_error() {
        let path = fixture("overflow.txt", "a b c\n");
        let cli = Cli::try_parse_from(["wordset", "--capacity", "2", "unique", path.to_str().unwrap()])
            .unwrap();
        let error = run(&cli, &mut Vec::new()).unwrap_err();
        assert!(format!("{error:#}").contains("capacity of 2"));
    }

    #[rstest]
    fn test_missing_file_names_path() {
        let cli = Cli::try_parse_from(["wordset", "count", "/nonexistent/wordset-input"]).unwrap();
        let error = run(&cli, &mut Vec::new()).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/wordset-input"));
    }

    #[rstest]
    fn test_unknown_strategy_is_rejected() {
        let parsed = Cli::try_parse_from(["wordset", "--strategy", "btree", "count", "x"]);
        assert!(parsed.is_err());
    }
}
