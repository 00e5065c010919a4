//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::error::TallyError;
use crate::core::model::ErrorItem;
use crate::core::paths::{normalize_path, resolve, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE};
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::core::tally::TallyReporter;
use crate::flows::histogram::build_histogram;
use crate::flows::menu::Menu;

/// grocer - tally grocery purchases and report item frequencies.
#[derive(Parser, Debug)]
#[command(name = "grocer")]
#[command(
    author,
    version,
    about,
    long_about = r#"grocer counts whitespace-separated item names in a purchase log.

Item names are case-insensitive: "Apple", "APPLE" and "apple" are the same item.
Every command re-reads the input file, so results always match what is on disk.

Output formats:
- plain: "<item> <count>" lines (default)
- jsonl: one JSON object per line
- json: a single JSON value
- md: Markdown table

Examples:
    grocer lookup apples
    grocer list --format json
    grocer export --output frequency.dat
    grocer histogram
    grocer menu
"#
)]
pub struct Cli {
    /// Directory that relative input/output paths are resolved against.
    #[arg(long, global = true, default_value = ".", value_name = "ROOT")]
    pub root: PathBuf,

    /// Purchase log to read.
    #[arg(
        short,
        long,
        global = true,
        default_value = DEFAULT_INPUT_FILE,
        value_name = "FILE",
        long_help = "Purchase log to read: plain text, items separated by any whitespace.\n\n\
Relative paths are resolved against --root."
    )]
    pub input: PathBuf,

    /// Output format (plain/jsonl/json/md).
    #[arg(long, global = true, default_value = "plain", value_name = "FORMAT")]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output (when applicable).
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show how many times one item was purchased.
    #[command(long_about = "Look up a single item, ignoring case and surrounding whitespace.\n\n\
Prints the count, or reports that the item was not found (count -1 in JSON).\n\n\
Examples:\n\
  grocer lookup Apples\n\
  grocer lookup cranberries --format json\n")]
    Lookup {
        /// Item name to look up.
        #[arg(value_name = "ITEM")]
        item: String,
    },

    /// List every item with its purchase count, sorted by name.
    List,

    /// Write the frequency data file ("<item> <count>" per line).
    #[command(long_about = "Write one \"<item> <count>\" line per distinct item to the output\n\
file, replacing it. The file is staged next to the destination and renamed into\n\
place, so a failed write never leaves a partial file.\n")]
    Export {
        /// Destination file (relative to ROOT unless absolute).
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE, value_name = "FILE")]
        output: PathBuf,
    },

    /// Write the frequency data file and draw it as a star chart.
    Histogram {
        /// Frequency data file (relative to ROOT unless absolute).
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE, value_name = "FILE")]
        output: PathBuf,

        /// Bar symbol.
        #[arg(long, default_value_t = crate::flows::histogram::DEFAULT_SYMBOL)]
        symbol: char,
    },

    /// Interactive numbered menu.
    Menu {
        /// Frequency data file used by the star chart option.
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE, value_name = "FILE")]
        output: PathBuf,
    },
}

impl Cli {
    /// Default tracing filter for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "grocer=debug"
        } else if self.quiet {
            "grocer=error"
        } else {
            "grocer=warn"
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli
        .format
        .parse()
        .map_err(anyhow::Error::msg)
        .context("Invalid --format")?;
    let renderer = Renderer::with_config(RenderConfig::with_pretty(format, cli.pretty));

    if cli.no_color {
        colored::control::set_override(false);
    }
    let color = !cli.no_color && format == OutputFormat::Plain;

    let root = match cli.root.canonicalize() {
        Ok(root) => root,
        Err(e) => {
            debug!(root = %normalize_path(&cli.root), error = %e, "using --root as given");
            cli.root
        }
    };
    let reporter = TallyReporter::new(resolve(&root, &cli.input));
    info!(input = %normalize_path(reporter.source()), "using input");

    match cli.command {
        Commands::Lookup { item } => run_lookup(&reporter, &item, &renderer),
        Commands::List => run_list(&reporter, &renderer),
        Commands::Export { output } => {
            run_export(&reporter, &resolve(&root, &output), &renderer)
        }
        Commands::Histogram { output, symbol } => {
            let chart = build_histogram(&reporter, &resolve(&root, &output), symbol, color)
                .map_err(|e| report_failure(&renderer, e))?;
            emit(&chart)
        }
        Commands::Menu { output } => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut menu = Menu::new(
                reporter,
                resolve(&root, &output),
                stdin.lock(),
                stdout.lock(),
            )
            .with_color(color);
            menu.run()
        }
    }
}

fn run_lookup(reporter: &TallyReporter, item: &str, renderer: &Renderer) -> Result<()> {
    let lookup = reporter
        .lookup(item)
        .map_err(|e| report_failure(renderer, e))?;
    emit(&renderer.render_lookup(&lookup))
}

fn run_list(reporter: &TallyReporter, renderer: &Renderer) -> Result<()> {
    let items: Vec<_> = reporter
        .report_all_items()
        .map_err(|e| report_failure(renderer, e))?
        .collect();
    emit(&renderer.render_report(&items))
}

fn run_export(reporter: &TallyReporter, output: &Path, renderer: &Renderer) -> Result<()> {
    reporter
        .export_histogram_data(output)
        .map_err(|e| report_failure(renderer, e))?;
    info!(output = %normalize_path(output), "export complete");
    Ok(())
}

/// Print a machine-readable error record for JSON formats, then hand the error back
fn report_failure(renderer: &Renderer, err: TallyError) -> anyhow::Error {
    report_failure_to(renderer, err, io::stdout().lock())
}

fn report_failure_to<W: Write>(renderer: &Renderer, err: TallyError, out: W) -> anyhow::Error {
    if matches!(renderer.config().format, OutputFormat::Json | OutputFormat::Jsonl) {
        if let Err(e) = write_out(out, &renderer.render_error(&ErrorItem::from(&err))) {
            warn!(error = %e, "failed to write error record");
        }
    }
    anyhow::Error::new(err)
}

fn emit(text: &str) -> Result<()> {
    write_out(io::stdout().lock(), text)
}

fn write_out<W: Write>(mut out: W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .and_then(|_| out.flush())
        .context("Failed to write to stdout")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["grocer", "list"]);
        assert_eq!(cli.input, PathBuf::from(DEFAULT_INPUT_FILE));
        assert_eq!(cli.format, "plain");
        assert_eq!(cli.log_filter(), "grocer=warn");
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_export_default_output() {
        let cli = Cli::parse_from(["grocer", "export"]);
        match cli.command {
            Commands::Export { output } => assert_eq!(output, PathBuf::from(DEFAULT_OUTPUT_FILE)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbose_filter() {
        let cli = Cli::parse_from(["grocer", "-v", "lookup", "apple"]);
        assert_eq!(cli.log_filter(), "grocer=debug");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["grocer", "-q", "-v", "list"]).is_err());
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    fn missing_input() -> TallyError {
        TallyError::not_found("missing.txt", io::Error::from(io::ErrorKind::NotFound))
    }

    #[test]
    fn test_report_failure_writes_json_record() {
        let renderer = Renderer::new(OutputFormat::Jsonl);
        let mut out = Vec::new();
        let err = report_failure_to(&renderer, missing_input(), &mut out);

        assert!(String::from_utf8(out).unwrap().contains("\"code\":\"NOT_FOUND\""));
        assert!(matches!(
            err.downcast_ref::<TallyError>(),
            Some(TallyError::NotFound { .. })
        ));
    }

    #[test]
    fn test_report_failure_survives_closed_stdout() {
        let renderer = Renderer::new(OutputFormat::Json);
        let err = report_failure_to(&renderer, missing_input(), ClosedPipe);
        assert!(matches!(
            err.downcast_ref::<TallyError>(),
            Some(TallyError::NotFound { .. })
        ));
    }

    #[test]
    fn test_report_failure_plain_writes_nothing() {
        let renderer = Renderer::new(OutputFormat::Plain);
        let mut out = Vec::new();
        report_failure_to(&renderer, missing_input(), &mut out);
        assert!(out.is_empty());
    }
}
