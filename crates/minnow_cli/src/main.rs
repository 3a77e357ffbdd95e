//! minnow: The minnow language REPL and script runner.
//!
//! Usage:
//!   minnow [options]          start the interactive REPL
//!   minnow [options] FILE     evaluate FILE as a single fragment

mod render;
mod repl;
mod run;
mod tree;

use clap::{Parser as ClapParser, ValueEnum};
use minnow_compiler::Session;
use minnow_evaluator::StdHost;
use minnow_options::{OutputFormat, SessionOptions, CONFIG_FILE_NAME};
use render::Output;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "minnow", version, about = "minnow - a small interpreted language")]
struct Cli {
    /// Source file to evaluate. Starts the REPL when omitted.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to minnow.json.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Initialize a minnow.json file.
    #[arg(long)]
    init: bool,

    /// Print the syntax tree of every submission.
    #[arg(long = "show-tree")]
    show_tree: bool,

    /// Print the bound tree of every submission.
    #[arg(long = "show-program")]
    show_program: bool,

    /// Seed for `rnd`.
    #[arg(long)]
    seed: Option<u64>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Disable ANSI colors.
    #[arg(long = "no-color")]
    no_color: bool,

    /// Log more (-v debug, -vv trace). MINNOW_LOG takes precedence.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let plain = Output {
        format: OutputFormat::Text,
        color: std::io::stderr().is_terminal(),
    };

    if cli.init {
        return run_init(&plain);
    }

    let options = match load_options(&cli) {
        Ok(options) => options,
        Err(e) => {
            plain.error(&e.to_string());
            return ExitCode::from(1);
        }
    };

    debug!(?options, "session options");

    let output = Output {
        format: options.format,
        color: options.color && std::io::stdout().is_terminal(),
    };
    let mut session = Session::new(StdHost, options);

    match &cli.file {
        Some(path) => ExitCode::from(run::run_file(&mut session, path, &output)),
        None => {
            repl::run(&mut session, &output);
            ExitCode::SUCCESS
        }
    }
}

/// Log to stderr, filtered by `MINNOW_LOG` or the verbosity flag.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("MINNOW_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Options from minnow.json, with command-line flags applied on top.
fn load_options(cli: &Cli) -> Result<SessionOptions, minnow_options::OptionsError> {
    let mut options = minnow_options::load_options(cli.config.as_deref(), Path::new("."))?;
    if cli.show_tree {
        options.show_tree = true;
    }
    if cli.show_program {
        options.show_program = true;
    }
    if cli.seed.is_some() {
        options.seed = cli.seed;
    }
    if let Some(format) = cli.format {
        options.format = format.into();
    }
    if cli.no_color {
        options.color = false;
    }
    Ok(options)
}

fn run_init(output: &Output) -> ExitCode {
    match minnow_options::write_default_options(Path::new(CONFIG_FILE_NAME)) {
        Ok(()) => {
            println!("Successfully created a {} file.", CONFIG_FILE_NAME);
            ExitCode::SUCCESS
        }
        Err(e) => {
            output.error(&e.to_string());
            ExitCode::from(1)
        }
    }
}
