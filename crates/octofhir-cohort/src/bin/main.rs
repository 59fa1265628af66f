//! Cohort command-line interface

use clap::{Parser, Subcommand};
use octofhir_cohort::CodeSystem;
use octofhir_cohort::cli::{check, compile, output};
use std::path::PathBuf;

/// Cohort query compiler
#[derive(Parser)]
#[command(name = "cohort")]
#[command(author, version, about = "Compile cohort search criteria into CQL", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query document into a CQL library
    Compile {
        /// Mapping configuration (.xml or .json); defaults to the bundled BBMRI mapping
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Query document (JSON)
        #[arg(short, long)]
        query: PathBuf,

        /// Entity type the library is evaluated against
        #[arg(short, long, default_value = "Patient")]
        entity: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Additional coding system to define
        #[arg(long = "extra-codesystem", value_name = "NAME=URL")]
        extra_codesystems: Vec<CodeSystem>,

        /// Strict mode (warnings as errors)
        #[arg(short, long)]
        strict: bool,
    },

    /// Load a mapping configuration and report problems
    Check {
        /// Mapping configuration (.xml or .json); defaults to the bundled BBMRI mapping
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Strict mode (warnings as errors)
        #[arg(short, long)]
        strict: bool,
    },
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(&cli.color);

    // Diagnostics are printed by the commands; the log stream only adds
    // errors unless asked for more.
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Error
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let result = match cli.command {
        Commands::Compile {
            config,
            query,
            entity,
            output,
            extra_codesystems,
            strict,
        } => compile::compile(compile::CompileConfig {
            config,
            query,
            entity,
            output_file: output,
            extra_codesystems,
            strict,
            verbose: cli.verbose,
        }),

        Commands::Check { config, strict } => check::check(check::CheckConfig {
            config,
            strict,
            verbose: cli.verbose,
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
