//! Profile Analyzer CLI
//!
//! Answers "who calls this function" and "what does it spend its time
//! calling" for a V8 .cpuprofile file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use cpuprofile_analyzer::commands::{
    display_version, execute_analyze, validate_args, validate_profile_file, AnalyzeArgs,
};
use cpuprofile_analyzer::utils::config::{DEFAULT_MAX_DEPTH, DEFAULT_TOP_N};
use env_logger::Env;
use std::path::PathBuf;

/// Profile Analyzer - caller/callee analysis for .cpuprofile files
#[derive(Parser, Debug)]
#[command(name = "profile-analyzer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze callers and callees of a function
    Analyze {
        /// Path to the .cpuprofile file
        profile: PathBuf,

        /// Function name to analyze (exact or substring)
        #[arg(short, long)]
        function: Option<String>,

        /// Only consider nodes whose script url contains this
        #[arg(long)]
        file: Option<String>,

        /// Number of rows per ranked section
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Maximum frames per reconstructed stack
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Stop stacks at shared nodes instead of following the first parent
        #[arg(long)]
        strict_parents: bool,

        /// Output path for JSON report (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a .cpuprofile file
    Validate {
        /// Path to the .cpuprofile file
        profile: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            profile,
            function,
            file,
            top,
            max_depth,
            strict_parents,
            output,
        } => {
            let args = AnalyzeArgs {
                profile_path: profile,
                function_name: function,
                file,
                top_n: top,
                max_depth,
                strict_parents,
                output_json: output,
            };

            validate_args(&args)?;
            execute_analyze(args)?;
        }

        Commands::Validate { profile } => {
            validate_profile_file(&profile)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
