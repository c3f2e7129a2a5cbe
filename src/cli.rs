//! Command-line interface implementation for kiln.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for kiln.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "kiln: script-driven project scaffolding tool",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Args {
    /// Path to the template directory or git repository URL
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Directory where the generated project will be created
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Generate into an existing output directory, overwriting generated files
    #[arg(short, long)]
    pub force: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Read answers as a JSON object from stdin instead of prompting
    #[arg(short, long)]
    pub stdin: bool,
}

/// Parses command line arguments. Running without arguments prints the help.
pub fn get_args() -> Args {
    Args::parse()
}
