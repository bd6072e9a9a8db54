//! Command-line argument parsing for symptomcheck
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// symptomcheck - rank likely conditions for a symptom description
#[derive(Parser, Debug)]
#[command(name = "symptomcheck")]
#[command(version)]
#[command(about = "Map free-text symptoms to candidate conditions and next steps", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Model artifact directory (overrides the configured one)
    #[arg(long, global = true)]
    pub model_dir: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one symptom description
    Predict {
        /// Free-text symptom description
        #[arg(value_name = "SYMPTOMS")]
        symptoms: String,

        /// Print the JSON report instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Start interactive mode
    Start,

    /// Train a model artifact from a corpus
    Train {
        /// Built-in corpus name (sample, enhanced) or path to a JSON corpus
        #[arg(long, default_value = "sample")]
        corpus: String,

        /// Output directory (defaults to the configured artifact directory)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Run a prediction through the trained model before writing it
        #[arg(long)]
        check: bool,
    },

    /// Check that the model loads and report its shape
    Doctor,

    /// List the conditions the model knows about
    Labels,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Check if should show progress spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}
