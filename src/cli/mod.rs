use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "scenario-builder")]
#[command(about = "Build clinical simulation scenarios and export them as JSON")]
#[command(long_about = "Scenario Builder walks you through filling in a clinical scenario, \
                       reviewing it and generating the JSON document consumed by the simulation \
                       platform. Get started with 'scenario-builder new' to open the form.")]
pub struct Cli {
    /// Configuration file (defaults to ./scenario-builder.toml when present)
    #[arg(long, global = true, help = "Path to a scenario-builder.toml configuration file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the scenario form in an interactive session
    New {
        /// Start from the built-in Chest Pain Emergency sample
        #[arg(long, help = "Pre-fill the form with the sample scenario")]
        sample: bool,
    },
    /// Reopen a generated document on the review screen
    Review {
        /// Output-format scenario document
        document: PathBuf,
    },
    /// Validate an edit-format record and write the generated document
    Generate {
        /// Edit-format scenario record (vitals without units)
        record: PathBuf,
        /// File name for the download (default: Scenario_<timestamp>.json)
        #[arg(long, help = "File name; .json is appended when missing")]
        filename: Option<String>,
        /// Directory to write into (default: [output] directory from config)
        #[arg(long, help = "Directory the generated document is written to")]
        output_dir: Option<PathBuf>,
        /// Print the document instead of writing a file
        #[arg(long, help = "Print the generated JSON to stdout")]
        stdout: bool,
    },
    /// Print the built-in sample scenario
    Sample {
        /// Print the generated document (vitals with units) instead of the record
        #[arg(long, help = "Print the output-format document")]
        document: bool,
    },
    /// Upload a generated document to the configured GitHub repository
    Publish {
        /// Output-format scenario document
        document: PathBuf,
        /// File name under scenarios/ (default: Scenario_<timestamp>.json)
        #[arg(long, help = "File name; .json is appended when missing")]
        filename: Option<String>,
        /// Repository owner, overriding [github] owner
        #[arg(long, help = "GitHub user or organisation")]
        owner: Option<String>,
        /// Repository name, overriding [github] repo
        #[arg(long, help = "GitHub repository name")]
        repo: Option<String>,
    },
    /// Check that the configured GitHub token is accepted
    CheckToken,
    /// Write a scenario-builder.toml with default settings
    InitConfig {
        /// Overwrite an existing configuration file
        #[arg(long, help = "Force initialization, overwriting existing configuration")]
        force: bool,
    },
}
