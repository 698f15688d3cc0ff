use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Job file used when none is given
pub const DEFAULT_JOB_FILE: &str = "wkhtml-pdf.toml";

#[derive(Args, Debug)]
pub struct JobArgs {
    /// Job file describing the document, in TOML or (with a .json extension) JSON
    #[clap(short, long, default_value = DEFAULT_JOB_FILE, env = "WKHTML_PDF_JOB")]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[clap(flatten)]
    pub job: JobArgs,
    /// Write the PDF here instead of the job's output file. Without either the PDF is
    /// written to stdout
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    /// Kill wkhtmltopdf if it takes longer than this many seconds
    #[clap(short, long)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactively generates a job file
    Init(JobArgs),
    /// Renders the document described by a job file
    Render(RenderArgs),
    /// Prints the wkhtmltopdf arguments for a job file without running anything
    Args(JobArgs),
    /// Prints the command used to run wkhtmltopdf on this system
    Locate,
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Log more; repeat for debug output
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Commands,
}
