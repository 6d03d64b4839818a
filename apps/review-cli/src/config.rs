//! Command-line and environment configuration

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the review tool
#[derive(Parser, Debug, Clone)]
#[command(name = "pdf-review")]
#[command(
    version,
    about = "Audit PDF validation findings page by page and export the unresolved ones"
)]
pub struct Args {
    /// Findings report (Page,Code,Severity,Message,BBox)
    #[arg(short, long, env = "PDF_REVIEW_REPORT")]
    pub report: PathBuf,

    /// PDF the findings refer to; supplies page count and page sizes
    #[arg(short, long, env = "PDF_REVIEW_DOCUMENT")]
    pub document: Option<PathBuf>,

    /// Where `e` writes the cleaned report when no path is given
    #[arg(
        short,
        long,
        env = "PDF_REVIEW_OUTPUT",
        default_value = "validated_report.csv"
    )]
    pub output: PathBuf,

    /// Print page views and the document map as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Settings the session loop needs after startup.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub output: PathBuf,
    pub json: bool,
}

impl From<&Args> for SessionConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: args.output.clone(),
            json: args.json,
        }
    }
}
