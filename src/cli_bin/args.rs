//! Command-line argument definitions

use clap::Parser;
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser, Debug)]
#[command(
    name = "learnr-to-rmd",
    version,
    about = "Convert learnr tutorials into plain R Markdown documents",
    long_about = "Strips exercise solutions, code checks and remove_for_md chunks from \
                  learnr .Rmd files, replaces the front matter with a github_document \
                  header, and renders the result with rmarkdown. foo.Rmd becomes \
                  foo-doc.Rmd; foo-learnr.Rmd becomes foo-learnr-doc.Rmd."
)]
pub struct Cli {
    /// .Rmd files to convert, or directories to search for them
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Write the converted documents without rendering them
    #[arg(long)]
    pub no_render: bool,

    /// Program used to render converted documents
    #[arg(long, value_name = "PROGRAM", default_value = "Rscript")]
    pub rscript: String,

    /// Directory knitr writes figures to
    #[arg(long, value_name = "DIR", default_value = "img/")]
    pub fig_path: String,

    /// Disable the table of contents
    #[arg(long)]
    pub no_toc: bool,

    /// Also drop chunks whose label ends in -SUFFIX (repeatable)
    #[arg(long = "drop-suffix", value_name = "SUFFIX")]
    pub drop_suffixes: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Default log level selected by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}
