//! CLI module for the learnr-to-rmd command-line interface
//!
//! Argument parsing and the command handler that maps CLI flags onto the
//! library configuration.

pub mod args;
pub mod commands;
