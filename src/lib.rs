//! learnr-to-rmd: turn learnr tutorials into plain R Markdown documents
//!
//! A learnr tutorial carries content that only makes sense in the interactive
//! runtime: exercise chunks, their solutions, code checks and setup chunks
//! marked `remove_for_md=T`. This library strips that content in a single
//! line-by-line pass, replaces the front matter with a header for a static
//! `github_document`, and hands the result to an external renderer.
//!
//! # Quick Start
//!
//! ## Converting text
//!
//! ```rust
//! use learnr_to_rmd::{Converter, Result};
//!
//! fn main() -> Result<()> {
//!     let converter = Converter::new()?;
//!     let plain = converter.convert_str(
//!         "---\ntitle: Intro\n---\n```{r ex1, exercise=TRUE}\n1 + 1\n```\n",
//!     )?;
//!     assert!(plain.contains("```{r ex1}\n"));
//!     Ok(())
//! }
//! ```
//!
//! ## Converting and rendering files
//!
//! ```rust,no_run
//! use learnr_to_rmd::{convert_all, Converter, Result, RscriptRenderer};
//! use std::path::PathBuf;
//!
//! fn main() -> Result<()> {
//!     let converter = Converter::new()?;
//!     let renderer = RscriptRenderer::new();
//!     let inputs = vec![PathBuf::from("intro-learnr.Rmd")];
//!
//!     // writes intro-learnr-doc.Rmd, then renders it
//!     let converted = convert_all(&converter, &renderer, &inputs)?;
//!     println!("{}", converted[0].output.display());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: front matter rewriting, the fence rule table and the block
//!   state machine
//! - [`io`]: input resolution, output naming and the [`Renderer`] seam
//! - [`ops`]: per-file conversion and the sequential batch
//! - [`error`]: the library error type

// Public API exports
pub use error::{ConvertError, Result};

// Core types
pub use self::core::{
    BlockFilter, BlockState, ConvertStats, Converter, ConverterConfig, FenceAction, FenceRule,
    FenceRules, HeaderTemplate, LineOutcome,
};

// IO types
pub use io::{OutputFile, Renderer, RscriptRenderer, SkipRenderer};

// Operations
pub use ops::{convert_all, convert_file, ConvertedFile};

pub mod core;
pub mod error;
pub mod io;
pub mod ops;

/// Convenience functions for common operations
pub mod convenience {
    //! Convenience functions using the default learnr rules and header

    use crate::{ConvertedFile, Converter, Result};
    use std::path::Path;

    /// Convert a document held in memory
    pub fn convert_str(content: &str) -> Result<String> {
        Converter::new()?.convert_str(content)
    }

    /// Convert a file to its `-doc.Rmd` sibling without rendering it
    pub fn convert_path<P: AsRef<Path>>(path: P) -> Result<ConvertedFile> {
        crate::ops::convert_file(&Converter::new()?, path.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_end_to_end_workflow() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("tutorial-learnr.Rmd");
        let content = r#"---
title: Regression
output: learnr::tutorial
---
Fit a model.

```{r fit, exercise = T}
lm(y ~ x)
```

```{r fit-solution}
lm(y ~ x, data = d)
```
"#;
        fs::write(&input, content).unwrap();

        let converted = convenience::convert_path(&input).unwrap();
        assert_eq!(
            converted.output,
            temp_dir.path().join("tutorial-learnr-doc.Rmd")
        );

        let output = fs::read_to_string(&converted.output).unwrap();
        // everything after the setup chunk that closes the header
        let body = output.split_once("```\n").unwrap().1;
        assert!(output.starts_with("---\ntitle: Regression\noutput:\n"));
        assert_eq!(
            body,
            "Fit a model.\n\n```{r fit}\nlm(y ~ x)\n```\n\n"
        );
    }

    #[test]
    fn test_convenience_convert_str() {
        let output = convenience::convert_str("no front matter\n").unwrap();
        assert_eq!(output, "no front matter\n");
    }

    #[test]
    fn test_error_handling() {
        let err = convenience::convert_path("/nonexistent/file.Rmd").unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound { .. }));
    }
}
