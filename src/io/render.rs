//! Rendering converted documents with an external program

use crate::error::{ConvertError, Result};
use log::{debug, info};
use std::path::Path;
use std::process::Command;

/// Renders a converted document. Called only once the document is complete
/// on disk.
pub trait Renderer {
    fn render(&self, document: &Path) -> Result<()>;
}

/// Renders through `rmarkdown::render` in an `Rscript` process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RscriptRenderer {
    /// Program to run
    pub program: String,
    /// rmarkdown output format function
    pub output_format: String,
    /// Ask for a table of contents
    pub toc: bool,
}

impl Default for RscriptRenderer {
    fn default() -> Self {
        Self {
            program: "Rscript".to_string(),
            output_format: "github_document".to_string(),
            toc: true,
        }
    }
}

impl RscriptRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The R expression passed to `-e`
    pub fn expression(&self, document: &Path) -> String {
        let toc = if self.toc { "T" } else { "F" };
        format!(
            "library(rmarkdown); rmarkdown::render(\"{}\", rmarkdown::{}(toc={}, html_preview=F))",
            r_string_escape(&document.to_string_lossy()),
            self.output_format,
            toc
        )
    }

    fn command(&self, document: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-e").arg(self.expression(document));
        cmd
    }
}

impl Renderer for RscriptRenderer {
    fn render(&self, document: &Path) -> Result<()> {
        info!("Rendering {}", document.display());
        debug!("{} -e '{}'", self.program, self.expression(document));

        let status = self
            .command(document)
            .status()
            .map_err(|source| ConvertError::RenderSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ConvertError::render_failed(document, status));
        }
        Ok(())
    }
}

/// Leaves converted documents unrendered
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipRenderer;

impl Renderer for SkipRenderer {
    fn render(&self, document: &Path) -> Result<()> {
        debug!("Skipping render of {}", document.display());
        Ok(())
    }
}

fn r_string_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
