//! File-level operations: convert documents on disk and render them

use crate::core::{ConvertStats, Converter};
use crate::error::Result;
use crate::io::{open_input, output_path_for, OutputFile, Renderer};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// A document converted on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub stats: ConvertStats,
}

/// Convert one document to its `-doc.Rmd` sibling.
///
/// The output is complete and closed when this returns.
pub fn convert_file(converter: &Converter, input: &Path) -> Result<ConvertedFile> {
    let output_path = output_path_for(input)?;
    debug!("Processing file: {}", input.display());

    let reader = open_input(input)?;
    let mut output = OutputFile::create(&output_path)?;
    output.copy_permissions_from(input)?;
    let stats = converter.convert(reader, output.writer())?;
    let output_path = output.persist()?;

    info!(
        "Converted {} -> {} ({} regions dropped, {} exercises stripped)",
        input.display(),
        output_path.display(),
        stats.regions_dropped,
        stats.exercises_stripped
    );
    if stats.title.is_none() {
        debug!("No title found in {}", input.display());
    }

    Ok(ConvertedFile {
        input: input.to_path_buf(),
        output: output_path,
        stats,
    })
}

/// Convert and render each document in order.
///
/// Stops at the first failure; documents after it are not attempted and
/// outputs already written are left in place.
pub fn convert_all(
    converter: &Converter,
    renderer: &dyn Renderer,
    inputs: &[PathBuf],
) -> Result<Vec<ConvertedFile>> {
    let mut converted = Vec::with_capacity(inputs.len());
    for input in inputs {
        let file = convert_file(converter, input)?;
        renderer.render(&file.output)?;
        converted.push(file);
    }
    Ok(converted)
}
