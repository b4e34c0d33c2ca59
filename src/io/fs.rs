//! Input resolution, output naming and output files

use crate::error::{ConvertError, Result};
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Suffix of convertible documents
pub const INPUT_SUFFIX: &str = ".Rmd";
/// Suffix replacing [`INPUT_SUFFIX`] in generated documents
pub const OUTPUT_SUFFIX: &str = "-doc.Rmd";

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

pub fn is_rmd(path: &Path) -> bool {
    file_name(path).is_some_and(|name| name.ends_with(INPUT_SUFFIX))
}

/// Whether the file looks like the output of a previous run
pub fn is_generated(path: &Path) -> bool {
    file_name(path).is_some_and(|name| name.ends_with(OUTPUT_SUFFIX))
}

/// Output path for an input document: `foo.Rmd` becomes `foo-doc.Rmd` next
/// to it.
///
/// A `-learnr` marker is kept, so `foo-learnr.Rmd` becomes
/// `foo-learnr-doc.Rmd` rather than `foo-doc.Rmd`.
pub fn output_path_for(input: &Path) -> Result<PathBuf> {
    let stem = file_name(input)
        .and_then(|name| name.strip_suffix(INPUT_SUFFIX))
        .ok_or_else(|| ConvertError::unsupported_input(input))?;
    Ok(input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}")))
}

/// Expand directories into the `.Rmd` files they contain, skipping generated
/// ones. Other paths are kept as given, in order; missing files are reported
/// when they are opened.
pub fn resolve_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| is_rmd(p) && !is_generated(p))
                .collect();
            found.sort();
            debug!("Found {} documents in {}", found.len(), path.display());
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    files
}

/// Open an input document for line-by-line reading
pub fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConvertError::file_not_found(path),
        _ => ConvertError::Io(e),
    })?;
    Ok(BufReader::new(file))
}

/// An output document written to a temporary file in its target directory
/// and moved into place by [`OutputFile::persist`]
pub struct OutputFile {
    path: PathBuf,
    temp: NamedTempFile,
}

impl OutputFile {
    pub fn create(path: &Path) -> Result<Self> {
        let parent_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let temp = NamedTempFile::new_in(parent_dir)?;
        Ok(Self {
            path: path.to_path_buf(),
            temp,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Give the output the permissions of `source`, typically the input
    /// document. A fresh temporary file is private to its owner.
    pub fn copy_permissions_from(&self, source: &Path) -> Result<()> {
        let permissions = std::fs::metadata(source)?.permissions();
        self.temp.as_file().set_permissions(permissions)?;
        Ok(())
    }

    pub fn writer(&mut self) -> impl Write + '_ {
        BufWriter::new(&mut self.temp)
    }

    /// Flush and move the file to its final path
    pub fn persist(mut self) -> Result<PathBuf> {
        self.temp.flush()?;
        self.temp.as_file().sync_all()?;
        self.temp
            .persist(&self.path)
            .map_err(|e| ConvertError::Io(e.error))?;
        Ok(self.path)
    }
}
