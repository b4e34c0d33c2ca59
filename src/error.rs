//! Error types for the learnr-to-rmd library
//!
//! Every failure is fatal for the run: the caller stops at the first error and
//! reports it. Malformed front matter is deliberately absent from this list,
//! it only ever produces a best-effort document.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum ConvertError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fence rule patterns that fail to compile
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Input file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Input file name does not end in `.Rmd`
    #[error("Unsupported input: {path} (expected an .Rmd file)")]
    UnsupportedInput { path: PathBuf },

    /// The renderer program could not be started
    #[error("Failed to run renderer {program}: {source}")]
    RenderSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The renderer ran but reported failure
    #[error("Rendering {path} failed: {status}")]
    RenderFailed { path: PathBuf, status: ExitStatus },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new unsupported input error
    pub fn unsupported_input(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedInput { path: path.into() }
    }

    /// Create a new render failure error
    pub fn render_failed(path: impl Into<PathBuf>, status: ExitStatus) -> Self {
        Self::RenderFailed {
            path: path.into(),
            status,
        }
    }

    /// Whether the error came from the external renderer rather than from
    /// converting the document itself
    pub fn is_render_error(&self) -> bool {
        matches!(self, Self::RenderSpawn { .. } | Self::RenderFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConvertError::file_not_found("lesson.Rmd");
        assert_eq!(err.to_string(), "File not found: lesson.Rmd");

        let err = ConvertError::unsupported_input("notes.md");
        assert_eq!(
            err.to_string(),
            "Unsupported input: notes.md (expected an .Rmd file)"
        );
    }

    #[test]
    fn test_render_error_classification() {
        let spawn = ConvertError::RenderSpawn {
            program: "Rscript".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(spawn.is_render_error());
        assert!(spawn.to_string().starts_with("Failed to run renderer Rscript"));

        let io = ConvertError::from(std::io::Error::other("disk full"));
        assert!(!io.is_render_error());
        assert!(!ConvertError::file_not_found("a.Rmd").is_render_error());
    }

    #[test]
    fn test_regex_error_conversion() {
        let err: ConvertError = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(err, ConvertError::Regex(_)));
    }
}
