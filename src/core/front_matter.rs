//! Front matter extraction and replacement
//!
//! The learnr header is never copied. Its title is captured while the block is
//! read, and at the closing delimiter a regenerated header for a static
//! document is emitted in its place.

/// Front matter delimiter, compared against the trimmed line
pub const DELIMITER: &str = "---";

const TITLE_PREFIX: &str = "title: ";

/// The header written in place of the original front matter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
    /// rmarkdown output format
    pub output_format: String,
    /// Ask the output format for a table of contents
    pub toc: bool,
    /// Value of `editor_options.chunk_output_type`
    pub chunk_output_type: String,
    /// Directory knitr writes figures to
    pub fig_path: String,
}

impl Default for HeaderTemplate {
    fn default() -> Self {
        Self {
            output_format: "github_document".to_string(),
            toc: true,
            chunk_output_type: "console".to_string(),
            fig_path: "img/".to_string(),
        }
    }
}

impl HeaderTemplate {
    /// Render the header and its setup chunk. A missing title is written as
    /// an empty string.
    pub fn render(&self, title: Option<&str>) -> String {
        let title = title.unwrap_or("\"\"");
        let toc = if self.toc { "yes" } else { "no" };

        format!(
            "---\n\
             title: {title}\n\
             output:\n  \
             {format}:\n    \
             toc: {toc}\n\
             editor_options:\n  \
             chunk_output_type: {chunk}\n\
             ---\n\
             \n\
             ```{{r opts, echo = FALSE}}\n\
             knitr::opts_chunk$set(message=FALSE, warning=FALSE, fig.path = \"{fig}\")\n\
             #library(printr)\n\
             ```\n",
            format = self.output_format,
            chunk = self.chunk_output_type,
            fig = self.fig_path,
        )
    }
}

/// Position relative to the front matter block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontMatterState {
    /// No delimiter seen yet
    #[default]
    Preamble,
    /// Between the opening and closing delimiters
    Inside,
    /// Past the closing delimiter
    Done,
}

/// What the caller should do with a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Not front matter; hand it to the block filter
    Body,
    /// Part of the original front matter; drop it
    Consumed,
    /// Closing delimiter; write this header instead
    Header(String),
}

/// Tracks the front matter block of one document
#[derive(Debug)]
pub struct FrontMatterRewriter<'t> {
    template: &'t HeaderTemplate,
    state: FrontMatterState,
    title: Option<String>,
}

impl<'t> FrontMatterRewriter<'t> {
    pub fn new(template: &'t HeaderTemplate) -> Self {
        Self {
            template,
            state: FrontMatterState::Preamble,
            title: None,
        }
    }

    pub fn state(&self) -> FrontMatterState {
        self.state
    }

    /// The last `title:` seen inside the block
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn into_title(self) -> Option<String> {
        self.title
    }

    /// Feed one line, terminator included
    pub fn feed(&mut self, line: &str) -> Disposition {
        match self.state {
            FrontMatterState::Done => Disposition::Body,
            FrontMatterState::Preamble if line.trim() == DELIMITER => {
                self.state = FrontMatterState::Inside;
                Disposition::Consumed
            }
            FrontMatterState::Preamble => Disposition::Body,
            FrontMatterState::Inside if line.trim() == DELIMITER => {
                self.state = FrontMatterState::Done;
                Disposition::Header(self.template.render(self.title()))
            }
            FrontMatterState::Inside => {
                if let Some(title) = parse_title(line) {
                    self.title = Some(title.to_string());
                }
                Disposition::Consumed
            }
        }
    }
}

/// Value of a `title: ` line, untrimmed apart from the line terminator
pub fn parse_title(line: &str) -> Option<&str> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.strip_prefix(TITLE_PREFIX)
}
