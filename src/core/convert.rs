//! Single-pass conversion of a learnr document into a plain one

use crate::core::filter::{BlockFilter, LineOutcome};
use crate::core::front_matter::{Disposition, FrontMatterRewriter, HeaderTemplate};
use crate::core::rules::{FenceRule, FenceRules};
use crate::error::Result;
use log::debug;
use std::io::{BufRead, Write};

/// Configuration for the converter
#[derive(Debug, Clone, Default)]
pub struct ConverterConfig {
    /// Header written in place of the original front matter
    pub header: HeaderTemplate,
    /// Chunk label suffixes dropped in addition to `-solution` and
    /// `-code-check` (for example `hint`)
    pub extra_skip_suffixes: Vec<String>,
}

/// Counters collected while converting one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Title captured from the front matter
    pub title: Option<String>,
    pub lines_read: usize,
    pub lines_written: usize,
    /// Code regions removed, fences included
    pub regions_dropped: usize,
    /// Chunk openers whose exercise flag was stripped
    pub exercises_stripped: usize,
}

/// Converts learnr documents; reusable across documents
#[derive(Debug, Clone)]
pub struct Converter {
    rules: FenceRules,
    header: HeaderTemplate,
}

impl Converter {
    /// Create a converter with the learnr rules and the default header
    pub fn new() -> Result<Self> {
        Self::with_config(ConverterConfig::default())
    }

    /// Create a converter with custom configuration
    pub fn with_config(config: ConverterConfig) -> Result<Self> {
        let mut rules = FenceRules::learnr()?;
        for suffix in &config.extra_skip_suffixes {
            rules.push_skip(FenceRule::skip_suffix(suffix)?);
        }
        Ok(Self {
            rules,
            header: config.header,
        })
    }

    pub fn rules(&self) -> &FenceRules {
        &self.rules
    }

    pub fn header(&self) -> &HeaderTemplate {
        &self.header
    }

    /// Stream one document from `input` to `output`, line by line. CRLF
    /// terminators are written as LF so the output never mixes the two.
    pub fn convert<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut output: W,
    ) -> Result<ConvertStats> {
        let mut front_matter = FrontMatterRewriter::new(&self.header);
        let mut filter = BlockFilter::new(&self.rules);
        let mut stats = ConvertStats::default();
        let mut line = String::new();

        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if line.ends_with("\r\n") {
                line.truncate(line.len() - 2);
                line.push('\n');
            }
            stats.lines_read += 1;

            match front_matter.feed(&line) {
                Disposition::Consumed => {}
                Disposition::Header(header) => {
                    debug!("Replacing front matter (title: {:?})", front_matter.title());
                    output.write_all(header.as_bytes())?;
                    stats.lines_written += header.lines().count();
                }
                Disposition::Body => {
                    let outcome = filter.process(&line);
                    if let LineOutcome::Rewritten(rewritten) = &outcome {
                        debug!("Stripped exercise flag: {}", rewritten.trim_end());
                    }
                    if let Some(text) = outcome.as_str() {
                        output.write_all(text.as_bytes())?;
                        stats.lines_written += 1;
                    }
                }
            }
        }
        output.flush()?;

        stats.regions_dropped = filter.regions_dropped();
        stats.exercises_stripped = filter.lines_rewritten();
        stats.title = front_matter.into_title();
        Ok(stats)
    }

    /// Convert a document held in memory
    pub fn convert_str(&self, content: &str) -> Result<String> {
        let mut out = Vec::with_capacity(content.len());
        self.convert(content.as_bytes(), &mut out)?;
        // input was valid UTF-8 and every edit removes whole ASCII substrings
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LESSON: &str = r#"---
title: "Tidy data"
output: learnr::tutorial
runtime: shiny_prerendered
---

```{r setup, include=FALSE, remove_for_md=T}
library(learnr)
```

## Pivoting

```{r pivot, exercise=TRUE}
table1
```

```{r pivot-solution}
pivot_longer(table1)
```

```{r pivot-code-check}
grade_code()
```

Done.
"#;

    #[test]
    fn test_convert_lesson() {
        let converter = Converter::new().unwrap();
        let output = converter.convert_str(LESSON).unwrap();

        let expected = r#"---
title: "Tidy data"
output:
  github_document:
    toc: yes
editor_options:
  chunk_output_type: console
---

```{r opts, echo = FALSE}
knitr::opts_chunk$set(message=FALSE, warning=FALSE, fig.path = "img/")
#library(printr)
```


## Pivoting

```{r pivot}
table1
```



Done.
"#;
        assert_eq!(output, expected);
    }

    #[test]
    fn test_stats() {
        let converter = Converter::new().unwrap();
        let mut out = Vec::new();
        let stats = converter.convert(LESSON.as_bytes(), &mut out).unwrap();

        assert_eq!(stats.title.as_deref(), Some("\"Tidy data\""));
        assert_eq!(stats.lines_read, LESSON.lines().count());
        assert_eq!(
            stats.lines_written,
            String::from_utf8(out).unwrap().lines().count()
        );
        assert_eq!(stats.regions_dropped, 3);
        assert_eq!(stats.exercises_stripped, 1);
    }

    #[test]
    fn test_converter_is_reusable() {
        let converter = Converter::new().unwrap();
        // an unterminated skip region must not leak into the next document
        let first = converter
            .convert_str("---\ntitle: A\n---\n```{r a-solution}\nx\n")
            .unwrap();
        assert!(first.ends_with("```\n"));
        let second = converter
            .convert_str("---\ntitle: B\n---\nvisible\n")
            .unwrap();
        assert!(second.contains("title: B\n"));
        assert!(!second.contains("title: A"));
        assert!(second.ends_with("```\nvisible\n"));
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let converter = Converter::new().unwrap();
        let input = "---\r\ntitle: Windows\r\n---\r\nline one\r\nlast line";
        let output = converter.convert_str(input).unwrap();
        assert!(output.contains("title: Windows\n"));
        assert!(output.ends_with("```\nline one\nlast line"));
        assert!(!output.contains('\r'));
    }

    #[test]
    fn test_extra_skip_suffix() {
        let config = ConverterConfig {
            extra_skip_suffixes: vec!["hint".to_string()],
            ..Default::default()
        };
        let converter = Converter::with_config(config).unwrap();
        let output = converter
            .convert_str("---\ntitle: T\n---\n```{r ex-hint}\nhead(x)\n```\nafter\n")
            .unwrap();
        assert!(!output.contains("head(x)"));
        assert!(output.ends_with("```\nafter\n"));
    }

    #[test]
    fn test_empty_input() {
        let converter = Converter::new().unwrap();
        assert_eq!(converter.convert_str("").unwrap(), "");
    }
}
