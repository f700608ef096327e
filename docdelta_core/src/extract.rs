//! Line scanner that pulls documentation comment blocks out of file text.

use tracing::debug;

use crate::{Config, DocBlock};

/// Scans text for blocks delimited by a start and an end marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockExtractor {
    start_marker: String,
    end_marker: String,
}

impl Default for BlockExtractor {
    fn default() -> Self {
        Self::new("/**", "*/")
    }
}

impl BlockExtractor {
    /// Create an extractor for the given markers.
    pub fn new(start_marker: impl Into<String>, end_marker: impl Into<String>) -> Self {
        Self {
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
        }
    }

    /// Create an extractor using the markers from `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.start_marker, &config.end_marker)
    }

    /// Return the blocks of `content` in the order they appear.
    ///
    /// Markers are matched against trimmed lines: a block opens on a line
    /// starting with the start marker and closes on the first line (possibly
    /// the same one) ending with the end marker. Blocks do not nest, and a
    /// block left open at end of input is dropped. `path` is only used for
    /// diagnostics.
    #[must_use]
    pub fn extract(&self, content: &str, path: &str) -> Vec<DocBlock> {
        let lines: Vec<&str> = content.lines().collect();
        let mut blocks = Vec::new();
        let mut open: Option<usize> = None;

        for (index, line) in lines.iter().enumerate() {
            let trimmed = line.trim();

            if open.is_none() && trimmed.starts_with(&self.start_marker) {
                open = Some(index);
            }

            if let Some(start) = open {
                if trimmed.ends_with(&self.end_marker) {
                    blocks.push(DocBlock::new(
                        lines[start..=index].join("\n"),
                        line_number(start),
                        line_number(index),
                    ));
                    open = None;
                }
            }
        }

        if let Some(start) = open {
            debug!(
                file = path,
                line = line_number(start),
                "dropping unterminated documentation block"
            );
        }

        debug!(file = path, blocks = blocks.len(), "extracted documentation blocks");
        blocks
    }
}

fn line_number(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}
