//! Brace-Delimited Block Scanner
//!
//! Walks a `{ ... }` region of a Gradle build script and reports where it
//! ends and which named sub-blocks it contains directly.

use crate::ConfigError;

/// Result of scanning a single brace-delimited block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockScan {
    /// Byte index of the closing brace that balances the block's opener.
    pub end: usize,
    /// Identifiers of direct child blocks, in order of appearance.
    pub children: Vec<String>,
}

/// Scanner position relative to the block being walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// At nesting depth 1, directly inside the outer block.
    ScanningOuter,
    /// Inside a child block (depth 2 or deeper).
    EnteringChild,
    /// The outer block's closing brace was reached.
    Balanced,
}

/// Scans one brace-delimited block of a build script.
pub struct BlockScanner<'a> {
    content: &'a str,
    keep_unnamed: bool,
}

impl<'a> BlockScanner<'a> {
    /// Create a scanner over `content`.
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            keep_unnamed: false,
        }
    }

    /// Record child blocks that have no identifier before their opening
    /// brace as empty strings instead of skipping them.
    pub fn keep_unnamed(mut self, keep: bool) -> Self {
        self.keep_unnamed = keep;
        self
    }

    /// Scan the block whose opening brace sits just before `start`.
    ///
    /// `start` must be the byte index immediately after the opening brace.
    /// Returns the index of the balancing closing brace together with the
    /// identifiers of all direct child blocks. Content that ends before the
    /// block is balanced is malformed.
    pub fn scan_block(&self, start: usize) -> Result<BlockScan, ConfigError> {
        let mut state = ScanState::ScanningOuter;
        let mut depth = 1usize;
        let mut children = Vec::new();
        let mut end = start;

        for (offset, ch) in self.content[start..].char_indices() {
            let pos = start + offset;
            match ch {
                '{' => {
                    depth += 1;
                    if depth == 2 {
                        state = ScanState::EnteringChild;
                        let ident = self.ident_before(pos);
                        if !ident.is_empty() || self.keep_unnamed {
                            children.push(ident);
                        }
                    }
                }
                '}' => {
                    depth -= 1;
                    if depth == 1 {
                        state = ScanState::ScanningOuter;
                    } else if depth == 0 {
                        state = ScanState::Balanced;
                        end = pos;
                        break;
                    }
                }
                _ => {}
            }
        }

        if state != ScanState::Balanced {
            return Err(ConfigError::Malformed(format!(
                "unbalanced braces in block starting at byte {}",
                start
            )));
        }

        Ok(BlockScan { end, children })
    }

    /// The word token immediately preceding `brace`, skipping whitespace.
    ///
    /// Collects the maximal run of word characters reading backward; an
    /// anonymous block yields the empty string.
    fn ident_before(&self, brace: usize) -> String {
        let head = self.content[..brace].trim_end();
        let token_start = head
            .char_indices()
            .rev()
            .take_while(|&(_, c)| is_word_char(c))
            .last()
            .map(|(i, _)| i)
            .unwrap_or_else(|| head.len());
        head[token_start..].to_string()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
