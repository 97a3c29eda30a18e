//! Tokenization for template engine
//!
//! Provides O(n) tokenization using a state machine driven by the configured
//! [`Syntax`] delimiters.

use crate::template::syntax::Syntax;

/// Token classification
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// `<<key>>` or `<<nested.key>>`
    Placeholder { key: String },

    /// `<<each items |var|>>` or `<<if key>>`
    BlockStart { keyword: String, args: String },

    /// `<</each>>` or `<</if>>`
    BlockEnd { keyword: String },
}

/// Keywords that open a block
pub(crate) const BLOCK_KEYWORDS: [&str; 2] = ["each", "if"];

/// Classify the text between delimiters
///
/// - `each items |var|` → BlockStart
/// - `if key` → BlockStart
/// - `/each`, `/if` → BlockEnd
/// - anything else → Placeholder
pub(crate) fn classify_content(content: &str) -> TokenKind {
    let trimmed = content.trim();

    for keyword in BLOCK_KEYWORDS {
        if let Some(rest) = trimmed.strip_prefix(keyword) {
            if rest.starts_with(char::is_whitespace) {
                return TokenKind::BlockStart {
                    keyword: keyword.to_string(),
                    args: rest.trim().to_string(),
                };
            }
        }
    }

    if let Some(rest) = trimmed.strip_prefix('/') {
        TokenKind::BlockEnd {
            keyword: rest.trim().to_string(),
        }
    } else {
        TokenKind::Placeholder {
            key: trimmed.to_string(),
        }
    }
}

/// A single delimited token with position and classification
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    /// Token classification
    pub kind: TokenKind,
    /// Absolute byte position of the open delimiter in the template
    pub start: usize,
    /// Total length in bytes including both delimiters
    pub length: usize,
    /// Number of backslashes before the open delimiter
    /// Odd count = escaped (literal), even = real (processed)
    pub backslash_count: usize,
    /// Line number where token ends (for error messages)
    pub line: usize,
}

impl Token {
    /// Check if this token is escaped (odd backslash count)
    pub fn is_escaped(&self) -> bool {
        self.backslash_count % 2 == 1
    }
}

/// Tokenization state machine
///
/// ```text
/// Normal ──open──> InToken ──close──> [Yield Token] → Normal
///   │                 │
///   │ (other byte)    │ (other byte)
///   └──> Normal       └──> InToken
///
/// Unclosed open delimiter → stream ends without a token
/// ```
///
/// Position only ever moves forward.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScanState {
    /// Scanning regular text, counting consecutive backslashes
    Normal { backslash_count: usize },

    /// Inside a tag, scanning for the close delimiter
    InToken {
        /// Byte position of the open delimiter
        start: usize,
        /// Byte position where token content starts
        content_start: usize,
        /// Backslash count before the open delimiter
        backslash_count: usize,
    },
}

/// Iterator over tokens in a template string
pub(crate) struct TokenStream<'a> {
    bytes: &'a [u8],
    open: &'a [u8],
    close: &'a [u8],
    pos: usize,
    state: ScanState,
    line: usize,
    /// Step count for O(n) timeout protection
    step_count: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(text: &'a str, syntax: &'a Syntax) -> Self {
        Self {
            bytes: text.as_bytes(),
            open: syntax.open.as_bytes(),
            close: syntax.close.as_bytes(),
            pos: 0,
            state: ScanState::Normal { backslash_count: 0 },
            line: 1,
            step_count: 0,
        }
    }

    #[inline]
    fn should_continue(&mut self, max_steps: usize) -> bool {
        self.step_count += 1;
        self.step_count <= max_steps && self.pos < self.bytes.len()
    }

    #[inline]
    fn at(&self, delimiter: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(delimiter)
    }

    /// Record step for O(n) performance verification in tests
    #[cfg(test)]
    #[inline]
    fn record_test_step() {
        test_counter::inc();
    }

    fn process_normal_state(&mut self, byte: u8, backslash_count: usize) {
        if self.at(self.open) {
            self.state = ScanState::InToken {
                start: self.pos,
                content_start: self.pos + self.open.len(),
                backslash_count,
            };
            self.pos += self.open.len();
        } else if byte == b'\\' {
            self.state = ScanState::Normal {
                backslash_count: backslash_count + 1,
            };
            self.pos += 1;
        } else {
            if byte == b'\n' {
                self.line += 1;
            }
            self.state = ScanState::Normal { backslash_count: 0 };
            self.pos += 1;
        }
    }

    fn process_in_token(
        &mut self,
        byte: u8,
        start: usize,
        content_start: usize,
        backslash_count: usize,
    ) -> Option<Token> {
        if self.at(self.close) {
            let content = std::str::from_utf8(&self.bytes[content_start..self.pos]).unwrap_or("");
            let end = self.pos + self.close.len();

            let token = Token {
                kind: classify_content(content),
                start,
                length: end - start,
                backslash_count,
                line: self.line,
            };

            self.state = ScanState::Normal { backslash_count: 0 };
            self.pos = end;
            Some(token)
        } else {
            if byte == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
            None
        }
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        const MAX_STEPS_MULTIPLIER: usize = 3;
        let max_steps = self.bytes.len().saturating_mul(MAX_STEPS_MULTIPLIER);

        loop {
            if !self.should_continue(max_steps) {
                return None;
            }

            let byte = self.bytes[self.pos];
            #[cfg(test)]
            Self::record_test_step();

            match self.state {
                ScanState::Normal { backslash_count } => {
                    self.process_normal_state(byte, backslash_count)
                }
                ScanState::InToken {
                    start,
                    content_start,
                    backslash_count,
                } => {
                    if let Some(token) =
                        self.process_in_token(byte, start, content_start, backslash_count)
                    {
                        return Some(token);
                    }
                }
            }
        }
    }
}
