//! Block matching utilities (finding closing tags for each/if)

use super::tokenize::{TokenKind, TokenStream};
use crate::template::syntax::Syntax;

/// Find the closing tag matching an already-opened block
///
/// Returns (position, length) of the closing tag token, relative to `text`.
/// Nested blocks with the same keyword are skipped; escaped tags are ignored.
pub(crate) fn find_block_end(text: &str, keyword: &str, syntax: &Syntax) -> Option<(usize, usize)> {
    let mut depth = 0;

    for token in TokenStream::new(text, syntax) {
        if token.is_escaped() {
            continue;
        }

        match &token.kind {
            TokenKind::BlockStart { keyword: k, .. } if k == keyword => {
                depth += 1;
            }
            TokenKind::BlockEnd { keyword: k } if k == keyword => {
                if depth == 0 {
                    return Some((token.start, token.length));
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    None
}
