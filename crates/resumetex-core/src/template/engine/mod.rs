//! Template engine implementation

mod blocks;
mod helpers;
mod tokenize;

use crate::escape::EscapedRecord;
use crate::template::error::TemplateError;
use crate::template::syntax::Syntax;
use crate::value::{Record, Value};
use std::time::{Duration, Instant};
use tracing::debug;

use blocks::find_block_end;
use helpers::{create_loop_context, stringify_value};
use tokenize::{TokenKind, classify_content};

/// Maximum duration for template rendering (malformed input protection)
const RENDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Check if rendering has exceeded the timeout
fn check_timeout(start: Instant) -> Result<(), TemplateError> {
    let elapsed = start.elapsed();
    if elapsed >= RENDER_TIMEOUT {
        return Err(TemplateError::Timeout {
            max_duration: RENDER_TIMEOUT,
            elapsed,
        });
    }
    Ok(())
}

/// Output text before a tag and half of the backslashes preceding it
///
/// Returns the line number after the emitted text.
fn process_text_and_backslashes(
    remaining: &str,
    tag_start: usize,
    output: &mut String,
    line: usize,
) -> usize {
    let backslash_count = count_backslashes_before(remaining, tag_start);
    let text_end = tag_start - backslash_count;

    let mut new_line = line;
    if text_end > 0 {
        let text = &remaining[..text_end];
        output.push_str(text);
        new_line += count_newlines(text);
    }

    for _ in 0..(backslash_count / 2) {
        output.push('\\');
    }

    new_line
}

/// Count backslashes immediately before a position
fn count_backslashes_before(text: &str, pos: usize) -> usize {
    text.as_bytes()[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
}

/// Check if a tag is escaped (odd number of backslashes)
fn is_escaped_tag(remaining: &str, tag_start: usize) -> bool {
    count_backslashes_before(remaining, tag_start) % 2 == 1
}

/// Parse each loop syntax: "items |item|" → (key, var_name)
fn parse_each_syntax(rest: &str, line: usize) -> Result<(&str, &str), TemplateError> {
    let pipe_pos = rest
        .find('|')
        .ok_or_else(|| TemplateError::MalformedSyntax {
            message: format!("Invalid each syntax: expected |var| in 'each {}'", rest),
            line,
        })?;

    let key = rest[..pipe_pos].trim();
    let var_end = rest[pipe_pos + 1..]
        .find('|')
        .ok_or_else(|| TemplateError::MalformedSyntax {
            message: format!("Invalid each syntax: unclosed |var| in 'each {}'", rest),
            line,
        })?;

    let var_name = rest[pipe_pos + 1..pipe_pos + 1 + var_end].trim();
    if key.is_empty() || var_name.is_empty() {
        return Err(TemplateError::MalformedSyntax {
            message: format!("Invalid each syntax: empty key or variable in 'each {}'", rest),
            line,
        });
    }
    Ok((key, var_name))
}

/// Resolve a sequence value from context
fn resolve_sequence<'a>(
    data: &'a Record,
    key: &str,
    line: usize,
) -> Result<&'a Vec<Value>, TemplateError> {
    let value = data.resolve(key).ok_or_else(|| TemplateError::UndefinedKey {
        key: key.to_string(),
        line,
    })?;

    value
        .as_sequence()
        .ok_or_else(|| TemplateError::MalformedSyntax {
            message: format!("Key '{}' is a {}, not a sequence", key, value.kind()),
            line,
        })
}

/// Count newlines in text
fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// A located tag: where it starts in the template and how long it is
struct Tag<'a> {
    /// Byte offset of the open delimiter
    pos: usize,
    /// Length including both delimiters
    len: usize,
    /// Trimmed content between delimiters
    expr: &'a str,
    line: usize,
}

/// Template context holding escaped data for rendering
#[derive(Debug, Clone)]
pub struct TemplateContext {
    data: Record,
}

impl TemplateContext {
    pub(crate) fn new(data: Record) -> Self {
        Self { data }
    }

    /// Create a context from escaped data
    ///
    /// This is the only public way to build a context, so nothing reaches the
    /// renderer without going through [`crate::escape::escape_record`].
    pub fn from_escaped(record: &EscapedRecord) -> Self {
        Self::new(record.as_record().clone())
    }

    /// Get the underlying data
    pub fn data(&self) -> &Record {
        &self.data
    }
}

/// Template engine for rendering templates with escaped data
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    syntax: Syntax,
}

impl TemplateEngine {
    /// Create a new template engine with the given delimiters
    ///
    /// Fails if the delimiters are empty, identical, or the open delimiter
    /// starts with a backslash.
    pub fn new(syntax: Syntax) -> Result<Self, TemplateError> {
        syntax
            .validate()
            .map_err(|reason| TemplateError::InvalidSyntax { reason })?;
        Ok(Self { syntax })
    }

    /// Render a template with the given context
    pub fn render(
        &self,
        template: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        debug!(bytes = template.len(), "rendering template");
        self.render_from(template, context, 1, Instant::now())
    }

    /// Render starting at `first_line`, sharing the caller's timeout budget
    fn render_from(
        &self,
        template: &str,
        context: &TemplateContext,
        first_line: usize,
        start: Instant,
    ) -> Result<String, TemplateError> {
        let open = self.syntax.open.as_str();
        let mut output = String::new();
        let mut line = first_line;
        let mut pos = 0;

        while pos < template.len() {
            check_timeout(start)?;
            let remaining = &template[pos..];

            let Some(tag_start) = remaining.find(open) else {
                output.push_str(remaining);
                break;
            };

            line = process_text_and_backslashes(remaining, tag_start, &mut output, line);
            let tag_pos = pos + tag_start;
            let tag = self.locate_tag(template, tag_pos, line)?;

            let consumed = if is_escaped_tag(remaining, tag_start) {
                output.push_str(&template[tag.pos..tag.pos + tag.len]);
                tag.len
            } else {
                self.process_tag(template, &tag, context, start, &mut output)?
            };

            line += count_newlines(&template[tag_pos..tag_pos + consumed]);
            pos = tag_pos + consumed;
        }

        Ok(output)
    }

    /// Find the close delimiter for the tag opening at `pos`
    fn locate_tag<'t>(
        &self,
        template: &'t str,
        pos: usize,
        line: usize,
    ) -> Result<Tag<'t>, TemplateError> {
        let open_len = self.syntax.open.len();
        let content_start = pos + open_len;
        let close = template[content_start..]
            .find(self.syntax.close.as_str())
            .ok_or_else(|| TemplateError::MalformedSyntax {
                message: format!("Unclosed tag: missing '{}'", self.syntax.close),
                line,
            })?;

        Ok(Tag {
            pos,
            len: open_len + close + self.syntax.close.len(),
            expr: template[content_start..content_start + close].trim(),
            line,
        })
    }

    /// Process an unescaped tag and return the number of bytes consumed
    fn process_tag(
        &self,
        template: &str,
        tag: &Tag,
        context: &TemplateContext,
        start: Instant,
        output: &mut String,
    ) -> Result<usize, TemplateError> {
        match classify_content(tag.expr) {
            TokenKind::BlockStart { keyword, args } if keyword == "each" => {
                self.process_each_block(template, tag, &args, context, start, output)
            }
            TokenKind::BlockStart { keyword, args } if keyword == "if" => {
                self.process_if_block(template, tag, &args, context, start, output)
            }
            TokenKind::BlockStart { keyword, .. } => Err(TemplateError::MalformedSyntax {
                message: format!("Unknown block '{}'", keyword),
                line: tag.line,
            }),
            TokenKind::BlockEnd { keyword } => Err(TemplateError::MalformedSyntax {
                message: format!(
                    "Unexpected '/{}' without matching '{}'",
                    keyword, keyword
                ),
                line: tag.line,
            }),
            TokenKind::Placeholder { key } => {
                self.process_placeholder(&key, context, output, tag.line)?;
                Ok(tag.len)
            }
        }
    }

    /// Locate the body of a block opened by `tag`
    ///
    /// Returns (body, bytes consumed including open and close tags).
    fn block_body<'t>(
        &self,
        template: &'t str,
        tag: &Tag,
        keyword: &str,
        args: &str,
    ) -> Result<(&'t str, usize), TemplateError> {
        let body_start = tag.pos + tag.len;
        let (body_len, end_len) = find_block_end(&template[body_start..], keyword, &self.syntax)
            .ok_or_else(|| TemplateError::MalformedSyntax {
                message: format!("Unclosed {} block for '{}'", keyword, args),
                line: tag.line,
            })?;

        Ok((
            &template[body_start..body_start + body_len],
            tag.len + body_len + end_len,
        ))
    }

    /// Render a repeated block once per sequence element, in order
    fn process_each_block(
        &self,
        template: &str,
        tag: &Tag,
        args: &str,
        context: &TemplateContext,
        start: Instant,
        output: &mut String,
    ) -> Result<usize, TemplateError> {
        let (key, var_name) = parse_each_syntax(args, tag.line)?;
        let (body, consumed) = self.block_body(template, tag, "each", key)?;
        let body_line = tag.line + count_newlines(&template[tag.pos..tag.pos + tag.len]);

        let items = resolve_sequence(context.data(), key, tag.line)?;
        debug!(key, count = items.len(), "expanding each block");
        for item in items {
            let loop_context = create_loop_context(context.data(), var_name, item.clone());
            let rendered = self.render_from(body, &loop_context, body_line, start)?;
            output.push_str(&rendered);
        }

        Ok(consumed)
    }

    /// Render a conditional block when its driving field is non-empty
    fn process_if_block(
        &self,
        template: &str,
        tag: &Tag,
        args: &str,
        context: &TemplateContext,
        start: Instant,
        output: &mut String,
    ) -> Result<usize, TemplateError> {
        let key = args.trim();
        let (body, consumed) = self.block_body(template, tag, "if", key)?;
        let body_line = tag.line + count_newlines(&template[tag.pos..tag.pos + tag.len]);

        let include = context
            .data()
            .resolve(key)
            .is_some_and(Value::is_truthy);
        debug!(key, include, "evaluating if block");

        if include {
            let rendered = self.render_from(body, context, body_line, start)?;
            output.push_str(&rendered);
        }

        Ok(consumed)
    }

    /// Process a regular placeholder (`<<key>>`)
    fn process_placeholder(
        &self,
        key: &str,
        context: &TemplateContext,
        output: &mut String,
        line: usize,
    ) -> Result<(), TemplateError> {
        let value = context
            .data()
            .resolve(key)
            .ok_or_else(|| TemplateError::UndefinedKey {
                key: key.to_string(),
                line,
            })?;

        output.push_str(&stringify_value(value, key)?);
        Ok(())
    }
}

/// Convenience function to render a template with the default syntax
pub fn render(template: &str, context: &TemplateContext) -> Result<String, TemplateError> {
    TemplateEngine::default().render(template, context)
}

#[cfg(test)]
mod tests;
