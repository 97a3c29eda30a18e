//! LaTeX escaping for structured data
//!
//! Escaping happens exactly once, between input collection and rendering.
//! The output of [`escape_record`] is an [`EscapedRecord`], the only shape the
//! renderer accepts. There is intentionally no way to feed an
//! [`EscapedRecord`] back into the escaper: the transformation is not
//! idempotent (every backslash it introduces would be escaped again).

use crate::value::{Record, Value};
use tracing::debug;

/// Replacement table, in application order
///
/// Each source character is looked up once. Text produced by a replacement is
/// never examined by a later entry.
pub const REPLACEMENTS: [(char, &str); 10] = [
    ('&', r"\&"),
    ('%', r"\%"),
    ('$', r"\$"),
    ('#', r"\#"),
    ('_', r"\_"),
    ('{', r"\{"),
    ('}', r"\}"),
    ('~', r"\textasciitilde{}"),
    ('^', r"\textasciicircum{}"),
    ('\\', r"\textbackslash{}"),
];

/// Fields carried verbatim into the rendered document
///
/// `linkedin` and `github` are hyperlink targets for `\href{}`; `email_url` is
/// the address placed inside `\url{}`. Both macros take their argument raw.
pub const RAW_FIELDS: [&str; 3] = ["email_url", "linkedin", "github"];

/// Escape a single text value
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match REPLACEMENTS.iter().find(|(special, _)| *special == c) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(c),
        }
    }

    out
}

/// Escape every text leaf of a value, preserving its shape
///
/// Mapping keys are left untouched.
pub fn escape_value(value: &Value) -> Value {
    match value {
        Value::Text(s) => Value::Text(escape_text(s)),
        Value::Sequence(items) => Value::Sequence(items.iter().map(escape_value).collect()),
        Value::Mapping(record) => Value::Mapping(
            record
                .iter()
                .map(|(k, v)| (k.clone(), escape_value(v)))
                .collect(),
        ),
        Value::Bool(_) | Value::Integer(_) | Value::Float(_) => value.clone(),
    }
}

/// A [`Record`] whose text leaves have been escaped exactly once
///
/// Only [`escape_record`] constructs this type.
#[derive(Debug, Clone, PartialEq)]
pub struct EscapedRecord {
    inner: Record,
}

impl EscapedRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    pub fn resolve(&self, path: &str) -> Option<&Value> {
        self.inner.resolve(path)
    }

    pub fn as_record(&self) -> &Record {
        &self.inner
    }
}

/// Escape a whole record, keeping [`RAW_FIELDS`] verbatim
pub fn escape_record(record: Record) -> EscapedRecord {
    let mut escaped: Record = record
        .iter()
        .map(|(k, v)| (k.clone(), escape_value(v)))
        .collect();

    for field in RAW_FIELDS {
        if let Some(raw) = record.get(field) {
            debug!(field, "keeping raw field unescaped");
            escaped.insert(field, raw.clone());
        }
    }

    EscapedRecord { inner: escaped }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECIALS: [char; 10] = ['&', '%', '$', '#', '_', '{', '}', '~', '^', '\\'];

    /// Remove every escape sequence the table can produce, leaving only
    /// characters that were not part of an escape.
    fn strip_escape_sequences(text: &str) -> String {
        let mut stripped = text.to_string();
        // Longest sequences first so `\{` inside `\textasciitilde{}` is not split
        for seq in [r"\textbackslash{}", r"\textasciitilde{}", r"\textasciicircum{}"] {
            stripped = stripped.replace(seq, "");
        }
        for (_, seq) in REPLACEMENTS.iter().take(7) {
            stripped = stripped.replace(seq, "");
        }
        stripped
    }

    #[test]
    fn test_escape_each_special_character() {
        assert_eq!(escape_text("&"), r"\&");
        assert_eq!(escape_text("%"), r"\%");
        assert_eq!(escape_text("$"), r"\$");
        assert_eq!(escape_text("#"), r"\#");
        assert_eq!(escape_text("_"), r"\_");
        assert_eq!(escape_text("{"), r"\{");
        assert_eq!(escape_text("}"), r"\}");
        assert_eq!(escape_text("~"), r"\textasciitilde{}");
        assert_eq!(escape_text("^"), r"\textasciicircum{}");
        assert_eq!(escape_text("\\"), r"\textbackslash{}");
    }

    #[test]
    fn test_escape_company_name() {
        assert_eq!(escape_text("A & B_Corp"), r"A \& B\_Corp");
    }

    #[test]
    fn test_inserted_backslashes_not_reprocessed() {
        // `&` becomes `\&`; the backslash must not turn into \textbackslash{}
        assert_eq!(escape_text("R&D"), r"R\&D");
        // braces introduced by `~` must not be escaped again
        assert_eq!(escape_text("a~b"), r"a\textasciitilde{}b");
        // a literal backslash next to a brace
        assert_eq!(escape_text(r"\{"), r"\textbackslash{}\{");
    }

    #[test]
    fn test_no_unescaped_specials_remain() {
        let input = r"100% of $5 #1 under_score {x} ~ ^ \ & done";
        let escaped = escape_text(input);
        let leftovers = strip_escape_sequences(&escaped);

        for c in SPECIALS {
            assert!(
                !leftovers.contains(c),
                "unescaped '{}' left in {:?} (leftovers {:?})",
                c,
                escaped,
                leftovers
            );
        }
    }

    #[test]
    fn test_plain_and_unicode_text_unchanged() {
        assert_eq!(escape_text("2025–2027, Clayton"), "2025–2027, Clayton");
        assert_eq!(escape_text(""), "");
    }

    #[test]
    fn test_escaping_twice_is_not_idempotent() {
        let once = escape_text("A & B");
        let twice = escape_text(&once);
        assert_ne!(once, twice);
        assert_eq!(twice, r"A \textbackslash{}\& B");
    }

    #[test]
    fn test_escape_value_preserves_structure() {
        let entries = Value::from(vec![
            Value::from(
                Record::new()
                    .with("title", "Tool_1")
                    .with("description", "50% faster"),
            ),
            Value::from(
                Record::new()
                    .with("title", "Tool#2")
                    .with("description", "plain"),
            ),
        ]);

        let escaped = escape_value(&entries);
        let items = escaped.as_sequence().unwrap();
        assert_eq!(items.len(), 2);

        let first = items[0].as_mapping().unwrap();
        assert_eq!(
            first.keys().collect::<Vec<_>>(),
            vec!["description", "title"]
        );
        assert_eq!(first.get("title"), Some(&Value::from(r"Tool\_1")));
        assert_eq!(first.get("description"), Some(&Value::from(r"50\% faster")));
        assert_eq!(
            items[1].as_mapping().unwrap().get("title"),
            Some(&Value::from(r"Tool\#2"))
        );
    }

    #[test]
    fn test_mapping_keys_never_escaped() {
        let record = Record::new().with("odd_key", "x_y");
        let escaped = escape_value(&Value::from(record));
        let mapping = escaped.as_mapping().unwrap();
        assert!(mapping.contains_key("odd_key"));
        assert_eq!(mapping.get("odd_key"), Some(&Value::from(r"x\_y")));
    }

    #[test]
    fn test_non_text_leaves_pass_through() {
        assert_eq!(escape_value(&Value::Bool(true)), Value::Bool(true));
        assert_eq!(escape_value(&Value::Integer(42)), Value::Integer(42));
        assert_eq!(escape_value(&Value::Float(1.5)), Value::Float(1.5));
    }

    #[test]
    fn test_raw_fields_bit_identical() {
        let record = Record::new()
            .with("name", "A & B_Corp")
            .with("email", "first_last@example.com")
            .with("email_url", "first_last@example.com")
            .with("linkedin", "https://linkedin.com/in/a_b#top")
            .with("github", "https://github.com/a_b?tab=repos&x=1");

        let escaped = escape_record(record.clone());

        for field in RAW_FIELDS {
            assert_eq!(escaped.get(field), record.get(field), "field {}", field);
        }
        assert_eq!(escaped.get("name"), Some(&Value::from(r"A \& B\_Corp")));
        assert_eq!(
            escaped.get("email"),
            Some(&Value::from(r"first\_last@example.com"))
        );
    }

    #[test]
    fn test_raw_field_only_exempt_at_top_level() {
        let record = Record::new().with("links", Record::new().with("github", "a_b"));
        let escaped = escape_record(record);
        assert_eq!(
            escaped.resolve("links.github"),
            Some(&Value::from(r"a\_b"))
        );
    }
}
