//! Shared test helpers for template engine tests

use crate::template::engine::TemplateContext;
use crate::value::{Record, Value};

/// Create a simple test context with basic scalar values
pub(super) fn simple_context() -> TemplateContext {
    let data = Record::new()
        .with("title", "My Title")
        .with("count", 42i64)
        .with("price", Value::Float(9.99))
        .with("enabled", true)
        .with("empty", "");
    TemplateContext::new(data)
}

/// Create a nested test context with sequences and mappings
pub(super) fn nested_context() -> TemplateContext {
    let data = Record::new().with(
        "resume",
        Record::new()
            .with("name", "Jane Smith")
            .with("phone", "+61 400 000 000")
            .with(
                "projects",
                vec![
                    Record::new()
                        .with("title", "Scanner")
                        .with("description", "Port scanner"),
                    Record::new()
                        .with("title", "Vault")
                        .with("description", "Secret store"),
                ],
            )
            .with("achievements", Vec::<Value>::new()),
    );
    TemplateContext::new(data)
}
