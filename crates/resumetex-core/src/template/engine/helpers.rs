//! Helper functions for template rendering

use crate::template::error::TemplateError;
use crate::value::{Record, Value};

use super::TemplateContext;

/// Stringify a value for template output
pub(crate) fn stringify_value(value: &Value, key: &str) -> Result<String, TemplateError> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Sequence(_) => Err(TemplateError::SequenceInPlaceholder {
            key: key.to_string(),
        }),
        Value::Mapping(_) => Err(TemplateError::MappingInPlaceholder {
            key: key.to_string(),
        }),
    }
}

/// Create a loop context with a variable binding
pub(crate) fn create_loop_context(base: &Record, var_name: &str, item: Value) -> TemplateContext {
    let mut data = base.clone();
    data.insert(var_name, item);
    TemplateContext::new(data)
}
