// src/template.rs

//! Command and message templating.
//!
//! Templates use lodash-style interpolation delimiters:
//! `<%= path %>`, where `path` is a dotted lookup into the render context
//! (`file`, `file.path`, `error.code`, any `template_data` key; numeric
//! segments index into arrays). There is no expression evaluation beyond
//! path lookup, and an unresolved path is an error rather than a silent
//! empty substitution.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::errors::{Result, ShellpipeError};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<%=(.*?)%>").expect("placeholder pattern is valid"));

/// Values visible to one rendering operation.
///
/// Lookup is layered; later layers win, so the engine-provided values always
/// shadow the caller's `template_data`:
///
/// 1. `template_data` from the options,
/// 2. `file` — the current item (`Value::Null` in standalone-task runs,
///    rendering as the empty string),
/// 3. `command` and `error` — present only while rendering a failure
///    message.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    template_data: &'a serde_json::Map<String, Value>,
    file: &'a Value,
    failure: Option<FailureValues>,
}

#[derive(Debug, Clone)]
struct FailureValues {
    command: Value,
    error: Value,
}

impl<'a> RenderContext<'a> {
    pub fn new(template_data: &'a serde_json::Map<String, Value>, file: &'a Value) -> Self {
        Self {
            template_data,
            file,
            failure: None,
        }
    }

    /// Derive the context used to render `error_message` after `command`
    /// exited with `code`.
    pub fn with_failure(&self, command: &str, code: i32) -> RenderContext<'a> {
        RenderContext {
            template_data: self.template_data,
            file: self.file,
            failure: Some(FailureValues {
                command: Value::String(command.to_string()),
                error: serde_json::json!({ "code": code }),
            }),
        }
    }

    /// Resolve a dotted path. `None` means the path does not exist in this
    /// context, including traversal through a scalar.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.root(segments.next()?)?;

        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        Some(current)
    }

    fn root(&self, name: &str) -> Option<&Value> {
        if let Some(failure) = &self.failure {
            match name {
                "command" => return Some(&failure.command),
                "error" => return Some(&failure.error),
                _ => {}
            }
        }

        match name {
            "file" => Some(self.file),
            other => self.template_data.get(other),
        }
    }
}

/// Render `template` against `context`, replacing every `<%= path %>`
/// occurrence with the string form of the looked-up value.
///
/// A template without placeholders is returned unchanged. An empty or
/// unresolved path fails with a [`Template`](ShellpipeError::Template) error
/// naming the path.
pub fn render(template: &str, context: &RenderContext<'_>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last_end = 0;

    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let path = inner.as_str().trim();
        if path.is_empty() {
            return Err(ShellpipeError::Template(format!(
                "empty placeholder in {template:?}"
            )));
        }

        let value = context.lookup(path).ok_or_else(|| {
            ShellpipeError::Template(format!(
                "unresolved placeholder `{path}` in {template:?}"
            ))
        })?;

        out.push_str(&template[last_end..whole.start()]);
        out.push_str(&value_to_string(value));
        last_end = whole.end();
    }

    out.push_str(&template[last_end..]);
    Ok(out)
}

/// String form of a context value: strings unquoted, null empty, everything
/// else (numbers, bools, arrays, objects) via its compact JSON display.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
