// tests/template_rendering.rs

use serde_json::{Map, Value, json};
use shellpipe::config::DEFAULT_ERROR_MESSAGE;
use shellpipe::errors::ShellpipeError;
use shellpipe::template::{RenderContext, render};

fn data(entries: Value) -> Map<String, Value> {
    match entries {
        Value::Object(map) => map,
        other => panic!("test data must be a JSON object, got: {other:?}"),
    }
}

#[test]
fn plain_text_renders_unchanged() {
    let template_data = Map::new();
    let ctx = RenderContext::new(&template_data, &Value::Null);

    let out = render("echo hello world", &ctx).unwrap();
    assert_eq!(out, "echo hello world");
}

#[test]
fn substitutes_template_data_keys() {
    let template_data = data(json!({ "outfile": "dist/app.js" }));
    let ctx = RenderContext::new(&template_data, &Value::Null);

    let out = render("cp build.js <%= outfile %>", &ctx).unwrap();
    assert_eq!(out, "cp build.js dist/app.js");
}

#[test]
fn whitespace_inside_delimiters_is_ignored() {
    let template_data = data(json!({ "name": "x" }));
    let ctx = RenderContext::new(&template_data, &Value::Null);

    assert_eq!(render("<%=name%>", &ctx).unwrap(), "x");
    assert_eq!(render("<%=   name   %>", &ctx).unwrap(), "x");
    assert_eq!(render("<%= \n name \n %>", &ctx).unwrap(), "x");
}

#[test]
fn multiple_placeholders_keep_surrounding_text() {
    let template_data = data(json!({ "a": "1", "b": "2" }));
    let ctx = RenderContext::new(&template_data, &Value::Null);

    let out = render("x <%= a %> y <%= b %> z", &ctx).unwrap();
    assert_eq!(out, "x 1 y 2 z");
}

#[test]
fn file_renders_the_whole_item() {
    let template_data = Map::new();
    let item = json!("src/main.rs");
    let ctx = RenderContext::new(&template_data, &item);

    let out = render("wc -l <%= file %>", &ctx).unwrap();
    assert_eq!(out, "wc -l src/main.rs");
}

#[test]
fn dotted_paths_walk_objects_and_arrays() {
    let template_data = Map::new();
    let item = json!({
        "path": "a.txt",
        "meta": { "size": 42 },
        "parts": ["first", "second"],
    });
    let ctx = RenderContext::new(&template_data, &item);

    assert_eq!(render("<%= file.path %>", &ctx).unwrap(), "a.txt");
    assert_eq!(render("<%= file.meta.size %>", &ctx).unwrap(), "42");
    assert_eq!(render("<%= file.parts.1 %>", &ctx).unwrap(), "second");
}

#[test]
fn null_item_renders_empty() {
    let template_data = Map::new();
    let ctx = RenderContext::new(&template_data, &Value::Null);

    let out = render("run <%= file %> done", &ctx).unwrap();
    assert_eq!(out, "run  done");
}

#[test]
fn scalar_values_render_without_quotes() {
    let template_data = data(json!({
        "s": "plain",
        "n": 7,
        "f": 1.5,
        "b": true,
    }));
    let ctx = RenderContext::new(&template_data, &Value::Null);

    assert_eq!(render("<%= s %>", &ctx).unwrap(), "plain");
    assert_eq!(render("<%= n %>", &ctx).unwrap(), "7");
    assert_eq!(render("<%= f %>", &ctx).unwrap(), "1.5");
    assert_eq!(render("<%= b %>", &ctx).unwrap(), "true");
}

#[test]
fn unresolved_path_is_a_template_error() {
    let template_data = Map::new();
    let ctx = RenderContext::new(&template_data, &Value::Null);

    match render("echo <%= missing %>", &ctx) {
        Err(ShellpipeError::Template(msg)) => {
            assert!(msg.contains("missing"), "message should name the path: {msg}");
        }
        Err(e) => panic!("Expected Template error, got: {e:?}"),
        Ok(out) => panic!("Expected error, got Ok({out:?})"),
    }
}

#[test]
fn traversing_through_a_scalar_is_unresolved() {
    let template_data = Map::new();
    let item = json!("just-a-string");
    let ctx = RenderContext::new(&template_data, &item);

    match render("<%= file.path %>", &ctx) {
        Err(ShellpipeError::Template(msg)) => {
            assert!(msg.contains("file.path"), "message should name the path: {msg}");
        }
        Err(e) => panic!("Expected Template error, got: {e:?}"),
        Ok(out) => panic!("Expected error, got Ok({out:?})"),
    }
}

#[test]
fn empty_placeholder_is_a_template_error() {
    let template_data = Map::new();
    let ctx = RenderContext::new(&template_data, &Value::Null);

    match render("echo <%=  %>", &ctx) {
        Err(ShellpipeError::Template(_)) => {}
        Err(e) => panic!("Expected Template error, got: {e:?}"),
        Ok(out) => panic!("Expected error, got Ok({out:?})"),
    }
}

#[test]
fn failure_context_exposes_command_and_code() {
    let template_data = Map::new();
    let ctx = RenderContext::new(&template_data, &Value::Null);
    let failure = ctx.with_failure("make all", 2);

    let out = render("<%= command %> -> <%= error.code %>", &failure).unwrap();
    assert_eq!(out, "make all -> 2");
}

#[test]
fn default_error_message_renders_command_and_code() {
    let template_data = Map::new();
    let ctx = RenderContext::new(&template_data, &Value::Null);
    let failure = ctx.with_failure("exit 3", 3);

    let out = render(DEFAULT_ERROR_MESSAGE, &failure).unwrap();
    assert_eq!(out, "Command `exit 3` failed with exit code 3");
}

#[test]
fn engine_values_shadow_template_data() {
    // User-supplied keys named like the engine's own must not leak into
    // rendered output where the engine value is expected.
    let template_data = data(json!({
        "command": "user-command",
        "file": "user-file",
    }));
    let item = json!("real-item");
    let ctx = RenderContext::new(&template_data, &item);

    assert_eq!(render("<%= file %>", &ctx).unwrap(), "real-item");

    let failure = ctx.with_failure("real-command", 1);
    assert_eq!(render("<%= command %>", &failure).unwrap(), "real-command");
}

#[test]
fn template_data_command_is_visible_outside_failure_rendering() {
    // Outside a failure context there is no engine `command`, so the user's
    // own key resolves.
    let template_data = data(json!({ "command": "user-command" }));
    let ctx = RenderContext::new(&template_data, &Value::Null);

    assert_eq!(render("<%= command %>", &ctx).unwrap(), "user-command");
}

#[test]
fn lookup_reports_missing_paths() {
    let template_data = data(json!({ "present": { "inner": 1 } }));
    let item = Value::Null;
    let ctx = RenderContext::new(&template_data, &item);

    assert!(ctx.lookup("present.inner").is_some());
    assert!(ctx.lookup("present.other").is_none());
    assert!(ctx.lookup("absent").is_none());
}
