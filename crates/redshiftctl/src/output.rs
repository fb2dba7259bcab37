use anyhow::{Context, Result};
use comfy_table::Table;
use jpx_core::Runtime;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::OnceLock;

use crate::cli::OutputFormat;

/// Global JMESPath runtime with extended functions
static JMESPATH_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the JMESPath runtime with extended functions
pub fn get_jmespath_runtime() -> &'static Runtime {
    JMESPATH_RUNTIME.get_or_init(|| Runtime::builder().with_all_extensions().build())
}

/// Normalize backtick literals in JMESPath expressions.
///
/// JMESPath allows elided quotes in backtick literals, so `` `cluster` `` is
/// the same as `` `"cluster"` ``. The runtime only accepts JSON inside
/// backticks, so bare words are quoted here and valid JSON is left alone.
fn normalize_backtick_literals(query: &str) -> Cow<'_, str> {
    static BACKTICK_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(re) = BACKTICK_RE
        .get_or_init(|| Regex::new(r"`([^`\\]*(?:\\.[^`\\]*)*)`").ok())
        .as_ref()
    else {
        return Cow::Borrowed(query);
    };

    re.replace_all(query, |caps: &regex::Captures| {
        let content = &caps[1];
        let trimmed = content.trim();

        if serde_json::from_str::<Value>(trimmed).is_ok() {
            format!("`{}`", content)
        } else {
            let escaped = trimmed.replace('\\', "\\\\").replace('"', "\\\"");
            format!("`\"{}\"`", escaped)
        }
    })
}

/// Compile a JMESPath expression using the extended runtime.
pub fn compile_jmespath(
    query: &str,
) -> Result<jpx_core::Expression<'static>, jpx_core::JmespathError> {
    let normalized = normalize_backtick_literals(query);
    get_jmespath_runtime().compile(&normalized)
}

/// Apply an optional JMESPath query to a value
pub fn apply_query(value: Value, query: Option<&str>) -> Result<Value> {
    match query {
        Some(query_str) => {
            let expr = compile_jmespath(query_str)
                .with_context(|| format!("Invalid JMESPath expression: {}", query_str))?;
            Ok(expr.search(&value).context("JMESPath query failed")?)
        }
        None => Ok(value),
    }
}

/// Render `data` in the requested format, after the optional query
///
/// `Auto` renders as JSON.
pub fn render_output<T: Serialize>(
    data: T,
    format: OutputFormat,
    query: Option<&str>,
) -> Result<String> {
    let json_value = apply_query(serde_json::to_value(data)?, query)?;

    let rendered = match format {
        OutputFormat::Auto | OutputFormat::Json => serde_json::to_string_pretty(&json_value)?,
        OutputFormat::Yaml => serde_yaml::to_string(&json_value)?
            .trim_end()
            .to_string(),
        OutputFormat::Table => render_table(&json_value),
    };

    Ok(rendered)
}

pub fn print_output<T: Serialize>(
    data: T,
    format: OutputFormat,
    query: Option<&str>,
) -> Result<()> {
    println!("{}", render_output(data, format, query)?);
    Ok(())
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(arr) if !arr.is_empty() => {
            let mut table = Table::new();

            if let Value::Object(first) = &arr[0] {
                let headers: Vec<String> = first.keys().cloned().collect();
                table.set_header(&headers);

                for item in arr {
                    if let Value::Object(obj) = item {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| format_value(obj.get(h).unwrap_or(&Value::Null)))
                            .collect();
                        table.add_row(row);
                    }
                }
            } else {
                table.set_header(vec!["Value"]);
                for item in arr {
                    table.add_row(vec![format_value(item)]);
                }
            }

            table.to_string()
        }
        Value::Object(obj) => {
            let mut table = Table::new();
            table.set_header(vec!["Key", "Value"]);

            for (key, val) in obj {
                table.add_row(vec![key.clone(), format_value(val)]);
            }

            table.to_string()
        }
        _ => format_value(value),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_backtick_unquoted_string() {
        assert_eq!(
            normalize_backtick_literals(r#"[?SourceType==`cluster`]"#),
            r#"[?SourceType==`"cluster"`]"#
        );
    }

    #[test]
    fn test_normalize_backtick_json_literals_unchanged() {
        for query in [
            r#"[?SourceType==`"cluster"`]"#,
            r#"[?NumberOfNodes==`2`]"#,
            r#"[?LoggingEnabled==`true`]"#,
            r#"[?BucketName==`null`]"#,
            r#"`[1, 2, 3]`"#,
            r#"`{"Key": "team"}`"#,
        ] {
            assert_eq!(normalize_backtick_literals(query), query);
        }
    }

    #[test]
    fn test_normalize_multiple_backticks() {
        assert_eq!(
            normalize_backtick_literals(r#"[?Key==`team` && Value==`data`]"#),
            r#"[?Key==`"team"` && Value==`"data"`]"#
        );
    }

    #[test]
    fn test_query_with_elided_quotes() {
        let categories = json!([
            {"SourceType": "cluster", "Events": [{"EventId": "REDSHIFT-EVENT-2000"}]},
            {"SourceType": "cluster-snapshot", "Events": [{"EventId": "REDSHIFT-EVENT-3000"}]}
        ]);
        let result = apply_query(
            categories,
            Some("[?SourceType==`cluster`].Events[].EventId"),
        )
        .unwrap();
        assert_eq!(result, json!(["REDSHIFT-EVENT-2000"]));
    }

    #[test]
    fn test_invalid_query_is_an_error() {
        let err = apply_query(json!({}), Some("[?")).unwrap_err();
        assert!(err.to_string().contains("Invalid JMESPath expression"));
    }

    #[test]
    fn test_auto_renders_json() {
        let rendered =
            render_output(json!({"ClusterStatus": "rebooting"}), OutputFormat::Auto, None)
                .unwrap();
        assert_eq!(rendered, "{\n  \"ClusterStatus\": \"rebooting\"\n}");
    }

    #[test]
    fn test_yaml_output() {
        let rendered =
            render_output(json!({"LoggingEnabled": false}), OutputFormat::Yaml, None).unwrap();
        assert_eq!(rendered, "LoggingEnabled: false");
    }

    #[test]
    fn test_table_for_object_and_array() {
        let rendered = render_output(
            json!({"ClusterIdentifier": "analytics", "ClusterNodes": [1, 2]}),
            OutputFormat::Table,
            None,
        )
        .unwrap();
        assert!(rendered.contains("ClusterIdentifier"));
        assert!(rendered.contains("analytics"));
        assert!(rendered.contains("[2 items]"));

        let rendered = render_output(
            json!([{"Key": "team", "Value": "data"}, {"Key": "env", "Value": "prod"}]),
            OutputFormat::Table,
            None,
        )
        .unwrap();
        assert!(rendered.contains("team"));
        assert!(rendered.contains("prod"));
    }

    #[test]
    fn test_scalar_table_output() {
        assert_eq!(
            render_output(json!("analytics"), OutputFormat::Table, None).unwrap(),
            "analytics"
        );
    }
}
