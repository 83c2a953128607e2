use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::models::Entity;
use crate::views::{render, ListView, PageSource};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Output one record as `key: value` lines or pretty JSON
pub fn output_record(output_format: &OutputFormat, title: &str, record: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        OutputFormat::Text => {
            println!("{}", title);
            match record.as_object() {
                Some(fields) => {
                    for (key, value) in fields {
                        let shown = match value {
                            Value::String(s) => s.clone(),
                            Value::Null => "N/A".to_string(),
                            other => other.to_string(),
                        };
                        println!("  {:<20} {}", key, shown);
                    }
                }
                None => println!("  {}", record),
            }
        }
    }
    Ok(())
}

/// Output the visible rows of a list view plus its pager
pub fn output_list<S: PageSource>(output_format: &OutputFormat, view: &ListView<S>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let rows: Vec<&Entity> = view.rows();
            let mut response = json!({
                view.kind().list_key(): rows,
                "current_page": view.current_page(),
                "total_pages": view.total_pages(),
            });
            if let Some(err) = view.last_error() {
                response["error"] = json!(err);
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("{}", render::list_view(view));
        }
    }
    Ok(())
}

/// clap value parser for repeated `--field key=value` arguments
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Read one line from stdin with a prompt; used when a password is not given
pub fn prompt(label: &str) -> anyhow::Result<String> {
    use std::io::Write;

    eprint!("{}: ", label);
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_arguments_split_on_first_equals() {
        assert_eq!(parse_field("name=Asha").unwrap(), ("name".into(), "Asha".into()));
        assert_eq!(parse_field("about=a=b").unwrap(), ("about".into(), "a=b".into()));
        assert_eq!(parse_field("cost=").unwrap(), ("cost".into(), String::new()));
        assert!(parse_field("name").is_err());
        assert!(parse_field("=x").is_err());
    }
}
