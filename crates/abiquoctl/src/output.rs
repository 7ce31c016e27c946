use crate::cli::OutputFormat;
use anyhow::Result;
use comfy_table::Table;
use serde::Serialize;
use serde_json::Value;

/// Print full transfer objects as JSON/YAML, or one summary row per item as a table
pub fn print_resources<T, R, F>(items: &[T], format: OutputFormat, summary: F) -> Result<()>
where
    T: Serialize,
    R: Serialize,
    F: Fn(&T) -> R,
{
    match format {
        OutputFormat::Json | OutputFormat::Yaml => print_output(items, format),
        OutputFormat::Auto | OutputFormat::Table => {
            let rows: Vec<R> = items.iter().map(summary).collect();
            print_output(&rows, OutputFormat::Table)
        }
    }
}

pub fn print_output<T: Serialize + ?Sized>(data: &T, format: OutputFormat) -> Result<()> {
    let json_value = serde_json::to_value(data)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json_value)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&json_value)?);
        }
        OutputFormat::Auto | OutputFormat::Table => {
            println!("{}", render_table(&json_value));
        }
    }

    Ok(())
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(arr) if arr.is_empty() => "No results".to_string(),
        Value::Array(arr) => {
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
        Value::Null => "-".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
