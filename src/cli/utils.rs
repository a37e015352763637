use serde_json::{Map, Value};

use crate::cli::OutputFormat;

fn print_json(body: Map<String, Value>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&Value::Object(body))?);
    Ok(())
}

/// Report a finished command. In JSON mode the fields of `data` sit next to `message`.
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    if output_format == OutputFormat::Text {
        println!("✓ {}", message);
        return Ok(());
    }

    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(true));
    body.insert("message".into(), message.into());
    if let Some(Value::Object(fields)) = data {
        body.extend(fields);
    }
    print_json(body)
}

pub fn output_error(
    output_format: OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    if output_format == OutputFormat::Text {
        eprintln!("Error: {}", message);
        return Ok(());
    }

    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(false));
    body.insert("error".into(), message.into());
    if let Some(code) = error_code {
        body.insert("error_code".into(), code.into());
    }
    print_json(body)
}
