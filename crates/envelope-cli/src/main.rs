use std::fs::File;
use std::io::{Read, stdin};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::{Map, Value};

#[derive(Parser, Debug)]
#[command(
    name = "envelope-cli",
    about = "Wraps a JSON document in a {data, meta, errors} envelope",
    version
)]
struct Args {
    /// Build an error envelope with this message (data becomes null)
    #[arg(long)]
    error: Option<String>,

    /// Field error as NAME=MESSAGE, repeatable (error envelopes only)
    #[arg(long = "field", value_name = "NAME=MESSAGE")]
    fields: Vec<String>,

    /// Machine-readable error code (error envelopes only)
    #[arg(long)]
    code: Option<String>,

    /// Meta entry as KEY=VALUE; the value is parsed as JSON, falling back
    /// to a plain string. Repeatable
    #[arg(long = "meta", value_name = "KEY=VALUE")]
    meta: Vec<String>,

    /// Pretty-print the envelope
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Input JSON file (defaults to stdin; unused for error envelopes)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let meta = parse_meta(&args.meta)?;

    let response = match &args.error {
        Some(message) => {
            let fields = parse_fields(&args.fields)?;
            envelope::ApiResponse::error(message.clone(), fields, meta, args.code.as_deref())
        }
        None => {
            let mut buf = String::new();
            match &args.input {
                Some(path) => {
                    let mut f = File::open(path)
                        .with_context(|| format!("cannot open {}", path.display()))?;
                    f.read_to_string(&mut buf)?;
                }
                None => {
                    stdin().read_to_string(&mut buf)?;
                }
            }
            let data: Value = serde_json::from_str(&buf).context("input is not valid JSON")?;
            envelope::ApiResponse::success(data, meta)
        }
    };

    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&response.to_value())?);
    } else {
        println!("{}", response.to_json()?);
    }

    Ok(())
}

fn parse_meta(entries: &[String]) -> Result<Map<String, Value>> {
    let mut meta = Map::new();
    for entry in entries {
        let (key, raw) = split_pair(entry)?;
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
        meta.insert(key.to_owned(), value);
    }
    Ok(meta)
}

fn parse_fields(entries: &[String]) -> Result<Map<String, Value>> {
    let mut fields: Map<String, Value> = Map::new();
    for entry in entries {
        let (name, message) = split_pair(entry)?;
        let message = Value::String(message.to_owned());
        match fields.get_mut(name) {
            Some(Value::Array(messages)) => messages.push(message),
            _ => {
                fields.insert(name.to_owned(), Value::Array(vec![message]));
            }
        }
    }
    Ok(fields)
}

fn split_pair(entry: &str) -> Result<(&str, &str)> {
    match entry.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => bail!("expected KEY=VALUE, got {entry:?}"),
    }
}
