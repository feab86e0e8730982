use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Capability of producing a dropdown option list. The output must be a
/// JSON array of `{value, label}` objects; `dropdown()` validates it.
pub trait DropdownSource {
    fn dropdown(&self) -> Value;
}

/// Raw JSON claims the capability by passing itself through, which keeps
/// "source without a valid option list" expressible at the call site.
impl DropdownSource for Value {
    fn dropdown(&self) -> Value {
        self.clone()
    }
}

/// Adapter over prebuilt `(value, label)` pairs.
#[derive(Debug, Clone, Default)]
pub struct DropdownOptions {
    options: Vec<(Value, String)>,
}

impl DropdownOptions {
    pub fn new<I, V, L>(options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<Value>,
        L: Into<String>,
    {
        DropdownOptions {
            options: options
                .into_iter()
                .map(|(v, l)| (v.into(), l.into()))
                .collect(),
        }
    }
}

impl DropdownSource for DropdownOptions {
    fn dropdown(&self) -> Value {
        Value::Array(
            self.options
                .iter()
                .map(|(value, label)| option_object(value.clone(), label.clone()))
                .collect(),
        )
    }
}

/// Row prepended ahead of the source options.
#[derive(Debug, Clone, Default)]
pub enum Prepend {
    #[default]
    All,
    None,
    Custom { value: Value, label: String },
}

/// Validates the source's option list and renders the final dropdown.
/// Every option must be an object with a string-or-number `value` and a
/// string `label`.
pub fn dropdown(source: &dyn DropdownSource, prepend: Prepend) -> Result<Vec<Value>> {
    let raw = source.dropdown();
    let Value::Array(entries) = raw else {
        return Err(Error::InvalidInput(
            "dropdown source did not produce an option list".to_owned(),
        ));
    };

    let mut out = Vec::with_capacity(entries.len() + 1);
    match prepend {
        Prepend::All => out.push(option_object(Value::String("all".to_owned()), "All".to_owned())),
        Prepend::Custom { value, label } => out.push(option_object(value, label)),
        Prepend::None => {}
    }

    for entry in entries {
        let Value::Object(fields) = entry else {
            return Err(Error::InvalidInput(
                "dropdown option must be an object".to_owned(),
            ));
        };
        let value = match fields.get("value") {
            Some(v @ (Value::String(_) | Value::Number(_))) => v.clone(),
            _ => {
                return Err(Error::InvalidInput(
                    "dropdown option value must be a string or a number".to_owned(),
                ));
            }
        };
        let label = match fields.get("label") {
            Some(Value::String(label)) => label.clone(),
            _ => {
                return Err(Error::InvalidInput(
                    "dropdown option label must be a string".to_owned(),
                ));
            }
        };
        out.push(option_object(value, label));
    }

    Ok(out)
}

fn option_object(value: Value, label: String) -> Value {
    let mut fields = Map::new();
    fields.insert("value".to_owned(), value);
    fields.insert("label".to_owned(), Value::String(label));
    Value::Object(fields)
}
