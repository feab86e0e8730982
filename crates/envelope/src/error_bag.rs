use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Error section of the envelope. Field entries are coerced to lists of
/// strings at construction time, so readers never meet mixed shapes.
#[derive(Debug, Clone)]
pub struct ErrorBag {
    message: String,
    fields: Map<String, Value>,
    code: Option<String>,
}

impl ErrorBag {
    pub fn new(
        message: impl Into<String>,
        fields: Map<String, Value>,
        code: Option<&str>,
    ) -> Self {
        ErrorBag {
            message: message.into(),
            fields: normalize_fields(fields),
            code: code.map(str::to_owned),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn has_errors(&self) -> bool {
        !self.message.is_empty() || !self.fields.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Messages for one field, empty when the field is absent.
    pub fn get(&self, field: &str) -> &[Value] {
        self.fields
            .get(field)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn all(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// `{message, fields}` plus `code` only when set.
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("message".to_owned(), Value::String(self.message.clone()));
        out.insert("fields".to_owned(), Value::Object(self.fields.clone()));
        if let Some(code) = &self.code {
            out.insert("code".to_owned(), Value::String(code.clone()));
        }
        Value::Object(out)
    }
}

fn normalize_fields(fields: Map<String, Value>) -> Map<String, Value> {
    let mut normalized = Map::new();
    for (field, messages) in fields {
        let messages = match messages {
            Value::Array(messages) => messages,
            other => vec![other],
        };
        normalized.insert(
            field,
            Value::Array(messages.into_iter().map(coerce_message).collect()),
        );
    }
    normalized
}

fn coerce_message(message: Value) -> Value {
    let text = match message {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    };
    Value::String(text)
}

impl Serialize for ErrorBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
