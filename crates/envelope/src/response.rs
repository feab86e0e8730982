use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::error_bag::ErrorBag;
use crate::normalize::{self, Normalizer};
use crate::payload::Payload;

/// The `{data, meta, errors}` envelope. Data is normalized once at
/// construction; a missing root keeps `data` at `None` and renders as null.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    data: Option<Value>,
    meta: Map<String, Value>,
    errors: Option<ErrorBag>,
}

impl ApiResponse {
    fn assemble(data: Payload, meta: Map<String, Value>, errors: Option<ErrorBag>) -> Self {
        let mut normalizer = Normalizer::new(meta);
        let data = normalizer.normalize(data, false);
        ApiResponse {
            data,
            meta: normalizer.into_meta(),
            errors,
        }
    }

    pub fn success(data: impl Into<Payload>, meta: Map<String, Value>) -> Self {
        Self::assemble(data.into(), meta, None)
    }

    pub fn error(
        message: impl Into<String>,
        fields: Map<String, Value>,
        meta: Map<String, Value>,
        code: Option<&str>,
    ) -> Self {
        Self::assemble(
            Payload::Value(Value::Null),
            meta,
            Some(ErrorBag::new(message, fields, code)),
        )
    }

    /// Replaces the data, re-normalizing against the current meta.
    pub fn with_data(&self, data: impl Into<Payload>) -> Self {
        Self::assemble(data.into(), self.meta.clone(), self.errors.clone())
    }

    pub fn with_meta(&self, meta: Map<String, Value>) -> Self {
        let mut next = self.clone();
        next.meta = meta;
        next
    }

    pub fn merge_meta(&self, meta: Map<String, Value>) -> Self {
        let mut next = self.clone();
        next.meta = normalize::replace(next.meta, meta);
        next
    }

    pub fn with_errors(&self, errors: Option<ErrorBag>) -> Self {
        let mut next = self.clone();
        next.errors = errors;
        next
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    pub fn errors(&self) -> Option<&ErrorBag> {
        self.errors.as_ref()
    }

    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("data".to_owned(), self.data.clone().unwrap_or(Value::Null));
        out.insert("meta".to_owned(), Value::Object(self.meta.clone()));
        out.insert(
            "errors".to_owned(),
            match &self.errors {
                Some(errors) => errors.to_value(),
                None => Value::Null,
            },
        );
        Value::Object(out)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_value())?)
    }
}

impl Serialize for ApiResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
