use serde::Serialize;
use serde_json::Value;

use crate::collection::Collection;
use crate::error::Result;
use crate::page::Page;
use crate::resource::Resource;

/// Input tree for the normalizer. `Missing` is the "omit this field"
/// sentinel and is distinct from `Value(Value::Null)`.
#[derive(Debug, Clone)]
pub enum Payload {
    Missing,
    Value(Value),
    List(Vec<Payload>),
    Map(Vec<(String, Payload)>),
    Resource(Resource),
    Collection(Collection),
    Page(Page),
}

impl Payload {
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Payload>,
    {
        Payload::List(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Payload>,
    {
        Payload::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Converts any serializable application value into a payload by way of
    /// `serde_json::to_value`.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Payload::Value(serde_json::to_value(value)?))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Payload::Missing)
    }
}

impl From<Value> for Payload {
    fn from(v: Value) -> Self {
        Payload::Value(v)
    }
}

impl From<Resource> for Payload {
    fn from(r: Resource) -> Self {
        Payload::Resource(r)
    }
}

impl From<Collection> for Payload {
    fn from(c: Collection) -> Self {
        Payload::Collection(c)
    }
}

impl From<Page> for Payload {
    fn from(p: Page) -> Self {
        Payload::Page(p)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Value(Value::String(s.to_owned()))
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Value(Value::String(s))
    }
}

impl From<bool> for Payload {
    fn from(b: bool) -> Self {
        Payload::Value(Value::Bool(b))
    }
}

impl From<i32> for Payload {
    fn from(n: i32) -> Self {
        Payload::Value(Value::from(n))
    }
}

impl From<i64> for Payload {
    fn from(n: i64) -> Self {
        Payload::Value(Value::from(n))
    }
}

impl From<u32> for Payload {
    fn from(n: u32) -> Self {
        Payload::Value(Value::from(n))
    }
}

impl From<u64> for Payload {
    fn from(n: u64) -> Self {
        Payload::Value(Value::from(n))
    }
}

impl From<f64> for Payload {
    fn from(n: f64) -> Self {
        Payload::Value(Value::from(n))
    }
}
