use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Finalized pagination output. The normalizer passes it through verbatim
/// and never recurses into `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    data: Value,
    links: Map<String, Value>,
    meta: Map<String, Value>,
}

impl Page {
    pub fn new(data: Value, links: Map<String, Value>, meta: Map<String, Value>) -> Self {
        Page { data, links, meta }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn links(&self) -> &Map<String, Value> {
        &self.links
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("data".to_owned(), self.data.clone());
        out.insert("links".to_owned(), Value::Object(self.links.clone()));
        out.insert("meta".to_owned(), Value::Object(self.meta.clone()));
        Value::Object(out)
    }
}

/// External paginator capability. Anything that can produce a finished
/// `Page` can feed `Collection::from_paginator`.
pub trait Paginated {
    fn to_page(&self) -> Page;
}

impl Paginated for Page {
    fn to_page(&self) -> Page {
        self.clone()
    }
}

impl Serialize for Page {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
