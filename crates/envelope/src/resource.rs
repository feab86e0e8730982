use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::collection::Collection;
use crate::dropdown::{self, DropdownSource, Prepend};
use crate::error::{Error, Result};
use crate::normalize;
use crate::payload::Payload;

/// Attribute host wrapped by a resource. Presence probing is fixed per
/// variant: a JSON object answers by key existence, an application entity
/// through `relation_loaded`.
#[derive(Clone)]
pub enum Host {
    Value(Value),
    Entity(Arc<dyn Entity>),
}

/// Application-side attribute host. `relation_loaded` defaults to attribute
/// presence; implementors with lazy relations override it.
pub trait Entity: Send + Sync {
    fn attribute(&self, key: &str) -> Option<Value>;

    fn relation_loaded(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }
}

impl Host {
    pub fn entity<E: Entity + 'static>(entity: E) -> Self {
        Host::Entity(Arc::new(entity))
    }

    pub fn has(&self, key: &str) -> bool {
        match self {
            Host::Value(Value::Object(map)) => map.contains_key(key),
            Host::Value(_) => false,
            Host::Entity(entity) => entity.relation_loaded(key),
        }
    }

    /// `Some(Value::Null)` means present-but-null, `None` means absent.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Host::Value(Value::Object(map)) => map.get(key).cloned(),
            Host::Value(_) => None,
            Host::Entity(entity) => {
                if entity.relation_loaded(key) {
                    Some(entity.attribute(key).unwrap_or(Value::Null))
                } else {
                    None
                }
            }
        }
    }
}

impl From<Value> for Host {
    fn from(v: Value) -> Self {
        Host::Value(v)
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Host::Entity(_) => f.write_str("Entity(..)"),
        }
    }
}

type TransformFn = dyn Fn(&Resource) -> Payload + Send + Sync;

/// Single-item transformer. Wraps a host, an optional transform closure,
/// a wrapper key (default `"data"`) and a meta map. All mutators are
/// with-style and return a modified copy.
#[derive(Clone)]
pub struct Resource {
    host: Host,
    wrapper: Option<String>,
    transform: Option<Arc<TransformFn>>,
    meta: Map<String, Value>,
}

impl Resource {
    pub fn new(host: impl Into<Host>) -> Self {
        Resource {
            host: host.into(),
            wrapper: Some("data".to_owned()),
            transform: None,
            meta: Map::new(),
        }
    }

    /// Installs the shaping closure. The closure receives the resource so it
    /// can reach the host and the conditional helpers.
    pub fn transform<F>(&self, f: F) -> Self
    where
        F: Fn(&Resource) -> Payload + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.transform = Some(Arc::new(f));
        next
    }

    pub fn with_meta(&self, meta: Map<String, Value>) -> Self {
        let mut next = self.clone();
        next.meta = meta;
        next
    }

    pub fn with_wrapper(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.wrapper = Some(name.into());
        next
    }

    pub fn without_wrapper(&self) -> Self {
        let mut next = self.clone();
        next.wrapper = None;
        next
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Host attribute, `Value::Null` when absent.
    pub fn attr(&self, key: &str) -> Value {
        self.host.get(key).unwrap_or(Value::Null)
    }

    pub fn when(&self, condition: bool, value: impl Into<Payload>) -> Payload {
        if condition {
            value.into()
        } else {
            Payload::Missing
        }
    }

    pub fn when_or(
        &self,
        condition: bool,
        value: impl Into<Payload>,
        default: impl Into<Payload>,
    ) -> Payload {
        if condition {
            value.into()
        } else {
            default.into()
        }
    }

    pub fn when_with<F>(&self, condition: bool, f: F) -> Payload
    where
        F: FnOnce(&Host) -> Payload,
    {
        if condition {
            f(&self.host)
        } else {
            Payload::Missing
        }
    }

    /// Raw attribute when the relation is present (even when null),
    /// `Missing` otherwise.
    pub fn when_loaded(&self, relation: &str) -> Payload {
        match self.host.get(relation) {
            Some(value) => Payload::Value(value),
            None => Payload::Missing,
        }
    }

    pub fn when_loaded_with<F>(&self, relation: &str, f: F) -> Payload
    where
        F: FnOnce(Value, &Host) -> Payload,
    {
        self.present_value(relation, f, Payload::Missing)
    }

    pub fn when_loaded_or<F>(&self, relation: &str, f: F, default: impl Into<Payload>) -> Payload
    where
        F: FnOnce(Value, &Host) -> Payload,
    {
        self.present_value(relation, f, default.into())
    }

    /// Counted aggregate lookup under `snake_case(name) + "_count"`.
    pub fn when_counted(&self, name: &str) -> Payload {
        self.when_loaded(&count_attribute(name))
    }

    pub fn when_counted_with<F>(&self, name: &str, f: F) -> Payload
    where
        F: FnOnce(Value, &Host) -> Payload,
    {
        self.present_value(&count_attribute(name), f, Payload::Missing)
    }

    pub fn when_counted_or<F>(&self, name: &str, f: F, default: impl Into<Payload>) -> Payload
    where
        F: FnOnce(Value, &Host) -> Payload,
    {
        self.present_value(&count_attribute(name), f, default.into())
    }

    fn present_value<F>(&self, key: &str, f: F, default: Payload) -> Payload
    where
        F: FnOnce(Value, &Host) -> Payload,
    {
        match self.host.get(key) {
            None => default,
            Some(Value::Null) => Payload::Value(Value::Null),
            Some(value) => f(value, &self.host),
        }
    }

    /// Builds a collection that constructs one resource per item. A `Page`
    /// input carries its links and meta over as pagination fields.
    pub fn collection<P, F>(items: P, ctor: F) -> Result<Collection>
    where
        P: Into<Payload>,
        F: Fn(Payload) -> Resource + Send + Sync + 'static,
    {
        match items.into() {
            Payload::Page(page) => Ok(Collection::from_page(&page)?.collects(ctor)),
            Payload::List(items) => Ok(Collection::new(items).collects(ctor)),
            Payload::Value(Value::Array(items)) => {
                Ok(Collection::new(items.into_iter().map(Payload::Value)).collects(ctor))
            }
            other => Err(Error::InvalidInput(format!(
                "collection input must be a list or a pagination result, got {}",
                payload_kind(&other)
            ))),
        }
    }

    /// Renders a dropdown-capable source as `{value, label}` options.
    pub fn dropdown(source: &dyn DropdownSource, prepend: Prepend) -> Result<Vec<Value>> {
        dropdown::dropdown(source, prepend)
    }
}

pub(crate) fn payload_kind(payload: &Payload) -> &'static str {
    match payload {
        Payload::Missing => "a missing sentinel",
        Payload::Value(Value::Null) => "null",
        Payload::Value(Value::Bool(_)) => "a boolean",
        Payload::Value(Value::Number(_)) => "a number",
        Payload::Value(Value::String(_)) => "a string",
        Payload::Value(Value::Array(_)) => "an array",
        Payload::Value(Value::Object(_)) => "an object",
        Payload::List(_) => "a list",
        Payload::Map(_) => "a map",
        Payload::Resource(_) => "a resource",
        Payload::Collection(_) => "a collection",
        Payload::Page(_) => "a pagination result",
    }
}

fn count_attribute(name: &str) -> String {
    let mut attr = snake_case(name);
    attr.push_str("_count");
    attr
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_word = false;
    for ch in name.chars() {
        if ch.is_uppercase() && prev_word {
            out.push('_');
        }
        out.extend(ch.to_lowercase());
        prev_word = ch.is_alphanumeric() || ch == '_';
    }
    out
}

/// Normalizer seam shared by `Resource` and `Collection`.
pub trait Transformer {
    fn to_payload(&self) -> Payload;
    fn meta(&self) -> Map<String, Value>;
    fn wrapper(&self) -> Option<&str>;
}

impl Transformer for Resource {
    /// Transform output; without a transform a JSON host passes through
    /// unchanged and an entity host yields null.
    fn to_payload(&self) -> Payload {
        match &self.transform {
            Some(f) => f(self),
            None => match &self.host {
                Host::Value(v) => Payload::Value(v.clone()),
                Host::Entity(_) => Payload::Value(Value::Null),
            },
        }
    }

    fn meta(&self) -> Map<String, Value> {
        self.meta.clone()
    }

    fn wrapper(&self) -> Option<&str> {
        self.wrapper.as_deref()
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        if let Host::Value(Value::Null) = self.host {
            return Value::Null.serialize(serializer);
        }
        normalize::standalone(self.to_payload()).serialize(serializer)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("host", &self.host)
            .field("wrapper", &self.wrapper)
            .field("transform", &self.transform.as_ref().map(|_| ".."))
            .field("meta", &self.meta)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::snake_case;

    #[test]
    fn snake_case_splits_camel_words() {
        assert_eq!(snake_case("blogPosts"), "blog_posts");
        assert_eq!(snake_case("comments"), "comments");
        assert_eq!(snake_case("Comments"), "comments");
        assert_eq!(snake_case("v2Items"), "v2_items");
    }
}
