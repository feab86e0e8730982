use std::mem;

use serde_json::{Map, Value};

use crate::payload::Payload;
use crate::resource::Transformer;

/// Recursive payload-to-JSON pass. `None` is the missing sentinel in
/// normalized space; containers drop `None` children, a `None` root stays
/// `None`. Carries the ambient meta so a root transformer can hoist its
/// own meta into it.
pub(crate) struct Normalizer {
    meta: Map<String, Value>,
}

impl Normalizer {
    pub(crate) fn new(meta: Map<String, Value>) -> Self {
        Normalizer { meta }
    }

    pub(crate) fn into_meta(self) -> Map<String, Value> {
        self.meta
    }

    pub(crate) fn normalize(&mut self, payload: Payload, wrap_resource: bool) -> Option<Value> {
        match payload {
            Payload::Missing => None,
            Payload::Page(page) => Some(page.to_value()),
            Payload::Resource(resource) => self.transformed(&resource, wrap_resource),
            Payload::Collection(collection) => self.transformed(&collection, wrap_resource),
            Payload::List(items) => Some(Value::Array(
                items
                    .into_iter()
                    .filter_map(|item| self.normalize(item, true))
                    .collect(),
            )),
            Payload::Map(entries) => {
                let mut out = Map::new();
                for (key, value) in entries {
                    if let Some(value) = self.normalize(value, true) {
                        out.insert(key, value);
                    }
                }
                Some(Value::Object(out))
            }
            Payload::Value(value) => Some(value),
        }
    }

    fn transformed(&mut self, transformer: &dyn Transformer, wrap: bool) -> Option<Value> {
        let payload = self.normalize(transformer.to_payload(), true);

        if !wrap {
            // Root datum. Its meta is hoisted under the ambient meta,
            // ambient values win, transformer keys keep first position.
            self.meta = replace(transformer.meta(), mem::take(&mut self.meta));
            return payload;
        }

        let payload = payload?;
        match transformer.wrapper() {
            Some(wrapper) if !wrapper.is_empty() => {
                let mut out = Map::new();
                out.insert(wrapper.to_owned(), payload);
                Some(Value::Object(out))
            }
            _ => Some(payload),
        }
    }
}

/// Nested-position normalization with a throwaway meta, for `Serialize`
/// impls. A missing result renders as null.
pub(crate) fn standalone(payload: Payload) -> Value {
    Normalizer::new(Map::new())
        .normalize(payload, true)
        .unwrap_or(Value::Null)
}

/// Key-wise overlay, overlay values win, base keys keep their position.
pub(crate) fn replace(
    mut base: Map<String, Value>,
    overlay: Map<String, Value>,
) -> Map<String, Value> {
    for (key, value) in overlay {
        base.insert(key, value);
    }
    base
}
