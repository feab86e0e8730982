use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::normalize;
use crate::page::Page;
use crate::payload::Payload;
use crate::resource::{Resource, Transformer, payload_kind};

type MapperFn = dyn Fn(Payload) -> Payload + Send + Sync;

/// Transformer over a list of items. An optional mapper shapes each item;
/// pagination links and meta, when set, switch the output to the
/// `{data, links, meta}` form and disable the wrapper.
#[derive(Clone)]
pub struct Collection {
    items: Vec<Payload>,
    mapper: Option<Arc<MapperFn>>,
    meta: Map<String, Value>,
    pagination_links: Option<Map<String, Value>>,
    pagination_meta: Option<Map<String, Value>>,
    wrapper: Option<String>,
}

impl Collection {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Payload>,
    {
        Collection {
            items: items.into_iter().map(Into::into).collect(),
            mapper: None,
            meta: Map::new(),
            pagination_links: None,
            pagination_meta: None,
            wrapper: Some("data".to_owned()),
        }
    }

    /// Builds a collection over a finished pagination result. The page's
    /// `data` must be a JSON array.
    pub fn from_page(page: &Page) -> Result<Self> {
        let Value::Array(items) = page.data() else {
            return Err(Error::InvalidInput(
                "pagination data must be a list".to_owned(),
            ));
        };
        Ok(Self::new(items.iter().cloned().map(Payload::Value))
            .with_pagination(page.links().clone(), page.meta().clone()))
    }

    /// Accepts either a finished page or a plain paginator record
    /// `{items?, total?, page?, perPage?, pages?}`. A record yields a plain
    /// collection whose meta carries the four counters.
    pub fn from_paginator(paginator: impl Into<Payload>) -> Result<Self> {
        match paginator.into() {
            Payload::Page(page) => Self::from_page(&page),
            Payload::Map(entries) => Self::from_record(entries),
            Payload::Value(Value::Object(fields)) => Self::from_record(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Payload::Value(v)))
                    .collect(),
            ),
            other => Err(Error::InvalidInput(format!(
                "paginator must be a pagination result or a record, got {}",
                payload_kind(&other)
            ))),
        }
    }

    fn from_record(entries: Vec<(String, Payload)>) -> Result<Self> {
        let mut items = None;
        let mut total = None;
        let mut page = None;
        let mut per_page = None;
        let mut pages = None;

        for (key, value) in entries {
            match key.as_str() {
                "items" => items = Some(value),
                "total" => total = Some(record_count(&key, &value)?),
                "page" => page = Some(record_count(&key, &value)?),
                "perPage" => per_page = Some(record_count(&key, &value)?),
                "pages" => pages = Some(record_count(&key, &value)?),
                _ => {}
            }
        }

        let items = match items {
            None => Vec::new(),
            Some(Payload::List(items)) => items,
            Some(Payload::Value(Value::Array(items))) => {
                items.into_iter().map(Payload::Value).collect()
            }
            Some(other) => {
                return Err(Error::InvalidInput(format!(
                    "paginator items must be a list, got {}",
                    payload_kind(&other)
                )));
            }
        };

        let mut meta = Map::new();
        meta.insert("total".to_owned(), Value::from(total.unwrap_or(0)));
        meta.insert("page".to_owned(), Value::from(page.unwrap_or(1)));
        meta.insert("perPage".to_owned(), Value::from(per_page.unwrap_or(0)));
        meta.insert("pages".to_owned(), Value::from(pages.unwrap_or(1)));

        Ok(Self::new(items).with_meta(meta))
    }

    /// Installs the per-item mapper.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Payload) -> Payload + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.mapper = Some(Arc::new(f));
        next
    }

    /// Constructs one resource per item through `ctor`.
    pub fn collects<F>(&self, ctor: F) -> Self
    where
        F: Fn(Payload) -> Resource + Send + Sync + 'static,
    {
        self.map(move |item| Payload::Resource(ctor(item)))
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

    pub fn with_pagination(&self, links: Map<String, Value>, meta: Map<String, Value>) -> Self {
        let mut next = self.clone();
        next.pagination_links = Some(links);
        next.pagination_meta = Some(meta);
        next.wrapper = None;
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

    fn map_item(&self, item: Payload) -> Payload {
        let mapped = match &self.mapper {
            Some(f) => f(item),
            None => item,
        };
        match mapped {
            Payload::Resource(resource) => resource.to_payload(),
            Payload::Collection(collection) => collection.to_payload(),
            Payload::Page(page) => Payload::Value(page.to_value()),
            other => other,
        }
    }
}

fn record_count(key: &str, value: &Payload) -> Result<i64> {
    if let Payload::Value(Value::Number(n)) = value {
        if let Some(n) = n.as_i64() {
            return Ok(n);
        }
    }
    Err(Error::InvalidInput(format!(
        "paginator {key} must be an integer, got {}",
        payload_kind(value)
    )))
}

fn strip_missing(payload: Payload) -> Payload {
    match payload {
        Payload::List(items) => Payload::List(
            items
                .into_iter()
                .filter(|item| !item.is_missing())
                .map(strip_missing)
                .collect(),
        ),
        Payload::Map(entries) => Payload::Map(
            entries
                .into_iter()
                .filter(|(_, value)| !value.is_missing())
                .map(|(key, value)| (key, strip_missing(value)))
                .collect(),
        ),
        other => other,
    }
}

impl Transformer for Collection {
    fn to_payload(&self) -> Payload {
        let mut items = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let mapped = self.map_item(item.clone());
            if mapped.is_missing() {
                continue;
            }
            items.push(strip_missing(mapped));
        }

        if self.pagination_links.is_some() || self.pagination_meta.is_some() {
            let links = self.pagination_links.clone().unwrap_or_default();
            Payload::Map(vec![
                ("data".to_owned(), Payload::List(items)),
                ("links".to_owned(), Payload::Value(Value::Object(links))),
                ("meta".to_owned(), Payload::Value(Value::Object(self.meta()))),
            ])
        } else {
            Payload::List(items)
        }
    }

    /// Pagination meta overlaid by the explicit meta, explicit wins.
    fn meta(&self) -> Map<String, Value> {
        match &self.pagination_meta {
            Some(pagination) => normalize::replace(pagination.clone(), self.meta.clone()),
            None => self.meta.clone(),
        }
    }

    fn wrapper(&self) -> Option<&str> {
        self.wrapper.as_deref()
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        normalize::standalone(self.to_payload()).serialize(serializer)
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("items", &self.items)
            .field("mapper", &self.mapper.as_ref().map(|_| ".."))
            .field("meta", &self.meta)
            .field("pagination_links", &self.pagination_links)
            .field("pagination_meta", &self.pagination_meta)
            .field("wrapper", &self.wrapper)
            .finish()
    }
}
