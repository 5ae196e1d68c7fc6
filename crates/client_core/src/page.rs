//! The host document as seen by the flows: input fields to read and regions to write.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    OrderUid,
    OrderJson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Order,
    OrderList,
    Publish,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Empty,
    Html(String),
    Text(String),
}

impl Content {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Html(body) | Self::Text(body) => body,
        }
    }
}

pub trait Page: Send + Sync {
    fn read_text(&self, field: InputField) -> String;
    fn write_content(&self, region: Region, content: Content);

    fn fill_field(&self, _field: InputField, _value: &str) {}

    /// Bring a region into view.
    fn reveal(&self, _region: Region) {}
}

#[derive(Default)]
struct MemoryPageInner {
    fields: HashMap<InputField, String>,
    regions: HashMap<Region, Content>,
    writes: Vec<(Region, Content)>,
    revealed: Vec<Region>,
}

#[derive(Default)]
pub struct MemoryPage {
    inner: Mutex<MemoryPageInner>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(self, field: InputField, value: impl Into<String>) -> Self {
        self.fill_field(field, &value.into());
        self
    }

    fn lock(&self) -> MutexGuard<'_, MemoryPageInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn content(&self, region: Region) -> Content {
        self.lock()
            .regions
            .get(&region)
            .cloned()
            .unwrap_or(Content::Empty)
    }

    pub fn history(&self, region: Region) -> Vec<Content> {
        self.lock()
            .writes
            .iter()
            .filter(|(written, _)| *written == region)
            .map(|(_, content)| content.clone())
            .collect()
    }

    pub fn revealed(&self) -> Vec<Region> {
        self.lock().revealed.clone()
    }
}

impl Page for MemoryPage {
    fn read_text(&self, field: InputField) -> String {
        self.lock().fields.get(&field).cloned().unwrap_or_default()
    }

    fn write_content(&self, region: Region, content: Content) {
        let mut inner = self.lock();
        inner.writes.push((region, content.clone()));
        inner.regions.insert(region, content);
    }

    fn fill_field(&self, field: InputField, value: &str) {
        self.lock().fields.insert(field, value.to_string());
    }

    fn reveal(&self, region: Region) {
        self.lock().revealed.push(region);
    }
}
