//! Display labels for object and field API names.

use std::collections::HashMap;

use thiserror::Error;

use crate::document::Element;

/// A label definition document could not be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("expected <{expected}> root, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("<{0}> has no label")]
    MissingLabel(&'static str),
}

/// Read-only label lookups built by [`LabelIndexBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelIndex {
    objects: HashMap<String, String>,
    fields: HashMap<String, String>,
}

impl LabelIndex {
    pub fn builder() -> LabelIndexBuilder {
        LabelIndexBuilder::default()
    }

    pub fn object_label(&self, object: &str) -> Option<&str> {
        self.objects.get(object).map(String::as_str)
    }

    pub fn field_label(&self, object: &str, field: &str) -> Option<&str> {
        self.fields.get(&field_key(object, field)).map(String::as_str)
    }

    /// The object's label, or its API name when it has none or it is empty.
    pub fn resolve_object<'a>(&'a self, object: &'a str) -> &'a str {
        self.object_label(object)
            .filter(|label| !label.is_empty())
            .unwrap_or(object)
    }

    /// The field's label, or its API name when it has none or it is empty.
    pub fn resolve_field<'a>(&'a self, object: &str, field: &'a str) -> &'a str {
        self.field_label(object, field)
            .filter(|label| !label.is_empty())
            .unwrap_or(field)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// Collects labels; [`build`](LabelIndexBuilder::build) freezes them.
#[derive(Debug, Default)]
pub struct LabelIndexBuilder {
    index: LabelIndex,
}

impl LabelIndexBuilder {
    pub fn object(&mut self, object: impl Into<String>, label: impl Into<String>) -> &mut Self {
        self.index.objects.insert(object.into(), label.into());
        self
    }

    pub fn field(&mut self, object: &str, field: &str, label: impl Into<String>) -> &mut Self {
        self.index.fields.insert(field_key(object, field), label.into());
        self
    }

    pub fn build(self) -> LabelIndex {
        self.index
    }
}

fn field_key(object: &str, field: &str) -> String {
    format!("{}.{}", object, field)
}

/// Label of a `CustomObject` definition.
pub fn object_label(doc: &Element) -> Result<String, LabelError> {
    label_of(doc, "CustomObject")
}

/// Label of a `CustomField` definition.
pub fn field_label(doc: &Element) -> Result<String, LabelError> {
    label_of(doc, "CustomField")
}

fn label_of(doc: &Element, root: &'static str) -> Result<String, LabelError> {
    if doc.name() != root {
        return Err(LabelError::UnexpectedRoot {
            expected: root,
            found: doc.name().to_string(),
        });
    }
    doc.scalar("label")
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .ok_or(LabelError::MissingLabel(root))
}
