//! Minimal element tree for metadata documents.
//!
//! Only what the permission and label extractors need: element local names,
//! concatenated text, and ordered children. Attributes, comments and
//! processing instructions are dropped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// The document could not be turned into an element tree.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("document has no root element")]
    MissingRoot,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("document ends inside <{0}>")]
    Unclosed(String),
}

impl From<quick_xml::Error> for DocumentError {
    fn from(err: quick_xml::Error) -> Self {
        DocumentError::Xml(err.to_string())
    }
}

/// One element of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Parse XML text into its root element.
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => stack.push(Element::new(local_name(&e)?)),
                Event::Empty(e) => {
                    let element = Element::new(local_name(&e)?);
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| DocumentError::Xml("unexpected closing tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(t) => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&t.unescape()?);
                    }
                }
                Event::CData(c) => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(DocumentError::Unclosed(open.name.clone()));
        }
        root.ok_or(DocumentError::MissingRoot)
    }

    /// Local name, without any namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All text directly inside this element, unescaped and untrimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Children with the given local name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first child named `name`.
    ///
    /// Metadata values are single-occurrence children (`<allowRead>true</allowRead>`),
    /// so every scalar read goes through here. A repeated child yields the
    /// first occurrence; a missing one yields `None`.
    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.children.iter().find(|c| c.name == name).map(Element::text)
    }
}

fn local_name(start: &BytesStart<'_>) -> Result<String, DocumentError> {
    let name = start.local_name();
    std::str::from_utf8(name.as_ref())
        .map(str::to_string)
        .map_err(|e| DocumentError::Xml(format!("element name is not UTF-8: {}", e)))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), DocumentError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(DocumentError::MultipleRoots),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let doc = Element::parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<PermissionSet xmlns="http://soap.sforce.com/2006/04/metadata">
    <label>Sales</label>
    <objectPermissions>
        <object>Account</object>
    </objectPermissions>
</PermissionSet>"#,
        )
        .unwrap();

        assert_eq!(doc.name(), "PermissionSet");
        assert_eq!(doc.scalar("label"), Some("Sales"));
        let objects: Vec<_> = doc.children_named("objectPermissions").collect();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].scalar("object"), Some("Account"));
    }

    #[test]
    fn test_namespace_prefix_is_dropped() {
        let doc = Element::parse(r#"<md:Profile xmlns:md="urn:x"><md:custom>true</md:custom></md:Profile>"#)
            .unwrap();
        assert_eq!(doc.name(), "Profile");
        assert_eq!(doc.scalar("custom"), Some("true"));
    }

    #[test]
    fn test_text_is_unescaped_and_untrimmed() {
        let doc = Element::parse("<a><b> R&amp;D </b><c><![CDATA[x<y]]></c></a>").unwrap();
        assert_eq!(doc.scalar("b"), Some(" R&D "));
        assert_eq!(doc.scalar("c"), Some("x<y"));
    }

    #[test]
    fn test_empty_element_has_empty_text() {
        let doc = Element::parse("<a><object/></a>").unwrap();
        assert_eq!(doc.scalar("object"), Some(""));
        assert_eq!(doc.scalar("missing"), None);
    }

    #[test]
    fn test_scalar_takes_first_occurrence() {
        let doc = Element::parse("<a><v>1</v><v>2</v></a>").unwrap();
        assert_eq!(doc.scalar("v"), Some("1"));
    }

    #[test]
    fn test_scalar_outlives_lookup_key() {
        let doc = Element::parse("<a><object>Account</object></a>").unwrap();
        let value = {
            let key = String::from("object");
            doc.scalar(&key)
        };
        assert_eq!(value, Some("Account"));
    }

    #[test]
    fn test_unclosed_document() {
        let err = Element::parse("<PermissionSet><fieldPermissions>").unwrap_err();
        assert!(matches!(err, DocumentError::Unclosed(_) | DocumentError::Xml(_)));
    }

    #[test]
    fn test_mismatched_tags() {
        assert!(Element::parse("<a><b></a></b>").is_err());
    }

    #[test]
    fn test_empty_input_has_no_root() {
        assert!(matches!(Element::parse("   "), Err(DocumentError::MissingRoot)));
    }

    #[test]
    fn test_two_roots_rejected() {
        assert!(matches!(
            Element::parse("<a/><b/>"),
            Err(DocumentError::MultipleRoots)
        ));
    }
}
