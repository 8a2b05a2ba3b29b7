//! Owned XML element tree with namespace-qualified attribute lookups.
//!
//! Only what the provider responses need is kept: element names, their
//! resolved namespaces, and attributes. Text content is discarded.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::error::XmlError;

/// Prefix to namespace URI bindings used when evaluating lookup paths.
///
/// These are independent of the prefixes the document itself declares; a
/// step `yweather:wind` matches any element whose resolved namespace is the
/// URI bound to `yweather` here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces {
    bindings: HashMap<String, String>,
}

impl Namespaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.bindings.insert(prefix.into(), uri.into());
        self
    }

    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }
}

#[derive(Debug)]
struct Attribute {
    namespace: Option<String>,
    name: String,
    value: String,
}

#[derive(Debug)]
struct Element {
    namespace: Option<String>,
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<usize>,
}

impl Element {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// A parsed provider response together with the bindings its lookups use.
#[derive(Debug)]
pub struct ParsedResponse {
    elements: Vec<Element>,
    root: usize,
    namespaces: Namespaces,
}

impl ParsedResponse {
    /// Parse `body` into an element tree. Anything that is not a single
    /// well-formed, namespace-valid document is rejected.
    pub fn parse(body: &str, namespaces: Namespaces) -> Result<Self, XmlError> {
        if body.trim().is_empty() {
            return Err(XmlError::Empty);
        }

        let mut reader = NsReader::from_str(body);
        let mut tree = TreeBuilder::default();

        loop {
            let position = reader.buffer_position();
            let (resolved, event) = reader
                .read_resolved_event()
                .map_err(|e| malformed(position, e))?;
            let namespace = namespace_of(resolved)?;

            match event {
                Event::Start(start) => {
                    let idx = tree.open(&reader, namespace, &start)?;
                    tree.stack.push(idx);
                }
                Event::Empty(start) => {
                    tree.open(&reader, namespace, &start)?;
                }
                Event::End(_) => {
                    tree.stack.pop();
                }
                Event::Text(text) if tree.stack.is_empty() => {
                    if text.iter().any(|b| !b.is_ascii_whitespace()) {
                        return Err(XmlError::StrayText);
                    }
                }
                Event::CData(_) if tree.stack.is_empty() => return Err(XmlError::StrayText),
                Event::Eof => break,
                _ => {}
            }
        }

        tree.finish(namespaces)
    }

    /// Evaluate an absolute `/step/prefix:step/@attribute` path and return the
    /// first matching attribute value in document order.
    pub fn select_attribute(&self, path: &str) -> Option<&str> {
        let path = match LookupPath::parse(path, &self.namespaces) {
            Ok(path) => path,
            Err(reason) => {
                tracing::debug!(path, reason, "unusable lookup path");
                return None;
            }
        };
        self.find(self.root, &path.steps, path.attribute)
    }

    fn find(&self, idx: usize, steps: &[Step<'_>], attribute: &str) -> Option<&str> {
        let (step, rest) = steps.split_first()?;
        let element = &self.elements[idx];
        if !step.matches(element) {
            return None;
        }
        if rest.is_empty() {
            return element.attribute(attribute);
        }
        element
            .children
            .iter()
            .find_map(|&child| self.find(child, rest, attribute))
    }
}

#[derive(Default)]
struct TreeBuilder {
    elements: Vec<Element>,
    stack: Vec<usize>,
    root: Option<usize>,
}

impl TreeBuilder {
    fn open(
        &mut self,
        reader: &NsReader<&[u8]>,
        namespace: Option<String>,
        start: &BytesStart<'_>,
    ) -> Result<usize, XmlError> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| malformed(reader.buffer_position(), e))?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let (resolved, local) = reader.resolve_attribute(attr.key);
            let namespace = namespace_of(resolved)?;
            let value = attr
                .unescape_value()
                .map_err(|e| malformed(reader.buffer_position(), e))?
                .into_owned();
            attributes.push(Attribute {
                namespace,
                name: lossy(local.as_ref()),
                value,
            });
        }

        let idx = self.elements.len();
        self.elements.push(Element {
            namespace,
            name: lossy(start.local_name().as_ref()),
            attributes,
            children: Vec::new(),
        });

        match self.stack.last() {
            Some(&parent) => self.elements[parent].children.push(idx),
            None if self.root.is_some() => return Err(XmlError::MultipleRoots),
            None => self.root = Some(idx),
        }
        Ok(idx)
    }

    fn finish(self, namespaces: Namespaces) -> Result<ParsedResponse, XmlError> {
        if let Some(&idx) = self.stack.last() {
            return Err(XmlError::Unclosed(self.elements[idx].name.clone()));
        }
        let root = self.root.ok_or(XmlError::NoRoot)?;
        Ok(ParsedResponse {
            elements: self.elements,
            root,
            namespaces,
        })
    }
}

struct Step<'a> {
    namespace: Option<&'a str>,
    name: &'a str,
}

impl Step<'_> {
    fn matches(&self, element: &Element) -> bool {
        element.name == self.name && element.namespace.as_deref() == self.namespace
    }
}

struct LookupPath<'a> {
    steps: Vec<Step<'a>>,
    attribute: &'a str,
}

impl<'a> LookupPath<'a> {
    fn parse(path: &'a str, namespaces: &'a Namespaces) -> Result<Self, &'static str> {
        let rest = path.strip_prefix('/').ok_or("path must be absolute")?;
        let (elements, attribute) = rest.rsplit_once("/@").ok_or("path must end in an attribute")?;

        let steps = elements
            .split('/')
            .map(|segment| match segment.split_once(':') {
                Some((prefix, name)) => namespaces
                    .uri(prefix)
                    .map(|uri| Step {
                        namespace: Some(uri),
                        name,
                    })
                    .ok_or("path uses an unbound prefix"),
                None => Ok(Step {
                    namespace: None,
                    name: segment,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if attribute.is_empty() || steps.iter().any(|s| s.name.is_empty()) {
            return Err("path has an empty step");
        }
        Ok(Self { steps, attribute })
    }
}

fn namespace_of(resolved: ResolveResult<'_>) -> Result<Option<String>, XmlError> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(lossy(ns.as_ref()))),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(XmlError::UnknownPrefix(lossy(&prefix))),
    }
}

fn malformed(position: u64, err: impl std::fmt::Display) -> XmlError {
    XmlError::Malformed {
        position,
        message: err.to_string(),
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
