//! XML input
//!
//! Tokenizes a document with quick-xml and builds an owned element tree. Every
//! element remembers its resolved namespace, its attributes in document order, the
//! namespace declarations it carried and its 1-based source position, which is all
//! the binding layer needs from the stream.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::NamespaceScope;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// One attribute of an element start tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    name: String,
    prefix: Option<String>,
    namespace: Option<String>,
    value: String,
}

impl XmlAttribute {
    /// Create an unqualified attribute
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            namespace: None,
            value: value.into(),
        }
    }

    /// Create an attribute qualified by `prefix` bound to `namespace`
    pub fn qualified(
        prefix: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: Some(prefix.into()),
            namespace: Some(namespace.into()),
            value: value.into(),
        }
    }

    /// Local name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix as written
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Resolved namespace URI; unprefixed attributes have none
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Unescaped value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Name as written in the document
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }
}

/// Element content, in document order
#[derive(Debug, Clone, PartialEq)]
pub enum XmlContent {
    /// Nested element
    Element(XmlElement),
    /// Character data
    Text(String),
}

/// XML element with its subtree
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    prefix: Option<String>,
    namespace: Option<String>,
    attributes: Vec<XmlAttribute>,
    declarations: Vec<(Option<String>, String)>,
    content: Vec<XmlContent>,
    line: u32,
    column: u32,
}

impl XmlElement {
    /// Create an element with no namespace
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            namespace: None,
            attributes: Vec::new(),
            declarations: Vec::new(),
            content: Vec::new(),
            line: 0,
            column: 0,
        }
    }

    /// Put the element in a default namespace and declare it on the element
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.declarations.push((None, namespace.clone()));
        self.namespace = Some(namespace);
        self
    }

    /// Add an attribute
    pub fn with_attribute(mut self, attribute: XmlAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Append character data
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(XmlContent::Text(text.into()));
        self
    }

    /// Append a child element
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.content.push(XmlContent::Element(child));
        self
    }

    /// Local name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix as written
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Resolved namespace URI
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Name as written in the document
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }

    /// Attributes in document order (namespace declarations excluded)
    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    /// Namespace declarations carried by this element, as `(prefix, uri)`
    pub fn declarations(&self) -> &[(Option<String>, String)] {
        &self.declarations
    }

    /// Raw value of an attribute in no namespace or in this element's namespace
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name && self.is_local(a))
            .map(|a| a.value.as_str())
    }

    /// True if `attribute` is unqualified or qualified with this element's namespace
    pub fn is_local(&self, attribute: &XmlAttribute) -> bool {
        match attribute.namespace() {
            None => true,
            Some(ns) => self.namespace() == Some(ns),
        }
    }

    /// Content in document order
    pub fn content(&self) -> &[XmlContent] {
        &self.content
    }

    /// Child elements in document order
    pub fn children(&self) -> impl Iterator<Item = &XmlElement> {
        self.content.iter().filter_map(|c| match c {
            XmlContent::Element(e) => Some(e),
            XmlContent::Text(_) => None,
        })
    }

    /// Sequential cursor over the child elements
    pub fn cursor(&self) -> ChildCursor<'_> {
        ChildCursor {
            children: self.children().collect(),
            position: 0,
        }
    }

    /// Concatenated character data directly inside this element
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                XmlContent::Text(t) => Some(t.as_str()),
                XmlContent::Element(_) => None,
            })
            .collect()
    }

    /// 1-based source line (0 for constructed elements)
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based source column (0 for constructed elements)
    pub fn column(&self) -> u32 {
        self.column
    }
}

/// Sequential access to the child elements of one element
#[derive(Debug, Clone)]
pub struct ChildCursor<'a> {
    children: Vec<&'a XmlElement>,
    position: usize,
}

impl<'a> ChildCursor<'a> {
    /// Name of the next child without consuming it
    pub fn peek_name(&self) -> Option<&'a str> {
        self.children.get(self.position).map(|e| e.name())
    }
}

impl<'a> Iterator for ChildCursor<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.children.get(self.position).copied();
        if next.is_some() {
            self.position += 1;
        }
        next
    }
}

/// Byte offset to line/column conversion
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn position(&self, offset: usize) -> (u32, u32) {
        let line = self.starts.partition_point(|&start| start <= offset).max(1);
        let column = offset - self.starts[line - 1] + 1;
        (line as u32, column as u32)
    }
}

/// Parsed XML document
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// Parse a document, enforcing `limits`
    pub fn parse(xml: &str, limits: &Limits) -> Result<Self> {
        limits.check_input_size(xml.len())?;

        let lines = LineIndex::new(xml);
        // Text is kept as written, whitespace included, so captured notes and
        // annotations write back unchanged. The binder only walks child elements.
        let mut reader = Reader::from_str(xml);

        // Each open element keeps the scope its children resolve against
        let mut stack: Vec<(XmlElement, NamespaceScope)> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut declared = 0usize;
        let mut elements = 0usize;
        let mut buf = Vec::new();

        loop {
            let event = reader.read_event_into(&mut buf);
            let end = reader.buffer_position();
            match event {
                Ok(Event::Start(e)) => {
                    let start = end.saturating_sub(e.len() + 2);
                    elements += 1;
                    limits.check_elements(elements)?;
                    limits.check_depth(stack.len() + 1)?;
                    let parent = stack.last().map(|(_, scope)| scope);
                    let (element, scope) =
                        Self::parse_element(&e, parent, lines.position(start), limits, &mut declared)?;
                    stack.push((element, scope));
                }
                Ok(Event::Empty(e)) => {
                    let start = end.saturating_sub(e.len() + 3);
                    elements += 1;
                    limits.check_elements(elements)?;
                    limits.check_depth(stack.len() + 1)?;
                    let parent = stack.last().map(|(_, scope)| scope);
                    let (element, _) =
                        Self::parse_element(&e, parent, lines.position(start), limits, &mut declared)?;
                    Self::attach(&mut stack, &mut root, element, &lines, end)?;
                }
                Ok(Event::End(_)) => {
                    if let Some((element, _)) = stack.pop() {
                        Self::attach(&mut stack, &mut root, element, &lines, end)?;
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some((current, _)) = stack.last_mut() {
                        let text = e.unescape().map_err(|err| {
                            Self::positioned(format!("Failed to unescape text: {}", err), &lines, end)
                        })?;
                        current.content.push(XmlContent::Text(text.into_owned()));
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some((current, _)) = stack.last_mut() {
                        current
                            .content
                            .push(XmlContent::Text(String::from_utf8_lossy(&e).into_owned()));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Self::positioned(
                        format!("Error parsing XML: {}", e),
                        &lines,
                        end,
                    ))
                }
                _ => {} // Ignore other events (comments, processing instructions, etc.)
            }
            buf.clear();
        }

        if let Some((open, _)) = stack.last() {
            return Err(Self::positioned(
                format!("Unexpected end of document inside <{}>", open.qualified_name()),
                &lines,
                xml.len(),
            ));
        }

        root.map(|root| Self { root })
            .ok_or_else(|| Error::xml("Document has no root element"))
    }

    /// Root element
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Take ownership of the root element
    pub fn into_root(self) -> XmlElement {
        self.root
    }

    fn attach(
        stack: &mut [(XmlElement, NamespaceScope)],
        root: &mut Option<XmlElement>,
        element: XmlElement,
        lines: &LineIndex,
        offset: usize,
    ) -> Result<()> {
        if let Some((parent, _)) = stack.last_mut() {
            parent.content.push(XmlContent::Element(element));
            Ok(())
        } else if root.is_some() {
            Err(Self::positioned(
                format!("Content after the root element: <{}>", element.qualified_name()),
                lines,
                offset,
            ))
        } else {
            *root = Some(element);
            Ok(())
        }
    }

    fn positioned(message: String, lines: &LineIndex, offset: usize) -> Error {
        let (line, column) = lines.position(offset);
        Error::Xml {
            message,
            line,
            column,
        }
    }

    /// Parse element from BytesStart event
    fn parse_element(
        start: &BytesStart,
        parent: Option<&NamespaceScope>,
        (line, column): (u32, u32),
        limits: &Limits,
        declared: &mut usize,
    ) -> Result<(XmlElement, NamespaceScope)> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| Error::xml(format!("Invalid element name: {}", e)))?
            .to_string();

        let mut scope = parent.map(|p| p.child()).unwrap_or_default();
        let mut declarations = Vec::new();
        let mut raw_attributes = Vec::new();

        for attr_result in start.attributes() {
            let attr = attr_result.map_err(|e| Error::Xml {
                message: format!("Failed to parse attribute: {}", e),
                line,
                column,
            })?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::xml(format!("Invalid attribute name: {}", e)))?
                .to_string();

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml {
                    message: format!("Failed to unescape attribute value: {}", e),
                    line,
                    column,
                })?
                .into_owned();

            // Handle namespace declarations
            if attr_name == "xmlns" {
                scope.bind_default(&attr_value);
                declarations.push((None, attr_value));
                *declared += 1;
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                scope.bind_prefix(prefix, &attr_value);
                declarations.push((Some(prefix.to_string()), attr_value));
                *declared += 1;
            } else {
                raw_attributes.push((attr_name, attr_value));
            }
        }

        limits.check_attributes(raw_attributes.len())?;
        limits.check_namespaces(*declared)?;

        let with_position = |err: Error| match err {
            Error::Namespace(message) => Error::Xml {
                message,
                line,
                column,
            },
            other => other,
        };

        let resolved = scope.resolve_element(&name).map_err(with_position)?;

        let mut attributes = Vec::with_capacity(raw_attributes.len());
        for (attr_name, value) in raw_attributes {
            let attr = scope.resolve_attribute(&attr_name).map_err(with_position)?;
            attributes.push(XmlAttribute {
                name: attr.local,
                prefix: attr.prefix,
                namespace: attr.namespace,
                value,
            });
        }

        let element = XmlElement {
            name: resolved.local,
            prefix: resolved.prefix,
            namespace: resolved.namespace,
            attributes,
            declarations,
            content: Vec::new(),
            line,
            column,
        };
        Ok((element, scope))
    }
}
