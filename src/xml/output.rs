//! XML output
//!
//! A thin stream over `quick_xml::Writer`. Elements hand it their attributes as
//! typed values; formatting to text happens here.

use super::input::{XmlContent, XmlElement};
use crate::binding::coercion::{format_value, TypedValue};
use crate::error::{Error, Result};
use crate::namespaces::NamespaceScope;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Output formatting options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per nesting level; 0 writes everything on one line
    pub indent: usize,
    /// Whether to emit `<?xml version="1.0" encoding="UTF-8"?>`
    pub declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            declaration: true,
        }
    }
}

impl WriteOptions {
    /// Single-line output without a declaration
    pub fn compact() -> Self {
        Self {
            indent: 0,
            declaration: false,
        }
    }
}

/// Ordered attribute list for one start tag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeList {
    items: Vec<(String, String)>,
}

impl AttributeList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a typed attribute, optionally prefixed
    pub fn push(&mut self, name: &str, prefix: Option<&str>, value: &TypedValue) {
        self.push_text(name, prefix, &format_value(value));
    }

    /// Append an attribute whose value is already text
    pub fn push_text(&mut self, name: &str, prefix: Option<&str>, value: &str) {
        let key = match prefix {
            Some(prefix) => format!("{}:{}", prefix, name),
            None => name.to_string(),
        };
        self.items.push((key, value.to_string()));
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `(qualified name, text)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Namespace declarations in this list, layered over `outer`
    fn scope_over(&self, outer: &NamespaceScope) -> NamespaceScope {
        let mut scope = outer.child();
        for (key, value) in &self.items {
            if key == "xmlns" {
                scope.bind_default(value.as_str());
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                scope.bind_prefix(prefix, value.as_str());
            }
        }
        scope
    }

    fn apply(&self, start: &mut BytesStart<'_>) {
        for (key, value) in &self.items {
            start.push_attribute((key.as_str(), value.as_str()));
        }
    }
}

/// Output stream writing into memory
///
/// Tracks the namespace declarations of every open element so captured
/// subtrees can re-declare the prefixes they inherited when they were read.
pub struct XmlOutputStream {
    writer: Writer<Vec<u8>>,
    scopes: Vec<NamespaceScope>,
}

impl XmlOutputStream {
    /// Create a stream, writing the declaration if requested
    pub fn new(options: &WriteOptions) -> Result<Self> {
        let writer = if options.indent > 0 {
            Writer::new_with_indent(Vec::new(), b' ', options.indent)
        } else {
            Writer::new(Vec::new())
        };
        let mut stream = Self {
            writer,
            scopes: Vec::new(),
        };
        if options.declaration {
            stream
                .writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        Ok(stream)
    }

    /// Write a start tag
    pub fn start_element(&mut self, name: &str, attributes: &AttributeList) -> Result<()> {
        let mut start = BytesStart::new(name);
        attributes.apply(&mut start);
        self.writer.write_event(Event::Start(start))?;
        let scope = attributes.scope_over(&self.scope());
        self.scopes.push(scope);
        Ok(())
    }

    /// Write an end tag
    pub fn end_element(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        self.scopes.pop();
        Ok(())
    }

    /// Declarations in force at the current write position
    fn scope(&self) -> NamespaceScope {
        self.scopes.last().cloned().unwrap_or_default()
    }

    /// Write a self-closing element
    pub fn empty_element(&mut self, name: &str, attributes: &AttributeList) -> Result<()> {
        let mut start = BytesStart::new(name);
        attributes.apply(&mut start);
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    /// Write escaped character data
    pub fn text(&mut self, text: &str) -> Result<()> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// Write a captured subtree back out unchanged
    ///
    /// Any prefix (or default namespace) the subtree relies on but that is not
    /// in force at this point is declared on the element that first needs it.
    pub fn write_verbatim(&mut self, element: &XmlElement) -> Result<()> {
        let name = element.qualified_name();
        let mut attributes = AttributeList::new();
        for (prefix, uri) in element.declarations() {
            match prefix {
                Some(prefix) => attributes.push_text(prefix, Some("xmlns"), uri),
                None => attributes.push_text("xmlns", None, uri),
            }
        }

        let mut scope = attributes.scope_over(&self.scope());
        let element_namespace = element.namespace().unwrap_or_default();
        match element.prefix() {
            Some(prefix) => {
                if scope.lookup(prefix) != Some(element_namespace) {
                    attributes.push_text(prefix, Some("xmlns"), element_namespace);
                    scope.bind_prefix(prefix, element_namespace);
                }
            }
            None => {
                if scope.default_namespace().unwrap_or_default() != element_namespace {
                    attributes.push_text("xmlns", None, element_namespace);
                }
            }
        }
        for attribute in element.attributes() {
            if let (Some(prefix), Some(namespace)) = (attribute.prefix(), attribute.namespace()) {
                if scope.lookup(prefix) != Some(namespace) {
                    attributes.push_text(prefix, Some("xmlns"), namespace);
                    scope.bind_prefix(prefix, namespace);
                }
            }
        }
        for attribute in element.attributes() {
            attributes.push_text(attribute.name(), attribute.prefix(), attribute.value());
        }

        if element.content().is_empty() {
            return self.empty_element(&name, &attributes);
        }
        self.start_element(&name, &attributes)?;
        for content in element.content() {
            match content {
                XmlContent::Element(child) => self.write_verbatim(child)?,
                XmlContent::Text(text) => self.text(text)?,
            }
        }
        self.end_element(&name)
    }

    /// Finish and return the document text
    pub fn into_string(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| Error::xml(format!("Output is not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::Limits;
    use crate::xml::XmlDocument;

    #[test]
    fn test_typed_attributes() {
        let mut attributes = AttributeList::new();
        attributes.push("constant", None, &TypedValue::Boolean(true));
        attributes.push("size", None, &TypedValue::Double(f64::NAN));
        attributes.push("flag", Some("ext"), &TypedValue::Integer(3));

        let mut out = XmlOutputStream::new(&WriteOptions::compact()).unwrap();
        out.empty_element("compartment", &attributes).unwrap();
        assert_eq!(
            out.into_string().unwrap(),
            r#"<compartment constant="true" size="NaN" ext:flag="3"/>"#
        );
    }

    #[test]
    fn test_declaration_and_nesting() {
        let mut out = XmlOutputStream::new(&WriteOptions::default()).unwrap();
        out.start_element("a", &AttributeList::new()).unwrap();
        out.empty_element("b", &AttributeList::new()).unwrap();
        out.end_element("a").unwrap();
        let text = out.into_string().unwrap();
        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(text.contains("\n  <b/>"));
    }

    #[test]
    fn test_escaping() {
        let mut attributes = AttributeList::new();
        attributes.push_text("name", None, "a < b & \"c\"");
        let mut out = XmlOutputStream::new(&WriteOptions::compact()).unwrap();
        out.start_element("x", &attributes).unwrap();
        out.text("1 < 2").unwrap();
        out.end_element("x").unwrap();
        let text = out.into_string().unwrap();
        assert!(text.contains("&lt;"));
        assert!(text.contains("1 &lt; 2"));
    }

    #[test]
    fn test_verbatim_subtree() {
        let xml = r#"<notes><body xmlns="http://www.w3.org/1999/xhtml"><p>Hello <b>world</b></p></body></notes>"#;
        let parsed = XmlDocument::parse(xml, &Limits::default()).unwrap();

        let mut out = XmlOutputStream::new(&WriteOptions::compact()).unwrap();
        out.write_verbatim(parsed.root()).unwrap();
        let written = out.into_string().unwrap();

        let reparsed = XmlDocument::parse(&written, &Limits::default()).unwrap();
        let body = reparsed.root().children().next().unwrap();
        assert_eq!(body.namespace(), Some("http://www.w3.org/1999/xhtml"));
        assert_eq!(body.children().next().unwrap().text(), "Hello ");
    }

    #[test]
    fn test_verbatim_keeps_mixed_content() {
        let xml = r#"<notes><p xmlns="http://www.w3.org/1999/xhtml">Hello <b>big</b> world</p></notes>"#;
        let parsed = XmlDocument::parse(xml, &Limits::default()).unwrap();

        let mut out = XmlOutputStream::new(&WriteOptions::default()).unwrap();
        out.write_verbatim(parsed.root()).unwrap();
        let written = out.into_string().unwrap();
        assert!(written.contains(">Hello <b>big</b> world</p>"), "{written}");
    }

    #[test]
    fn test_verbatim_declares_inherited_prefixes() {
        let xml = r#"<sbml xmlns="urn:core" xmlns:ex="urn:example"><annotation><ex:data ex:kind="a">kept</ex:data><plain/></annotation></sbml>"#;
        let parsed = XmlDocument::parse(xml, &Limits::default()).unwrap();
        let annotation = parsed.root().children().next().unwrap();

        let mut root = AttributeList::new();
        root.push_text("xmlns", None, "urn:core");
        let mut out = XmlOutputStream::new(&WriteOptions::compact()).unwrap();
        out.start_element("sbml", &root).unwrap();
        out.write_verbatim(annotation).unwrap();
        out.end_element("sbml").unwrap();
        let written = out.into_string().unwrap();

        assert_eq!(
            written,
            r#"<sbml xmlns="urn:core"><annotation><ex:data xmlns:ex="urn:example" ex:kind="a">kept</ex:data><plain/></annotation></sbml>"#
        );
        let reparsed = XmlDocument::parse(&written, &Limits::default()).unwrap();
        let data = reparsed.root().children().next().unwrap().children().next().unwrap();
        assert_eq!(data.namespace(), Some("urn:example"));
        assert_eq!(data.attributes()[0].namespace(), Some("urn:example"));
    }

    #[test]
    fn test_verbatim_restores_default_namespace() {
        let xml = r#"<body xmlns="http://www.w3.org/1999/xhtml"><p>text</p></body>"#;
        let parsed = XmlDocument::parse(xml, &Limits::default()).unwrap();
        let p = parsed.root().children().next().unwrap();

        let mut out = XmlOutputStream::new(&WriteOptions::compact()).unwrap();
        out.write_verbatim(p).unwrap();
        assert_eq!(
            out.into_string().unwrap(),
            r#"<p xmlns="http://www.w3.org/1999/xhtml">text</p>"#
        );
    }
}
