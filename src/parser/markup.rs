//! Generic markup tree over the document XML.
//!
//! Widget values are not reachable through the cell grid, so the engine
//! keeps a parsed tree of the raw `word/document.xml` alongside the model.
//! Element names are local names with the namespace prefix stripped, so the
//! node kinds of interest are `tbl`, `sdtContent` and `t`.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};

/// One element of the document markup.
#[derive(Debug, Clone, Default)]
pub struct MarkupNode {
    /// Local element name (namespace prefix stripped).
    pub name: String,

    /// Attributes with local-name keys, in source order.
    pub attrs: Vec<(String, String)>,

    /// Child elements in document order.
    pub children: Vec<MarkupNode>,

    /// Direct text content of this element.
    pub text: String,
}

impl MarkupNode {
    fn new(name: String, attrs: Vec<(String, String)>) -> Self {
        Self {
            name,
            attrs,
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Look up an attribute by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements with the given local name, in document order.
    pub fn children_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a MarkupNode> {
        let name = name.to_string();
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Collect all descendant elements with the given local name, in
    /// document order.
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a MarkupNode> {
        let mut out = Vec::new();
        self.collect_descendants(name, &mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a MarkupNode>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.collect_descendants(name, out);
        }
    }

    /// Find the first descendant element with the given local name.
    pub fn first_descendant<'a>(&'a self, name: &str) -> Option<&'a MarkupNode> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.first_descendant(name) {
                return Some(found);
            }
        }
        None
    }
}

/// Parsed markup of one document part.
#[derive(Debug, Clone)]
pub struct MarkupTree {
    root: MarkupNode,
}

impl MarkupTree {
    /// Parse XML bytes into a markup tree.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<MarkupNode> = vec![MarkupNode::new(String::new(), Vec::new())];
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_event_into(&mut buf)? {
                Event::Eof => break,
                Event::Start(start) => {
                    let name = local_name(start.name().as_ref());
                    let attrs = collect_attrs(&start)?;
                    stack.push(MarkupNode::new(name, attrs));
                }
                Event::Empty(start) => {
                    let name = local_name(start.name().as_ref());
                    let attrs = collect_attrs(&start)?;
                    let node = MarkupNode::new(name, attrs);
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
                Event::End(end) => {
                    let name = local_name(end.name().as_ref());
                    let node = stack
                        .pop()
                        .ok_or_else(|| Error::Xml(format!("unbalanced end tag: {name}")))?;
                    if node.name != name {
                        return Err(Error::Xml(format!(
                            "mismatched end tag: expected {}, got {name}",
                            node.name
                        )));
                    }
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => return Err(Error::Xml(format!("stray end tag: {name}"))),
                    }
                }
                Event::Text(text) => {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| Error::Xml(e.to_string()))?;
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&unescaped);
                    }
                }
                Event::CData(data) => {
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                // Declarations, comments, processing instructions and
                // doctypes carry no form content.
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }

        if stack.len() != 1 {
            return Err(Error::Xml("unclosed element at end of part".to_string()));
        }
        Ok(Self {
            root: stack.pop().unwrap_or_default(),
        })
    }

    /// The synthetic root node wrapping the part's top-level elements.
    pub fn root(&self) -> &MarkupNode {
        &self.root
    }

    /// All `tbl` elements of the part, in document order.
    pub fn tables(&self) -> Vec<&MarkupNode> {
        self.root.descendants("tbl")
    }

    /// Get the `tbl` element at the given ordinal position.
    pub fn table(&self, index: usize) -> Result<&MarkupNode> {
        let tables = self.tables();
        let count = tables.len();
        tables
            .into_iter()
            .nth(index)
            .ok_or(Error::TableOutOfRange { index, count })
    }
}

fn collect_attrs(start: &quick_xml::events::BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let key = local_name(attr.key.as_ref());
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(attrs)
}

/// Strip the namespace prefix from a qualified element name.
fn local_name(qname: &[u8]) -> String {
    let name = String::from_utf8_lossy(qname);
    match name.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => name.into_owned(),
    }
}
