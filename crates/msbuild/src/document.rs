use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, bail};
use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tokio::fs::{read_to_string, write};

pub type ElementId = usize;

const BOM: char = '\u{feff}';

#[derive(Debug, Clone)]
pub enum Node {
    Element(ElementId),
    /// Text, comments, declarations and everything else that is written back verbatim.
    Other(Event<'static>),
}

#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    // values are kept escaped, exactly as read
    attributes: Vec<(String, String)>,
    // tag as read; dropped once the tag is edited so it gets rebuilt from `attributes`
    start: Option<BytesStart<'static>>,
    parent: Option<ElementId>,
    children: Vec<Node>,
    self_closing: bool,
}

impl Element {
    /// Qualified tag name, including the prefix when there is one.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Unescaped value of the attribute with the given qualified name
    pub fn attribute(&self, key: &str) -> Option<Cow<'_, str>> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, raw)| unescape(raw).unwrap_or(Cow::Borrowed(raw.as_str())))
    }
}

/// In-memory MSBuild project file.
///
/// Elements live in an arena and are addressed by [`ElementId`]; ids handed out
/// by a document stay valid for as long as the document does, even when the
/// element is later detached by [`ProjectDocument::set_text`]. Anything the
/// document does not model (declaration, comments, whitespace, CDATA,
/// processing instructions, entity references) is carried through unchanged.
#[derive(Debug, Default)]
pub struct ProjectDocument {
    nodes: Vec<Node>,
    store: Vec<Element>,
    bom: bool,
}

impl ProjectDocument {
    pub fn parse(content: &str) -> Result<Self> {
        let (content, bom) = match content.strip_prefix(BOM) {
            Some(rest) => (rest, true),
            None => (content, false),
        };
        let mut document = Self {
            bom,
            ..Self::default()
        };
        let mut reader = Reader::from_str(content);
        let mut buf = Vec::new();
        let mut stack: Vec<ElementId> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let id = document.open_element(&e, stack.last().copied(), false)?;
                    stack.push(id);
                }
                Ok(Event::Empty(e)) => {
                    document.open_element(&e, stack.last().copied(), true)?;
                }
                Ok(Event::End(_)) => {
                    if stack.pop().is_none() {
                        bail!("XML parsing error: unexpected closing tag");
                    }
                }
                Ok(Event::Eof) => break,
                Ok(event) => document.append(stack.last().copied(), Node::Other(event.into_owned())),
                Err(e) => return Err(anyhow::anyhow!("XML parsing error: {e}")),
            }
            buf.clear();
        }

        if !stack.is_empty() {
            bail!("XML parsing error: unclosed element");
        }
        Ok(document)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        write(path, self.to_xml()?)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        for node in &self.nodes {
            self.write_node(&mut writer, node)?;
        }
        let mut xml = String::from_utf8(writer.into_inner().into_inner())
            .context("Failed to convert XML to UTF-8")?;
        if self.bom {
            xml.insert(0, BOM);
        }
        Ok(xml)
    }

    /// The document element, if the document has one.
    pub fn root(&self) -> Option<ElementId> {
        self.nodes.iter().find_map(|node| match node {
            Node::Element(id) => Some(*id),
            Node::Other(_) => None,
        })
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.store[id]
    }

    pub fn child_elements(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        self.store[id].children.iter().filter_map(|node| match node {
            Node::Element(child) => Some(*child),
            Node::Other(_) => None,
        })
    }

    /// Namespace URI the element's prefix (or the default namespace) resolves to.
    pub fn namespace_uri(&self, id: ElementId) -> Option<String> {
        let key = match self.store[id].prefix() {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        let mut current = Some(id);
        while let Some(element) = current.map(|id| &self.store[id]) {
            if let Some(uri) = element.attribute(&key) {
                return Some(uri.into_owned());
            }
            current = element.parent;
        }
        None
    }

    /// Sets the attribute, replacing an existing value in place or appending a new one.
    pub fn set_attribute(&mut self, id: ElementId, key: &str, value: &str) {
        let escaped = escape(value).into_owned();
        let element = &mut self.store[id];
        match element.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) if *existing == escaped => return,
            Some((_, existing)) => *existing = escaped,
            None => element.attributes.push((key.to_string(), escaped)),
        }
        element.start = None;
    }

    /// Concatenated text content of the element's direct children.
    pub fn text(&self, id: ElementId) -> String {
        let mut raw = String::new();
        for node in &self.store[id].children {
            match node {
                Node::Other(Event::Text(text)) => raw.push_str(&String::from_utf8_lossy(text)),
                Node::Other(Event::GeneralRef(reference)) => {
                    raw.push('&');
                    raw.push_str(&String::from_utf8_lossy(reference));
                    raw.push(';');
                }
                Node::Other(Event::CData(cdata)) => {
                    raw.push_str(&escape(&*String::from_utf8_lossy(cdata)));
                }
                _ => {}
            }
        }
        let text = unescape(&raw).map(Cow::into_owned);
        text.unwrap_or(raw)
    }

    /// Replaces all children of the element with a single text node.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        let element = &mut self.store[id];
        if element.self_closing {
            // `<Flag />` becomes `<Flag>...</Flag>`
            element.start = None;
            element.self_closing = false;
        }
        element.children = vec![Node::Other(Event::Text(BytesText::new(text).into_owned()))];
    }

    /// Creates a detached element; attach it with [`ProjectDocument::insert_after`].
    pub fn create_element(&mut self, name: &str) -> ElementId {
        self.store.push(Element {
            name: name.to_string(),
            attributes: Vec::new(),
            start: None,
            parent: None,
            children: Vec::new(),
            self_closing: true,
        });
        self.store.len() - 1
    }

    /// Inserts `element` as the next element sibling of `anchor`.
    ///
    /// When the anchor is preceded by indentation, the same whitespace is put
    /// in front of the new element so it lands on its own line. `anchor` must
    /// be attached to the document.
    pub fn insert_after(&mut self, anchor: ElementId, element: ElementId) {
        let parent = self.store[anchor].parent;
        let siblings = match parent {
            Some(parent) => &mut self.store[parent].children,
            None => &mut self.nodes,
        };
        let Some(position) = siblings
            .iter()
            .position(|node| matches!(node, Node::Element(id) if *id == anchor))
        else {
            debug_assert!(false, "insert_after: element {anchor} is detached");
            return;
        };
        let indent = position
            .checked_sub(1)
            .and_then(|previous| siblings.get(previous))
            .and_then(|node| match node {
                Node::Other(Event::Text(text))
                    if text.iter().all(u8::is_ascii_whitespace) && !text.is_empty() =>
                {
                    Some(node.clone())
                }
                _ => None,
            });

        let mut insert_at = position + 1;
        if let Some(indent) = indent {
            siblings.insert(insert_at, indent);
            insert_at += 1;
        }
        siblings.insert(insert_at, Node::Element(element));
        self.store[element].parent = parent;
    }

    fn open_element(
        &mut self,
        start: &BytesStart<'_>,
        parent: Option<ElementId>,
        self_closing: bool,
    ) -> Result<ElementId> {
        let name = std::str::from_utf8(start.name().as_ref())?.to_string();
        let attributes = start
            .attributes()
            .map(|attr| {
                let attr = attr?;
                let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
                // single-quoted values may hold a raw `"`, and everything is written back double-quoted
                let value = std::str::from_utf8(&attr.value)?.replace('"', "&quot;");
                Ok((key, value))
            })
            .collect::<Result<Vec<_>>>()?;

        self.store.push(Element {
            name,
            attributes,
            start: Some(start.clone().into_owned()),
            parent,
            children: Vec::new(),
            self_closing,
        });
        let id = self.store.len() - 1;
        self.append(parent, Node::Element(id));
        Ok(id)
    }

    fn append(&mut self, parent: Option<ElementId>, node: Node) {
        match parent {
            Some(parent) => self.store[parent].children.push(node),
            None => self.nodes.push(node),
        }
    }

    fn write_node(&self, writer: &mut Writer<Cursor<Vec<u8>>>, node: &Node) -> Result<()> {
        match node {
            Node::Other(event) => writer.write_event(event.borrow())?,
            Node::Element(id) => {
                let element = &self.store[*id];
                let start = match &element.start {
                    Some(start) => start.borrow(),
                    None => {
                        let mut start = BytesStart::new(element.name.as_str());
                        for (key, value) in &element.attributes {
                            start.push_attribute((key.as_bytes(), value.as_bytes()));
                        }
                        start
                    }
                };
                if element.self_closing && element.children.is_empty() {
                    writer.write_event(Event::Empty(start))?;
                } else {
                    writer.write_event(Event::Start(start))?;
                    for child in &element.children {
                        self.write_node(writer, child)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
                }
            }
        }
        Ok(())
    }
}
