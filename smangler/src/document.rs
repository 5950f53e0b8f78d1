//! In-memory model of one Android `strings.xml` file.
//!
//! The file is parsed into a small typed tree: element nodes keep their start
//! tag verbatim (attributes, quoting, namespace prefixes) and everything else
//! (text, CDATA, comments, processing instructions) is kept as the original
//! markup event. Writing an untouched document reproduces its markup, so only
//! the `string` elements that are explicitly appended or removed change on disk.
//!
//! Only `<string name="...">` elements are surfaced as [`StringEntry`] values;
//! every other node is opaque and simply carried along. Values are decoded on
//! demand, so removing entries never depends on their content being readable.
//!
//! General entities declared in an internal `<!DOCTYPE ... [ ... ]>` subset
//! are resolved alongside the predefined XML ones.

use std::{
    borrow::Cow,
    collections::HashMap,
    io::{BufRead, Write},
};

use lazy_static::lazy_static;
use quick_xml::{
    Reader, Writer,
    escape::{resolve_predefined_entity, unescape_with},
    events::{BytesDecl, BytesStart, BytesText, Event},
};
use regex::Regex;

use crate::{error::Error, traits::Parser};

lazy_static! {
    static ref ENTITY_DECL_REGEX: Regex =
        Regex::new(r#"<!ENTITY\s+([^\s%"'>]+)\s+(?:"([^"]*)"|'([^']*)')\s*>"#).unwrap();
}

/// Entity name → replacement text.
type Entities = HashMap<String, String>;

const STRING_TAG: &[u8] = b"string";
const NAME_ATTR: &str = "name";
const DEFAULT_INDENT: &str = "\n    ";

/// A `<string name="...">value</string>` resource, as read from a document.
///
/// A `<string>` element without a `name` attribute is not an entry: it is
/// kept in the document but never listed, copied or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    pub name: String,
    /// Concatenated text and CDATA content of the element, entities unescaped.
    pub value: String,
}

/// A child of an element.
#[derive(Debug, Clone)]
enum Node {
    Element(Element),
    /// Any non-element markup, kept exactly as it was read.
    Misc(Event<'static>),
}

impl Node {
    fn is_whitespace(&self) -> bool {
        match self {
            Node::Misc(Event::Text(text)) => text.iter().all(u8::is_ascii_whitespace),
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    start: BytesStart<'static>,
    children: Vec<Node>,
    self_closing: bool,
    /// `name` attribute of a `<string>` element, entities resolved.
    entry_name: Option<String>,
}

impl Element {
    fn open(start: BytesStart<'static>, self_closing: bool) -> Self {
        Element {
            start,
            children: Vec::new(),
            self_closing,
            entry_name: None,
        }
    }

    /// Builds a fresh `<string>` element holding `value`.
    fn string(name: &str, value: &str) -> Self {
        let mut start = BytesStart::new("string");
        start.push_attribute((NAME_ATTR, name));

        let children = if value.is_empty() {
            Vec::new()
        } else {
            vec![Node::Misc(Event::Text(BytesText::new(value).into_owned()))]
        };

        Element {
            start,
            children,
            self_closing: false,
            entry_name: Some(name.to_string()),
        }
    }

    /// Picks up the entry name of a `<string>` start tag.
    fn read_entry_name(&mut self, entities: &Entities) -> Result<(), Error> {
        if self.name() != STRING_TAG {
            return Ok(());
        }

        let name = self
            .start
            .try_get_attribute(NAME_ATTR)
            .map_err(|e| Error::Attribute(e.to_string()))?;

        if let Some(attr) = name {
            let name = attr.unescape_value_with(|entity| resolve(entities, entity))?;
            self.entry_name = Some(name.into_owned());
        }
        Ok(())
    }

    /// Raw tag name, including any namespace prefix.
    pub fn name(&self) -> &[u8] {
        self.start.name().into_inner()
    }

    /// Concatenated text and CDATA content, entities resolved.
    fn text(&self, entities: &Entities) -> Result<String, Error> {
        let mut value = String::new();
        collect_text(&self.children, entities, &mut value)?;
        Ok(value)
    }

    /// Appends `child` after the last child, keeping the surrounding layout.
    ///
    /// The new element copies the indentation used by the existing element
    /// children and goes in front of trailing whitespace, so the closing tag of
    /// `self` stays where it was.
    fn append_element(&mut self, child: Element) {
        let indent = self.child_indent();
        self.self_closing = false;

        if self.children.last().is_some_and(Node::is_whitespace) {
            let at = self.children.len() - 1;
            self.children.insert(at, Node::Element(child));
            self.children.insert(at, whitespace(indent));
        } else {
            self.children.push(whitespace(indent));
            self.children.push(Node::Element(child));
            self.children.push(whitespace("\n".to_string()));
        }
    }

    fn child_indent(&self) -> String {
        let last_element = self
            .children
            .iter()
            .rposition(|node| matches!(node, Node::Element(_)));

        match last_element {
            Some(i) if i > 0 => match &self.children[i - 1] {
                Node::Misc(Event::Text(text)) if text.iter().all(u8::is_ascii_whitespace) => {
                    String::from_utf8_lossy(text).into_owned()
                }
                _ => DEFAULT_INDENT.to_string(),
            },
            _ => DEFAULT_INDENT.to_string(),
        }
    }

    /// Removes the child at `index` together with the whitespace that indents it.
    fn remove_child(&mut self, index: usize) {
        self.children.remove(index);
        if index > 0 && self.children[index - 1].is_whitespace() {
            self.children.remove(index - 1);
        }
    }

    /// String elements below `self`, depth first in document order.
    fn collect_strings<'a>(&'a self, out: &mut Vec<(&'a str, &'a Element)>) {
        for child in &self.children {
            if let Node::Element(element) = child {
                if let Some(name) = &element.entry_name {
                    out.push((name.as_str(), element));
                }
                element.collect_strings(out);
            }
        }
    }

    /// Paths (child indices from `self`) of every string element accepted by
    /// `predicate`, in document order. Children of a matched element are not
    /// visited since they go away with it.
    fn collect_matches<F>(&self, predicate: &F, prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>)
    where
        F: Fn(&str) -> bool,
    {
        for (i, child) in self.children.iter().enumerate() {
            let Node::Element(element) = child else {
                continue;
            };
            prefix.push(i);
            match &element.entry_name {
                Some(name) if predicate(name) => out.push(prefix.clone()),
                _ => element.collect_matches(predicate, prefix, out),
            }
            prefix.pop();
        }
    }

    fn remove_at(&mut self, path: &[usize]) {
        match path {
            [] => {}
            [index] => self.remove_child(*index),
            [head, rest @ ..] => {
                if let Some(Node::Element(child)) = self.children.get_mut(*head) {
                    child.remove_at(rest);
                }
            }
        }
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        if self.self_closing && self.children.is_empty() {
            writer.write_event(Event::Empty(self.start.borrow()))?;
            return Ok(());
        }

        writer.write_event(Event::Start(self.start.borrow()))?;
        for child in &self.children {
            match child {
                Node::Element(element) => element.write(writer)?,
                Node::Misc(event) => writer.write_event(event.borrow())?,
            }
        }
        writer.write_event(Event::End(self.start.to_end()))?;
        Ok(())
    }
}

/// Whitespace, optionally preceded by a UTF-8 byte order mark.
fn is_blank(bytes: &[u8]) -> bool {
    bytes
        .strip_prefix(b"\xEF\xBB\xBF")
        .unwrap_or(bytes)
        .iter()
        .all(u8::is_ascii_whitespace)
}

fn whitespace(text: String) -> Node {
    Node::Misc(Event::Text(BytesText::from_escaped(text)))
}

fn collect_text(children: &[Node], entities: &Entities, out: &mut String) -> Result<(), Error> {
    for child in children {
        match child {
            Node::Misc(Event::Text(text)) => {
                out.push_str(&text.unescape_with(|entity| resolve(entities, entity))?)
            }
            Node::Misc(Event::CData(cdata)) => out.push_str(&String::from_utf8_lossy(cdata)),
            Node::Element(element) => collect_text(&element.children, entities, out)?,
            Node::Misc(_) => {}
        }
    }
    Ok(())
}

fn resolve<'a>(entities: &'a Entities, entity: &str) -> Option<&'a str> {
    resolve_predefined_entity(entity).or_else(|| entities.get(entity).map(String::as_str))
}

/// Adds the general entities declared in the internal subset of a DOCTYPE.
///
/// The first declaration of a name is binding. Replacement text may refer to
/// entities declared before it; text that cannot be expanded is kept as is.
/// External and parameter entities are ignored.
fn declare_entities(doctype: &[u8], entities: &mut Entities) {
    let subset = String::from_utf8_lossy(doctype);
    for caps in ENTITY_DECL_REGEX.captures_iter(&subset) {
        let raw = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        let value = unescape_with(raw, |entity| resolve(&*entities, entity))
            .map(Cow::into_owned)
            .unwrap_or_else(|_| raw.to_string());
        entities.entry(caps[1].to_string()).or_insert(value);
    }
}

/// One resource file: prolog, a single root element, epilog.
#[derive(Debug, Clone)]
pub struct ResourceDocument {
    prolog: Vec<Event<'static>>,
    root: Element,
    epilog: Vec<Event<'static>>,
    entities: Entities,
}

impl ResourceDocument {
    /// The skeleton of a brand-new resource file: an XML declaration and an
    /// empty `resources` root.
    pub fn empty() -> Self {
        ResourceDocument {
            prolog: vec![
                Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
                Event::Text(BytesText::from_escaped("\n")),
            ],
            root: Element::open(BytesStart::new("resources"), true),
            epilog: vec![Event::Text(BytesText::from_escaped("\n"))],
            entities: Entities::new(),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Names of every string entry below the root, depth first in document
    /// order. Duplicates are listed once per element.
    pub fn string_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.root.collect_strings(&mut out);
        out.into_iter().map(|(name, _)| name).collect()
    }

    /// Every string entry below the root with its decoded value, depth first
    /// in document order.
    pub fn strings(&self) -> Result<Vec<StringEntry>, Error> {
        let mut out = Vec::new();
        self.root.collect_strings(&mut out);
        out.into_iter()
            .map(|(name, element)| self.entry(name, element))
            .collect()
    }

    /// The first string entry called `name`. Only that entry's value is
    /// decoded.
    pub fn find(&self, name: &str) -> Result<Option<StringEntry>, Error> {
        let mut out = Vec::new();
        self.root.collect_strings(&mut out);
        out.into_iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(name, element)| self.entry(name, element))
            .transpose()
    }

    fn entry(&self, name: &str, element: &Element) -> Result<StringEntry, Error> {
        Ok(StringEntry {
            name: name.to_string(),
            value: element.text(&self.entities)?,
        })
    }

    /// Appends `<string name="name">value</string>` as the last child of the
    /// root. Existing entries with the same name are left alone.
    pub fn append_string(&mut self, name: &str, value: &str) {
        self.root.append_element(Element::string(name, value));
    }

    /// Removes every string element whose name satisfies `predicate` and
    /// returns how many were removed.
    ///
    /// Targets are collected in a full pass before the tree is touched, then
    /// removed back to front so the remaining indices stay valid.
    pub fn remove_strings_matching<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        let mut targets = Vec::new();
        self.root
            .collect_matches(&predicate, &mut Vec::new(), &mut targets);

        for path in targets.iter().rev() {
            self.root.remove_at(path);
        }
        targets.len()
    }
}

impl Parser for ResourceDocument {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<Element> = None;
        let mut open: Vec<Element> = Vec::new();
        let mut entities = Entities::new();

        loop {
            let event = xml_reader.read_event_into(&mut buf)?.into_owned();
            let finished = match event {
                Event::Eof => break,
                Event::Start(start) => {
                    let mut element = Element::open(start, false);
                    element.read_entry_name(&entities)?;
                    open.push(element);
                    None
                }
                Event::Empty(start) => {
                    let mut element = Element::open(start, true);
                    element.read_entry_name(&entities)?;
                    Some(element)
                }
                Event::End(_) => {
                    let element = open.pop().ok_or_else(|| {
                        Error::InvalidResource("unexpected closing tag".to_string())
                    })?;
                    Some(element)
                }
                other => {
                    if let Some(parent) = open.last_mut() {
                        parent.children.push(Node::Misc(other));
                    } else {
                        if let Event::Text(text) = &other {
                            if !is_blank(text) {
                                return Err(Error::InvalidResource(
                                    "text outside the root element".to_string(),
                                ));
                            }
                        }
                        if let Event::DocType(doctype) = &other {
                            declare_entities(doctype, &mut entities);
                        }
                        if root.is_none() {
                            prolog.push(other);
                        } else {
                            epilog.push(other);
                        }
                    }
                    None
                }
            };

            if let Some(element) = finished {
                if let Some(parent) = open.last_mut() {
                    parent.children.push(Node::Element(element));
                } else if root.is_none() {
                    root = Some(element);
                } else {
                    return Err(Error::InvalidResource(
                        "more than one root element".to_string(),
                    ));
                }
            }
            buf.clear();
        }

        if let Some(unclosed) = open.last() {
            return Err(Error::InvalidResource(format!(
                "unclosed element <{}>",
                String::from_utf8_lossy(unclosed.name())
            )));
        }
        let root = root.ok_or_else(|| Error::InvalidResource("no root element".to_string()))?;

        Ok(ResourceDocument {
            prolog,
            root,
            epilog,
            entities,
        })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        for event in &self.prolog {
            xml_writer.write_event(event.borrow())?;
        }
        self.root.write(&mut xml_writer)?;
        for event in &self.epilog {
            xml_writer.write_event(event.borrow())?;
        }
        Ok(())
    }
}
