//! Table documents
//!
//! In-memory model of one table-definition file: a root element holding an
//! ordered list of child elements, each of which is a flat, ordered list of
//! `<field>value</field>` pairs.
//!
//! Groups are always sequences. A document with a single `column` yields a
//! group of length one, a document without any yields an empty group.

use std::borrow::Cow;
use std::cmp::Ordering;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::XmlSyntaxError;

pub const COLUMN_TAG: &str = "column";
pub const CONSTRAINT_TAG: &str = "constraint";

/// One named sub-field of a table element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A direct child of the root element, e.g. one `<column>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableElement {
    tag: String,
    fields: Vec<Field>,
}

impl TableElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field::new(name, value));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Value of the first sub-field called `name`
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}

/// All children of one tag, in document order until sorted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementGroup {
    tag: String,
    elements: Vec<TableElement>,
}

impl ElementGroup {
    pub fn new(tag: impl Into<String>, elements: Vec<TableElement>) -> Self {
        Self {
            tag: tag.into(),
            elements,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn elements(&self) -> &[TableElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Stable sort on the value of sub-field `key`, ignoring ASCII case.
    ///
    /// An element lacking `key` sorts as if the value were empty.
    pub fn sort_by_field(&mut self, key: &str) {
        if self.elements.len() < 2 {
            return;
        }

        let missing = self
            .elements
            .iter()
            .filter(|element| element.field(key).is_none())
            .count();
        if missing > 0 {
            tracing::warn!(
                group = %self.tag,
                key,
                missing,
                "elements without sort key are ordered as empty values"
            );
        }

        self.elements.sort_by(|a, b| {
            compare_ignore_ascii_case(a.field(key).unwrap_or(""), b.field(key).unwrap_or(""))
        });
    }
}

/// Byte-wise comparison after folding ASCII letters to lower case
pub fn compare_ignore_ascii_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|byte| byte.to_ascii_lowercase())
        .cmp(b.bytes().map(|byte| byte.to_ascii_lowercase()))
}

/// Parsed content of one table-definition file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDocument {
    root: String,
    children: Vec<TableElement>,
}

impl TableDocument {
    pub fn new(root: impl Into<String>, children: Vec<TableElement>) -> Self {
        Self {
            root: root.into(),
            children,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn children(&self) -> &[TableElement] {
        &self.children
    }

    /// Collect every child with the given tag, keeping document order
    pub fn group(&self, tag: &str) -> ElementGroup {
        let elements = self
            .children
            .iter()
            .filter(|child| child.tag == tag)
            .cloned()
            .collect();
        ElementGroup::new(tag, elements)
    }

    /// Parse a table document.
    ///
    /// Depth 1 is the root, depth 2 the table elements, depth 3 their fields.
    /// Markup nested below a field contributes only its text. Attributes,
    /// comments and processing instructions are ignored.
    pub fn parse(xml: &str) -> Result<Self, XmlSyntaxError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().check_comments = true;

        let mut root: Option<String> = None;
        let mut root_closed = false;
        let mut children = Vec::new();
        let mut current: Option<TableElement> = None;
        let mut field: Option<Field> = None;
        let mut depth = 0usize;

        loop {
            let event = reader.read_event().map_err(|e| {
                XmlSyntaxError::new(reader.error_position() as u64, e.to_string())
            })?;

            match event {
                Event::Start(start) => {
                    let name = element_name(&start, reader.buffer_position() as u64)?;
                    depth += 1;
                    match depth {
                        1 => {
                            if root_closed {
                                return Err(XmlSyntaxError::new(
                                    reader.buffer_position() as u64,
                                    "multiple root elements",
                                ));
                            }
                            root = Some(name);
                        }
                        2 => current = Some(TableElement::new(name)),
                        3 => field = Some(Field::new(name, String::new())),
                        _ => {}
                    }
                }
                Event::Empty(start) => {
                    let name = element_name(&start, reader.buffer_position() as u64)?;
                    match depth + 1 {
                        1 => {
                            if root_closed {
                                return Err(XmlSyntaxError::new(
                                    reader.buffer_position() as u64,
                                    "multiple root elements",
                                ));
                            }
                            root = Some(name);
                            root_closed = true;
                        }
                        2 => children.push(TableElement::new(name)),
                        3 => {
                            if let Some(element) = current.as_mut() {
                                element.fields.push(Field::new(name, String::new()));
                            }
                        }
                        _ => {}
                    }
                }
                Event::End(_) => {
                    match depth {
                        1 => root_closed = true,
                        2 => {
                            if let Some(element) = current.take() {
                                children.push(element);
                            }
                        }
                        3 => {
                            if let (Some(element), Some(done)) = (current.as_mut(), field.take()) {
                                element.fields.push(done);
                            }
                        }
                        _ => {}
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Text(text) => {
                    let raw = std::str::from_utf8(&text).map_err(|e| {
                        XmlSyntaxError::new(reader.buffer_position() as u64, e.to_string())
                    })?;
                    if depth == 0 && !raw.trim().is_empty() {
                        return Err(XmlSyntaxError::new(
                            reader.buffer_position() as u64,
                            "text outside of the root element",
                        ));
                    }
                    if let Some(open) = field.as_mut() {
                        let raw = normalize_line_endings(raw);
                        open.value
                            .push_str(&unescape(&raw, reader.buffer_position() as u64)?);
                    }
                }
                Event::GeneralRef(reference) => {
                    if let Some(open) = field.as_mut() {
                        let name = std::str::from_utf8(&reference).map_err(|e| {
                            XmlSyntaxError::new(reader.buffer_position() as u64, e.to_string())
                        })?;
                        let entity = format!("&{};", name);
                        open.value
                            .push_str(&unescape(&entity, reader.buffer_position() as u64)?);
                    }
                }
                Event::CData(data) => {
                    if let Some(open) = field.as_mut() {
                        let raw = std::str::from_utf8(&data).map_err(|e| {
                            XmlSyntaxError::new(reader.buffer_position() as u64, e.to_string())
                        })?;
                        open.value.push_str(&normalize_line_endings(raw));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth != 0 {
            return Err(XmlSyntaxError::new(
                reader.buffer_position() as u64,
                "unexpected end of document inside an open element",
            ));
        }

        let root = root.ok_or_else(|| {
            XmlSyntaxError::new(reader.buffer_position() as u64, "document has no root element")
        })?;

        Ok(Self { root, children })
    }
}

fn element_name(start: &BytesStart<'_>, position: u64) -> Result<String, XmlSyntaxError> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_string)
        .map_err(|e| XmlSyntaxError::new(position, e.to_string()))
}

/// XML end-of-line handling: `\r\n` and lone `\r` become `\n`.
///
/// Runs before entity resolution so a `&#13;` reference still yields `\r`.
fn normalize_line_endings(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

fn unescape(raw: &str, position: u64) -> Result<Cow<'_, str>, XmlSyntaxError> {
    quick_xml::escape::unescape(raw).map_err(|e| XmlSyntaxError::new(position, e.to_string()))
}
