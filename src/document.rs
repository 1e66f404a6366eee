//! Text generation for regenerated table files.
//!
//! The generated layout is fixed: XML declaration, a comment naming the file,
//! its author and the table, then the `<table>` root with four-space indented
//! element blocks and eight-space indented fields.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::Event;

use crate::error::XmlSyntaxError;
use crate::table::ElementGroup;

pub const DEFAULT_AUTHOR: &str = "Carlos Garcia Gomez";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const FOOTER: &str = "</table>";

/// Description line for the header comment.
///
/// Every `.xml` occurrence is removed, not only a trailing one, so
/// `x.xml.xml` describes table `x`.
pub fn table_description(file_name: &str) -> String {
    format!("Structure for the {} table.", file_name.replace(".xml", ""))
}

pub fn render_header(file_name: &str, author: &str) -> String {
    let mut header = String::new();
    header.push_str(XML_DECLARATION);
    header.push('\n');
    header.push_str("<!--\n");
    header.push_str(&format!("    Document   : {}\n", file_name));
    header.push_str(&format!("    Author     : {}\n", author));
    header.push_str(&format!("    Description: {}\n", table_description(file_name)));
    header.push_str("-->\n");
    header.push_str("<table>\n");
    header
}

/// Serialize a group as consecutive `<tag>` blocks, one line per field
pub fn render_group(group: &ElementGroup) -> String {
    let mut content = String::new();
    for element in group.elements() {
        content.push_str(&format!("    <{}>\n", group.tag()));
        for field in element.fields() {
            content.push_str(&format!(
                "        <{name}>{value}</{name}>\n",
                name = field.name,
                value = partial_escape(&field.value)
            ));
        }
        content.push_str(&format!("    </{}>\n", group.tag()));
    }
    content
}

pub fn render_footer() -> &'static str {
    FOOTER
}

/// Re-parse generated text and write it back out event by event.
///
/// Fails on anything that is not a single well-formed element tree, which
/// catches field names or header text that would break the document. The
/// result always ends with a newline.
pub fn normalize(xml: &str) -> Result<String, XmlSyntaxError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_comments = true;
    let mut writer = Writer::new(Vec::new());
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| XmlSyntaxError::new(reader.error_position() as u64, e.to_string()))?;

        match &event {
            Event::Eof => break,
            Event::Start(_) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Event::Empty(_) if depth == 0 => roots += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }

        writer
            .write_event(event)
            .map_err(|e| XmlSyntaxError::new(reader.buffer_position() as u64, e.to_string()))?;
    }

    if depth != 0 || roots != 1 {
        return Err(XmlSyntaxError::new(
            reader.buffer_position() as u64,
            format!("expected exactly one closed root element, found {}", roots),
        ));
    }

    let mut normalized = String::from_utf8(writer.into_inner())
        .map_err(|e| XmlSyntaxError::new(reader.buffer_position() as u64, e.to_string()))?;
    if !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    Ok(normalized)
}
