use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{Element, Node, XmlDocument, XmlError};

pub(super) fn write_document(document: &XmlDocument) -> Result<String, XmlError> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, document.root())?;
    String::from_utf8(writer.into_inner()).map_err(XmlError::write)
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), XmlError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(XmlError::write);
    }

    writer
        .write_event(Event::Start(start))
        .map_err(XmlError::write)?;
    for child in &element.children {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(XmlError::write)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(XmlError::write)
}
