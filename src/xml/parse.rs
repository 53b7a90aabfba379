use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{Element, Node, XmlError};

pub(super) fn parse_document(xml: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(XmlError::malformed)? {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let element = element_from(&start)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                // quick-xml has already matched the end tag name against the open one
                let mut element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Malformed("unexpected end tag".to_string()))?;
                drop_layout_whitespace(&mut element);
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(XmlError::malformed)?;
                push_text(&mut stack, &text);
            }
            Event::CData(data) => {
                let text = String::from_utf8(data.into_inner().into_owned())
                    .map_err(XmlError::malformed)?;
                push_text(&mut stack, &text);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no slots
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Unclosed(open.name.clone()));
    }

    root.ok_or(XmlError::Empty)
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(XmlError::malformed)?
        .to_string();
    let mut element = Element::new(name);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(XmlError::malformed)?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(XmlError::malformed)?
            .to_string();
        let value = attribute
            .unescape_value()
            .map_err(XmlError::malformed)?
            .into_owned();
        element.set_attribute(key, value);
    }

    Ok(element)
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::MultipleRoots);
    }
    *root = Some(element);
    Ok(())
}

/// Whitespace between child elements is indentation. Text of a leaf element is kept as is.
fn drop_layout_whitespace(element: &mut Element) {
    let has_child_elements = element
        .children
        .iter()
        .any(|child| matches!(child, Node::Element(_)));
    if has_child_elements {
        element
            .children
            .retain(|child| !matches!(child, Node::Text(text) if text.trim().is_empty()));
    }
}

fn push_text(stack: &mut [Element], text: &str) {
    if text.is_empty() {
        return;
    }
    // Text outside the root element is not part of the tree
    let Some(parent) = stack.last_mut() else {
        return;
    };
    match parent.children.last_mut() {
        Some(Node::Text(existing)) => existing.push_str(text),
        _ => parent.children.push(Node::Text(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_text_keeps_whitespace() {
        let root = parse_document(r#"<toast><text id="1">  padded  </text></toast>"#).unwrap();
        let text = root.child_elements().next().unwrap();
        assert_eq!(text.text(), "  padded  ");
    }

    #[test]
    fn test_indentation_between_elements_is_dropped() {
        let xml = "<?xml version=\"1.0\"?>\n<tile>\n  <visual>\n    <binding template=\"T\">\n      <text id=\"1\"></text>\n    </binding>\n  </visual>\n</tile>\n";
        let root = parse_document(xml).unwrap();

        let expected = Element::new("tile").with_child(
            Element::new("visual").with_child(
                Element::new("binding")
                    .with_attribute("template", "T")
                    .with_child(Element::new("text").with_attribute("id", "1")),
            ),
        );
        assert_eq!(root, expected);
    }
}
