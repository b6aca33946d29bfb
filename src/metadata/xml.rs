use super::types::XmlMetadata;
use crate::errors::MetadataError;
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const CREATION_DATE_KEY: &str = "creationdate";
const DEVICE_KEY: &str = "device";

/// Parse a vendor XML document and collect the creation date and device description.
///
/// Only direct children of the root element are inspected. Tags are matched on their
/// lowercased local name, so `<CreationDate>` and `<ns:creationDate>` are both accepted.
pub fn parse_xml_metadata(xml: &str) -> Result<XmlMetadata, MetadataError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut metadata = XmlMetadata::default();
    let mut depth = 0usize;
    let mut root_seen = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            MetadataError::new(format!(
                "Malformed XML at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(ref e) => {
                check_single_root(depth, root_seen)?;
                root_seen = true;
                if depth == 1 {
                    read_root_child(e, &mut metadata)?;
                }
                depth += 1;
            }
            Event::Empty(ref e) => {
                check_single_root(depth, root_seen)?;
                root_seen = true;
                if depth == 1 {
                    read_root_child(e, &mut metadata)?;
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(MetadataError::new("XML document has no root element"));
    }
    if depth != 0 {
        return Err(MetadataError::new(format!(
            "XML document ended with {} unclosed element(s)",
            depth
        )));
    }

    Ok(metadata)
}

fn check_single_root(depth: usize, root_seen: bool) -> Result<(), MetadataError> {
    if depth == 0 && root_seen {
        return Err(MetadataError::new("XML document has more than one root element"));
    }
    Ok(())
}

fn read_root_child(element: &BytesStart, metadata: &mut XmlMetadata) -> Result<(), MetadataError> {
    let key = String::from_utf8_lossy(element.local_name().as_ref()).to_lowercase();
    match key.as_str() {
        CREATION_DATE_KEY => {
            for (name, value) in attributes(element)? {
                if name == "value" {
                    debug!("XML creation date: {}", value);
                    metadata.creation_date = Some(value);
                }
            }
        }
        DEVICE_KEY => {
            for (name, value) in attributes(element)? {
                if name == "xmlns" || name.starts_with("xmlns:") {
                    continue;
                }
                debug!("XML device field {} = {}", name, value);
                metadata.device_fields.insert(name, value);
            }
        }
        _ => {}
    }
    Ok(())
}

fn attributes(element: &BytesStart) -> Result<Vec<(String, String)>, MetadataError> {
    let mut out = Vec::new();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| MetadataError::new(format!("Malformed XML attribute: {}", e)))?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| MetadataError::new(format!("Malformed value for {}: {}", name, e)))?;
        out.push((name, value.into_owned()));
    }
    Ok(out)
}
