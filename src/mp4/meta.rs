use super::r#box::parse_box_header;
use crate::errors::MetadataError;
use crate::metadata::{parse_xml_metadata, XmlMetadata};
use log::{debug, info, warn};

/// Header, version and flags preceding the first child of a meta box
pub const META_PREAMBLE_SIZE: usize = 12;

/// Scan the children of a full meta box (header included) for embedded XML documents.
///
/// Returns `Ok(None)` when no child carries XML. The scan stops at the first child whose
/// declared size cannot advance the cursor or reaches past the end of the box.
pub fn decode_meta(data: &[u8]) -> Result<Option<XmlMetadata>, MetadataError> {
    let mut found: Option<XmlMetadata> = None;
    let mut pos = META_PREAMBLE_SIZE;

    while pos < data.len() {
        let start = pos;
        let (name, size, header_len) = match parse_box_header(data, &mut pos) {
            Some(header) => header,
            None => {
                debug!("meta: truncated child header at offset {}", start);
                break;
            }
        };

        let size = usize::try_from(size).unwrap_or(usize::MAX);
        if size < header_len.max(8) {
            warn!(
                "meta: child {} at offset {} declares invalid size {}, stopping scan",
                String::from_utf8_lossy(&name),
                start,
                size
            );
            break;
        }
        let end = start.saturating_add(size);

        if is_xml_box(&name) {
            info!("meta: found embedded XML in child {}", String::from_utf8_lossy(&name));
            let document = xml_payload_to_string(&data[pos..end.min(data.len())])?;
            let record = parse_xml_metadata(&document)?;
            found.get_or_insert_with(XmlMetadata::default).merge(record);
        }

        if end > data.len() {
            debug!("meta: child at offset {} overruns the box, stopping scan", start);
            break;
        }
        pos = end;
    }

    Ok(found)
}

/// Child types carrying XML contain the lowercase substring `xml`
pub fn is_xml_box(name: &[u8; 4]) -> bool {
    name.windows(3).any(|w| w == b"xml")
}

fn xml_payload_to_string(payload: &[u8]) -> Result<String, MetadataError> {
    let cleaned: Vec<u8> = payload.iter().copied().filter(|&b| b != 0).collect();
    String::from_utf8(cleaned)
        .map_err(|e| MetadataError::new(format!("Embedded XML is not valid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mp4::r#box::write_box_header;

    fn child(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        write_box_header(&mut out, name, (payload.len() + 8) as u32);
        out.extend_from_slice(payload);
        out
    }

    fn meta(children: &[Vec<u8>]) -> Vec<u8> {
        let body: Vec<u8> = children.concat();
        let mut out = Vec::new();
        write_box_header(&mut out, b"meta", (body.len() + 12) as u32);
        out.extend_from_slice(&[0, 0, 0, 0]);
        out.extend_from_slice(&body);
        out
    }

    #[test]
    fn test_extracts_creation_date_and_device() {
        let xml = br#"<root xmlns="urn:test"><CreationDate value="2024-01-01"/><Device model="X"/></root>"#;
        let data = meta(&[child(b"hdlr", &[0u8; 16]), child(b"xml ", xml)]);

        let record = decode_meta(&data).unwrap().unwrap();
        assert_eq!(record.creation_date.as_deref(), Some("2024-01-01"));
        assert_eq!(record.device_fields.len(), 1);
        assert_eq!(record.device_fields["model"], "X");
    }

    #[test]
    fn test_null_padding_is_stripped() {
        let mut xml = br#"<r><creationdate value="2024-01-01"/></r>"#.to_vec();
        xml.extend_from_slice(&[0u8; 7]);
        let data = meta(&[child(b"bxml", &xml)]);

        let record = decode_meta(&data).unwrap().unwrap();
        assert_eq!(record.creation_date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_type_match_is_case_sensitive() {
        let xml = br#"<r><creationdate value="2024-01-01"/></r>"#;
        let data = meta(&[child(b"XML ", xml)]);
        assert_eq!(decode_meta(&data).unwrap(), None);
    }

    #[test]
    fn test_zero_size_child_terminates() {
        let mut data = meta(&[child(b"hdlr", &[0u8; 4])]);
        data.extend_from_slice(&[0, 0, 0, 0, b'x', b'm', b'l', b' ']);
        data.extend_from_slice(b"<r/>");
        assert_eq!(decode_meta(&data).unwrap(), None);
    }

    #[test]
    fn test_overrunning_child_is_read_then_scan_stops() {
        let xml = br#"<r><Device model="Z"/></r>"#;
        let mut data = meta(&[]);
        write_box_header(&mut data, b"xml ", 4096);
        data.extend_from_slice(xml);

        let record = decode_meta(&data).unwrap().unwrap();
        assert_eq!(record.device_fields["model"], "Z");
    }

    #[test]
    fn test_malformed_xml_is_reported() {
        let data = meta(&[child(b"xml ", b"<r><Device model=\"X\"></r>")]);
        assert!(decode_meta(&data).is_err());
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let data = meta(&[child(b"xml ", &[b'<', 0xff, b'/', b'>'])]);
        assert!(decode_meta(&data).is_err());
    }

    #[test]
    fn test_preamble_only() {
        assert_eq!(decode_meta(&meta(&[])).unwrap(), None);
        assert_eq!(decode_meta(&[0u8; 4]).unwrap(), None);
    }
}
