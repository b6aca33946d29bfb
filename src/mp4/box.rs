use crate::bits::reader::{read_u32, read_u32_be, read_u64, read_u64_be};
use crate::errors::Mp4SrtResult;
use std::io::{self, Read, Seek};

/// Size of a compact box header (size + type)
pub const BOX_HEADER_SIZE: u64 = 8;
/// Size of a header that carries the 64-bit size extension
pub const EXTENDED_BOX_HEADER_SIZE: u64 = 16;

/// One box header as read from a stream
#[derive(Debug, Clone, PartialEq)]
pub struct Mp4Box {
    pub name: String,
    pub name_bytes: [u8; 4],
    pub size: u64,
    pub header_size: u64,
    pub start_offset: u64,
}

impl Mp4Box {
    /// Absolute offset of the first payload byte
    pub fn content_start(&self) -> u64 {
        self.start_offset + self.header_size
    }

    /// Absolute offset one past the last byte of the box
    pub fn end_offset(&self) -> Option<u64> {
        self.start_offset.checked_add(self.size)
    }

    pub fn is(&self, name: &[u8; 4]) -> bool {
        &self.name_bytes == name
    }
}

/// Read a box header at the current stream position.
///
/// Returns `Ok(None)` when fewer than 8 header bytes (or fewer than 8 extended size bytes)
/// remain, which is how sibling iteration ends.
pub fn read_box<R: Read + Seek>(r: &mut R) -> Mp4SrtResult<Option<Mp4Box>> {
    let start_offset = r.stream_position()?;

    let size32 = match eof_as_none(read_u32_be(r))? {
        Some(v) => v,
        None => return Ok(None),
    };
    let mut name_bytes = [0u8; 4];
    if eof_as_none(r.read_exact(&mut name_bytes))?.is_none() {
        return Ok(None);
    }

    let mut size = size32 as u64;
    let mut header_size = BOX_HEADER_SIZE;
    if size32 == 1 {
        size = match eof_as_none(read_u64_be(r))? {
            Some(v) => v,
            None => return Ok(None),
        };
        header_size = EXTENDED_BOX_HEADER_SIZE;
    }

    Ok(Some(Mp4Box {
        name: String::from_utf8_lossy(&name_bytes).into_owned(),
        name_bytes,
        size,
        header_size,
        start_offset,
    }))
}

fn eof_as_none<T>(res: io::Result<T>) -> io::Result<Option<T>> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e),
    }
}

/// Parse a box header from a byte slice advancing the cursor.
///
/// Returns the type bytes, the declared size and the header length.
pub fn parse_box_header(data: &[u8], pos: &mut usize) -> Option<([u8; 4], u64, usize)> {
    let start = *pos;
    if start.checked_add(8)? > data.len() {
        return None;
    }
    let size = read_u32(data, pos)? as u64;
    let mut name = [0u8; 4];
    name.copy_from_slice(&data[*pos..*pos + 4]);
    *pos += 4;
    let mut real_size = size;
    if size == 1 {
        real_size = match read_u64(data, pos) {
            Some(v) => v,
            None => {
                *pos = start;
                return None;
            }
        };
    }
    Some((name, real_size, *pos - start))
}

/// Write a compact box header to a vector
pub fn write_box_header(output: &mut Vec<u8>, name: &[u8; 4], size: u32) {
    output.extend_from_slice(&size.to_be_bytes());
    output.extend_from_slice(name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_compact_header() {
        let mut data = Vec::new();
        write_box_header(&mut data, b"ftyp", 16);
        data.extend_from_slice(&[0u8; 8]);
        let mut cursor = Cursor::new(data);

        let header = read_box(&mut cursor).unwrap().unwrap();
        assert_eq!(header.name, "ftyp");
        assert_eq!(header.size, 16);
        assert_eq!(header.header_size, 8);
        assert_eq!(header.start_offset, 0);
        assert_eq!(header.content_start(), 8);
        assert_eq!(header.end_offset(), Some(16));
    }

    #[test]
    fn test_read_extended_header() {
        let mut data = vec![0u8; 4];
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(b"mdat");
        data.extend_from_slice(&24u64.to_be_bytes());
        data.extend_from_slice(&[0xaa; 8]);
        let mut cursor = Cursor::new(data);
        cursor.set_position(4);

        let header = read_box(&mut cursor).unwrap().unwrap();
        assert_eq!(header.name, "mdat");
        assert_eq!(header.size, 24);
        assert_eq!(header.header_size, 16);
        assert_eq!(header.start_offset, 4);
        assert_eq!(header.content_start(), 20);
        assert_eq!(cursor.position(), 20);
    }

    #[test]
    fn test_short_header_is_end_of_stream() {
        let mut cursor = Cursor::new(vec![0u8, 0, 0, 8, b'f', b'r']);
        assert!(read_box(&mut cursor).unwrap().is_none());

        let mut truncated_extension = Vec::new();
        write_box_header(&mut truncated_extension, b"mdat", 1);
        truncated_extension.extend_from_slice(&[0, 0, 0]);
        let mut cursor = Cursor::new(truncated_extension);
        assert!(read_box(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn test_invalid_utf8_type_is_lossy() {
        let mut cursor = Cursor::new(vec![0, 0, 0, 8, 0xa9, b'n', b'a', b'm']);
        let header = read_box(&mut cursor).unwrap().unwrap();
        assert_eq!(header.name, "\u{FFFD}nam");
        assert_eq!(header.name_bytes, [0xa9, b'n', b'a', b'm']);
    }

    #[test]
    fn test_parse_box_header_from_slice() {
        let mut data = Vec::new();
        write_box_header(&mut data, b"XMLa", 12);
        data.extend_from_slice(b"<a/>");
        let mut pos = 0;
        assert_eq!(parse_box_header(&data, &mut pos), Some((*b"XMLa", 12, 8)));
        assert_eq!(pos, 8);
        assert_eq!(parse_box_header(&data, &mut pos), None);
    }
}
