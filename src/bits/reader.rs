/*
# Bits Reader Module

 Provides utilities for reading big-endian integers from streams and byte arrays.
 MP4 boxes store every multi-byte field in network byte order, so all readers here are big endian.

 Key components:
 - Stream readers: `read_u32_be()`, `read_u64_be()`
 - Slice readers: `read_u32()`, `read_u64()` with position tracking
 - Fixed offset readers: `u32_at()`, `u64_at()` for fixed-layout boxes
*/

use std::io::{self, Read};

/// Read a 32-bit big endian value from `r`.
pub fn read_u32_be<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

/// Read a 64-bit big endian value from `r`.
pub fn read_u64_be<R: Read>(r: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_be_bytes(buf))
}

/// Read a 32-bit big endian value from a byte slice advancing the position.
pub fn read_u32(data: &[u8], pos: &mut usize) -> Option<u32> {
    let v = u32_at(data, *pos)?;
    *pos += 4;
    Some(v)
}

/// Read a 64-bit big endian value from a byte slice advancing the position.
pub fn read_u64(data: &[u8], pos: &mut usize) -> Option<u64> {
    let v = u64_at(data, *pos)?;
    *pos += 8;
    Some(v)
}

/// Read a 16-bit big endian value at a fixed offset.
pub fn u16_at(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

/// Read a 32-bit big endian value at a fixed offset.
pub fn u32_at(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Read a 64-bit big endian value at a fixed offset.
pub fn u64_at(data: &[u8], offset: usize) -> Option<u64> {
    let bytes = data.get(offset..offset.checked_add(8)?)?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    Some(u64::from_be_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_stream_readers() {
        let data = [0x00u8, 0x00, 0x00, 0x03, 0, 0, 0, 0, 0, 0, 0x01, 0x00, 0xff];
        let mut r = Cursor::new(&data);
        assert_eq!(read_u32_be(&mut r).unwrap(), 3);
        assert_eq!(read_u64_be(&mut r).unwrap(), 256);
        assert!(read_u32_be(&mut r).is_err());
    }

    #[test]
    fn test_slice_readers_advance() {
        let data = [0, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0, 9];
        let mut pos = 0;
        assert_eq!(read_u32(&data, &mut pos), Some(7));
        assert_eq!(pos, 4);
        assert_eq!(read_u64(&data, &mut pos), Some(9));
        assert_eq!(pos, 12);
        assert_eq!(read_u32(&data, &mut pos), None);
        assert_eq!(pos, 12);
    }

    #[test]
    fn test_fixed_offset_readers() {
        let data = [0xaa, 0x01, 0x00, 0x00, 0x00, 0x10];
        assert_eq!(u16_at(&data, 0), Some(0xaa01));
        assert_eq!(u32_at(&data, 2), Some(16));
        assert_eq!(u32_at(&data, 3), None);
        assert_eq!(u64_at(&data, usize::MAX), None);
    }
}
