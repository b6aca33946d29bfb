use crate::bits::reader::u32_at;
use crate::errors::Mp4Error;
use crate::metadata::{ContainerFormat, FileType};

/// Decode the payload of an ftyp box (the bytes after its header)
pub fn decode_ftyp(payload: &[u8]) -> Result<FileType, Mp4Error> {
    if payload.len() < 8 {
        return Err(Mp4Error::FtypTooShort { len: payload.len() });
    }

    let major_brand = String::from_utf8_lossy(&payload[0..4]).into_owned();
    let minor_version = u32_at(payload, 4).ok_or(Mp4Error::FtypTooShort { len: payload.len() })?;
    let compatible_brands = payload[8..]
        .chunks_exact(4)
        .map(|brand| String::from_utf8_lossy(brand).into_owned())
        .collect();

    Ok(FileType {
        major_brand,
        minor_version,
        compatible_brands,
    })
}

impl FileType {
    pub fn format(&self) -> ContainerFormat {
        parse_ftyp_brand(&self.major_brand)
    }
}

/// Map an ftyp major brand to the corresponding container format
pub fn parse_ftyp_brand(major_brand: &str) -> ContainerFormat {
    match major_brand {
        "isom" | "mp41" | "mp42" | "iso2" | "iso4" | "iso5" | "iso6" | "avc1" | "XAVC" => {
            ContainerFormat::MP4
        }
        "M4V " | "M4VH" | "M4VP" => ContainerFormat::M4V,
        "3gp4" | "3gp5" | "3gp6" | "3gp7" | "3ge6" | "3ge7" | "3gg6" => ContainerFormat::ThreeGP,
        "3g2a" | "3g2b" | "3g2c" => ContainerFormat::ThreeG2,
        "qt  " => ContainerFormat::MOV,
        _ => ContainerFormat::Unknown(major_brand.to_string()),
    }
}

/// Get format name as string for display
pub fn format_to_string(format: &ContainerFormat) -> String {
    match format {
        ContainerFormat::MP4 => "MP4 (ISO Base Media)".to_string(),
        ContainerFormat::M4V => "M4V (iTunes Video)".to_string(),
        ContainerFormat::ThreeGP => "3GP (3rd Generation Partnership Project)".to_string(),
        ContainerFormat::ThreeG2 => "3G2 (3GPP2)".to_string(),
        ContainerFormat::MOV => "MOV (QuickTime)".to_string(),
        ContainerFormat::Unknown(brand) => format!("Unknown format ({})", brand),
    }
}
