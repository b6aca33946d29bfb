use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Container format declared by the ftyp major brand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ContainerFormat {
    MP4,
    M4V,
    ThreeGP,
    ThreeG2,
    MOV,
    Unknown(String),
}

impl ContainerFormat {
    pub fn name(&self) -> &str {
        match self {
            ContainerFormat::MP4 => "MP4",
            ContainerFormat::M4V => "M4V",
            ContainerFormat::ThreeGP => "3GP",
            ContainerFormat::ThreeG2 => "3G2",
            ContainerFormat::MOV => "MOV",
            ContainerFormat::Unknown(s) => s,
        }
    }
}

/// Decoded ftyp box
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileType {
    pub major_brand: String,
    pub minor_version: u32,
    pub compatible_brands: Vec<String>,
}

/// One recorded second as calendar fields, always UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Timestamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Timestamp {
    /// `DD/MM/YYYY`
    pub fn date_line(&self) -> String {
        format!("{:02}/{:02}/{}", self.day, self.month, self.year)
    }

    /// `HH:MM:SS`
    pub fn time_line(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(t: DateTime<Utc>) -> Self {
        Timestamp {
            year: t.year(),
            month: t.month(),
            day: t.day(),
            hour: t.hour(),
            minute: t.minute(),
            second: t.second(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date_line(), self.time_line())
    }
}

/// Fields recovered from a vendor XML document embedded in a meta box
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct XmlMetadata {
    pub creation_date: Option<String>,
    pub device_fields: BTreeMap<String, String>,
}

impl XmlMetadata {
    pub fn is_empty(&self) -> bool {
        self.creation_date.is_none() && self.device_fields.is_empty()
    }

    /// Fold a later document into this one; later values win.
    pub fn merge(&mut self, other: XmlMetadata) {
        if other.creation_date.is_some() {
            self.creation_date = other.creation_date;
        }
        self.device_fields.extend(other.device_fields);
    }
}
