mod types;
mod xml;

pub use types::*;
pub use xml::parse_xml_metadata;
