pub mod r#box;
pub use r#box::{parse_box_header, read_box, Mp4Box};
pub mod ftyp;
pub use ftyp::{decode_ftyp, parse_ftyp_brand};
pub mod meta;
pub use meta::decode_meta;
pub mod mvhd;
pub use mvhd::{decode_mvhd, decode_mvhd_timestamps, MovieHeader};
pub mod walker; // Bounded recursive descent, stops at the first mvhd or meta
pub use walker::{walk_boxes, ParseEvent, WalkOutcome, WalkReport};
