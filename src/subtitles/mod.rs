mod types;
mod utils;
mod writer;

pub use types::CaptionEntry;
pub use utils::{format_timestamp, has_mp4_extension, srt_path_for};
pub use writer::{captions_from_timestamps, write_srt, write_srt_file};

#[cfg(test)]
pub mod unit_test;
