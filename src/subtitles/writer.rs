use super::types::CaptionEntry;
use super::utils::format_timestamp;
use crate::errors::{Mp4SrtResult, SubtitleError};
use crate::metadata::Timestamp;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Build one contiguous one-second caption per timestamp.
///
/// Caption `n` covers `[n - 1, n)` seconds of the track no matter how far apart the
/// recorded times are.
pub fn captions_from_timestamps(timestamps: &[Timestamp]) -> Mp4SrtResult<Vec<CaptionEntry>> {
    if timestamps.len() > u32::MAX as usize {
        return Err(SubtitleError::new(format!(
            "{} captions do not fit in an SRT track",
            timestamps.len()
        ))
        .into());
    }

    Ok(timestamps
        .iter()
        .zip(0u32..)
        .map(|(timestamp, start)| CaptionEntry {
            index: start as usize + 1,
            start_seconds: start,
            end_seconds: start + 1,
            date_line: timestamp.date_line(),
            time_line: timestamp.time_line(),
        })
        .collect())
}

impl CaptionEntry {
    /// Render as an SRT block, blank separator line included
    pub fn to_srt_block(&self) -> String {
        format!(
            "{}\n{} --> {}\n{}\n{}\n\n",
            self.index,
            format_timestamp(self.start_seconds as f64),
            format_timestamp(self.end_seconds as f64),
            self.date_line,
            self.time_line
        )
    }
}

/// Serialize captions for `timestamps` into `writer`
pub fn write_srt<W: Write>(writer: &mut W, timestamps: &[Timestamp]) -> Mp4SrtResult<usize> {
    let captions = captions_from_timestamps(timestamps)?;
    for caption in &captions {
        writer.write_all(caption.to_srt_block().as_bytes())?;
    }
    writer.flush()?;
    Ok(captions.len())
}

/// Create (or truncate) `path` and write the caption track into it
pub fn write_srt_file<P: AsRef<Path>>(path: P, timestamps: &[Timestamp]) -> Mp4SrtResult<usize> {
    let path = path.as_ref();
    info!("Writing timecodes to SRT file... {}", path.display());
    let mut writer = BufWriter::new(File::create(path)?);
    let written = write_srt(&mut writer, timestamps)?;
    info!("Wrote {} captions", written);
    Ok(written)
}
