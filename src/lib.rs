pub mod bits;

pub mod mp4;
pub use mp4::{walk_boxes, MovieHeader, ParseEvent, WalkOutcome, WalkReport};

pub mod streams;
pub use streams::{LocalSeekableStream, SeekableStream};

pub mod subtitles;
pub use subtitles::{format_timestamp, srt_path_for, CaptionEntry};

pub mod metadata;
pub use metadata::{ContainerFormat, FileType, Timestamp, XmlMetadata};

pub mod errors;
pub use errors::{MetadataError, Mp4Error, Mp4SrtError, Mp4SrtResult, SubtitleError};

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What a conversion found and produced
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ScanSummary {
    pub input: PathBuf,
    pub file_type: Option<FileType>,
    pub creation_time: Option<DateTime<Utc>>,
    pub duration_seconds: Option<u64>,
    pub xml_metadata: Option<XmlMetadata>,
    pub srt_path: Option<PathBuf>,
    pub captions_written: usize,
    pub problems: Vec<String>,
}

/// Walk the boxes of a local file until the first mvhd or meta box
pub fn scan_file<P: AsRef<Path>>(path: P) -> Mp4SrtResult<WalkReport> {
    let mut stream = LocalSeekableStream::open(path)?;
    walk_boxes(&mut stream)
}

/// Per-second recording timestamps of a local file.
///
/// Empty when the walk ends on a meta box or finds no movie header.
pub fn extract_timecodes<P: AsRef<Path>>(path: P) -> Mp4SrtResult<Vec<Timestamp>> {
    match scan_file(path)?.outcome {
        WalkOutcome::MovieHeader(Ok(header)) => Ok(header.timestamps()),
        WalkOutcome::MovieHeader(Err(e)) => Err(e.into()),
        WalkOutcome::Meta(_) | WalkOutcome::NotFound => Ok(Vec::new()),
    }
}

/// Scan `input` and write its timecode track as SRT.
///
/// The track goes to `output`, or next to the input with an `.srt` extension. Nothing is
/// written unless the first movie header yields at least one timestamp.
pub fn write_timecode_srt<P: AsRef<Path>>(
    input: P,
    output: Option<&Path>,
) -> Mp4SrtResult<ScanSummary> {
    let input = input.as_ref();
    info!("Reading video file: {}", input.display());
    let report = scan_file(input)?;

    let mut summary = ScanSummary {
        input: input.to_path_buf(),
        file_type: report.file_type().cloned(),
        creation_time: None,
        duration_seconds: None,
        xml_metadata: None,
        srt_path: None,
        captions_written: 0,
        problems: Vec::new(),
    };

    for event in &report.events {
        match event {
            ParseEvent::InvalidBoxSize {
                box_type,
                size,
                start_offset,
            } => summary.problems.push(format!(
                "invalid size {} for box {} at {}",
                size, box_type, start_offset
            )),
            ParseEvent::DecodeFailed { box_type, reason } => summary
                .problems
                .push(format!("could not decode {}: {}", box_type, reason)),
            _ => {}
        }
    }

    match report.outcome {
        WalkOutcome::MovieHeader(Ok(header)) => {
            summary.creation_time = Some(header.creation_time);
            summary.duration_seconds = Some(header.duration_seconds());
            let timestamps = header.timestamps();
            if timestamps.is_empty() {
                warn!("Movie header has no whole seconds of footage, no SRT written");
            } else {
                let srt_path = output
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| srt_path_for(input));
                summary.captions_written = subtitles::write_srt_file(&srt_path, &timestamps)?;
                summary.srt_path = Some(srt_path);
            }
        }
        WalkOutcome::MovieHeader(Err(e)) => {
            warn!("Movie header rejected: {}", e);
        }
        WalkOutcome::Meta(Ok(record)) => {
            if let Some(record) = &record {
                if let Some(date) = &record.creation_date {
                    info!("Creation Date: {}", date);
                }
                for (name, value) in &record.device_fields {
                    info!("Device {}: {}", name, value);
                }
            }
            summary.xml_metadata = record;
        }
        WalkOutcome::Meta(Err(e)) => {
            warn!("Embedded XML rejected: {}", e);
        }
        WalkOutcome::NotFound => {
            warn!("No movie header or meta box found in {}", input.display());
        }
    }

    Ok(summary)
}
