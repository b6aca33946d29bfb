use super::ftyp::{decode_ftyp, format_to_string};
use super::meta::decode_meta;
use super::mvhd::{decode_mvhd, MovieHeader};
use super::r#box::{read_box, Mp4Box, BOX_HEADER_SIZE};
use crate::errors::{MetadataError, Mp4Error, Mp4SrtResult};
use crate::metadata::{FileType, XmlMetadata};
use crate::streams::SeekableStream;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use std::io::{Read, Seek, SeekFrom};

/// Box types the walker descends into. The movie header lives directly under moov,
/// so nothing deeper is needed.
const CONTAINER_TYPES: &[&[u8; 4]] = &[b"moov"];

/// Something the walker noticed, in document order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ParseEvent {
    BoxVisited {
        box_type: String,
        size: u64,
        start_offset: u64,
        depth: usize,
    },
    FileType(FileType),
    InvalidBoxSize {
        box_type: String,
        size: u64,
        start_offset: u64,
    },
    MovieHeader {
        creation_time: DateTime<Utc>,
        duration_seconds: u64,
    },
    XmlMetadata(XmlMetadata),
    DecodeFailed {
        box_type: String,
        reason: String,
    },
}

/// Result of searching the box tree for the first mvhd or meta box
#[derive(Debug, Clone, PartialEq)]
pub enum WalkOutcome {
    MovieHeader(Result<MovieHeader, Mp4Error>),
    Meta(Result<Option<XmlMetadata>, MetadataError>),
    NotFound,
}

impl WalkOutcome {
    pub fn is_found(&self) -> bool {
        !matches!(self, WalkOutcome::NotFound)
    }
}

/// Outcome of a walk plus every event reported on the way
#[derive(Debug, Clone, PartialEq)]
pub struct WalkReport {
    pub outcome: WalkOutcome,
    pub events: Vec<ParseEvent>,
}

impl WalkReport {
    pub fn file_type(&self) -> Option<&FileType> {
        self.events.iter().find_map(|event| match event {
            ParseEvent::FileType(ftyp) => Some(ftyp),
            _ => None,
        })
    }
}

/// Walk the box tree from the start of the stream until the first mvhd or meta box.
pub fn walk_boxes<S: SeekableStream>(stream: &mut S) -> Mp4SrtResult<WalkReport> {
    debug!("Walking boxes of {}", stream.describe());
    let mut events = Vec::new();
    let outcome = walk_siblings(stream, 0, None, 0, &mut events)?;
    debug!(
        "Walk finished after {} events, {} bytes read",
        events.len(),
        stream.bytes_read()
    );
    Ok(WalkReport { outcome, events })
}

/// Walk sibling boxes starting at `start` until `bound` (absolute offset) or end of stream.
pub fn walk_siblings<S: Read + Seek>(
    stream: &mut S,
    start: u64,
    bound: Option<u64>,
    depth: usize,
    events: &mut Vec<ParseEvent>,
) -> Mp4SrtResult<WalkOutcome> {
    let mut current = start;

    loop {
        if matches!(bound, Some(bound) if current >= bound) {
            break;
        }
        stream.seek(SeekFrom::Start(current))?;
        let header = match read_box(stream)? {
            Some(header) => header,
            None => break,
        };

        debug!(
            "{}box {} [size: {}, pos: {}]",
            "  ".repeat(depth),
            header.name,
            header.size,
            header.start_offset
        );
        events.push(ParseEvent::BoxVisited {
            box_type: header.name.clone(),
            size: header.size,
            start_offset: header.start_offset,
            depth,
        });

        let end = match header.end_offset() {
            Some(end) if header.size >= BOX_HEADER_SIZE => end,
            _ => {
                warn!(
                    "Invalid box size {} for {} at {}, stopping scan",
                    header.size, header.name, header.start_offset
                );
                events.push(ParseEvent::InvalidBoxSize {
                    box_type: header.name.clone(),
                    size: header.size,
                    start_offset: header.start_offset,
                });
                break;
            }
        };

        if header.is(b"ftyp") {
            let payload = read_range(stream, header.content_start(), end)?;
            match decode_ftyp(&payload) {
                Ok(ftyp) => {
                    info!(
                        "MP4 Major Brand: {} ({})",
                        ftyp.major_brand,
                        format_to_string(&ftyp.format())
                    );
                    events.push(ParseEvent::FileType(ftyp));
                }
                Err(e) => report_failure(&header, e.to_string(), events),
            }
        }

        if is_container(&header) {
            let inner = walk_siblings(stream, header.content_start(), Some(end), depth + 1, events)?;
            if inner.is_found() {
                return Ok(inner);
            }
        }

        if header.is(b"mvhd") {
            let data = read_range(stream, header.start_offset, end)?;
            let decoded = decode_mvhd(&data);
            match &decoded {
                Ok(mvhd) => {
                    info!(
                        "First timecode: {}, duration: {} seconds",
                        mvhd.creation_time.format("%d-%m-%Y %H:%M:%S"),
                        mvhd.duration_seconds()
                    );
                    events.push(ParseEvent::MovieHeader {
                        creation_time: mvhd.creation_time,
                        duration_seconds: mvhd.duration_seconds(),
                    });
                }
                Err(e) => report_failure(&header, e.to_string(), events),
            }
            return Ok(WalkOutcome::MovieHeader(decoded));
        }

        if header.is(b"meta") {
            let data = read_range(stream, header.start_offset, end)?;
            let decoded = decode_meta(&data);
            match &decoded {
                Ok(Some(record)) => events.push(ParseEvent::XmlMetadata(record.clone())),
                Ok(None) => debug!("meta box at {} carries no XML", header.start_offset),
                Err(e) => report_failure(&header, e.to_string(), events),
            }
            return Ok(WalkOutcome::Meta(decoded));
        }

        current = end;
    }

    Ok(WalkOutcome::NotFound)
}

fn is_container(header: &Mp4Box) -> bool {
    CONTAINER_TYPES.iter().any(|name| header.is(name))
}

fn report_failure(header: &Mp4Box, reason: String, events: &mut Vec<ParseEvent>) {
    warn!("Failed to decode {} at {}: {}", header.name, header.start_offset, reason);
    events.push(ParseEvent::DecodeFailed {
        box_type: header.name.clone(),
        reason,
    });
}

/// Read `[start, end)` from the stream; a box that overruns the stream yields what is there.
fn read_range<S: Read + Seek>(stream: &mut S, start: u64, end: u64) -> Mp4SrtResult<Vec<u8>> {
    let mut buf = Vec::new();
    if end <= start {
        return Ok(buf);
    }
    stream.seek(SeekFrom::Start(start))?;
    stream.by_ref().take(end - start).read_to_end(&mut buf)?;
    Ok(buf)
}
