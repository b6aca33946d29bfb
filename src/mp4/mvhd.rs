use crate::bits::reader::{u16_at, u32_at, u64_at};
use crate::errors::Mp4Error;
use crate::metadata::Timestamp;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Minimum size of a version 0 mvhd box, header included
pub const MVHD_V0_SIZE: usize = 108;
/// Minimum size of a version 1 mvhd box, header included
pub const MVHD_V1_SIZE: usize = 120;
/// Seconds between 1904-01-01 and 1970-01-01
pub const MP4_EPOCH_OFFSET: i64 = 2_082_844_800;

/// Decoded movie header (`mvhd`).
///
/// Layout of a version 0 box, offsets counted from the start of the 8-byte header:
///
/// | offset | field             |
/// |--------|-------------------|
/// | 8      | version           |
/// | 9..12  | flags             |
/// | 12     | creation time     |
/// | 16     | modification time |
/// | 20     | time scale        |
/// | 24     | duration          |
/// | 28     | preferred rate    |
/// | 32     | preferred volume  |
/// | 44..80 | matrix            |
/// | 80..104| predefines        |
/// | 104    | next track id     |
///
/// Version 1 widens creation time, modification time and duration to 64 bits,
/// which moves time scale to 28 and duration to 32.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieHeader {
    pub version: u8,
    pub flags: u32,
    pub creation_time: DateTime<Utc>,
    pub modification_time: Option<DateTime<Utc>>,
    pub time_scale: u32,
    pub duration: u64,
    pub preferred_rate: u32,
    pub preferred_volume: u16,
    pub next_track_id: u32,
}

struct Layout {
    wide: bool,
    creation: usize,
    modification: usize,
    time_scale: usize,
    duration: usize,
    rate: usize,
    volume: usize,
    next_track_id: usize,
}

const V0_LAYOUT: Layout = Layout {
    wide: false,
    creation: 12,
    modification: 16,
    time_scale: 20,
    duration: 24,
    rate: 28,
    volume: 32,
    next_track_id: 104,
};

const V1_LAYOUT: Layout = Layout {
    wide: true,
    creation: 12,
    modification: 20,
    time_scale: 28,
    duration: 32,
    rate: 40,
    volume: 44,
    next_track_id: 116,
};

/// Decode a full mvhd box, including its 8-byte header.
pub fn decode_mvhd(data: &[u8]) -> Result<MovieHeader, Mp4Error> {
    if data.len() < MVHD_V0_SIZE {
        return Err(Mp4Error::MvhdTooShort { len: data.len() });
    }

    let version = data[8];
    let flags = ((data[9] as u32) << 16) | ((data[10] as u32) << 8) | data[11] as u32;
    let layout = if version == 1 {
        if data.len() < MVHD_V1_SIZE {
            return Err(Mp4Error::MvhdTooShort { len: data.len() });
        }
        &V1_LAYOUT
    } else {
        &V0_LAYOUT
    };

    let too_short = || Mp4Error::MvhdTooShort { len: data.len() };
    let time_field = |offset: usize| -> Option<u64> {
        if layout.wide {
            u64_at(data, offset)
        } else {
            u32_at(data, offset).map(u64::from)
        }
    };

    let creation_raw = time_field(layout.creation).ok_or_else(too_short)?;
    let modification_raw = time_field(layout.modification).ok_or_else(too_short)?;
    let time_scale = u32_at(data, layout.time_scale).ok_or_else(too_short)?;
    let duration = time_field(layout.duration).ok_or_else(too_short)?;

    if time_scale == 0 {
        return Err(Mp4Error::InvalidTimeScale);
    }

    let creation_time = mp4_time_to_utc(creation_raw)
        .ok_or(Mp4Error::CreationTimeOutOfRange { raw: creation_raw })?;

    Ok(MovieHeader {
        version,
        flags,
        creation_time,
        modification_time: mp4_time_to_utc(modification_raw),
        time_scale,
        duration,
        preferred_rate: u32_at(data, layout.rate).ok_or_else(too_short)?,
        preferred_volume: u16_at(data, layout.volume).ok_or_else(too_short)?,
        next_track_id: u32_at(data, layout.next_track_id).ok_or_else(too_short)?,
    })
}

/// Convert seconds since 1904-01-01 into a UTC instant
pub fn mp4_time_to_utc(raw: u64) -> Option<DateTime<Utc>> {
    let unix = i64::try_from(raw).ok()?.checked_sub(MP4_EPOCH_OFFSET)?;
    DateTime::from_timestamp(unix, 0)
}

impl MovieHeader {
    /// Duration in seconds, rounded to the nearest whole second
    pub fn duration_seconds(&self) -> u64 {
        (self.duration as f64 / self.time_scale as f64).round() as u64
    }

    /// One entry per recorded second.
    ///
    /// Entry `i` is `creation_time + (i + 1)` seconds: the first sample lands one
    /// second after the header timestamp.
    pub fn recorded_seconds(&self) -> impl Iterator<Item = Timestamp> + '_ {
        (1..=self.duration_seconds()).map_while(move |offset| {
            let offset = i64::try_from(offset).ok()?;
            self.creation_time
                .checked_add_signed(Duration::try_seconds(offset)?)
                .map(Timestamp::from)
        })
    }

    pub fn timestamps(&self) -> Vec<Timestamp> {
        self.recorded_seconds().collect()
    }
}

/// Decode an mvhd box straight into its per-second timestamp sequence
pub fn decode_mvhd_timestamps(data: &[u8]) -> Result<Vec<Timestamp>, Mp4Error> {
    decode_mvhd(data).map(|header| header.timestamps())
}
