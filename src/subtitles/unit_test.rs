use crate::subtitles::{
    captions_from_timestamps, format_timestamp, has_mp4_extension, srt_path_for, write_srt,
};
use proptest::prelude::*;
use regex::Regex;
use std::path::PathBuf;

#[cfg(test)]
mod test_helpers {
    use crate::metadata::Timestamp;

    pub fn ts(day: u32, month: u32, year: i32, hour: u32, minute: u32, second: u32) -> Timestamp {
        Timestamp {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

#[test]
fn test_format_timestamp_known_values() {
    assert_eq!(format_timestamp(0.0), "00:00:00,000");
    assert_eq!(format_timestamp(1.0), "00:00:01,000");
    assert_eq!(format_timestamp(3661.25), "01:01:01,250");
    assert_eq!(format_timestamp(59.9999), "00:00:59,999");
    assert_eq!(format_timestamp(86399.5), "23:59:59,500");
}

#[test]
fn test_format_timestamp_invalid_input() {
    assert_eq!(format_timestamp(-1.0), "00:00:00,000");
    assert_eq!(format_timestamp(f64::NAN), "00:00:00,000");
    assert_eq!(format_timestamp(f64::INFINITY), "00:00:00,000");
}

proptest! {
    #[test]
    fn prop_format_timestamp_shape(seconds in 0.0f64..360_000.0) {
        let re = Regex::new(r"^\d{2}:\d{2}:\d{2},\d{3}$").unwrap();
        let formatted = format_timestamp(seconds);
        prop_assert!(re.is_match(&formatted), "{} -> {}", seconds, formatted);
    }

    #[test]
    fn prop_whole_seconds_have_zero_millis(seconds in 0u32..360_000) {
        let formatted = format_timestamp(seconds as f64);
        prop_assert!(formatted.ends_with(",000"));
    }
}

#[test]
fn test_captions_are_contiguous_despite_gaps() {
    use test_helpers::*;
    let timestamps = vec![
        ts(31, 12, 2023, 23, 59, 59),
        ts(1, 1, 2024, 0, 0, 0),
        ts(5, 3, 2024, 12, 30, 0),
    ];
    let captions = captions_from_timestamps(&timestamps).unwrap();

    assert_eq!(captions.len(), 3);
    for (i, caption) in captions.iter().enumerate() {
        assert_eq!(caption.index, i + 1);
        assert_eq!(caption.start_seconds, i as u32);
        assert_eq!(caption.end_seconds, i as u32 + 1);
    }
    assert_eq!(captions[0].date_line, "31/12/2023");
    assert_eq!(captions[0].time_line, "23:59:59");
    assert_eq!(captions[2].date_line, "05/03/2024");
    assert_eq!(captions[2].time_line, "12:30:00");
}

#[test]
fn test_write_srt_output() {
    use test_helpers::*;
    let timestamps = vec![ts(14, 11, 2023, 22, 13, 21), ts(14, 11, 2023, 22, 13, 22)];
    let mut out = Vec::new();
    let written = write_srt(&mut out, &timestamps).unwrap();

    assert_eq!(written, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "1\n00:00:00,000 --> 00:00:01,000\n14/11/2023\n22:13:21\n\n\
         2\n00:00:01,000 --> 00:00:02,000\n14/11/2023\n22:13:22\n\n"
    );
}

#[test]
fn test_write_srt_empty() {
    let mut out = Vec::new();
    assert_eq!(write_srt(&mut out, &[]).unwrap(), 0);
    assert!(out.is_empty());
}

#[test]
fn test_caption_windows_past_one_hour() {
    let timestamps = vec![test_helpers::ts(1, 1, 2024, 0, 0, 0); 3601];
    let captions = captions_from_timestamps(&timestamps).unwrap();
    let last = captions.last().unwrap().to_srt_block();
    assert!(last.starts_with("3601\n01:00:00,000 --> 01:00:01,000\n"));
}

#[test]
fn test_srt_path_for() {
    assert_eq!(srt_path_for("clip.mp4"), PathBuf::from("clip.srt"));
    assert_eq!(srt_path_for("/videos/C0001.MP4"), PathBuf::from("/videos/C0001.srt"));
    assert_eq!(srt_path_for("dir.mp4/a.mp4"), PathBuf::from("dir.mp4/a.srt"));
}

#[test]
fn test_has_mp4_extension() {
    assert!(has_mp4_extension("a.mp4"));
    assert!(has_mp4_extension("a.MP4"));
    assert!(!has_mp4_extension("a.Mp4"));
    assert!(!has_mp4_extension("a.mov"));
    assert!(!has_mp4_extension("mp4"));
}
