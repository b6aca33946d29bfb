use std::path::{Path, PathBuf};

/// Format timestamp in SRT format (`HH:MM:SS,mmm`), truncating below the millisecond
pub fn format_timestamp(seconds: f64) -> String {
    if seconds.is_nan() || seconds.is_infinite() || seconds < 0.0 {
        return "00:00:00,000".to_string();
    }

    let whole = seconds.trunc();
    let millis = ((seconds - whole) * 1000.0) as u64;
    let total_seconds = whole as u64;
    let secs = total_seconds % 60;
    let minutes = (total_seconds % 3600) / 60;
    let hours = total_seconds / 3600;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// `.mp4`/`.MP4` input paths map to a sibling `.srt` file
pub fn srt_path_for<P: AsRef<Path>>(input: P) -> PathBuf {
    input.as_ref().with_extension("srt")
}

/// Whether a path names an MP4 file by its extension
pub fn has_mp4_extension<P: AsRef<Path>>(path: P) -> bool {
    matches!(
        path.as_ref().extension().and_then(|ext| ext.to_str()),
        Some("mp4") | Some("MP4")
    )
}
