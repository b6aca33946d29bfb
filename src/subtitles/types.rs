use serde::Serialize;

/// One SRT caption: a one-second window showing a recorded date and time
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CaptionEntry {
    pub index: usize,
    pub start_seconds: u32,
    pub end_seconds: u32,
    pub date_line: String,
    pub time_line: String,
}
