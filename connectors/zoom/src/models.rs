use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub users: Vec<ZoomUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoomUser {
    pub id: String,
    pub email: Option<String>,
}

/// Raw recordings response for one user over a date range.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordingBatch {
    #[serde(default)]
    pub meetings: Vec<Meeting>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meeting {
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub recording_files: Vec<RecordingFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordingFile {
    pub file_type: Option<String>,
    pub download_url: Option<String>,
}

/// A downloadable video file, ready to hand back to the webhook caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRecord {
    pub filename: String,
    pub download_url: String,
}

/// Accumulated result of a fan-out fetch across all users under a token.
#[derive(Debug, Default)]
pub struct FanOutRecordings {
    pub batches: Vec<RecordingBatch>,
    pub skipped_users: usize,
}
