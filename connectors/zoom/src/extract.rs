use chrono_tz::America::Los_Angeles;

use crate::models::{DownloadRecord, Meeting};

/// Flattens meetings into MP4 download records. Filenames carry the meeting
/// date as it reads on a Pacific wall clock, so a recording started late in
/// the UTC evening files under the previous calendar day.
///
/// Emission order is meetings outer, files inner, matching the input. Files
/// that are not MP4s or have no download URL are skipped, as are meetings
/// without a start time.
pub fn extract_mp4_downloads(meetings: &[Meeting]) -> Vec<DownloadRecord> {
    let mut downloads = Vec::new();

    for meeting in meetings {
        let Some(start_time) = meeting.start_time else {
            continue;
        };
        let date = start_time
            .with_timezone(&Los_Angeles)
            .format("%m-%d-%Y")
            .to_string();

        for file in &meeting.recording_files {
            if file.file_type.as_deref() != Some("MP4") {
                continue;
            }
            let Some(download_url) = file.download_url.as_deref() else {
                continue;
            };
            if download_url.is_empty() {
                continue;
            }
            downloads.push(DownloadRecord {
                filename: format!("{}-{}", date, meeting.topic),
                download_url: download_url.to_string(),
            });
        }
    }

    downloads
}
