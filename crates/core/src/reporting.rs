//! Static ticket-volume report shown on the reporting view.

use serde::Serialize;

pub const REPORT_TITLE: &str = "Ticket Volume Over Time";
pub const DATASET_LABEL: &str = "Daily Ticket Volume";

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const DAILY_VOLUME: [u32; 7] = [2, 3, 1, 4, 2, 5, 3];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeReport {
    pub title: &'static str,
    pub dataset_label: &'static str,
    pub labels: Vec<&'static str>,
    pub values: Vec<u32>,
}

/// Sample volume for the last seven days.
pub fn daily_ticket_volume() -> VolumeReport {
    VolumeReport {
        title: REPORT_TITLE,
        dataset_label: DATASET_LABEL,
        labels: WEEKDAYS.to_vec(),
        values: DAILY_VOLUME.to_vec(),
    }
}
