use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Whether recording is currently active
    pub is_recording: bool,

    /// When the recording started (None while idle)
    pub started_at: Option<DateTime<Utc>>,

    /// Total recorded duration in seconds, two-decimal precision
    pub total_duration_secs: f64,

    /// Duration of the local-origin sub-stream in seconds
    pub local_duration_secs: f64,

    /// Duration of the remote-origin sub-stream in seconds
    pub remote_duration_secs: f64,

    /// Total recorded PCM bytes across both origins
    pub total_bytes: usize,

    pub local_bytes: usize,

    pub remote_bytes: usize,

    /// Number of segments appended so far
    pub segment_count: usize,
}
