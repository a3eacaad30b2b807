/// Listening telemetry types
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Aggregated engagement record for one closed listening session
///
/// Produced by the playback core when a track leaves the "current" slot and
/// handed to the telemetry sink for persistence. One report per session;
/// `skip_count` and `play_count` are each 0 or 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListeningReport {
    /// Track the session was accumulated for
    pub track_id: TrackId,

    /// Total listened time within the session
    pub listened: Duration,

    /// 1 when the session was classified as a skip
    pub skip_count: u32,

    /// 1 when the session was classified as a completed play
    pub play_count: u32,
}

impl ListeningReport {
    /// Listened time in whole seconds, as persisted by the backend
    pub fn listened_secs(&self) -> u64 {
        self.listened.as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listened_secs_truncates() {
        let report = ListeningReport {
            track_id: TrackId::new("t-1"),
            listened: Duration::from_millis(42_900),
            skip_count: 0,
            play_count: 1,
        };
        assert_eq!(report.listened_secs(), 42);
    }
}
