/// Core traits for Lyra
use crate::error::Result;
use crate::types::ListeningReport;

/// Telemetry sink trait
///
/// Accepts closed listening sessions for persistence and is responsible for
/// invalidating any cached aggregate views on its side.
///
/// Implementations must not block the caller: the playback core invokes this
/// from its scheduling loop, so a sink backed by the network has to enqueue
/// the report and return immediately. The core calls it at most once per
/// closed session and never retries — a returned error is logged by the
/// caller and the report is dropped.
pub trait TelemetrySink: Send + Sync {
    /// Upsert the listening record for one closed session
    ///
    /// # Errors
    /// Returns an error if the report could not be accepted for delivery
    fn upsert_listening(&self, report: ListeningReport) -> Result<()>;
}
