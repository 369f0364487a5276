/// Counters collected over a single conversion run.
///
/// The pipeline is single-threaded, so plain integers are enough. Skipped
/// rows are counted rather than reported per-row; malformed rows are a
/// leniency policy, not an error.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub rows_seen: u64,
    pub rows_skipped: u64,
    pub records_written: u64,
    pub images_resolved: u64,
    pub images_failed: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }
}
