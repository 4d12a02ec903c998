// Tunables for tracing and the stepping UI

/// Memory budget for the recorded parse history (64 MiB)
pub const SNAPSHOT_MEMORY_LIMIT: usize = 64 * 1024 * 1024;

/// Delay between steps while auto-play is running
pub const PLAY_INTERVAL_MS: u64 = 500;

/// Minimum gap between space presses before play/pause toggles again
pub const SPACE_DEBOUNCE_MS: u64 = 200;
