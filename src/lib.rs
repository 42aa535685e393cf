pub mod honeycomb;

// ============================================================================
// Profiling Macros
// ============================================================================

/// Log a message every 600 frames when the perf_stats feature is enabled.
///
/// `$frame` is a `Res<FrameCount>` (or anything with a numeric `.0`). Without
/// the `perf_stats` feature this expands to nothing and the arguments are
/// never evaluated.
///
/// # Example
/// ```ignore
/// profile_log!(frame, "Drawing {} surfaces", surfaces.iter().len());
/// ```
#[macro_export]
#[cfg(feature = "perf_stats")]
macro_rules! profile_log {
    ($frame:expr, $($arg:tt)*) => {
        if $frame.0 % 600 == 0 {
            bevy::prelude::info!($($arg)*);
        }
    };
}

#[macro_export]
#[cfg(not(feature = "perf_stats"))]
macro_rules! profile_log {
    ($frame:expr, $($arg:tt)*) => {};
}
