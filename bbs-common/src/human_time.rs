//! Human-readable time formatting for catalog display
//!
//! Beat durations are shown as `M:SS` on the store grid, the detail page and
//! the preview player. Minutes are not zero-padded and never roll over into
//! hours.

/// Format a duration in whole seconds as `M:SS`.
///
/// # Examples
///
/// ```
/// use bbs_common::human_time::format_duration;
///
/// assert_eq!(format_duration(0), "0:00");
/// assert_eq!(format_duration(185), "3:05");
/// assert_eq!(format_duration(300), "5:00");
/// assert_eq!(format_duration(3725), "62:05");
/// ```
pub fn format_duration(seconds: u32) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", minutes, secs)
}
