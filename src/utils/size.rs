//! Human-readable file size formatting.

/// Unit labels on the binary (1024) scale, smallest first.
const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Formats a byte count on the binary scale.
///
/// - `0` renders as `"N/A"`
/// - sizes below 1024 render as an integer count of `Bytes`
/// - larger sizes pick the largest unit (up to `TB`) in which the value is at
///   least 1 and render it with one decimal place, halves rounding up
///
/// # Examples
///
/// ```rust
/// use locker_gen::utils::format_size;
///
/// assert_eq!(format_size(0), "N/A");
/// assert_eq!(format_size(512), "512 Bytes");
/// assert_eq!(format_size(2048), "2.0 KB");
/// assert_eq!(format_size(1_572_864), "1.5 MB");
/// assert_eq!(format_size(1280), "1.3 KB");
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "N/A".to_string();
    }

    let mut unit = 0;
    let mut scale: u64 = 1;
    while unit < UNITS.len() - 1 && bytes / scale >= 1024 {
        scale *= 1024;
        unit += 1;
    }

    if unit == 0 {
        return format!("{bytes} {}", UNITS[0]);
    }

    let scale = u128::from(scale);
    let tenths = (u128::from(bytes) * 10 + scale / 2) / scale;
    format!("{}.{} {}", tenths / 10, tenths % 10, UNITS[unit])
}
