//! Human-readable sizes and durations for log lines and the health endpoint

use std::time::Duration;

/// Format a byte count with binary units, e.g. `512B`, `1.50KB`, `100.0MB`
pub fn format_memory(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{}B", bytes);
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;
    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if size >= 10.0 {
        format!("{:.1}{}", size, UNITS[unit_index])
    } else {
        format!("{:.2}{}", size, UNITS[unit_index])
    }
}

/// Format an uptime as `45s`, `3m12s`, `2h5m` or `4d3h`
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (days, hours, minutes, seconds) = (
        secs / 86_400,
        (secs % 86_400) / 3600,
        (secs % 3600) / 60,
        secs % 60,
    );

    match (days, hours, minutes) {
        (0, 0, 0) => format!("{}s", seconds),
        (0, 0, _) => format!("{}m{}s", minutes, seconds),
        (0, _, _) => format!("{}h{}m", hours, minutes),
        _ => format!("{}d{}h", days, hours),
    }
}
