/// Formats the elapsed time shown with the final score
///
/// Examples:
/// - 0.0: "0.00 seconds"
/// - 12.344: "12.34 seconds"
/// - 1.0: "1.00 second"
pub fn format_elapsed(seconds: f64) -> String {
    let seconds = clamp_seconds(seconds);
    let rounded = (seconds * 100.0).round() / 100.0;
    format!(
        "{:.2} second{}",
        rounded,
        if rounded == 1.0 { "" } else { "s" }
    )
}

/// Formats a running timer as "MM:SS", or "H:MM:SS" past the hour
///
/// Examples:
/// - 5.9: "00:05"
/// - 65.0: "01:05"
/// - 3725.0: "1:02:05"
pub fn format_timer(seconds: f64) -> String {
    let total = clamp_seconds(seconds).floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

fn clamp_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}
