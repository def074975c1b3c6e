//! Display and derivation helpers shared by feed consumers.

use chrono::{DateTime, Utc};

/// Parse an ISO-8601 duration limited to time components ("PT1H2M3S") into
/// seconds. Missing components count as zero; anything unparseable is zero,
/// never an error.
pub fn parse_duration(duration: &str) -> u64 {
    let Some(rest) = duration.strip_prefix("PT") else {
        return 0;
    };
    let mut total = 0u64;
    let mut digits = String::new();
    for c in rest.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            let value: u64 = digits.parse().unwrap_or(0);
            digits.clear();
            match c {
                'H' => total += value * 3600,
                'M' => total += value * 60,
                'S' => total += value,
                _ => return 0,
            }
        }
    }
    total
}

/// Format seconds for display: 90 -> "1:30", 0 -> "0:00".
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format a raw view count string: "1234567" -> "1.2M views". Non-numeric
/// input formats as "0 views".
pub fn format_view_count(count: &str) -> String {
    let Ok(n) = count.trim().parse::<u64>() else {
        return "0 views".into();
    };
    if n >= 1_000_000 {
        format!("{:.1}M views", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K views", n as f64 / 1_000.0)
    } else {
        format!("{n} views")
    }
}

/// Relative "time ago" label for article and video timestamps.
pub fn format_time_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - published).num_seconds().max(0);
    if seconds < 60 {
        return "Just now".into();
    }
    if seconds < 3_600 {
        return format!("{}m ago", seconds / 60);
    }
    if seconds < 86_400 {
        return format!("{}h ago", seconds / 3_600);
    }
    if seconds < 604_800 {
        return format!("{}d ago", seconds / 86_400);
    }
    published.format("%b %-d, %Y").to_string()
}
