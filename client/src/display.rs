//! Formatting shared by every page.

use filmtracker_shared::{MediaRef, WatchState};

/// `136` -> `"2h 16m"`, `45` -> `"45m"`, `120` -> `"2h"`.
pub fn format_duration(minutes: u32) -> String {
    let (hours, rest) = (minutes / 60, minutes % 60);
    match (hours, rest) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Cuts `text` to at most `max` characters, ending with an ellipsis when
/// anything was dropped.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Up to two uppercase initials for an avatar.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// `7.26` -> `"7.3"`; no ratings yet -> `"–"`.
pub fn format_rating(average: Option<f64>) -> String {
    match average {
        Some(avg) => format!("{avg:.1}"),
        None => "–".to_string(),
    }
}

/// Exact count with thousands separators: `12345` -> `"12,345"`.
pub fn format_count(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn status_label(state: WatchState) -> &'static str {
    state.label()
}

/// Route of a title's detail page.
pub fn detail_path(target: MediaRef) -> String {
    format!("/{}/{}", target.kind().collection(), target.id())
}
