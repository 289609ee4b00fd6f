// src/core/sanitize.rs

/// Collapse runs of whitespace (including newlines from scraped markup) into a
/// single space and trim the ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Comparison key for team tags: upstream mixes "SEN", "sen" and " Sen ".
pub fn team_key(s: &str) -> String {
    normalize_ws(s).to_lowercase()
}
