//! Text helpers for filenames, markup and whitespace handling.

/// `<nickname>.png` with path separators, reserved and control characters
/// replaced; empty names fall back to `fallback`.
pub fn export_filename(nickname: &str, fallback: &str) -> String {
    let sanitized: String = nickname
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = sanitized.trim_matches(|c: char| c == '.' || c.is_whitespace());
    let stem = if stem.is_empty() { fallback } else { stem };

    if stem.to_ascii_lowercase().ends_with(".png") {
        stem.to_string()
    } else {
        format!("{stem}.png")
    }
}

/// Escape text for use in XML character data and attribute values.
///
/// Characters XML 1.0 cannot carry at all, even as references, are dropped.
pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\t' | '\n' | '\r' => out.push(c),
            c if c < ' ' || c == '\u{fffe}' || c == '\u{ffff}' => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// CSS `white-space: pre-line`: keep line breaks, collapse runs of spaces
/// and tabs, trim around each break.
pub fn pre_line(raw: &str) -> Vec<String> {
    normalize_newlines(raw)
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

/// CSS `white-space: pre-wrap`: keep everything, split on line breaks only.
pub fn pre_wrap(raw: &str) -> Vec<String> {
    normalize_newlines(raw)
        .split('\n')
        .map(|line| line.replace('\t', "    "))
        .collect()
}

fn normalize_newlines(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Compact coordinate formatting for SVG attributes.
pub fn format_coord(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
