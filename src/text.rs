//! Text layout helpers: measuring, truncation, normalisation and the small
//! number formatters used in tool headers.

use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Ellipsis appended by every truncating helper.
pub const ELLIPSIS: &str = "…";

/// Display width of a string in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` to at most `width` cells. When anything is dropped, `tail` is
/// appended and counted against the width. Never splits a grapheme.
pub fn truncate_str(s: &str, width: usize, tail: &str) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    let tail_width = display_width(tail);
    if width < tail_width {
        return String::new();
    }
    let budget = width - tail_width;
    let mut out = String::with_capacity(s.len().min(budget * 4));
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = display_width(g);
        if used + w > budget {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push_str(tail);
    out
}

/// Normalise tool output for display: CRLF to LF, tabs to 4 spaces, ANSI
/// escapes and other control characters stripped.
pub fn normalize(s: &str) -> String {
    sanitize_for_display(&strip_ansi(s))
}

/// Split normalised content into lines. An empty string yields one empty
/// line, matching how a single blank line is displayed.
pub fn split_lines(s: &str) -> Vec<&str> {
    s.split('\n').collect()
}

/// Collapse a multi-line parameter onto one line.
pub fn single_line(s: &str) -> String {
    s.replace("\r\n", " ")
        .replace('\n', " ")
        .replace('\t', "    ")
}

/// Strip ANSI escape sequences from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_escape = false;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            in_escape = true;
            chars.next(); // consume '['
            continue;
        }
        if in_escape {
            // End of escape sequence on 'm' or other command char
            if c.is_ascii_alphabetic() {
                in_escape = false;
            }
            continue;
        }
        result.push(c);
    }
    result
}

/// Sanitize text for terminal display.
/// - Converts tabs to 4 spaces (consistent width)
/// - Strips carriage returns (prevents text overwrite)
/// - Strips other control characters except newlines
pub fn sanitize_for_display(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\t' => result.push_str("    "),
            '\r' => {}
            '\n' => result.push(c),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }
    result
}

/// Number of decimal digits in `n` (at least 1).
pub fn digits(n: usize) -> usize {
    let mut n = n;
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Format a byte count as B, KB or MB.
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    #[allow(clippy::cast_precision_loss)]
    match bytes {
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{b} B"),
    }
}

/// Format a timeout in seconds ("30s"); zero means unset and yields "".
pub fn format_timeout(secs: u64) -> String {
    if secs == 0 {
        String::new()
    } else {
        format!("{secs}s")
    }
}

/// Format a duration in seconds the way `std::time::Duration` debug output
/// reads for whole units ("1m30s", "45s").
pub fn format_duration(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    match (h, m) {
        (0, 0) => format!("{s}s"),
        (0, _) => format!("{m}m{s}s"),
        _ => format!("{h}h{m}m{s}s"),
    }
}

/// Non-zero integers as text, zero as "".
pub fn format_non_zero(n: usize) -> String {
    if n == 0 { String::new() } else { n.to_string() }
}

/// Shorten a path for display by replacing the home directory with `~`.
pub fn pretty_path(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home.and_then(Path::to_str) else {
        return path.to_string();
    };
    if home.is_empty() {
        return path.to_string();
    }
    match path.strip_prefix(home) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}

/// Turn an identifier such as `github_list-issues` into `Github list issues`.
pub fn pretty_name(name: &str) -> String {
    capitalize(&name.replace(['_', '-'], " "))
}

/// Uppercase the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
