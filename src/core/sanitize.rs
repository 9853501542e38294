// src/core/sanitize.rs

/// Collapse sequences of whitespace into a single space and trim.
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

/// Clean one report line: drop spaces, fold `\t,\t` into `\t`, strip the
/// leading tab, trim. Applying it twice changes nothing.
pub fn normalize_line(line: &str) -> String {
    let mut l = line.replace(' ', "");
    // "\t,\t,\t" leaves a fresh "\t,\t" after one replace
    while l.contains("\t,\t") {
        l = l.replace("\t,\t", "\t");
    }
    let l = l.strip_prefix('\t').unwrap_or(&l);
    l.trim().to_string()
}

/// Normalize every line of `text`; each output line ends with `\n`.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        out.push_str(&normalize_line(line));
        out.push('\n');
    }
    out
}
