// src/core/html.rs
// Raw-markup checks that run before the DOM parse.
// html5ever repairs anything, so table boundaries are sanity-checked on the source text.

/// ASCII-only lowercasing for tag matching; leaves non-ASCII untouched.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Drop comments and `<script>`/`<style>` bodies, whose text is not markup.
/// An unterminated region runs to the end of the input.
pub fn strip_non_markup(s: &str) -> String {
    let lc = to_lower(s);
    let mut out = String::with_capacity(s.len());
    let mut pos = 0usize;
    loop {
        let next = [("<!--", "-->"), ("<script", "</script"), ("<style", "</style")]
            .iter()
            .filter_map(|&(open, close)| lc[pos..].find(open).map(|i| (pos + i, open, close)))
            .min_by_key(|&(i, _, _)| i);
        let Some((start, open, close)) = next else {
            out.push_str(&s[pos..]);
            return out;
        };
        out.push_str(&s[pos..start]);
        let body = start + open.len();
        match lc[body..].find(close) {
            Some(i) => {
                let end = body + i + close.len();
                // closing tag may carry whitespace before '>'
                pos = match close {
                    "-->" => end,
                    _ => lc[end..].find('>').map_or(lc.len(), |j| end + j + 1),
                };
            }
            None => return out,
        }
    }
}

/// Count opening tags named `tag` (case-insensitive). `<tablefoo` and `<tables` don't count.
pub fn count_open_tags(s: &str, tag: &str) -> usize {
    let lc = to_lower(s);
    let pat = format!("<{}", to_lower(tag));
    lc.match_indices(&pat)
        .filter(|(i, _)| {
            matches!(
                lc.as_bytes().get(i + pat.len()),
                Some(b'>' | b' ' | b'\t' | b'\r' | b'\n' | b'/') | None
            )
        })
        .count()
}

/// Count closing tags `</tag>` (case-insensitive, whitespace before `>` allowed).
pub fn count_close_tags(s: &str, tag: &str) -> usize {
    let lc = to_lower(s);
    let pat = format!("</{}", to_lower(tag));
    lc.match_indices(&pat)
        .filter(|(i, _)| lc[i + pat.len()..].trim_start().starts_with('>'))
        .count()
}

/// Every `<tag` has a `</tag>`, ignoring comments and script/style text.
pub fn tags_balanced(s: &str, tag: &str) -> bool {
    let markup = strip_non_markup(s);
    count_open_tags(&markup, tag) == count_close_tags(&markup, tag)
}
