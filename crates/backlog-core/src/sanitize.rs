//! Coerce a rough PRD into the heading and bullet forms the parser expects.

use regex::Regex;
use std::sync::OnceLock;

static BARE_HEADING_RE: OnceLock<Regex> = OnceLock::new();
static GLYPH_BULLET_RE: OnceLock<Regex> = OnceLock::new();

fn bare_heading_re() -> &'static Regex {
    BARE_HEADING_RE.get_or_init(|| Regex::new(r"^\s*(\d+)\s+(.+)").unwrap())
}

fn glyph_bullet_re() -> &'static Regex {
    GLYPH_BULLET_RE.get_or_init(|| Regex::new(r"^\s*[•*]\s+").unwrap())
}

/// Normalize one line:
/// `3 Payment page` becomes `## 3 Payment page`, `•`/`*` bullets become `- `,
/// and trailing whitespace is dropped.
pub fn sanitize_line(line: &str) -> String {
    let mut out = line.to_string();

    if !line.trim_start().starts_with("##") {
        if let Some(caps) = bare_heading_re().captures(line) {
            out = format!("## {} {}", &caps[1], &caps[2]);
        }
    }

    out = glyph_bullet_re().replace(&out, "- ").into_owned();
    out.trim_end().to_string()
}

/// Normalize a whole document. The result ends with exactly one newline.
pub fn sanitize(text: &str) -> String {
    let mut out: Vec<String> = text.lines().map(sanitize_line).collect();
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    let mut clean = out.join("\n");
    clean.push('\n');
    clean
}
