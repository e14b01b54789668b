use regex::Regex;
use std::sync::OnceLock;

static BULLET_RE: OnceLock<Regex> = OnceLock::new();

fn bullet_re() -> &'static Regex {
    BULLET_RE.get_or_init(|| Regex::new(r"^\s*[-*•]\s").unwrap())
}

/// A bullet glyph (`-`, `*`, `•`) after optional indentation, then whitespace.
pub fn is_bullet(line: &str) -> bool {
    bullet_re().is_match(line)
}

fn as_str<S: AsRef<str>>(line: &S) -> &str {
    line.as_ref()
}

fn is_specs_marker(line: &str) -> bool {
    line.trim().to_lowercase().starts_with("specs")
}

/// Count the bullets of the first contiguous "Specs" section in `body`.
///
/// Blank lines inside the section are skipped and a repeated marker line
/// (`Specs (continued)`) keeps it open; any other non-bullet line closes it.
/// Returns 0 when there is no marker.
pub fn count_spec_bullets<S: AsRef<str>>(body: &[S]) -> usize {
    let mut in_specs = false;
    let mut count = 0;
    for line in body.iter().map(as_str) {
        if is_specs_marker(line) {
            in_specs = true;
        } else if !in_specs || line.trim().is_empty() {
            continue;
        } else if is_bullet(line) {
            count += 1;
        } else {
            break;
        }
    }
    count
}

/// Every bullet line in `body`, inside a Specs section or not.
pub fn bullet_lines<S: AsRef<str>>(body: &[S]) -> Vec<&str> {
    body.iter()
        .map(as_str)
        .filter(|l| is_bullet(l))
        .collect()
}
