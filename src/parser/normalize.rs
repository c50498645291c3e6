use std::sync::LazyLock;

use regex::Regex;

static TRAILING_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+\n").unwrap());
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Canonical form of one page's extracted text: `\n` line endings, no
/// trailing spaces before a newline, at most one blank line in a row.
pub fn normalize_page_text(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return String::new(),
    };

    let text = raw.replace('\r', "\n");
    let text = TRAILING_WS_RE.replace_all(&text, "\n");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}
