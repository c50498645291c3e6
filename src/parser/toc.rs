use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::corpus::{Page, TocEntry};
use crate::settings::Settings;

/// The TOC may overflow its first page; scan this many leading pages.
pub const TOC_SCAN_PAGES: usize = 3;
const MAX_HEADING_CHARS: usize = 30;

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]{1,3})\s+(\S.*)$").unwrap());
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Entry { page: u32, title: String },
    Heading(String),
    Ignored,
    Noise,
}

/// Classify one trimmed, non-blank TOC line. The entry shape is tested
/// first, so boilerplate filtering only applies to non-entry lines.
pub fn classify_line(line: &str, page_count: u32, settings: &Settings) -> LineKind {
    if let Some((page, title)) = parse_entry(line) {
        if page == 0 || page > page_count {
            trace!(line, page, page_count, "entry out of range");
            return LineKind::Noise;
        }
        return LineKind::Entry { page, title };
    }
    if is_boilerplate(line, &settings.boilerplate) {
        return LineKind::Ignored;
    }
    if is_heading(line) {
        return LineKind::Heading(line.to_string());
    }
    trace!(line, "noise");
    LineKind::Noise
}

/// `"12 פתיחה"` → `(12, "פתיחה")`. Only the 1-3 digit prefix and the
/// separating whitespace are required; the title may contain anything.
fn parse_entry(line: &str) -> Option<(u32, String)> {
    let caps = ENTRY_RE.captures(line.trim())?;
    let page = caps[1].parse().ok()?;
    let title = caps[2].trim();
    if title.is_empty() {
        return None;
    }
    Some((page, title.to_string()))
}

fn is_boilerplate(line: &str, boilerplate: &[String]) -> bool {
    boilerplate.iter().any(|b| !b.is_empty() && line.contains(b.as_str()))
}

fn is_heading(line: &str) -> bool {
    !DIGIT_RE.is_match(line) && line.trim().chars().count() <= MAX_HEADING_CHARS
}

#[derive(Debug, Default)]
struct Scan {
    category: Option<String>,
    entries: Vec<TocEntry>,
}

impl Scan {
    fn step(mut self, kind: LineKind, fallback: &str) -> Self {
        match kind {
            LineKind::Entry { page, title } => {
                let category = self.category.clone().unwrap_or_else(|| fallback.to_string());
                self.entries.push(TocEntry {
                    category,
                    title,
                    start_page: page,
                });
            }
            LineKind::Heading(h) => self.category = Some(h),
            LineKind::Ignored | LineKind::Noise => {}
        }
        self
    }
}

/// Reconstruct the table of contents from the leading pages.
///
/// Category assignment is a single slot: every entry inherits the last
/// heading line seen, so one misread heading relabels all entries up to
/// the next one.
pub fn parse_toc(pages: &[Page], settings: &Settings) -> Vec<TocEntry> {
    let page_count = pages.len() as u32;
    let scan_text = pages
        .iter()
        .take(TOC_SCAN_PAGES)
        .filter(|p| !p.text.is_empty())
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let scan = scan_text
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| classify_line(l, page_count, settings))
        .fold(Scan::default(), |scan, kind| {
            scan.step(kind, &settings.fallback_category)
        });

    dedup_sorted(scan.entries)
}

/// Stable sort by start page, keep the first of each `(start_page, title)`.
fn dedup_sorted(mut entries: Vec<TocEntry>) -> Vec<TocEntry> {
    entries.sort_by_key(|e| e.start_page);
    let mut seen: HashSet<(u32, String)> = HashSet::new();
    entries.retain(|e| seen.insert((e.start_page, e.title.clone())));
    entries
}
