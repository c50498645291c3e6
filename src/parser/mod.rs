pub mod normalize;
pub mod sections;
pub mod toc;

use tracing::info;

use crate::corpus::{Corpus, Page};
use crate::settings::Settings;

/// Three-pass pipeline: raw page text → normalized pages → TOC → sections.
pub fn build_corpus(source_pdf: &str, raw_pages: Vec<Option<String>>, settings: &Settings) -> Corpus {
    let pages: Vec<Page> = raw_pages
        .iter()
        .enumerate()
        .map(|(i, raw)| Page {
            page_number: i as u32 + 1,
            text: normalize::normalize_page_text(raw.as_deref()),
        })
        .collect();

    let toc = toc::parse_toc(&pages, settings);
    let sections = sections::build_sections(&pages, &toc, &settings.page_marker);
    info!(
        pages = pages.len(),
        entries = toc.len(),
        sections = sections.len(),
        "corpus built"
    );

    Corpus {
        source_pdf: source_pdf.to_string(),
        pages,
        toc,
        sections,
    }
}

// ── Tests ──
