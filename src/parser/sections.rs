use crate::corpus::{Page, Section, TocEntry};

/// Split the page range into one section per TOC entry. Each section runs
/// up to the page before the next entry's start; the last one runs to the
/// end of the document.
pub fn build_sections(pages: &[Page], toc: &[TocEntry], page_marker: &str) -> Vec<Section> {
    let page_count = pages.len() as u32;

    toc.iter()
        .enumerate()
        .map(|(i, entry)| {
            let start = entry.start_page;
            let end = match toc.get(i + 1) {
                Some(next) => next.start_page.saturating_sub(1),
                None => page_count,
            };
            Section {
                id: section_id(start),
                category: entry.category.clone(),
                title: entry.title.clone(),
                start_page: start,
                end_page: end,
                content: section_content(pages, start, end, page_marker),
            }
        })
        .collect()
}

fn section_id(start_page: u32) -> String {
    format!("p{:03}", start_page)
}

fn section_content(pages: &[Page], start: u32, end: u32, page_marker: &str) -> String {
    pages
        .iter()
        .filter(|p| p.page_number >= start && p.page_number <= end)
        .filter(|p| !p.text.is_empty())
        .map(|p| format!("{} {}\n{}", page_marker, p.page_number, p.text).trim().to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string()
}

// ── Tests ──
