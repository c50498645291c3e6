use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page_number: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    pub category: String,
    pub title: String,
    pub start_page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub category: String,
    pub title: String,
    pub start_page: u32,
    pub end_page: u32,
    pub content: String,
}

/// Result of one pipeline run over a single source document.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub source_pdf: String,
    pub pages: Vec<Page>,
    pub toc: Vec<TocEntry>,
    pub sections: Vec<Section>,
}

impl Corpus {
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PagesDoc<'a> {
    source_pdf: &'a str,
    page_count: u32,
    pages: &'a [Page],
}

#[derive(Serialize)]
struct TocDoc<'a> {
    entries: &'a [TocEntry],
}

#[derive(Serialize)]
struct ProtocolsDoc<'a> {
    protocols: &'a [Section],
}

pub struct OutputPaths {
    pub pages: PathBuf,
    pub toc: PathBuf,
    pub protocols: PathBuf,
}

/// Write the pages, TOC and protocols documents into `out_dir`.
pub fn write_corpus(out_dir: &Path, file_prefix: &str, corpus: &Corpus) -> Result<OutputPaths> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create output directory {}", out_dir.display()))?;

    let paths = OutputPaths {
        pages: out_dir.join(format!("{file_prefix}_pages.json")),
        toc: out_dir.join(format!("{file_prefix}_toc.json")),
        protocols: out_dir.join(format!("{file_prefix}_protocols.json")),
    };

    write_json(
        &paths.pages,
        &PagesDoc {
            source_pdf: &corpus.source_pdf,
            page_count: corpus.page_count(),
            pages: &corpus.pages,
        },
    )?;
    write_json(&paths.toc, &TocDoc { entries: &corpus.toc })?;
    write_json(
        &paths.protocols,
        &ProtocolsDoc {
            protocols: &corpus.sections,
        },
    )?;

    Ok(paths)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote document");
    Ok(())
}
